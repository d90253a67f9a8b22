use std::borrow::Cow;

/// The result of checking one signature.  "Could not check" is its own outcome, distinct from both
/// "verified" and "cryptographically invalid".
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VerificationOutcome {
    /// The signature was checked and is valid.
    Good,
    /// The signature was checked and is not valid.
    Bad(Cow<'static, str>),
    /// The signature could not be checked, e.g. unsupported or missing alg, or a signature value that
    /// isn't valid base64url.
    Indeterminate(Cow<'static, str>),
}

impl VerificationOutcome {
    pub fn bad(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Bad(reason.into())
    }
    pub fn indeterminate(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Indeterminate(reason.into())
    }
    pub fn is_good(&self) -> bool {
        matches!(self, Self::Good)
    }
    pub fn is_bad(&self) -> bool {
        matches!(self, Self::Bad(_))
    }
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate(_))
    }
}

impl std::fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => f.write_str("good"),
            Self::Bad(reason) => write!(f, "bad: {}", reason),
            Self::Indeterminate(reason) => write!(f, "indeterminate: {}", reason),
        }
    }
}
