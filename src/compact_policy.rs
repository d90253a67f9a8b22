/// Controls when [`crate::GeneralJWS::encode_compact_with_policy`] produces output.  The compact
/// serialization has no place for an unprotected header.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CompactPolicy {
    /// Present iff there is exactly one signature.  An unprotected header on that signature is
    /// dropped; if there is no protected header, the first segment is empty.
    #[default]
    Lenient,
    /// Present iff there is exactly one signature and it has only a protected header.
    RequireProtectedOnly,
}
