use std::borrow::Cow;

/// Error taxonomy for parsing, serializing, and signing JWS objects.  Parsing fails closed: any of
/// these rejects the whole object.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Malformed base64url or malformed JSON at any layer.
    #[error("Decode error: {0}")]
    Decode(Cow<'static, str>),
    /// Well-formed JSON that violates the JWS object model (missing `alg`, bad `crit`, missing
    /// required wire members, etc).
    #[error("Schema error: {0}")]
    Schema(Cow<'static, str>),
    /// A serialization was requested that can't represent the given value.
    #[error("Serialization error: {0}")]
    Serialization(Cow<'static, str>),
    /// Failure inside a signing primitive, or an unsupported algorithm.
    #[error("Crypto error: {0}")]
    Crypto(Cow<'static, str>),
}

impl Error {
    /// Returns the message without the error class prefix.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Decode(s) | Self::Schema(s) | Self::Serialization(s) | Self::Crypto(s) => {
                s.as_ref()
            }
        }
    }
}

/// This will construct an Error of the given variant from a literal or a format string.
#[macro_export]
macro_rules! error {
    ($variant: ident, $msg: literal) => {
        $crate::Error::$variant(::std::borrow::Cow::Borrowed($msg))
    };
    ($variant: ident, $format_str: literal, $($arg:tt)*) => {
        $crate::Error::$variant(::std::borrow::Cow::Owned(format!($format_str, $($arg)*)))
    };
}

/// This will unconditionally return with the formatted error.
#[macro_export]
macro_rules! bail {
    ($variant: ident, $msg: literal) => {
        { return Err($crate::error!($variant, $msg)); }
    };
    ($variant: ident, $format_str: literal, $($arg:tt)*) => {
        { return Err($crate::error!($variant, $format_str, $($arg)*)); }
    };
}

/// This will return with the formatted error if the condition is not met.
#[macro_export]
macro_rules! require {
    ($condition: expr, $variant: ident, $msg: literal) => {
        if !$condition {
            return Err($crate::error!($variant, $msg));
        }
    };
    ($condition: expr, $variant: ident, $format_str: literal, $($arg:tt)*) => {
        if !$condition {
            return Err($crate::error!($variant, $format_str, $($arg)*));
        }
    };
}
