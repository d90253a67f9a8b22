/// Ordering policy for [`crate::GeneralJWS::merged`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum MergeOrder {
    /// Signatures of the receiver precede those of the other JWS.
    SelfFirst,
    /// Signatures of the other JWS precede those of the receiver.
    OtherFirst,
}
