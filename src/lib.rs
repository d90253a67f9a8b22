//! Object model, validation, and serialization of JSON Web Signatures (RFC 7515), with any number of
//! signatures per payload.
//!
//! The cryptographic primitives are supplied through the [`JWSSignerT`] and [`JWSVerifierT`] traits;
//! implementations for common key types are provided behind cargo features.  This crate owns the framing:
//! which header members exist and how protected and unprotected headers combine, the exact signing input,
//! and the compact, general JSON, and flattened JSON serializations.

mod compact_policy;
mod critical_params;
mod encoded_header;
mod error;
mod general_jws;
#[cfg(feature = "hmac")]
mod hmac_key;
mod jose_algorithm_t;
mod jws_header;
mod jws_header_union;
mod jws_payload;
mod jws_signature;
mod jws_signature_list;
mod jws_signer_t;
mod jws_verifier_t;
mod merge_order;
mod none_key;
mod signing_input;
mod verification_outcome;

#[cfg(feature = "hmac")]
pub use crate::hmac_key::HMACKey;
pub use crate::{
    compact_policy::CompactPolicy,
    critical_params::{
        is_registered_header_param_name, CriticalParams, REGISTERED_HEADER_PARAM_NAMES,
    },
    encoded_header::EncodedHeader,
    error::Error,
    general_jws::GeneralJWS,
    jose_algorithm_t::JOSEAlgorithmT,
    jws_header::JWSHeader,
    jws_header_union::JWSHeaderUnion,
    jws_payload::JWSPayload,
    jws_signature::JWSSignature,
    jws_signature_list::{Iter as JWSSignatureIter, JWSSignatureList},
    jws_signer_t::JWSSignerT,
    jws_verifier_t::JWSVerifierT,
    merge_order::MergeOrder,
    none_key::NoneKey,
    signing_input::{signing_input, write_signing_input},
    verification_outcome::VerificationOutcome,
};

pub type Result<T> = std::result::Result<T, Error>;
