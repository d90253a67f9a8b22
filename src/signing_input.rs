use crate::{JWSHeaderUnion, JWSPayload};

/// Builds the exact byte sequence that gets signed or verified for one signature:
///
/// `<verbatim protected header>.<base64url(payload)>`
///
/// The left segment is the protected header string exactly as it was encoded or received (never a
/// re-serialization), or the empty string if there is no protected header, in which case the output
/// starts with '.'.  The unprotected header never contributes to the signing input.
/// See RFC 7515 Section 5.1 <https://datatracker.ietf.org/doc/html/rfc7515#section-5.1>
pub fn signing_input(header_union: &JWSHeaderUnion, payload: &JWSPayload) -> Vec<u8> {
    let protected_str = header_union
        .protected_o()
        .map(|protected| protected.as_str())
        .unwrap_or("");
    let mut signing_input = Vec::with_capacity(protected_str.len() + 1 + payload.as_str().len());
    signing_input.extend_from_slice(protected_str.as_bytes());
    signing_input.push(b'.');
    signing_input.extend_from_slice(payload.as_str().as_bytes());
    signing_input
}

/// Streaming form of [`signing_input`], e.g. for feeding a hasher directly.
pub fn write_signing_input(
    header_union: &JWSHeaderUnion,
    payload: &JWSPayload,
    writer: &mut dyn std::io::Write,
) -> std::io::Result<()> {
    if let Some(protected) = header_union.protected_o() {
        writer.write_all(protected.as_str().as_bytes())?;
    }
    writer.write_all(b".")?;
    writer.write_all(payload.as_str().as_bytes())
}
