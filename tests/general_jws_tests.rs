use base64::Engine;
use general_jws::{
    signing_input, EncodedHeader, Error, GeneralJWS, JWSHeader, JWSHeaderUnion, JWSPayload,
    JWSSignerT, NoneKey, Result, VerificationOutcome,
};
#[cfg(feature = "hmac")]
use general_jws::{CompactPolicy, HMACKey, MergeOrder};
use std::sync::Mutex;

/// This will run once at load time (i.e. presumably before main function is called).
#[ctor::ctor]
fn overall_init() {
    // It's necessary to specify EnvFilter::from_default_env in order to use RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_target(true)
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();
}

fn base64url(bytes: &[u8]) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Signs with NoneKey, recording every (alg, signing input) it was invoked with.
#[derive(Default)]
struct RecordingSigner {
    call_v: Mutex<Vec<(String, Vec<u8>)>>,
}

impl JWSSignerT for RecordingSigner {
    fn sign_jws(&self, alg: &str, signing_input: &[u8]) -> Result<Vec<u8>> {
        self.call_v
            .lock()
            .expect("pass")
            .push((alg.to_string(), signing_input.to_vec()));
        NoneKey.sign_jws(alg, signing_input)
    }
}

fn hmac_protected(kid: &str) -> JWSHeaderUnion {
    JWSHeaderUnion::protected(JWSHeader::new("HS256").with_kid(kid)).expect("pass")
}

#[test]
fn test_alg_none_end_to_end() {
    let jws = GeneralJWS::new(JWSPayload::from_bytes(b"hello"));
    assert_eq!(jws.payload().as_str(), base64url(b"hello"));
    assert!(jws.signatures().is_empty());

    let recording_signer = RecordingSigner::default();
    let header_union = JWSHeaderUnion::protected(JWSHeader::new("none")).expect("pass");
    let signed_jws = jws.signed(header_union, &recording_signer).expect("pass");

    let call_v = recording_signer.call_v.lock().expect("pass");
    assert_eq!(call_v.len(), 1);
    let expected_signing_input = format!(
        "{}.{}",
        base64url(br#"{"alg":"none"}"#),
        base64url(b"hello")
    );
    assert_eq!(call_v[0].0, "none");
    assert_eq!(call_v[0].1, expected_signing_input.as_bytes());

    let compact = signed_jws.encode_compact().expect("pass");
    println!("compact: {}", compact);
    assert_eq!(compact.matches('.').count(), 2);
    assert_eq!(compact.split('.').nth(2), Some(""));
    assert_eq!(compact, format!("{}.", expected_signing_input));

    assert_eq!(signed_jws.verify_signature(0, &NoneKey), VerificationOutcome::Good);
}

#[cfg(feature = "hmac")]
#[test]
fn test_sign_prepends_and_does_not_mutate() {
    let base = GeneralJWS::from_payload_bytes(b"payload");
    let key = HMACKey::new(b"key".to_vec());
    let jws_1 = base.signed(hmac_protected("1"), &key).expect("pass");
    let jws_2 = jws_1.signed(hmac_protected("2"), &key).expect("pass");
    let jws_3 = jws_2.signed(hmac_protected("3"), &key).expect("pass");

    assert_eq!(base.signatures().len(), 0);
    assert_eq!(jws_1.signatures().len(), 1);
    assert_eq!(jws_2.signatures().len(), 2);
    assert_eq!(jws_3.signatures().len(), 3);

    let kid_v: Vec<String> = jws_3
        .signatures()
        .iter()
        .map(|signature| {
            signature
                .header_union
                .protected_o()
                .and_then(EncodedHeader::header_o)
                .and_then(|header| header.kid_o.clone())
                .expect("pass")
        })
        .collect();
    assert_eq!(kid_v, vec!["3", "2", "1"]);
    // The prior signatures follow the new one unchanged.
    assert_eq!(jws_3.signatures().get(1), jws_2.signatures().first());
    assert_eq!(jws_3.signatures().get(2), jws_1.signatures().first());
    assert_eq!(jws_3.payload(), base.payload());

    for outcome in jws_3.verify_all(&key) {
        assert_eq!(outcome, VerificationOutcome::Good);
    }
}

#[cfg(feature = "hmac")]
#[test]
fn test_compact_definedness() {
    let key = HMACKey::new(b"key".to_vec());
    let jws_0 = GeneralJWS::from_payload_bytes(b"x");
    let jws_1 = jws_0.signed(hmac_protected("1"), &key).expect("pass");
    let jws_2 = jws_1.signed(hmac_protected("2"), &key).expect("pass");

    assert!(jws_0.encode_compact().is_none());
    assert!(jws_1.encode_compact().is_some());
    assert!(jws_2.encode_compact().is_none());

    let e = jws_2
        .to_compact_string(CompactPolicy::Lenient)
        .expect_err("pass");
    println!("expected error: {}", e);
    assert!(matches!(e, Error::Serialization(_)));

    // A compact JWS decodes back to an equal JWS and re-encodes byte-identically.
    let compact = jws_1.encode_compact().expect("pass");
    let decoded = GeneralJWS::decode_compact(&compact).expect("pass");
    assert_eq!(decoded, jws_1);
    assert_eq!(decoded.encode_compact().as_deref(), Some(compact.as_str()));
    assert!(decoded.verify_signature(0, &key).is_good());
}

#[cfg(feature = "hmac")]
#[test]
fn test_compact_policy() {
    let key = HMACKey::new(b"key".to_vec());
    let header_union =
        JWSHeaderUnion::both(JWSHeader::new("HS256"), JWSHeader::new("HS256").with_kid("k"))
            .expect("pass");
    let jws = GeneralJWS::from_payload_bytes(b"x")
        .signed(header_union, &key)
        .expect("pass");

    // Lenient drops the unprotected header.
    let compact = jws.encode_compact().expect("pass");
    let decoded = GeneralJWS::decode_compact(&compact).expect("pass");
    let decoded_signature = decoded.signatures().first().expect("pass");
    assert!(matches!(
        decoded_signature.header_union,
        JWSHeaderUnion::Protected(_)
    ));
    assert!(decoded.verify_signature(0, &key).is_good());

    assert!(jws
        .encode_compact_with_policy(CompactPolicy::RequireProtectedOnly)
        .is_none());
    assert!(matches!(
        jws.to_compact_string(CompactPolicy::RequireProtectedOnly),
        Err(Error::Serialization(_))
    ));

    let unprotected_jws = GeneralJWS::from_payload_bytes(b"x")
        .signed(JWSHeaderUnion::unprotected(JWSHeader::new("HS256")), &key)
        .expect("pass");
    let compact = unprotected_jws.encode_compact().expect("pass");
    assert!(compact.starts_with('.'));
    assert!(unprotected_jws
        .encode_compact_with_policy(CompactPolicy::RequireProtectedOnly)
        .is_none());
}

#[test]
fn test_signing_input_determinism() {
    let payload = JWSPayload::from_bytes(b"some payload");
    let header_union = hmac_protected("k");
    assert_eq!(
        signing_input(&header_union, &payload),
        signing_input(&header_union.clone(), &payload.clone())
    );

    let unprotected = JWSHeaderUnion::unprotected(JWSHeader::new("HS256"));
    let signing_input_bytes = signing_input(&unprotected, &payload);
    assert_eq!(signing_input_bytes, signing_input(&unprotected, &payload));
    assert_eq!(signing_input_bytes, format!(".{}", payload).into_bytes());

    // The unprotected member of Both doesn't contribute.
    let both = JWSHeaderUnion::Both {
        protected: header_union.protected_o().expect("pass").clone(),
        unprotected: JWSHeader::new("HS512"),
    };
    assert_eq!(
        signing_input(&both, &payload),
        signing_input(&header_union, &payload)
    );

    let mut streamed = Vec::new();
    general_jws::write_signing_input(&both, &payload, &mut streamed).expect("pass");
    assert_eq!(streamed, signing_input(&both, &payload));
}

#[test]
fn test_protected_alg_takes_precedence() {
    let header_union =
        JWSHeaderUnion::both(JWSHeader::new("RS256"), JWSHeader::new("HS256")).expect("pass");
    assert_eq!(header_union.alg_o(), Some("RS256"));

    let header_union = JWSHeaderUnion::unprotected(JWSHeader::new("HS256"));
    assert_eq!(header_union.alg_o(), Some("HS256"));
}

#[cfg(feature = "hmac")]
#[test]
fn test_signing_uses_protected_alg() {
    // The HMAC key is asked to sign with RS256, which it doesn't support.
    let header_union =
        JWSHeaderUnion::both(JWSHeader::new("RS256"), JWSHeader::new("HS256")).expect("pass");
    let e = GeneralJWS::from_payload_bytes(b"x")
        .signed(header_union, &HMACKey::new(b"key".to_vec()))
        .expect_err("pass");
    assert!(matches!(e, Error::Crypto(_)));
}

#[test]
fn test_parse_rejects_signature_without_headers() {
    let e = GeneralJWS::decode_json(r#"{"signatures":[{"signature":"AA"}]}"#).expect_err("pass");
    println!("expected error: {}", e);
    assert!(matches!(e, Error::Schema(_)));

    let e = GeneralJWS::decode_json(r#"{"payload":"aGVsbG8","signatures":[{"signature":"AA"}]}"#)
        .expect_err("pass");
    println!("expected error: {}", e);
    assert!(matches!(e, Error::Schema(_)));
}

#[test]
fn test_parse_requires_wire_members() {
    for (json_str, expect_decode) in [
        (r#"{"signatures":[]}"#, false),
        (r#"{"payload":"aGVsbG8"}"#, false),
        (r#"{"payload":"aGVsbG8","signatures":{}}"#, false),
        (r#"{"payload":5,"signatures":[]}"#, false),
        (r#"{"payload":"aGVsbG8","signatures":["x"]}"#, false),
        (r#"{"payload":"aGVsbG8","signatures":[{"header":{"alg":"none"}}]}"#, false),
        (r#"{"payload":"a+b/","signatures":[]}"#, true),
        (r#"{"payload":"aGVsbG8","#, true),
    ] {
        let e = GeneralJWS::decode_json(json_str).expect_err("pass");
        println!("{} -> {}", json_str, e);
        if expect_decode {
            assert!(matches!(e, Error::Decode(_)));
        } else {
            assert!(matches!(e, Error::Schema(_)));
        }
    }

    let jws = GeneralJWS::decode_json(r#"{"payload":"aGVsbG8","signatures":[]}"#).expect("pass");
    assert!(jws.signatures().is_empty());
    assert_eq!(jws.payload().decoded().expect("pass"), b"hello".to_vec());
}

#[cfg(feature = "hmac")]
#[test]
fn test_general_json_roundtrip_and_verify() {
    let key = HMACKey::new(b"a shared secret".to_vec());
    let jws = GeneralJWS::from_payload_bytes(br#"{"iss":"joe"}"#)
        .signed(hmac_protected("p"), &key)
        .expect("pass")
        .signed(
            JWSHeaderUnion::unprotected(JWSHeader::new("HS384").with_kid("u")),
            &key,
        )
        .expect("pass")
        .signed(
            JWSHeaderUnion::both(JWSHeader::new("HS512"), JWSHeader::new("none").with_kid("b"))
                .expect("pass"),
            &key,
        )
        .expect("pass");

    let json_str = jws.encode_json().expect("pass");
    println!("general JSON: {}", json_str);
    let decoded = GeneralJWS::decode_json(&json_str).expect("pass");
    assert_eq!(decoded, jws);
    assert_eq!(decoded.encode_json().expect("pass"), json_str);

    let signature_value_v = jws.to_json_value()["signatures"]
        .as_array()
        .expect("pass")
        .clone();
    assert!(signature_value_v[0].get("protected").is_some());
    assert!(signature_value_v[0].get("header").is_some());
    assert!(signature_value_v[1].get("protected").is_none());
    assert!(signature_value_v[1].get("header").is_some());
    assert!(signature_value_v[2].get("protected").is_some());
    assert!(signature_value_v[2].get("header").is_none());

    for outcome in decoded.verify_all(&key) {
        assert_eq!(outcome, VerificationOutcome::Good);
    }

    // serde impls go through the same code paths.
    let reparsed: GeneralJWS = serde_json::from_str(&json_str).expect("pass");
    assert_eq!(reparsed, jws);
}

#[cfg(feature = "hmac")]
#[test]
fn test_verification_uses_verbatim_protected_header() {
    let key = HMACKey::new(b"key".to_vec());
    let header_json = r#"{"typ":"JWT",
 "alg":"HS256"}"#;
    let protected = EncodedHeader::decode(base64url(header_json.as_bytes())).expect("pass");
    let payload = JWSPayload::from_bytes(b"payload");
    let header_union = JWSHeaderUnion::Protected(protected.clone());
    let signature_bytes = key
        .sign_jws("HS256", &signing_input(&header_union, &payload))
        .expect("pass");
    let compact = format!(
        "{}.{}.{}",
        protected,
        payload,
        base64url(&signature_bytes)
    );

    let decoded = GeneralJWS::decode_compact(&compact).expect("pass");
    assert!(decoded.verify_signature(0, &key).is_good());
    assert_eq!(decoded.encode_compact().as_deref(), Some(compact.as_str()));
    let json_str = decoded.encode_json().expect("pass");
    let from_json = GeneralJWS::decode_json(&json_str).expect("pass");
    assert!(from_json.verify_signature(0, &key).is_good());
}

#[test]
fn test_header_union_parse_fallback() {
    let jws = GeneralJWS::decode_json(
        r#"{"payload":"aGVsbG8","signatures":[{"protected":"!!!","header":{"alg":"HS256"},"signature":"AA"}]}"#,
    )
    .expect("pass");
    let signature = jws.signatures().first().expect("pass");
    assert_eq!(
        signature.header_union,
        JWSHeaderUnion::Unprotected(JWSHeader::new("HS256"))
    );

    // An unusable "header" member falls back to Protected.
    let protected_str = base64url(br#"{"alg":"HS256"}"#);
    let jws = GeneralJWS::decode_json(&format!(
        r#"{{"payload":"aGVsbG8","signatures":[{{"protected":"{}","header":{{"kid":"no alg"}},"signature":"AA"}}]}}"#,
        protected_str
    ))
    .expect("pass");
    let signature = jws.signatures().first().expect("pass");
    assert!(matches!(signature.header_union, JWSHeaderUnion::Protected(_)));

    // Neither usable: the protected member's error is reported.
    let e = GeneralJWS::decode_json(
        r#"{"payload":"aGVsbG8","signatures":[{"protected":"!!!","header":{"kid":"x"},"signature":"AA"}]}"#,
    )
    .expect_err("pass");
    assert!(matches!(e, Error::Decode(_)));
}

#[cfg(feature = "hmac")]
#[test]
fn test_verification_outcomes_are_three_valued() {
    let key = HMACKey::new(b"key".to_vec());
    let jws = GeneralJWS::from_payload_bytes(b"original")
        .signed(hmac_protected("k"), &key)
        .expect("pass");
    assert!(jws.verify_signature(0, &key).is_good());

    // Wrong key: checked and invalid.
    assert!(jws
        .verify_signature(0, &HMACKey::new(b"other key".to_vec()))
        .is_bad());

    // Tampered payload: checked and invalid.
    let tampered = GeneralJWS::from_parts(
        JWSPayload::from_bytes(b"tampered"),
        jws.signatures().clone(),
    );
    assert!(tampered.verify_signature(0, &key).is_bad());

    // Malformed signature value: can't be checked.
    let malformed = GeneralJWS::decode_json(&format!(
        r#"{{"payload":"{}","signatures":[{{"protected":"{}","signature":"***"}}]}}"#,
        jws.payload(),
        jws.signatures()
            .first()
            .expect("pass")
            .header_union
            .protected_o()
            .expect("pass")
    ))
    .expect("pass");
    assert!(malformed.verify_signature(0, &key).is_indeterminate());

    // Unsupported alg: can't be checked.
    let es256_jws = GeneralJWS::from_payload_bytes(b"x")
        .signed(
            JWSHeaderUnion::protected(JWSHeader::new("ES256")).expect("pass"),
            &NoneKeyForAnyAlg,
        )
        .expect("pass");
    assert!(es256_jws.verify_signature(0, &key).is_indeterminate());

    // No such signature.
    assert!(jws.verify_signature(1, &key).is_indeterminate());
}

/// Produces an empty signature for any alg, to construct JWSes with algs no test key supports.
#[cfg(feature = "hmac")]
struct NoneKeyForAnyAlg;

#[cfg(feature = "hmac")]
impl JWSSignerT for NoneKeyForAnyAlg {
    fn sign_jws(&self, _alg: &str, _signing_input: &[u8]) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

#[test]
fn test_opaque_protected_header() {
    let header_union = JWSHeaderUnion::Protected(EncodedHeader::from_opaque_bytes(b"\x01\x02"));
    assert_eq!(header_union.alg_o(), None);
    let e = GeneralJWS::from_payload_bytes(b"x")
        .signed(header_union.clone(), &NoneKey)
        .expect_err("pass");
    assert!(matches!(e, Error::Crypto(_)));

    // An opaque protected header still governs alg selection, even with an unprotected alg present.
    let both = JWSHeaderUnion::Both {
        protected: EncodedHeader::from_opaque_bytes(b"\x01\x02"),
        unprotected: JWSHeader::new("none"),
    };
    assert_eq!(both.alg_o(), None);
    let signature_input = signing_input(&both, &JWSPayload::from_bytes(b"x"));
    assert!(signature_input.starts_with(base64url(b"\x01\x02").as_bytes()));
}

#[cfg(feature = "hmac")]
#[test]
fn test_merge() {
    let key_a = HMACKey::new(b"a".to_vec());
    let key_b = HMACKey::new(b"b".to_vec());
    let base = GeneralJWS::from_payload_bytes(b"x")
        .signed(hmac_protected("base"), &key_a)
        .expect("pass");
    let jws_a = base.signed(hmac_protected("a"), &key_a).expect("pass");
    let jws_b = base.signed(hmac_protected("b"), &key_b).expect("pass");

    let kid_v_of = |jws: &GeneralJWS| -> Vec<String> {
        jws.signatures()
            .iter()
            .map(|signature| {
                signature
                    .header_union
                    .protected_o()
                    .and_then(EncodedHeader::header_o)
                    .and_then(|header| header.kid_o.clone())
                    .expect("pass")
            })
            .collect()
    };

    let merged = jws_a.merged(&jws_b, MergeOrder::SelfFirst).expect("pass");
    assert_eq!(kid_v_of(&merged), vec!["a", "base", "b"]);
    let merged = jws_a.merged(&jws_b, MergeOrder::OtherFirst).expect("pass");
    assert_eq!(kid_v_of(&merged), vec!["b", "base", "a"]);

    let other_payload = GeneralJWS::from_payload_bytes(b"y");
    assert!(matches!(
        jws_a.merged(&other_payload, MergeOrder::SelfFirst),
        Err(Error::Schema(_))
    ));
}

#[cfg(feature = "hmac")]
#[test]
fn test_concurrent_signing_from_common_base() {
    let base = GeneralJWS::from_payload_bytes(b"shared payload");
    let key_v: Vec<HMACKey> = (0..4u8).map(|i| HMACKey::new(vec![i; 32])).collect();
    let signed_v: Vec<GeneralJWS> = std::thread::scope(|scope| {
        let handle_v: Vec<_> = key_v
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let base = &base;
                scope.spawn(move || {
                    base.signed(hmac_protected(&i.to_string()), key)
                        .expect("pass")
                })
            })
            .collect();
        handle_v
            .into_iter()
            .map(|handle| handle.join().expect("pass"))
            .collect()
    });
    assert!(base.signatures().is_empty());

    let merged = signed_v
        .iter()
        .try_fold(base.clone(), |acc, jws| acc.merged(jws, MergeOrder::SelfFirst))
        .expect("pass");
    assert_eq!(merged.signatures().len(), 4);
    // Each signature verifies under exactly its own key.
    for (i, key) in key_v.iter().enumerate() {
        let outcome_v = merged.verify_all(key);
        assert_eq!(outcome_v.iter().filter(|o| o.is_good()).count(), 1);
        assert!(outcome_v[i].is_good());
    }
}

#[cfg(feature = "hmac")]
#[test]
fn test_flattened_json() {
    let key = HMACKey::new(b"key".to_vec());
    let jws = GeneralJWS::from_payload_bytes(b"flat")
        .signed(
            JWSHeaderUnion::both(JWSHeader::new("HS256"), JWSHeader::new("HS256").with_kid("k"))
                .expect("pass"),
            &key,
        )
        .expect("pass");
    let flattened = jws.encode_flattened_json().expect("pass");
    println!("flattened JSON: {}", flattened);
    let decoded = GeneralJWS::decode_flattened_json(&flattened).expect("pass");
    assert_eq!(decoded, jws);
    assert!(decoded.verify_signature(0, &key).is_good());

    assert!(GeneralJWS::from_payload_bytes(b"flat")
        .encode_flattened_json()
        .is_none());
    let general = jws.encode_json().expect("pass");
    assert!(matches!(
        GeneralJWS::decode_flattened_json(&general),
        Err(Error::Schema(_))
    ));
}

#[test]
fn test_decode_compact_errors() {
    let protected = base64url(br#"{"alg":"none"}"#);
    for compact in [
        format!("{}.aGVsbG8", protected),
        format!("{}.aGVsbG8..", protected),
        format!("{}.a+b.", protected),
        "eyJ.aGVsbG8.".to_string(),
        ".aGVsbG8.".to_string(),
    ] {
        let e = GeneralJWS::decode_compact(&compact).expect_err("pass");
        println!("{} -> {}", compact, e);
        assert!(matches!(e, Error::Decode(_)));
    }
}

#[test]
fn test_signing_rejects_headers_that_would_not_decode() {
    let base = GeneralJWS::from_payload_bytes(b"x");

    // An unprotected header whose extra params shadow "alg" would serialize to {"alg":5}.
    let mut bad_unprotected = JWSHeader::new("none");
    bad_unprotected
        .extra_params
        .insert("alg".to_string(), serde_json::json!(5));
    let e = base
        .signed(JWSHeaderUnion::Unprotected(bad_unprotected.clone()), &NoneKey)
        .expect_err("pass");
    println!("expected error: {}", e);
    assert!(matches!(e, Error::Schema(_)));
    assert!(matches!(
        JWSHeaderUnion::both(JWSHeader::new("none"), bad_unprotected.clone()),
        Err(Error::Schema(_))
    ));
    let e = base
        .signed(
            JWSHeaderUnion::Both {
                protected: EncodedHeader::from_header(JWSHeader::new("none")).expect("pass"),
                unprotected: bad_unprotected,
            },
            &NoneKey,
        )
        .expect_err("pass");
    assert!(matches!(e, Error::Schema(_)));

    let mut empty_x5c = JWSHeader::new("none");
    empty_x5c.x5c_o = Some(Vec::new());
    assert!(matches!(
        JWSHeaderUnion::protected(empty_x5c.clone()),
        Err(Error::Schema(_))
    ));
    let e = base
        .signed(JWSHeaderUnion::unprotected(empty_x5c), &NoneKey)
        .expect_err("pass");
    assert!(matches!(e, Error::Schema(_)));

    // Nothing was signed, so nothing undecodable can have been produced.
    assert!(base.signatures().is_empty());

    // A valid hand-built header still signs and decodes.
    let mut good = JWSHeader::new("none");
    good.extra_params
        .insert("nonce".to_string(), serde_json::json!("n-0S6_WzA2Mj"));
    let jws = base
        .signed(JWSHeaderUnion::unprotected(good), &NoneKey)
        .expect("pass");
    let decoded = GeneralJWS::decode_json(&jws.encode_json().expect("pass")).expect("pass");
    assert_eq!(decoded, jws);
}
