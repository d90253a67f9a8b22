use crate::{bail, is_registered_header_param_name, require, CriticalParams, Result};

/// A JWS header with the parameters registered by RFC 7515 Section 4.1 broken out into fields, plus the
/// validated "crit" extension parameters.  See <https://datatracker.ietf.org/doc/html/rfc7515#section-4.1>
///
/// Parsing is two-phase: the raw JSON object is parsed first, then "crit" is validated against it
/// (see [`CriticalParams::from_header_object`]), and only then are the typed fields extracted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JWSHeader {
    /// Signature algorithm.  Determines which signing primitive is used.
    pub alg: String,
    /// JWK Set URL.
    pub jku_o: Option<String>,
    /// Embedded public key, as a JWK JSON object.  Key material is opaque at this layer.
    pub jwk_o: Option<serde_json::Map<String, serde_json::Value>>,
    /// X.509 URL.
    pub x5u_o: Option<String>,
    /// X.509 certificate SHA-1 thumbprint.
    pub x5t_o: Option<String>,
    /// X.509 certificate SHA-256 thumbprint (the "x5t#S256" member).
    pub x5t_s256_o: Option<String>,
    /// X.509 certificate chain.  Must be non-empty when present.
    pub x5c_o: Option<Vec<String>>,
    /// Key identifier.  No structure is required of it.
    pub kid_o: Option<String>,
    pub typ_o: Option<String>,
    pub cty_o: Option<String>,
    /// Extension parameters that the consumer must understand.
    pub crit_o: Option<CriticalParams>,
    /// Unregistered members that are not named in "crit".  These are carried so that round trips
    /// are lossless, but nothing requires a consumer to understand them.
    pub extra_params: serde_json::Map<String, serde_json::Value>,
}

impl JWSHeader {
    /// A header with the given alg and no other parameters.
    pub fn new(alg: impl Into<String>) -> Self {
        Self {
            alg: alg.into(),
            jku_o: None,
            jwk_o: None,
            x5u_o: None,
            x5t_o: None,
            x5t_s256_o: None,
            x5c_o: None,
            kid_o: None,
            typ_o: None,
            cty_o: None,
            crit_o: None,
            extra_params: serde_json::Map::new(),
        }
    }
    pub fn with_kid(mut self, kid: impl Into<String>) -> Self {
        self.kid_o = Some(kid.into());
        self
    }
    pub fn with_typ(mut self, typ: impl Into<String>) -> Self {
        self.typ_o = Some(typ.into());
        self
    }
    pub fn with_crit(mut self, crit: CriticalParams) -> Self {
        self.crit_o = Some(crit);
        self
    }
    /// Parses a header from a JSON object.  Fails with a Schema error on a missing or non-string
    /// "alg", any mistyped registered member, or any "crit" violation.
    pub fn from_header_object(
        mut header_object: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self> {
        // The crit members must be checked against the object as received.
        let crit_o = CriticalParams::from_header_object(&header_object)?;

        let alg = match header_object.remove("alg") {
            Some(serde_json::Value::String(alg)) => alg,
            Some(_) => bail!(Schema, "alg must be a string"),
            None => bail!(Schema, "missing required alg"),
        };
        let jku_o = take_string_o(&mut header_object, "jku")?;
        let jwk_o = match header_object.remove("jwk") {
            Some(serde_json::Value::Object(jwk)) => Some(jwk),
            Some(_) => bail!(Schema, "jwk must be an object"),
            None => None,
        };
        let x5u_o = take_string_o(&mut header_object, "x5u")?;
        let x5t_o = take_string_o(&mut header_object, "x5t")?;
        let x5t_s256_o = take_string_o(&mut header_object, "x5t#S256")?;
        let x5c_o = match header_object.remove("x5c") {
            Some(serde_json::Value::Array(x5c_value_v)) => {
                require!(!x5c_value_v.is_empty(), Schema, "x5c must not be empty");
                let mut x5c_v = Vec::with_capacity(x5c_value_v.len());
                for x5c_value in x5c_value_v {
                    match x5c_value {
                        serde_json::Value::String(cert) => x5c_v.push(cert),
                        _ => bail!(Schema, "x5c elements must be strings"),
                    }
                }
                Some(x5c_v)
            }
            Some(_) => bail!(Schema, "x5c must be an array"),
            None => None,
        };
        let kid_o = take_string_o(&mut header_object, "kid")?;
        let typ_o = take_string_o(&mut header_object, "typ")?;
        let cty_o = take_string_o(&mut header_object, "cty")?;

        header_object.remove("crit");
        if let Some(crit) = crit_o.as_ref() {
            for name in crit.names() {
                header_object.remove(name);
            }
        }

        Ok(Self {
            alg,
            jku_o,
            jwk_o,
            x5u_o,
            x5t_o,
            x5t_s256_o,
            x5c_o,
            kid_o,
            typ_o,
            cty_o,
            crit_o,
            extra_params: header_object,
        })
    }
    /// Produces the JSON object form of this header.  Extension parameters named in "crit" appear as
    /// top-level members, never nested.
    pub fn to_header_object(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut header_object = self.extra_params.clone();
        if let Some(crit) = self.crit_o.as_ref() {
            crit.write_into_header_object(&mut header_object);
        }
        header_object.insert(
            "alg".to_string(),
            serde_json::Value::String(self.alg.clone()),
        );
        put_string_o(&mut header_object, "jku", &self.jku_o);
        if let Some(jwk) = self.jwk_o.as_ref() {
            header_object.insert("jwk".to_string(), serde_json::Value::Object(jwk.clone()));
        }
        put_string_o(&mut header_object, "x5u", &self.x5u_o);
        put_string_o(&mut header_object, "x5t", &self.x5t_o);
        put_string_o(&mut header_object, "x5t#S256", &self.x5t_s256_o);
        if let Some(x5c_v) = self.x5c_o.as_ref() {
            header_object.insert(
                "x5c".to_string(),
                serde_json::Value::Array(
                    x5c_v
                        .iter()
                        .map(|cert| serde_json::Value::String(cert.clone()))
                        .collect(),
                ),
            );
        }
        put_string_o(&mut header_object, "kid", &self.kid_o);
        put_string_o(&mut header_object, "typ", &self.typ_o);
        put_string_o(&mut header_object, "cty", &self.cty_o);
        header_object
    }
    /// Checks that this header reads back unchanged from its own JSON object form.  The fields are
    /// public, so a header built by hand can hold values the parser would reject or reinterpret: an
    /// extra param shadowing a registered or crit member, or an empty "x5c".  Such a header is a
    /// Schema error here rather than a JWS that can't be decoded.
    pub fn validate(&self) -> Result<()> {
        for name in self.extra_params.keys() {
            require!(
                !is_registered_header_param_name(name),
                Schema,
                "extra header param {:?} is a registered name",
                name
            );
            require!(
                !self
                    .crit_o
                    .as_ref()
                    .map(|crit| crit.contains(name))
                    .unwrap_or(false),
                Schema,
                "extra header param {:?} is also named in crit",
                name
            );
        }
        let reparsed_header = Self::from_header_object(self.to_header_object())?;
        require!(
            reparsed_header == *self,
            Schema,
            "JWS header does not read back unchanged from its JSON form"
        );
        Ok(())
    }
}

impl TryFrom<serde_json::Value> for JWSHeader {
    type Error = crate::Error;
    fn try_from(value: serde_json::Value) -> std::result::Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(header_object) => Self::from_header_object(header_object),
            _ => bail!(Schema, "JWS header must be a JSON object"),
        }
    }
}

impl serde::Serialize for JWSHeader {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        use serde::Serialize;
        self.to_header_object().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for JWSHeader {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        use serde::Deserialize;
        let header_object = serde_json::Map::deserialize(deserializer)?;
        Self::from_header_object(header_object).map_err(serde::de::Error::custom)
    }
}

fn take_string_o(
    header_object: &mut serde_json::Map<String, serde_json::Value>,
    name: &'static str,
) -> Result<Option<String>> {
    match header_object.remove(name) {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(_) => bail!(Schema, "{} must be a string", name),
        None => Ok(None),
    }
}

fn put_string_o(
    header_object: &mut serde_json::Map<String, serde_json::Value>,
    name: &'static str,
    value_o: &Option<String>,
) {
    if let Some(value) = value_o.as_ref() {
        header_object.insert(name.to_string(), serde_json::Value::String(value.clone()));
    }
}
