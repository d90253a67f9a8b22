use crate::{bail, require, Result};
use std::collections::BTreeMap;

/// Header parameter names registered by RFC 7515 Section 4.1.  None of these may be named in "crit".
/// See <https://datatracker.ietf.org/doc/html/rfc7515#section-4.1.11>
pub const REGISTERED_HEADER_PARAM_NAMES: [&str; 11] = [
    "alg", "jku", "jwk", "x5u", "x5t", "x5t#S256", "x5c", "kid", "typ", "cty", "crit",
];

/// Returns true iff the given name is one of the registered JWS header parameter names.
pub fn is_registered_header_param_name(name: &str) -> bool {
    REGISTERED_HEADER_PARAM_NAMES.contains(&name)
}

/// The validated contents of a "crit" header member: a mapping from each extension parameter name
/// listed in "crit" to the value of the sibling member of the same name.  Holding one of these means
/// the mapping is non-empty, names no registered parameter, and every name had a sibling value.
///
/// When serialized back into a header, the names are emitted as the "crit" array and each name/value
/// pair is emitted as a top-level member of the header object.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CriticalParams(BTreeMap<String, serde_json::Value>);

impl CriticalParams {
    /// Construct from an explicit mapping, enforcing the same invariants that parsing does.
    pub fn new(param_m: BTreeMap<String, serde_json::Value>) -> Result<Self> {
        require!(!param_m.is_empty(), Schema, "crit must not be empty");
        for name in param_m.keys() {
            require!(
                !is_registered_header_param_name(name),
                Schema,
                "reserved name in crit: {:?}",
                name
            );
        }
        Ok(Self(param_m))
    }
    /// Validates the "crit" member of the given header object.  Returns None if there is no "crit"
    /// member.  The extension values are cloned out of the object; the caller is responsible for
    /// not also treating them as non-critical members.
    pub fn from_header_object(
        header_object: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Option<Self>> {
        let crit_value = match header_object.get("crit") {
            Some(crit_value) => crit_value,
            None => return Ok(None),
        };
        let crit_v = match crit_value {
            serde_json::Value::Array(crit_v) => crit_v,
            _ => bail!(Schema, "crit must be an array"),
        };
        require!(!crit_v.is_empty(), Schema, "crit must not be empty");

        let mut param_m = BTreeMap::new();
        for crit_element in crit_v {
            let name = match crit_element {
                serde_json::Value::String(name) => name,
                _ => bail!(Schema, "crit elements must be strings"),
            };
            require!(
                !is_registered_header_param_name(name),
                Schema,
                "reserved name in crit: {:?}",
                name
            );
            let value = match header_object.get(name) {
                Some(value) => value,
                None => bail!(Schema, "crit parameter missing: {:?}", name),
            };
            require!(
                param_m.insert(name.clone(), value.clone()).is_none(),
                Schema,
                "duplicate name in crit: {:?}",
                name
            );
        }
        Ok(Some(Self(param_m)))
    }
    /// Writes the "crit" array and each extension parameter into the given header object.
    pub fn write_into_header_object(
        &self,
        header_object: &mut serde_json::Map<String, serde_json::Value>,
    ) {
        let name_v = self
            .0
            .keys()
            .map(|name| serde_json::Value::String(name.clone()))
            .collect();
        header_object.insert("crit".to_string(), serde_json::Value::Array(name_v));
        for (name, value) in self.0.iter() {
            header_object.insert(name.clone(), value.clone());
        }
    }
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }
    /// Iterates over the critical extension parameter names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Always false; an empty "crit" can't be constructed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn into_inner(self) -> BTreeMap<String, serde_json::Value> {
        self.0
    }
}
