use crate::JWSSignature;
use std::sync::Arc;

/// Immutable, singly-linked sequence of signatures.  Prepending returns a new list that shares the
/// existing one as its tail, so any number of lists can grow independently from a common base (even on
/// different threads) without copying or locking.
#[derive(Clone, Default)]
pub struct JWSSignatureList {
    head_o: Option<Arc<Node>>,
    len: usize,
}

struct Node {
    signature: JWSSignature,
    next_o: Option<Arc<Node>>,
}

impl JWSSignatureList {
    pub fn new() -> Self {
        Self::default()
    }
    /// Returns a new list with the given signature first, followed by all of this list's signatures.
    pub fn prepended(&self, signature: JWSSignature) -> Self {
        Self {
            head_o: Some(Arc::new(Node {
                signature,
                next_o: self.head_o.clone(),
            })),
            len: self.len + 1,
        }
    }
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn first(&self) -> Option<&JWSSignature> {
        self.head_o.as_deref().map(|node| &node.signature)
    }
    pub fn get(&self, index: usize) -> Option<&JWSSignature> {
        self.iter().nth(index)
    }
    pub fn contains(&self, signature: &JWSSignature) -> bool {
        self.iter().any(|s| s == signature)
    }
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            node_o: self.head_o.as_deref(),
        }
    }
}

impl std::fmt::Debug for JWSSignatureList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for JWSSignatureList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for JWSSignatureList {}

impl FromIterator<JWSSignature> for JWSSignatureList {
    /// The resulting list has the signatures in iteration order.
    fn from_iter<I: IntoIterator<Item = JWSSignature>>(iter: I) -> Self {
        let signature_v: Vec<JWSSignature> = iter.into_iter().collect();
        signature_v
            .into_iter()
            .rev()
            .fold(Self::new(), |list, signature| list.prepended(signature))
    }
}

impl<'a> IntoIterator for &'a JWSSignatureList {
    type Item = &'a JWSSignature;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Drop for JWSSignatureList {
    fn drop(&mut self) {
        // Unlink uniquely-owned nodes one at a time so that dropping a long list doesn't recurse.
        let mut node_o = self.head_o.take();
        while let Some(node) = node_o {
            match Arc::try_unwrap(node) {
                Ok(mut node) => node_o = node.next_o.take(),
                Err(_) => break,
            }
        }
    }
}

pub struct Iter<'a> {
    node_o: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a JWSSignature;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node_o?;
        self.node_o = node.next_o.as_deref();
        Some(&node.signature)
    }
}
