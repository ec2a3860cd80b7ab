//! Entity tags

use std::fmt;

/// A named classification attached to entities, compared by precomputed hash.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    name: Box<str>,
    hash: u64,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        // FNV-1a
        let mut hash = 0xcbf29ce484222325u64;
        for byte in name.bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }

        Self {
            name: name.into(),
            hash,
        }
    }

    /// The tag the AI looks for when acquiring a target
    pub fn player() -> Self {
        Self::new("player")
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({:?})", self.name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
