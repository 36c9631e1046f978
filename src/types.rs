use std::fmt::{Display, Formatter};

/// A key-value pair held by a skip list node. Never mutated once created.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K: Display, V: Display> Display for Entry<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InsertOutcome {
    Inserted,
    /// The key was already present; the stored value is left as it was.
    AlreadyExists,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}
