use sprintqa_core::ProcessedKey;
use std::collections::BTreeSet;

/// Keys of work already completed. Membership only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedSet {
    keys: BTreeSet<ProcessedKey>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &ProcessedKey) -> bool {
        self.keys.contains(key)
    }

    /// Record a key; returns `false` if it was already present.
    pub fn insert(&mut self, key: ProcessedKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessedKey> {
        self.keys.iter()
    }

    /// Decode keys from their ledger-file encoding.
    pub fn from_ledger_strings<S: AsRef<str>>(raw: impl IntoIterator<Item = S>) -> Self {
        raw.into_iter().map(|s| ProcessedKey::from_ledger_string(s.as_ref())).collect()
    }

    /// Ledger-file encoding of every key, in stable order.
    pub fn to_ledger_strings(&self) -> Vec<String> {
        self.keys.iter().map(ProcessedKey::to_ledger_string).collect()
    }
}

impl FromIterator<ProcessedKey> for ProcessedSet {
    fn from_iter<I: IntoIterator<Item = ProcessedKey>>(iter: I) -> Self {
        Self { keys: iter.into_iter().collect() }
    }
}
