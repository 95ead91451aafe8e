use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Insertion-ordered mapping between node keys and dense indices `0..len`.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    keys: IndexSet<String, FxBuildHasher>,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: IndexSet::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Appends `key` and returns its index, or `None` if the key is already present.
    pub fn insert(&mut self, key: impl Into<String>) -> Option<usize> {
        let (idx, inserted) = self.keys.insert_full(key.into());
        inserted.then_some(idx)
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.keys.get_index_of(key)
    }

    pub fn key(&self, index: usize) -> Option<&str> {
        self.keys.get_index(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

// `IndexSet` equality ignores order; two indices only match when every key has the same index.
impl PartialEq for NodeIndex {
    fn eq(&self, other: &Self) -> bool {
        self.keys.len() == other.keys.len() && self.keys.iter().eq(other.keys.iter())
    }
}

impl Eq for NodeIndex {}

#[cfg(test)]
mod tests {
    use super::NodeIndex;

    #[test]
    fn indices_follow_insertion_order() {
        let mut idx = NodeIndex::new();
        assert_eq!(idx.insert("b"), Some(0));
        assert_eq!(idx.insert("a"), Some(1));
        assert_eq!(idx.insert("b"), None);
        assert_eq!(idx.get("a"), Some(1));
        assert_eq!(idx.get("zzz"), None);
        assert_eq!(idx.key(0), Some("b"));
        assert_eq!(idx.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let mut ab = NodeIndex::with_capacity(2);
        ab.insert("a");
        ab.insert("b");
        let mut ba = NodeIndex::new();
        ba.insert("b");
        ba.insert("a");
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }
}
