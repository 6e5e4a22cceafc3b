use std::hash::Hash;

use rustc_hash::FxHashMap;

use super::WrappedScore;

#[derive(Debug, Clone)]
/// Memoizes the value of searched nodes for the duration of one search
///
/// Entries are keyed on the canonical state key, the remaining search depth and the agent to
/// move. The same board searched with a different depth budget left has a different value, so
/// the remaining depth can never be left out of the key.
///
/// Only exact values are stored. A node that was cut off by alpha-beta only knows a bound on its
/// value, and handing that bound to another part of the tree would change the search result.
pub struct TranspositionCache<Key>
where
    Key: Hash + Eq,
{
    entries: FxHashMap<(Key, usize, usize), WrappedScore>,
}

impl<Key> Default for TranspositionCache<Key>
where
    Key: Hash + Eq,
{
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<Key> TranspositionCache<Key>
where
    Key: Hash + Eq,
{
    /// An empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The value previously stored for this key at this remaining depth, if any
    pub fn lookup(
        &self,
        key: Key,
        remaining_depth: usize,
        agent_index: usize,
    ) -> Option<WrappedScore> {
        self.entries
            .get(&(key, remaining_depth, agent_index))
            .copied()
    }

    /// Remember the exact value of a node
    pub fn store(
        &mut self,
        key: Key,
        remaining_depth: usize,
        agent_index: usize,
        score: WrappedScore,
    ) {
        self.entries
            .insert((key, remaining_depth, agent_index), score);
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use decorum::N64;

    use super::*;

    #[test]
    fn test_lookup_after_store() {
        let mut cache = TranspositionCache::new();
        let score = WrappedScore::Scored(N64::from(4.0));

        assert!(cache.is_empty());
        cache.store("board", 2, 0, score);

        assert_eq!(cache.lookup("board", 2, 0), Some(score));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remaining_depth_is_part_of_the_key() {
        let mut cache = TranspositionCache::new();
        cache.store("board", 2, 0, WrappedScore::Scored(N64::from(4.0)));

        assert_eq!(cache.lookup("board", 1, 0), None);
        assert_eq!(cache.lookup("board", 3, 0), None);
    }

    #[test]
    fn test_agent_is_part_of_the_key() {
        let mut cache = TranspositionCache::new();
        cache.store("board", 2, 0, WrappedScore::Scored(N64::from(4.0)));

        assert_eq!(cache.lookup("board", 2, 1), None);
    }
}
