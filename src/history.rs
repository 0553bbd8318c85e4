//! Append-only search history.

/// Per-level records of an iterative search, in the order they happened.
///
/// Levels are temperature steps for simulated annealing and generations
/// for the ant colony. Records cannot be modified once appended.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchHistory<L> {
    levels: Vec<L>,
}

impl<L> Default for SearchHistory<L> {
    fn default() -> Self {
        Self { levels: Vec::new() }
    }
}

impl<L> SearchHistory<L> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, level: L) {
        self.levels.push(level);
    }

    /// Number of recorded levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// All recorded levels, oldest first.
    pub fn levels(&self) -> &[L] {
        &self.levels
    }

    /// The most recent level.
    pub fn last(&self) -> Option<&L> {
        self.levels.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, L> {
        self.levels.iter()
    }
}

impl<'a, L> IntoIterator for &'a SearchHistory<L> {
    type Item = &'a L;
    type IntoIter = std::slice::Iter<'a, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
