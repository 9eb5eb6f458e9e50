//! The set of characters a site renders.

use indexmap::IndexSet;

/// Distinct Unicode scalar values, kept in first-seen order.
///
/// Order carries no meaning; equality is set equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSet(IndexSet<char>);

impl CharacterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a character, returning `true` if it was not present yet.
    pub fn insert(&mut self, ch: char) -> bool {
        self.0.insert(ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Adds every character the document renders or scripts.
    pub fn extend_from_document(&mut self, document: &str) {
        self.extend(crate::extract(document));
    }

    /// Returns the union of both sets; `self`'s characters come first.
    pub fn union(&self, other: &CharacterSet) -> CharacterSet {
        self.iter().chain(other.iter()).collect()
    }
}

impl Extend<char> for CharacterSet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<char> for CharacterSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CharacterSet {
    type Item = char;
    type IntoIter = indexmap::set::IntoIter<char>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CharacterSet {
    type Item = char;
    type IntoIter = std::iter::Copied<indexmap::set::Iter<'a, char>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
