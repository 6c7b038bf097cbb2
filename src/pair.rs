/// A type that may contain a single value or a pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaybePair<T> {
    Single(T),
    Pair([T; 2]),
}

impl<T> MaybePair<T>
where
    T: PartialEq,
{
    /// Returns true if, and only if, the given value is in this [`MaybePair`].
    pub fn contains(&self, other: &T) -> bool {
        match self {
            MaybePair::Single(value) => value == other,
            MaybePair::Pair(values) => values.contains(other),
        }
    }
}

impl<T> IntoIterator for MaybePair<T> {
    type Item = T;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<T>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            MaybePair::Single(value) => [Some(value), None],
            MaybePair::Pair([first, second]) => [Some(first), Some(second)],
        }
        .into_iter()
        .flatten()
    }
}
