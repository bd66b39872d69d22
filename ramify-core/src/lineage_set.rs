//! Set-of-lineages label type.
//!
//! A [`LineageSet`] stores zero-based lineage indices. Its canonical string
//! form, produced by [`fmt::Display`] and accepted by [`str::parse`], is the
//! ascending, comma-joined list of one-based indices, so `{0, 1}` renders as
//! `"1,2"` and the empty set renders as `""`.

use std::{cmp::Ordering, collections::BTreeSet, fmt, str::FromStr};

use thiserror::Error;

const DELIMITER: char = ',';

/// Set of lineages a cell has been assigned to.
///
/// Sets order first by cardinality and then lexicographically by index, so a
/// sorted collection of sets walks the branch levels from the root outwards.
///
/// # Examples
/// ```
/// use ramify_core::LineageSet;
///
/// let set = LineageSet::from_indices([2, 0]);
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.to_string(), "1,3");
/// assert_eq!("1,3".parse::<LineageSet>()?, set);
/// # Ok::<(), ramify_core::LineageSetParseError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LineageSet {
    lineages: BTreeSet<usize>,
}

/// Error returned when a canonical label string cannot be parsed.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LineageSetParseError {
    /// A token was not a positive integer.
    #[error("label token `{token}` is not a lineage number")]
    InvalidToken {
        /// The rejected token.
        token: String,
    },
    /// Lineage numbers are one-based; `0` is never valid.
    #[error("lineage numbers start at 1")]
    ZeroLineage,
    /// The same lineage appeared twice.
    #[error("lineage {lineage} appears more than once")]
    DuplicateLineage {
        /// One-based lineage number that was repeated.
        lineage: usize,
    },
}

impl LineageSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lineages: BTreeSet::new(),
        }
    }

    /// Creates a set from zero-based lineage indices. Duplicates collapse.
    #[must_use]
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            lineages: indices.into_iter().collect(),
        }
    }

    /// Number of lineages in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lineages.len()
    }

    /// Returns `true` when the set holds no lineage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lineages.is_empty()
    }

    /// Returns `true` when the zero-based `lineage` is a member.
    #[must_use]
    pub fn contains(&self, lineage: usize) -> bool {
        self.lineages.contains(&lineage)
    }

    /// Iterates the zero-based indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.lineages.iter().copied()
    }

    /// Returns `true` when every lineage of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.lineages.is_subset(&other.lineages)
    }

    /// Returns `true` when `self` is a subset of `other` and not equal to it.
    ///
    /// # Examples
    /// ```
    /// use ramify_core::LineageSet;
    ///
    /// let trunk = LineageSet::from_indices([0]);
    /// let shared = LineageSet::from_indices([0, 1]);
    /// assert!(trunk.is_strict_subset(&shared));
    /// assert!(!shared.is_strict_subset(&shared));
    /// ```
    #[must_use]
    pub fn is_strict_subset(&self, other: &Self) -> bool {
        self.len() < other.len() && self.is_subset(other)
    }

    /// Returns the union of both sets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            lineages: self.lineages.union(&other.lineages).copied().collect(),
        }
    }

    pub(crate) fn insert(&mut self, lineage: usize) {
        self.lineages.insert(lineage);
    }
}

impl Ord for LineageSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.lineages.iter().cmp(other.lineages.iter()))
    }
}

impl PartialOrd for LineageSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromIterator<usize> for LineageSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_indices(iter)
    }
}

impl fmt::Display for LineageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for lineage in &self.lineages {
            if !first {
                write!(f, "{DELIMITER}")?;
            }
            write!(f, "{}", lineage.saturating_add(1))?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for LineageSet {
    type Err = LineageSetParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut set = Self::new();
        if raw.trim().is_empty() {
            return Ok(set);
        }
        for token in raw.split(DELIMITER) {
            let trimmed = token.trim();
            let lineage: usize =
                trimmed
                    .parse()
                    .map_err(|_| LineageSetParseError::InvalidToken {
                        token: trimmed.to_owned(),
                    })?;
            let index = lineage
                .checked_sub(1)
                .ok_or(LineageSetParseError::ZeroLineage)?;
            if set.contains(index) {
                return Err(LineageSetParseError::DuplicateLineage { lineage });
            }
            set.insert(index);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::empty(&[], "")]
    #[case::single(&[0], "1")]
    #[case::unsorted(&[2, 0, 1], "1,2,3")]
    #[case::sparse(&[4, 9], "5,10")]
    fn display_is_one_based_and_ascending(#[case] indices: &[usize], #[case] expected: &str) {
        let set = LineageSet::from_indices(indices.iter().copied());
        assert_eq!(set.to_string(), expected);
    }

    #[rstest]
    #[case::empty("", &[])]
    #[case::spaced(" 2 , 1 ", &[0, 1])]
    #[case::triple("1,2,3", &[0, 1, 2])]
    fn parse_accepts_canonical_and_loose_forms(#[case] raw: &str, #[case] expected: &[usize]) {
        let set: LineageSet = raw.parse().expect("label must parse");
        assert_eq!(set, LineageSet::from_indices(expected.iter().copied()));
    }

    #[rstest]
    #[case::word("a", LineageSetParseError::InvalidToken { token: "a".to_owned() })]
    #[case::trailing("1,", LineageSetParseError::InvalidToken { token: String::new() })]
    #[case::negative("-1", LineageSetParseError::InvalidToken { token: "-1".to_owned() })]
    #[case::zero("0,1", LineageSetParseError::ZeroLineage)]
    #[case::duplicate("2,2", LineageSetParseError::DuplicateLineage { lineage: 2 })]
    fn parse_rejects_malformed_labels(#[case] raw: &str, #[case] expected: LineageSetParseError) {
        let err = raw
            .parse::<LineageSet>()
            .expect_err("malformed label must be rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn ordering_groups_by_cardinality_first() {
        let mut sets: Vec<LineageSet> = ["1,2,3", "2", "", "1,3", "1", "1,2"]
            .iter()
            .map(|raw| raw.parse().expect("label must parse"))
            .collect();
        sets.sort();
        let rendered: Vec<String> = sets.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["", "1", "2", "1,2", "1,3", "1,2,3"]);
    }

    #[test]
    fn strict_subset_excludes_equal_and_disjoint_sets() {
        let a = LineageSet::from_indices([0]);
        let b = LineageSet::from_indices([1]);
        let ab = LineageSet::from_indices([0, 1]);
        assert!(LineageSet::new().is_strict_subset(&a));
        assert!(a.is_strict_subset(&ab));
        assert!(!a.is_strict_subset(&b));
        assert!(!ab.is_strict_subset(&ab));
        assert_eq!(a.union(&b), ab);
    }
}
