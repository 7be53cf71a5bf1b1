use std::collections::HashSet;

/// Forbidden giver → receiver edges between participant positions.
///
/// Drawing yourself is always forbidden, independent of what was excluded explicitly.
/// Only explicit exclusions are stored, so an unconstrained draw costs nothing here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraints {
    excluded: Vec<HashSet<usize>>,
}

impl Constraints {
    /// No exclusions besides the diagonal.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            excluded: vec![HashSet::new(); len],
        }
    }

    pub fn forbid(&mut self, giver: usize, receiver: usize) {
        if giver != receiver {
            self.excluded[giver].insert(receiver);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.excluded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }

    /// Number of explicit exclusions.
    #[must_use]
    pub fn exclusion_count(&self) -> usize {
        self.excluded.iter().map(HashSet::len).sum()
    }

    #[must_use]
    pub fn allows(&self, giver: usize, receiver: usize) -> bool {
        giver != receiver && !self.excluded[giver].contains(&receiver)
    }

    /// Whether giver `i` giving to `receivers[i]` is a valid assignment.
    ///
    /// `receivers` has to be a permutation of `0..len`.
    #[must_use]
    pub fn admits(&self, receivers: &[usize]) -> bool {
        receivers.len() == self.len()
            && receivers
                .iter()
                .enumerate()
                .all(|(giver, &receiver)| self.allows(giver, receiver))
    }

    pub fn candidates(&self, giver: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |&receiver| self.allows(giver, receiver))
    }
}

#[cfg(test)]
mod tests {
    use super::Constraints;

    #[test]
    fn diagonal_is_always_forbidden() {
        let constraints = Constraints::new(3);
        assert!(!constraints.allows(1, 1));
        assert!(constraints.allows(1, 2));
        assert!(!constraints.admits(&[0, 2, 1]));
        assert!(constraints.admits(&[1, 2, 0]));
    }

    #[test]
    fn forbidden_edges_are_directional() {
        let mut constraints = Constraints::new(3);
        constraints.forbid(0, 1);
        assert!(!constraints.allows(0, 1));
        assert!(constraints.allows(1, 0));
        assert_eq!(constraints.candidates(0).collect::<Vec<_>>(), [2]);
        assert!(!constraints.admits(&[1, 2, 0]));
        assert!(constraints.admits(&[2, 0, 1]));
    }

    #[test]
    fn only_explicit_exclusions_are_stored() {
        let mut constraints = Constraints::new(200_000);
        assert_eq!(constraints.exclusion_count(), 0);
        constraints.forbid(0, 1);
        constraints.forbid(5, 5);
        assert_eq!(constraints.exclusion_count(), 1);
        assert!(constraints.allows(199_999, 0));
        assert!(!constraints.allows(5, 5));
    }

    #[test]
    fn wrong_length_is_not_admitted() {
        assert!(!Constraints::new(3).admits(&[1, 0]));
    }
}
