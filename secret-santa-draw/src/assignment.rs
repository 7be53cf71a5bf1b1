use core::hash::Hash;
use core::slice;
use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::AssignmentViolation;
use crate::participants::Participants;

/// `giver` gives a gift to `receiver`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing<P> {
    pub giver: P,
    pub receiver: P,
}

/// The result of a draw, one [`Pairing`] per participant in giver order.
///
/// Assignments returned by a draw always pass [`Assignment::verify`].
/// Assignments built from stored pairings should be verified before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment<P> {
    pairings: Vec<Pairing<P>>,
}

impl<P: Clone> Assignment<P> {
    pub(crate) fn from_positions(participants: &[P], receivers: &[usize]) -> Self {
        Self {
            pairings: participants
                .iter()
                .zip(receivers)
                .map(|(giver, &receiver)| Pairing {
                    giver: giver.clone(),
                    receiver: participants[receiver].clone(),
                })
                .collect(),
        }
    }
}

impl<P> Assignment<P> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Pairing<P>> {
        self.pairings.iter()
    }

    #[must_use]
    pub fn pairings(&self) -> &[Pairing<P>] {
        &self.pairings
    }
}

impl<P: Eq + Hash> Assignment<P> {
    /// Who `giver` has to give a gift to. Nobody learns who drew them.
    pub fn receiver_of(&self, giver: &P) -> Option<&P> {
        self.pairings
            .iter()
            .find(|pairing| &pairing.giver == giver)
            .map(|pairing| &pairing.receiver)
    }

    #[must_use]
    pub fn into_map(self) -> HashMap<P, P> {
        self.pairings
            .into_iter()
            .map(|pairing| (pairing.giver, pairing.receiver))
            .collect()
    }

    /// Splits the assignment into its gift cycles, each starting at its first giver.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<&P>> {
        let next: HashMap<&P, &P> = self
            .pairings
            .iter()
            .map(|pairing| (&pairing.giver, &pairing.receiver))
            .collect();
        let mut seen = HashSet::new();
        let mut cycles = Vec::new();
        for pairing in &self.pairings {
            if seen.contains(&pairing.giver) {
                continue;
            }
            let mut cycle = Vec::new();
            let mut current = &pairing.giver;
            while seen.insert(current) {
                cycle.push(current);
                match next.get(current) {
                    Some(&receiver) => current = receiver,
                    None => break,
                }
            }
            cycles.push(cycle);
        }
        cycles
    }
}

impl<P: Eq + Hash + Clone> Assignment<P> {
    /// Checks that this is a complete, valid assignment for `participants`.
    pub fn verify(&self, participants: &Participants<P>) -> Result<(), AssignmentViolation<P>> {
        for Pairing { giver, receiver } in &self.pairings {
            if let Some(unknown) = [giver, receiver]
                .into_iter()
                .find(|id| !participants.contains(id))
            {
                return Err(AssignmentViolation::UnknownParticipant(unknown.clone()));
            }
            if giver == receiver {
                return Err(AssignmentViolation::SelfAssignment(giver.clone()));
            }
            if !participants.allows(giver, receiver) {
                return Err(AssignmentViolation::ExcludedReceiver {
                    giver: giver.clone(),
                    receiver: receiver.clone(),
                });
            }
        }

        let givers = self.pairings.iter().map(|pairing| &pairing.giver);
        if let Some(giver) = givers.clone().duplicates().next() {
            return Err(AssignmentViolation::DuplicateGiver(giver.clone()));
        }
        let givers: HashSet<&P> = givers.collect();
        if let Some(missing) = participants.ids().iter().find(|id| !givers.contains(id)) {
            return Err(AssignmentViolation::MissingGiver(missing.clone()));
        }
        // one pairing per participant from here on, so a receiver drawn twice leaves another out
        let receivers: HashSet<&P> = self
            .pairings
            .iter()
            .map(|pairing| &pairing.receiver)
            .collect();
        if let Some(missing) = participants.ids().iter().find(|id| !receivers.contains(id)) {
            return Err(AssignmentViolation::MissingReceiver(missing.clone()));
        }
        Ok(())
    }
}

impl<P> From<Vec<Pairing<P>>> for Assignment<P> {
    fn from(pairings: Vec<Pairing<P>>) -> Self {
        Self { pairings }
    }
}

impl<P> IntoIterator for Assignment<P> {
    type Item = Pairing<P>;
    type IntoIter = alloc::vec::IntoIter<Pairing<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairings.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a Assignment<P> {
    type Item = &'a Pairing<P>;
    type IntoIter = slice::Iter<'a, Pairing<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairings.iter()
    }
}
