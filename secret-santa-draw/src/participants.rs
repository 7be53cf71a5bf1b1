use core::hash::Hash;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::constraints::Constraints;
use crate::error::InputError;

/// What to do with an exclusion naming someone who is not taking part in the draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownExclusionPolicy {
    /// Keep the exclusion. It can never be violated so it has no effect.
    #[default]
    Ignore,
    /// Fail with [`InputError::UnknownExcludedParticipant`].
    Reject,
}

/// The people entered into a single draw, in giver order, each with the
/// people they must not give a gift to.
///
/// Ids are unique. This is checked on insertion, so a draw never sees
/// the same person twice.
#[derive(Debug, Clone)]
pub struct Participants<P> {
    ids: Vec<P>,
    exclusions: Vec<HashSet<P>>,
    index: HashMap<P, usize>,
    policy: UnknownExclusionPolicy,
}

impl<P: Eq + Hash + Clone> Participants<P> {
    #[must_use]
    pub fn empty(policy: UnknownExclusionPolicy) -> Self {
        Self {
            ids: Vec::new(),
            exclusions: Vec::new(),
            index: HashMap::new(),
            policy,
        }
    }

    pub fn new<I, E>(entries: I) -> Result<Self, InputError<P>>
    where
        I: IntoIterator<Item = (P, E)>,
        E: IntoIterator<Item = P>,
    {
        Self::with_policy(entries, UnknownExclusionPolicy::default())
    }

    pub fn with_policy<I, E>(entries: I, policy: UnknownExclusionPolicy) -> Result<Self, InputError<P>>
    where
        I: IntoIterator<Item = (P, E)>,
        E: IntoIterator<Item = P>,
    {
        let mut participants = Self::empty(policy);
        // exclusions may point forward, so every id has to be known first
        let mut pending = Vec::new();
        for (id, excluded) in entries {
            let position = participants.add(id)?;
            pending.push((position, excluded));
        }
        for (position, excluded) in pending {
            let giver = participants.ids[position].clone();
            for receiver in excluded {
                participants.exclude(&giver, receiver)?;
            }
        }
        Ok(participants)
    }

    pub fn from_ids<I>(ids: I) -> Result<Self, InputError<P>>
    where
        I: IntoIterator<Item = P>,
    {
        Self::new(ids.into_iter().map(|id| (id, None)))
    }

    /// Adds a participant without exclusions and returns its giver position.
    pub fn add(&mut self, id: P) -> Result<usize, InputError<P>> {
        match self.index.entry(id) {
            Entry::Occupied(entry) => Err(InputError::DuplicateParticipant(entry.key().clone())),
            Entry::Vacant(entry) => {
                let position = self.ids.len();
                self.ids.push(entry.key().clone());
                self.exclusions.push(HashSet::new());
                entry.insert(position);
                Ok(position)
            }
        }
    }

    /// Forbids `giver` from drawing `receiver`. Only this direction is affected.
    pub fn exclude(&mut self, giver: &P, receiver: P) -> Result<(), InputError<P>> {
        let Some(&position) = self.index.get(giver) else {
            return Err(InputError::UnknownParticipant(giver.clone()));
        };
        if self.policy == UnknownExclusionPolicy::Reject && !self.index.contains_key(&receiver) {
            return Err(InputError::UnknownExcludedParticipant {
                giver: giver.clone(),
                excluded: receiver,
            });
        }
        self.exclusions[position].insert(receiver);
        Ok(())
    }

    /// Forbids `first` and `second` from drawing each other, e.g. for couples.
    pub fn exclude_each_other(&mut self, first: P, second: P) -> Result<(), InputError<P>> {
        for id in [&first, &second] {
            if !self.contains(id) {
                return Err(InputError::UnknownParticipant(id.clone()));
            }
        }
        self.exclude(&first, second.clone())?;
        self.exclude(&second, first)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &P) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn ids(&self) -> &[P] {
        &self.ids
    }

    #[must_use]
    pub fn position(&self, id: &P) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn exclusions_of(&self, id: &P) -> Option<&HashSet<P>> {
        self.position(id).map(|position| &self.exclusions[position])
    }

    #[must_use]
    pub const fn policy(&self) -> UnknownExclusionPolicy {
        self.policy
    }

    pub fn iter(&self) -> impl Iterator<Item = (&P, &HashSet<P>)> {
        self.ids.iter().zip(&self.exclusions)
    }

    /// Whether `giver` may draw `receiver`.
    #[must_use]
    pub fn allows(&self, giver: &P, receiver: &P) -> bool {
        giver != receiver
            && self
                .exclusions_of(giver)
                .map_or(true, |excluded| !excluded.contains(receiver))
    }

    /// Index based view of the exclusions. Exclusions of unknown ids are dropped here.
    #[must_use]
    pub fn constraints(&self) -> Constraints {
        let mut constraints = Constraints::new(self.len());
        for (giver, excluded) in self.exclusions.iter().enumerate() {
            for &receiver in excluded.iter().filter_map(|id| self.index.get(id)) {
                constraints.forbid(giver, receiver);
            }
        }
        constraints
    }
}

impl<P: Eq + Hash> PartialEq for Participants<P> {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids && self.exclusions == other.exclusions && self.policy == other.policy
    }
}

impl<P: Eq + Hash> Eq for Participants<P> {}
