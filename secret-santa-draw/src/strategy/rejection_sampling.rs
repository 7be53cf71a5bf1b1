use core::num::NonZeroU32;

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::{debug, trace};

use super::DrawStrategy;
use crate::constraints::Constraints;
use crate::error::DrawError;

pub const DEFAULT_MAX_ATTEMPTS: NonZeroU32 = match NonZeroU32::new(250) {
    Some(attempts) => attempts,
    None => unreachable!(),
};

/// Shuffles the receivers and checks the result, until it is valid or the budget is used up.
///
/// Every valid assignment is equally likely. Exclusions in practice are sparse (a few
/// couples in a larger group) so a valid shuffle shows up within a few attempts. Dense
/// exclusions can make this fail even though a valid assignment exists, use
/// [`RandomizedMatching`](super::matching::RandomizedMatching) for those.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectionSampling {
    max_attempts: NonZeroU32,
}

impl RejectionSampling {
    #[must_use]
    pub const fn new(max_attempts: NonZeroU32) -> Self {
        Self { max_attempts }
    }

    #[must_use]
    pub const fn max_attempts(&self) -> NonZeroU32 {
        self.max_attempts
    }
}

impl Default for RejectionSampling {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl DrawStrategy for RejectionSampling {
    fn solve(
        &self,
        constraints: &Constraints,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, DrawError> {
        let mut receivers: Vec<usize> = (0..constraints.len()).collect();
        for attempt in 1..=self.max_attempts.get() {
            receivers.shuffle(rng);
            if constraints.admits(&receivers) {
                debug!(attempt, "found a valid assignment");
                return Ok(receivers);
            }
            trace!(attempt, "rejected shuffle");
        }
        debug!(attempts = self.max_attempts.get(), "attempt budget exhausted");
        Err(DrawError::DrawUnsatisfiable {
            attempts: self.max_attempts.get(),
            exhaustive: false,
        })
    }
}
