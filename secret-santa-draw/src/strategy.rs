pub mod fallback;
pub mod matching;
pub mod rejection_sampling;

use rand::RngCore;

use crate::constraints::Constraints;
use crate::error::DrawError;

/// Searches for a valid assignment.
///
/// On success the returned vector holds the receiver position for every
/// giver position and is accepted by [`Constraints::admits`].
pub trait DrawStrategy {
    fn solve(
        &self,
        constraints: &Constraints,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, DrawError>;
}

impl<S: DrawStrategy + ?Sized> DrawStrategy for Box<S> {
    fn solve(
        &self,
        constraints: &Constraints,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, DrawError> {
        (**self).solve(constraints, rng)
    }
}

impl<S: DrawStrategy + ?Sized> DrawStrategy for &S {
    fn solve(
        &self,
        constraints: &Constraints,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, DrawError> {
        (**self).solve(constraints, rng)
    }
}
