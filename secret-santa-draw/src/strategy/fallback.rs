use rand::RngCore;
use tracing::debug;

use super::DrawStrategy;
use crate::constraints::Constraints;
use crate::error::DrawError;

/// Runs `primary` and, if it gives up, `secondary`.
///
/// A failure of both reports the attempts of both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fallback<A, B> {
    pub primary: A,
    pub secondary: B,
}

impl<A, B> Fallback<A, B> {
    pub const fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<A: DrawStrategy, B: DrawStrategy> DrawStrategy for Fallback<A, B> {
    fn solve(
        &self,
        constraints: &Constraints,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, DrawError> {
        match self.primary.solve(constraints, rng) {
            Err(DrawError::DrawUnsatisfiable {
                attempts: spent, ..
            }) => {
                debug!(attempts = spent, "primary strategy gave up, falling back");
                match self.secondary.solve(constraints, rng) {
                    Err(DrawError::DrawUnsatisfiable {
                        attempts,
                        exhaustive,
                    }) => Err(DrawError::DrawUnsatisfiable {
                        attempts: spent.saturating_add(attempts),
                        exhaustive,
                    }),
                    result => result,
                }
            }
            result => result,
        }
    }
}
