use core::hash::Hash;

use rand::RngCore;
use tracing::{debug, debug_span};

use crate::assignment::Assignment;
use crate::error::DrawError;
use crate::participants::Participants;
use crate::strategy::rejection_sampling::RejectionSampling;
use crate::strategy::DrawStrategy;

/// Runs draws with a fixed strategy.
///
/// The engine holds nothing but its configuration. Every draw works on its own
/// input and its own random source, so one engine can serve concurrent draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawEngine<S = RejectionSampling> {
    strategy: S,
}

impl DrawEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DrawStrategy> DrawEngine<S> {
    pub const fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Draws using the thread local random number generator.
    pub fn draw<P>(&self, participants: &Participants<P>) -> Result<Assignment<P>, DrawError>
    where
        P: Eq + Hash + Clone,
    {
        self.draw_with_rng(participants, &mut rand::thread_rng())
    }

    /// Draws using `rng`, e.g. a seeded generator for reproducible draws.
    pub fn draw_with_rng<P, R>(
        &self,
        participants: &Participants<P>,
        rng: &mut R,
    ) -> Result<Assignment<P>, DrawError>
    where
        P: Eq + Hash + Clone,
        R: RngCore,
    {
        let span = debug_span!("draw", participants = participants.len());
        let _guard = span.enter();

        if participants.len() < 2 {
            return Err(DrawError::InsufficientParticipants {
                count: participants.len(),
            });
        }

        let constraints = participants.constraints();
        let receivers = self.strategy.solve(&constraints, rng)?;
        debug_assert!(constraints.admits(&receivers), "strategy returned an invalid draw");
        debug!("draw succeeded");

        Ok(Assignment::from_positions(participants.ids(), &receivers))
    }
}

/// Draws with the default engine.
pub fn draw<P>(participants: &Participants<P>) -> Result<Assignment<P>, DrawError>
where
    P: Eq + Hash + Clone,
{
    DrawEngine::new().draw(participants)
}
