use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("a draw needs at least 2 participants but got {count}")]
    InsufficientParticipants { count: usize },
    #[error("{}", unsatisfiable_message(.attempts, .exhaustive))]
    DrawUnsatisfiable {
        /// Search attempts of every strategy that was tried, summed up.
        attempts: u32,
        /// The search covered every possibility, so no valid assignment exists at all.
        exhaustive: bool,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn unsatisfiable_message(attempts: &u32, exhaustive: &bool) -> String {
    if *exhaustive {
        "no valid assignment exists for these exclusions. Relax some of them.".to_owned()
    } else {
        let plural = if *attempts == 1 { "" } else { "s" };
        format!(
            "no valid assignment found after {attempts} attempt{plural}. Try again or relax some \
             exclusions."
        )
    }
}

impl DrawError {
    /// Whether invoking the draw again with the same input may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DrawUnsatisfiable {
                exhaustive: false,
                ..
            }
        )
    }
}

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError<P> {
    #[error("participant {0:?} was entered more than once")]
    DuplicateParticipant(P),
    #[error("{0:?} is not a participant of this draw")]
    UnknownParticipant(P),
    #[error("{giver:?} excludes {excluded:?} who is not a participant of this draw")]
    UnknownExcludedParticipant { giver: P, excluded: P },
}

/// A broken invariant found while verifying an [`Assignment`](crate::Assignment).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentViolation<P> {
    #[error("{0:?} was drawn by themselves")]
    SelfAssignment(P),
    #[error("{giver:?} drew {receiver:?} whom they exclude")]
    ExcludedReceiver { giver: P, receiver: P },
    #[error("{0:?} gives more than one gift")]
    DuplicateGiver(P),
    #[error("{0:?} does not give a gift")]
    MissingGiver(P),
    /// Nobody draws this participant, so someone else is drawn more than once.
    #[error("{0:?} does not receive a gift")]
    MissingReceiver(P),
    #[error("{0:?} is not a participant of this draw")]
    UnknownParticipant(P),
}
