//! Secret Santa draws: every participant gives exactly one gift and receives
//! exactly one, nobody draws themselves and nobody draws someone they excluded.
//!
//! ```
//! use secret_santa_draw::{draw, Participants};
//!
//! let mut participants = Participants::from_ids(["alice", "bob", "carol", "dave"])?;
//! participants.exclude_each_other("alice", "bob")?;
//!
//! let assignment = draw(&participants)?;
//! assert_ne!(assignment.receiver_of(&"alice"), Some(&"bob"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

extern crate alloc;

pub mod assignment;
pub mod constraints;
pub mod engine;
pub mod error;
pub mod participants;
pub mod strategy;

pub use assignment::{Assignment, Pairing};
pub use constraints::Constraints;
pub use engine::{draw, DrawEngine};
pub use error::{AssignmentViolation, DrawError, InputError};
pub use participants::{Participants, UnknownExclusionPolicy};
pub use strategy::fallback::Fallback;
pub use strategy::matching::RandomizedMatching;
pub use strategy::rejection_sampling::{RejectionSampling, DEFAULT_MAX_ATTEMPTS};
pub use strategy::DrawStrategy;
