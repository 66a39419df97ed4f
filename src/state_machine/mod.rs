// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! Generic state machine types for modeling domain lifecycles. Transitions
//! are pure functions: they compute the next state and never mutate the
//! current one, so a rejected transition cannot leave partial changes.
//!
//! ```text
//! (State, Input) → Result<(State, Output), TransitionError>
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use fleet_rental::state_machine::*;
//!
//! enum Door {
//!     Open,
//!     Closed,
//! }
//!
//! enum Push {
//!     Open,
//!     Close,
//! }
//!
//! impl StateMachine for Door {
//!     type Input = Push;
//!     type Output = ();
//!
//!     fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, ())> {
//!         match (self, input) {
//!             (Door::Closed, Push::Open) => Ok((Door::Open, ())),
//!             (Door::Open, Push::Close) => Ok((Door::Closed, ())),
//!             _ => Err(TransitionError::PreconditionFailed("no-op".into())),
//!         }
//!     }
//! }
//! ```

pub mod vehicle_lifecycle;

pub use vehicle_lifecycle::VehicleCommand;

use crate::errors::DomainError;

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Transition from current state to target state is not allowed
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Precondition not met for transition
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),
}

impl From<TransitionError> for DomainError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::PreconditionFailed(reason) => DomainError::InvalidState(reason),
            other => DomainError::InvalidState(other.to_string()),
        }
    }
}

/// Trait for finite state machines
///
/// Implement this trait to define a state machine with typed states,
/// inputs, and outputs.
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions (use () if none)
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - Ok((new_state, output)) if transition is valid
    /// - Err(TransitionError) if transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }

    /// Get all valid inputs from current state (if enumerable)
    fn valid_inputs(&self) -> Vec<Self::Input>
    where
        Self::Input: Clone,
    {
        Vec::new()
    }
}
