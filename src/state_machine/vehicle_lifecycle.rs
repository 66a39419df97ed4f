// Copyright (c) 2025 - Cowboy AI, Inc.
//! Vehicle Lifecycle State Machine
//!
//! # States
//!
//! - Available: Initial state, can be rented or sent to maintenance
//! - Rented: Out with a customer
//! - InMaintenance: In the workshop
//!
//! No state is terminal; the machine cycles.
//!
//! # Inputs
//!
//! - Rent: Available → Rented
//! - Return: Rented → Available
//! - SendToMaintenance: Available | Rented → InMaintenance
//! - CompleteMaintenance: InMaintenance → Available
//!
//! Whether a rented vehicle may actually be sent to maintenance is a
//! cross-entity rule owned by `VehicleAggregate`; the machine itself only
//! forbids re-entering maintenance.

use super::{StateMachine, TransitionError, TransitionResult};
use crate::domain::VehicleStatus;

/// Lifecycle command (FSM input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleCommand {
    Rent,
    Return,
    SendToMaintenance,
    CompleteMaintenance,
}

impl StateMachine for VehicleStatus {
    type Input = VehicleCommand;
    type Output = ();

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use VehicleCommand::*;
        use VehicleStatus::*;

        match (self, input) {
            (Available, Rent) => Ok((Rented, ())),
            (_, Rent) => Err(TransitionError::PreconditionFailed(
                "vehicle is not available for rental".to_string(),
            )),

            (Rented, Return) => Ok((Available, ())),
            (_, Return) => Err(TransitionError::PreconditionFailed(
                "vehicle is not rented".to_string(),
            )),

            (InMaintenance, SendToMaintenance) => Err(TransitionError::PreconditionFailed(
                "vehicle is already in maintenance".to_string(),
            )),
            (Available | Rented, SendToMaintenance) => Ok((InMaintenance, ())),

            (InMaintenance, CompleteMaintenance) => Ok((Available, ())),
            (_, CompleteMaintenance) => Err(TransitionError::PreconditionFailed(
                "vehicle is not in maintenance".to_string(),
            )),
        }
    }

    fn valid_inputs(&self) -> Vec<Self::Input> {
        use VehicleCommand::*;
        use VehicleStatus::*;

        match self {
            Available => vec![Rent, SendToMaintenance],
            Rented => vec![Return, SendToMaintenance],
            InMaintenance => vec![CompleteMaintenance],
        }
    }
}
