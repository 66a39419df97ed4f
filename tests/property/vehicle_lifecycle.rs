// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Vehicle Lifecycle
//!
//! Arbitrary command sequences are applied to a vehicle; every rejected
//! command must leave the vehicle exactly as it was.

use fleet_rental::domain::{Vehicle, VehicleModel, VehicleStatus};
use fleet_rental::state_machine::{StateMachine, VehicleCommand};
use proptest::prelude::*;

fn command_strategy() -> impl Strategy<Value = VehicleCommand> {
    prop_oneof![
        Just(VehicleCommand::Rent),
        Just(VehicleCommand::Return),
        Just(VehicleCommand::SendToMaintenance),
        Just(VehicleCommand::CompleteMaintenance),
    ]
}

fn apply(vehicle: &mut Vehicle, command: VehicleCommand) -> bool {
    let result = match command {
        VehicleCommand::Rent => vehicle.rent(),
        VehicleCommand::Return => vehicle.return_from_rental(),
        VehicleCommand::SendToMaintenance => vehicle.send_to_maintenance(),
        VehicleCommand::CompleteMaintenance => vehicle.complete_maintenance(),
    };
    result.is_ok()
}

proptest! {
    /// Property: Vehicle status always follows the state machine
    #[test]
    fn prop_vehicle_follows_state_machine(
        commands in prop::collection::vec(command_strategy(), 0..40)
    ) {
        let mut vehicle =
            Vehicle::new("LIFE001", VehicleModel::new("Jeep", "Renegade").unwrap(), 2021).unwrap();

        for command in commands {
            let before = vehicle.clone();
            let expected = before.status().transition(&command).ok().map(|(next, _)| next);

            let accepted = apply(&mut vehicle, command);

            prop_assert_eq!(accepted, expected.is_some());
            match expected {
                Some(next) => {
                    prop_assert_eq!(vehicle.status(), next);
                    prop_assert!(vehicle.updated_at() >= before.updated_at());
                }
                None => prop_assert_eq!(&vehicle, &before),
            }
        }
    }

    /// Property: Rent then return restores availability
    #[test]
    fn prop_rent_return_round_trip(year in Vehicle::MIN_YEAR..=2025) {
        let mut vehicle =
            Vehicle::new("LIFE002", VehicleModel::new("Fiat", "Argo").unwrap(), year).unwrap();

        vehicle.rent().unwrap();
        let rented_at = vehicle.updated_at();
        vehicle.return_from_rental().unwrap();

        prop_assert_eq!(vehicle.status(), VehicleStatus::Available);
        prop_assert!(vehicle.updated_at() >= rented_at);
    }
}
