// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Maintenance Costs

use chrono::{DateTime, Duration, TimeZone, Utc};
use fleet_rental::domain::{
    Entity, MaintenanceHistory, MaintenanceType, Vehicle, VehicleAggregate, VehicleModel,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

/// Non-negative costs with two decimal places, up to 5000.00
fn cost_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=500_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// (cost, day offset) pairs for a maintenance history
fn history_strategy() -> impl Strategy<Value = Vec<(Decimal, i64)>> {
    prop::collection::vec((cost_strategy(), 0i64..365), 0..20)
}

fn aggregate_with(entries: &[(Decimal, i64)]) -> VehicleAggregate {
    let vehicle = Vehicle::new("PROP001", VehicleModel::new("Ford", "Ka").unwrap(), 2019).unwrap();
    let records = entries
        .iter()
        .map(|(cost, day)| {
            MaintenanceHistory::new_at(
                vehicle.id(),
                "Service",
                *cost,
                MaintenanceType::Preventive,
                None,
                base_date() + Duration::days(*day),
            )
            .unwrap()
        })
        .collect();
    VehicleAggregate::new(vehicle, records).unwrap()
}

proptest! {
    /// Property: Total cost equals the sum of record costs
    #[test]
    fn prop_total_cost_is_sum(entries in history_strategy()) {
        let aggregate = aggregate_with(&entries);
        let expected: Decimal = entries.iter().map(|(cost, _)| *cost).sum();
        prop_assert_eq!(aggregate.total_maintenance_cost(), expected);
    }

    /// Property: Splitting the year into two periods partitions the total
    #[test]
    fn prop_periods_partition_total(entries in history_strategy(), split in 0i64..365) {
        let aggregate = aggregate_with(&entries);
        let start = base_date();
        let mid = base_date() + Duration::days(split);
        let end = base_date() + Duration::days(365);

        let first = aggregate.maintenance_cost_by_period(start, mid - Duration::nanoseconds(1));
        let second = aggregate.maintenance_cost_by_period(mid, end);
        prop_assert_eq!(first + second, aggregate.total_maintenance_cost());
    }

    /// Property: A record is expensive iff its cost exceeds 1000
    #[test]
    fn prop_expensive_threshold(cost in cost_strategy()) {
        let record = MaintenanceHistory::new_at(
            fleet_rental::domain::VehicleId::new(),
            "Work",
            cost,
            MaintenanceType::Corrective,
            None,
            base_date(),
        )
        .unwrap();
        prop_assert_eq!(record.is_expensive(), cost > Decimal::new(1000, 0));
    }

    /// Property: Negative costs are always rejected
    #[test]
    fn prop_negative_cost_rejected(cents in 1i64..1_000_000) {
        let result = MaintenanceHistory::new_at(
            fleet_rental::domain::VehicleId::new(),
            "Work",
            Decimal::new(-cents, 2),
            MaintenanceType::Corrective,
            None,
            base_date(),
        );
        prop_assert!(result.is_err());
    }
}
