// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! - `value_objects`: normalization and equality of value objects
//! - `vehicle_lifecycle`: status transitions never leave partial changes
//! - `maintenance_costs`: aggregate cost arithmetic

mod maintenance_costs;
mod value_objects;
mod vehicle_lifecycle;
