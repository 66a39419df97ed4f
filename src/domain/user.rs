// Copyright (c) 2025 - Cowboy AI, Inc.
//! User Entity with Rental Linkage
//!
//! # Invariants
//! - Name and document are non-blank and trimmed
//! - A user holding rented vehicles cannot be deactivated
//! - Only vehicles rented through this user can be returned through it
//!
//! The set of rented vehicles is working state for a single use case. It
//! is not serialized; whoever loads a user for a rental flow restores it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::Entity;
use super::ids::EntityId;
use super::vehicle::{Vehicle, VehicleId};
use super::Email;
use crate::errors::{DomainError, DomainResult};

/// Identity of a user
pub type UserId = EntityId<User>;

/// Role of a user in the rental business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Rents vehicles
    Customer,
    /// Staff member operating the fleet
    Employee,
    /// Back-office administrator
    Administrator,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserType::Customer => "customer",
            UserType::Employee => "employee",
            UserType::Administrator => "administrator",
        };
        write!(f, "{}", name)
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    document: String,
    user_type: UserType,
    is_active: bool,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    rented_vehicles: Vec<VehicleId>,
}

/// Stored fields of a user, used by persistence to rebuild one
#[derive(Debug, Clone)]
pub struct UserParts {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub document: String,
    pub user_type: UserType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub rented_vehicles: Vec<VehicleId>,
}

impl User {
    /// Create a new active user with validation
    pub fn new(
        name: impl AsRef<str>,
        email: Email,
        document: impl AsRef<str>,
        user_type: UserType,
    ) -> DomainResult<Self> {
        let name = Self::validate_name(name.as_ref())?;

        let document = document.as_ref().trim();
        if document.is_empty() {
            return Err(DomainError::validation("document", "document cannot be empty"));
        }

        Ok(Self {
            id: UserId::new(),
            name,
            email,
            document: document.to_string(),
            user_type,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
            rented_vehicles: Vec::new(),
        })
    }

    /// Rebuild a user from stored fields without validation
    pub fn rehydrate(parts: UserParts) -> Self {
        Self {
            id: parts.id,
            name: parts.name,
            email: parts.email,
            document: parts.document,
            user_type: parts.user_type,
            is_active: parts.is_active,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
            rented_vehicles: parts.rented_vehicles,
        }
    }

    fn validate_name(name: &str) -> DomainResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name", "name cannot be empty"));
        }
        Ok(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Vehicles currently rented through this user
    pub fn rented_vehicles(&self) -> &[VehicleId] {
        &self.rented_vehicles
    }

    pub fn rented_vehicles_count(&self) -> usize {
        self.rented_vehicles.len()
    }

    pub fn has_rented(&self, vehicle_id: VehicleId) -> bool {
        self.rented_vehicles.contains(&vehicle_id)
    }

    /// Active customers may rent
    pub fn can_rent_vehicles(&self) -> bool {
        self.is_active && self.user_type == UserType::Customer
    }

    pub fn update_name(&mut self, name: impl AsRef<str>) -> DomainResult<()> {
        self.name = Self::validate_name(name.as_ref())?;
        self.touch();
        Ok(())
    }

    pub fn update_email(&mut self, email: Email) {
        self.email = email;
        self.touch();
    }

    pub fn activate(&mut self) -> DomainResult<()> {
        if self.is_active {
            return Err(DomainError::invalid_state("user is already active"));
        }

        self.is_active = true;
        self.touch();
        Ok(())
    }

    pub fn deactivate(&mut self) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::invalid_state("user is already inactive"));
        }

        if !self.rented_vehicles.is_empty() {
            return Err(DomainError::invalid_state(format!(
                "user has {} rented vehicle(s) and cannot be deactivated",
                self.rented_vehicles.len()
            )));
        }

        self.is_active = false;
        self.touch();
        Ok(())
    }

    /// Rent `vehicle` and record it against this user
    pub fn rent_vehicle(&mut self, vehicle: &mut Vehicle) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::invalid_state("inactive user cannot rent vehicles"));
        }

        if !vehicle.is_available() {
            return Err(DomainError::invalid_state(format!(
                "vehicle {} is not available",
                vehicle.license_plate()
            )));
        }

        vehicle.rent()?;
        self.rented_vehicles.push(vehicle.id());
        self.touch();
        Ok(())
    }

    /// Return a vehicle previously rented through this user
    pub fn return_vehicle(&mut self, vehicle: &mut Vehicle) -> DomainResult<()> {
        let position = self
            .rented_vehicles
            .iter()
            .position(|id| *id == vehicle.id())
            .ok_or_else(|| {
                DomainError::invalid_state(format!(
                    "vehicle {} is not rented by this user",
                    vehicle.license_plate()
                ))
            })?;

        vehicle.return_from_rental()?;
        self.rented_vehicles.remove(position);
        self.touch();
        Ok(())
    }

    /// Re-attach a rental while reconstructing a use case
    ///
    /// Only vehicles that are currently rented are accepted.
    pub fn restore_rental(&mut self, vehicle: &Vehicle) -> DomainResult<()> {
        if vehicle.status() != super::VehicleStatus::Rented {
            return Err(DomainError::invalid_state(format!(
                "vehicle {} is not rented",
                vehicle.license_plate()
            )));
        }

        if !self.has_rented(vehicle.id()) {
            self.rented_vehicles.push(vehicle.id());
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl Entity for User {
    const NAME: &'static str = "User";

    fn id(&self) -> UserId {
        self.id
    }
}
