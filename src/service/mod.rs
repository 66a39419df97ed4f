// Copyright (c) 2025 - Cowboy AI, Inc.
//! Application Service Layer for Fleet Rental
//!
//! Services orchestrate use cases: they load entities through repository
//! contracts, invoke domain behavior, and persist the results.
//!
//! # Architecture
//!
//! ```text
//! Client Request (DTO)
//!     ↓
//! Service Layer (this module)
//!     ↓
//! Repository → Entity / VehicleAggregate → Repository
//!     ↓
//! Response (DTO)
//! ```
//!
//! # Transaction Semantics
//!
//! Each service method is one use case:
//! 1. Load entities (unknown ids fail with `NotFound`)
//! 2. Check cross-entity rules (uniqueness, outstanding rentals)
//! 3. Invoke domain behavior, which enforces entity invariants
//! 4. Persist every changed entity
//!
//! Use cases that write two entities undo the first write when the second
//! one fails.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fleet_rental::repository::InMemoryUserRepository;
//! use fleet_rental::service::{CreateUserDto, RepositoryUserService, UserService};
//!
//! let service = RepositoryUserService::new(Arc::new(InMemoryUserRepository::new()));
//! let user = service.create_user(CreateUserDto { /* ... */ }).await?;
//! ```

pub mod dto;
pub mod rental;
pub mod user;
pub mod vehicle;

pub use dto::*;
pub use rental::{RentalService, RepositoryRentalService};
pub use user::{RepositoryUserService, UserService};
pub use vehicle::{RepositoryVehicleService, VehicleService};

use crate::errors::{DomainError, ErrorKind};
use crate::repository::RepositoryError;

/// Service layer result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service layer errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule rejected the operation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Persistence failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Domain(e) => e.kind(),
            ServiceError::Repository(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_passes_through() {
        let err: ServiceError = DomainError::conflict("plate taken").into();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "Conflict: plate taken");

        let err: ServiceError = RepositoryError::Storage("offline".into()).into();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
