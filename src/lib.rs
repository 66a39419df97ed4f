//! Fleet rental domain components
//!
//! Vehicles, users and maintenance records with their lifecycle rules,
//! repository contracts with an in-memory implementation, and the
//! application services that tie them together.

pub mod config;
pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod state_machine;

// Re-export commonly used types
pub use config::{ConfigError, FleetConfig};
pub use domain::{
    Email, MaintenanceHistory, MaintenanceType, User, UserType, Vehicle, VehicleAggregate,
    VehicleModel, VehicleStatus,
};
pub use errors::{DomainError, DomainResult, ErrorKind};
pub use repository::{RepositoryError, RepositoryResult};
pub use service::{ServiceError, ServiceResult};
