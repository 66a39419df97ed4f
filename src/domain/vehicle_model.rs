// Copyright (c) 2025 - Cowboy AI, Inc.
//! Vehicle Model Value Object (brand + model name)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::{DomainError, DomainResult};

/// Brand and model of a vehicle
///
/// Both parts are trimmed and must be non-blank. Comparison and hashing
/// ignore case, so `"Toyota Corolla"` and `"TOYOTA corolla"` are the same
/// model, while the original spelling is kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleModel {
    brand: String,
    model: String,
}

impl VehicleModel {
    pub fn new(brand: impl AsRef<str>, model: impl AsRef<str>) -> DomainResult<Self> {
        let brand = brand.as_ref().trim();
        let model = model.as_ref().trim();

        if brand.is_empty() {
            return Err(DomainError::validation("brand", "brand cannot be empty"));
        }

        if model.is_empty() {
            return Err(DomainError::validation("model", "model cannot be empty"));
        }

        Ok(Self {
            brand: brand.to_string(),
            model: model.to_string(),
        })
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// `"{brand} {model}"`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

impl PartialEq for VehicleModel {
    fn eq(&self, other: &Self) -> bool {
        self.brand.to_lowercase() == other.brand.to_lowercase()
            && self.model.to_lowercase() == other.model.to_lowercase()
    }
}

impl Eq for VehicleModel {}

impl Hash for VehicleModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.brand.to_lowercase().hash(state);
        self.model.to_lowercase().hash(state);
    }
}

impl fmt::Display for VehicleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.brand, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_create_model() {
        let model = VehicleModel::new("  Toyota ", "Corolla ").unwrap();
        assert_eq!(model.brand(), "Toyota");
        assert_eq!(model.model(), "Corolla");
        assert_eq!(model.full_name(), "Toyota Corolla");
        assert_eq!(model.to_string(), "Toyota Corolla");
    }

    #[test]
    fn test_blank_parts_rejected() {
        assert!(matches!(
            VehicleModel::new("", "Corolla"),
            Err(DomainError::Validation { field: "brand", .. })
        ));
        assert!(matches!(
            VehicleModel::new("Toyota", "   "),
            Err(DomainError::Validation { field: "model", .. })
        ));
    }

    #[test]
    fn test_case_insensitive_equality_and_hash() {
        let a = VehicleModel::new("Honda", "Civic").unwrap();
        let b = VehicleModel::new("HONDA", "civic").unwrap();
        let c = VehicleModel::new("Honda", "Fit").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
