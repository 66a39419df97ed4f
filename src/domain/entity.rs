// Copyright (c) 2025 - Cowboy AI, Inc.
//! Entity capability shared by everything a repository can store

use super::ids::EntityId;

/// Identity-bearing domain object
pub trait Entity: Sized {
    /// Collection name used in logs and error messages
    const NAME: &'static str;

    /// Immutable identity of this entity
    fn id(&self) -> EntityId<Self>;
}
