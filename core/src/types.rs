//! Domain DTOs for the hero API.
//!
//! These mirror the mock-server's schema but are defined independently so
//! that integration tests catch any drift between the two crates.

use serde::{Deserialize, Serialize};

/// A hero as stored by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hero {
    pub id: u32,
    pub name: String,
}

/// Request payload for adding a hero. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewHero {
    pub name: String,
}

impl NewHero {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
