//! Database module for the SafeNest server
//!
//! This module holds the persisted models and the data access layer
//! over the users and emergency_contacts tables.

pub mod models;
pub mod operations;

pub use models::{ContactUpdate, EmergencyContact, NewContact, NewUser, ProfileUpdate, User};
pub use operations::DbOperations;
