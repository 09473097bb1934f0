//! # API Shared
//!
//! Shared definitions for the CleanLabel APIs.
//!
//! Contains:
//! - JSON request/response types with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//!
//! The DTOs flatten core types into plain strings and numbers so the wire format stays stable
//! when core enums gain variants.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::{HealthRes, HealthService};
