//! Services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own session storage and remote API access so route
//! handlers can stay focused on request/response translation.

pub mod api;
pub mod auth;
pub mod credentials;
pub mod records;
pub mod response;
