//! Cajas — session handling, route protection and remote API access for the
//! cash-register dashboard.

pub mod config;
pub mod guard;
pub mod routes;
pub mod services;
pub mod state;
