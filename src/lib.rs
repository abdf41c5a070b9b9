//! AI-assisted Solidity security auditing.
//!
//! Runs the Slither static analyzer over a contract, then asks a completion
//! API to explain the findings in plain language. Exposed as a CLI and as a
//! single `POST /analyze` HTTP route.

pub mod config;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod helpers;
pub mod logger;
pub mod server;
pub mod services;
pub mod structs;
pub mod traits;
pub mod workers;
