//! # Hearth Common
//!
//! Shared host-side types and infrastructure for the Hearth integration host.
//!
//! This crate defines the seams between the host application and its
//! subsystems: the integration registry, the component index, and the
//! structured logging setup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod integration;
pub mod logging;

pub use integration::{ComponentIndex, Integration, IntegrationRegistry, RegistryError};
pub use logging::{init_logging, init_test_logging, LoggingConfig};
