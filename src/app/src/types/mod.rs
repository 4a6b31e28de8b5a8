//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - auth: Session types
//! - common: Shared system types and overlay state
//! - device: Device operation state machine
//! - factory_reset: Factory reset types
//! - network: Network configuration, form and change state machines
//! - ods: Wire format of device-service channel payloads
//! - update: Firmware update and healthcheck types

pub mod auth;
pub mod common;
pub mod device;
pub mod factory_reset;
pub mod network;
pub mod ods;
pub mod update;

pub use auth::*;
pub use common::*;
pub use device::*;
pub use factory_reset::*;
pub use network::*;
pub use update::*;
