//! # convoy-engine
//!
//! The boundary between the orchestrator and the external container engine.
//!
//! Handles:
//! - **Client**: the [`EngineClient`](client::EngineClient) trait the
//!   orchestrator drives — start requests, exit waits, unit discovery.
//! - **Unit**: the observed-unit model ([`Unit`](unit::Unit),
//!   [`ServiceRef`](unit::ServiceRef), [`UnitFilter`](unit::UnitFilter)).
//!
//! Convoy never creates processes itself; everything that touches the real
//! runtime lives behind this crate's trait.

pub mod client;
pub mod error;
pub mod unit;

pub use client::{EngineClient, WaitCondition, WaitStatus};
pub use error::{EngineError, Result};
pub use unit::{ServiceRef, Unit, UnitFilter};
