//! # convoy-orchestrator
//!
//! Dependency-ordered service startup coordination.
//!
//! Handles:
//! - **Project**: the immutable, validated model of services and their
//!   dependency edges.
//! - **Graph**: concurrent dependency-ordered visitation with per-service
//!   completion signals.
//! - **Start**: the [`Orchestrator`] composing attachment resolution, the
//!   graph walk, and per-replica start requests.
//! - **Attach**: pre-start resolution of the unit set to monitor.
//! - **Monitor**: detached per-unit exit monitors delivering terminal
//!   [`ContainerEvent`]s.
//!
//! The orchestrator never creates processes itself; every runtime effect
//! goes through the [`EngineClient`](convoy_engine::EngineClient) boundary.

mod attach;
pub mod error;
pub mod event;
pub mod graph;
mod monitor;
pub mod project;
pub mod start;

pub use error::{OrchestratorError, Result};
pub use event::{ContainerEvent, ContainerEventListener};
pub use project::{Project, ServiceConfig};
pub use start::{Orchestrator, StartOptions};
