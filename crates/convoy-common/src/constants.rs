//! Label conventions and naming constants.
//!
//! Every unit the engine creates for a project carries these labels; the
//! orchestrator recovers a unit's owning service from the label rather than
//! maintaining its own service-to-unit index.

/// Label naming the project a unit belongs to.
pub const LABEL_PROJECT: &str = "io.convoy.project";

/// Label naming the service a unit belongs to.
pub const LABEL_SERVICE: &str = "io.convoy.service";

/// Label carrying the one-based replica number of a unit within its service.
pub const LABEL_REPLICA: &str = "io.convoy.replica";

/// Separator between the project prefix and the service-relative part of a
/// unit's engine name (`{project}-{service}-{n}`).
pub const NAME_SEPARATOR: char = '-';

/// Application name used in log output.
pub const APP_NAME: &str = "convoy";
