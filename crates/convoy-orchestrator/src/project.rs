//! Declarative project model: services and their dependency edges.
//!
//! A [`Project`] is an immutable snapshot constructed before startup runs.
//! Validation happens at construction time, so the walker can assume the
//! dependency relation is acyclic and every declared edge points at a
//! service that exists.

use std::collections::{HashMap, HashSet};

use convoy_common::error::{ConvoyError, Result};
use serde::{Deserialize, Serialize};

/// Declarative configuration of one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name, unique within the project.
    pub name: String,
    /// Names of services that must be started before this one.
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Number of units to start for this service.
    #[serde(default = "default_replicas")]
    pub replicas: usize,
}

const fn default_replicas() -> usize {
    1
}

impl ServiceConfig {
    /// Creates a service with no dependencies and a single replica.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depends_on: Vec::new(),
            replicas: default_replicas(),
        }
    }

    /// Adds a dependency on another service.
    #[must_use]
    pub fn with_dependency(mut self, dep: impl Into<String>) -> Self {
        self.depends_on.push(dep.into());
        self
    }

    /// Sets the number of replicas to start.
    #[must_use]
    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }
}

/// Immutable snapshot of a project's services and dependency edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    name: String,
    services: Vec<ServiceConfig>,
}

impl Project {
    /// Builds a validated project from declared services.
    ///
    /// Service declaration order is preserved and used only for display;
    /// startup order is derived from the dependency edges.
    ///
    /// # Errors
    ///
    /// Returns an error if a service name is declared twice, a dependency
    /// names an unknown service, or the dependency relation is cyclic.
    pub fn new(name: impl Into<String>, services: Vec<ServiceConfig>) -> Result<Self> {
        let mut seen = HashSet::new();
        for service in &services {
            if !seen.insert(service.name.clone()) {
                return Err(ConvoyError::Config {
                    message: format!("service {} declared more than once", service.name),
                });
            }
        }
        for service in &services {
            for dep in &service.depends_on {
                if !seen.contains(dep) {
                    return Err(ConvoyError::NotFound {
                        kind: "service",
                        id: dep.clone(),
                    });
                }
            }
        }
        check_acyclic(&services)?;

        Ok(Self {
            name: name.into(),
            services,
        })
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all service names in declaration order.
    #[must_use]
    pub fn service_names(&self) -> Vec<String> {
        self.services.iter().map(|s| s.name.clone()).collect()
    }

    /// Returns the declared services in declaration order.
    #[must_use]
    pub fn services(&self) -> &[ServiceConfig] {
        &self.services
    }

    /// Looks up a service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|s| s.name == name)
    }
}

/// Rejects cyclic dependency declarations.
///
/// The graph edge points from dependency to dependent so that a topological
/// sort would yield dependencies first; only the sort's success is used here.
fn check_acyclic(services: &[ServiceConfig]) -> Result<()> {
    let mut graph = petgraph::Graph::<String, ()>::new();
    let mut node_map = HashMap::new();
    for service in services {
        let idx = graph.add_node(service.name.clone());
        let _ = node_map.insert(service.name.as_str(), idx);
    }
    for service in services {
        for dep in &service.depends_on {
            if let (Some(&to), Some(&from)) = (node_map.get(service.name.as_str()), node_map.get(dep.as_str())) {
                let _ = graph.add_edge(from, to, ());
            }
        }
    }
    match petgraph::algo::toposort(&graph, None) {
        Ok(_) => Ok(()),
        Err(_cycle) => Err(ConvoyError::Config {
            message: "cyclic dependency detected in service graph".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_project_is_valid() {
        let project = Project::new("shop", vec![]).expect("should validate");
        assert!(project.service_names().is_empty());
    }

    #[test]
    fn service_names_preserve_declaration_order() {
        let project = Project::new(
            "shop",
            vec![
                ServiceConfig::new("web").with_dependency("db"),
                ServiceConfig::new("db"),
            ],
        )
        .expect("should validate");
        assert_eq!(project.service_names(), vec!["web", "db"]);
    }

    #[test]
    fn duplicate_service_is_rejected() {
        let result = Project::new(
            "shop",
            vec![ServiceConfig::new("db"), ServiceConfig::new("db")],
        );
        let msg = result.expect_err("should reject").to_string();
        assert!(msg.contains("declared more than once"), "got: {msg}");
    }

    #[test]
    fn unknown_dependency_is_rejected() {
        let result = Project::new("shop", vec![ServiceConfig::new("web").with_dependency("db")]);
        let msg = result.expect_err("should reject").to_string();
        assert!(msg.contains("service not found: db"), "got: {msg}");
    }

    #[test]
    fn dependency_cycle_is_rejected() {
        let result = Project::new(
            "shop",
            vec![
                ServiceConfig::new("a").with_dependency("b"),
                ServiceConfig::new("b").with_dependency("a"),
            ],
        );
        let msg = result.expect_err("should reject").to_string();
        assert!(msg.contains("cyclic"), "got: {msg}");
    }

    #[test]
    fn self_dependency_is_rejected() {
        let result = Project::new("shop", vec![ServiceConfig::new("a").with_dependency("a")]);
        assert!(result.is_err());
    }

    #[test]
    fn diamond_dependencies_are_valid() {
        let project = Project::new(
            "shop",
            vec![
                ServiceConfig::new("base"),
                ServiceConfig::new("left").with_dependency("base"),
                ServiceConfig::new("right").with_dependency("base"),
                ServiceConfig::new("top")
                    .with_dependency("left")
                    .with_dependency("right"),
            ],
        );
        assert!(project.is_ok());
    }

    #[test]
    fn deserialized_service_gets_defaults() {
        let service: ServiceConfig =
            serde_json::from_str(r#"{"name": "db"}"#).expect("deserialize");
        assert_eq!(service.name, "db");
        assert!(service.depends_on.is_empty());
        assert_eq!(service.replicas, 1);
    }

    #[test]
    fn service_lookup_returns_config() {
        let project = Project::new("shop", vec![ServiceConfig::new("db").with_replicas(3)])
            .expect("should validate");
        let db = project.service("db").expect("db exists");
        assert_eq!(db.replicas, 3);
        assert!(project.service("missing").is_none());
    }
}
