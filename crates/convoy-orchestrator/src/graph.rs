//! Concurrent dependency-ordered visitation.
//!
//! Rather than flattening the graph into one topological sequence, each
//! service gets its own branch task and a one-shot completion signal. A
//! branch blocks only on the signals of its direct dependencies, runs its
//! visit, then fires its own signal — so independent subtrees proceed fully
//! in parallel while every dependency edge is still honored.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::error::{OrchestratorError, Result};
use crate::project::Project;

/// Resolution of one service's branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The visit ran and returned `Ok`.
    Visited,
    /// The branch was pruned without visiting: a dependency did not resolve
    /// successfully, or the walk was cancelled first.
    Skipped,
    /// The visit ran and returned an error.
    Failed,
}

/// Applies `visit` to every service of `project`, honoring dependency order.
///
/// `visit(service)` is not invoked until the visit of every service in its
/// dependency list has returned `Ok`; services whose dependencies are all
/// resolved run concurrently. When a visit fails, every service depending on
/// it (directly or transitively) is pruned and never visited, and the first
/// error observed is returned — but only after every spawned branch has
/// resolved, so no visit is left in flight when `walk` returns.
///
/// Cancelling `cancel` prunes branches that have not started visiting yet;
/// in-flight visits are expected to observe the token cooperatively.
///
/// The dependency relation must be acyclic and closed over the project's
/// services; [`Project::new`](crate::project::Project::new) enforces both.
///
/// # Errors
///
/// Returns the first visit error, [`OrchestratorError::Cancelled`] if the
/// token fired mid-walk, or [`OrchestratorError::Branch`] if a branch task
/// aborted without resolving.
pub async fn walk<V, F>(project: &Project, cancel: &CancellationToken, visit: V) -> Result<()>
where
    V: Fn(String) -> F + Send + Sync + 'static,
    F: Future<Output = Result<()>> + Send + 'static,
{
    let visit = Arc::new(visit);

    let mut senders = HashMap::new();
    let mut receivers = HashMap::new();
    for name in project.service_names() {
        let (tx, rx) = watch::channel(None::<Outcome>);
        let _ = senders.insert(name.clone(), tx);
        let _ = receivers.insert(name, rx);
    }

    let mut branches: JoinSet<Result<()>> = JoinSet::new();
    for service in project.services() {
        let Some(tx) = senders.remove(&service.name) else {
            continue;
        };
        let deps: Vec<_> = service
            .depends_on
            .iter()
            .filter_map(|dep| receivers.get(dep).cloned())
            .collect();
        let _ = branches.spawn(run_branch(
            service.name.clone(),
            deps,
            tx,
            cancel.clone(),
            Arc::clone(&visit),
        ));
    }

    let mut first_err = None;
    while let Some(joined) = branches.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
            Err(e) => {
                if first_err.is_none() {
                    first_err = Some(OrchestratorError::Branch {
                        message: e.to_string(),
                    });
                }
            }
        }
    }
    first_err.map_or(Ok(()), Err)
}

/// One service's branch: await direct dependencies, visit, fire the signal.
async fn run_branch<V, F>(
    name: String,
    deps: Vec<watch::Receiver<Option<Outcome>>>,
    tx: watch::Sender<Option<Outcome>>,
    cancel: CancellationToken,
    visit: Arc<V>,
) -> Result<()>
where
    V: Fn(String) -> F + Send + Sync,
    F: Future<Output = Result<()>> + Send,
{
    for mut dep in deps {
        let outcome = tokio::select! {
            settled = dep.wait_for(Option::is_some) => match settled {
                Ok(value) => (*value).unwrap_or(Outcome::Skipped),
                // Sender dropped without settling; treat the branch as pruned.
                Err(_) => Outcome::Skipped,
            },
            () = cancel.cancelled() => {
                let _ = tx.send(Some(Outcome::Skipped));
                return Err(OrchestratorError::Cancelled);
            }
        };
        if outcome != Outcome::Visited {
            tracing::debug!(service = %name, "skipping: dependency did not start");
            let _ = tx.send(Some(Outcome::Skipped));
            return Ok(());
        }
    }

    if cancel.is_cancelled() {
        let _ = tx.send(Some(Outcome::Skipped));
        return Err(OrchestratorError::Cancelled);
    }

    match visit(name).await {
        Ok(()) => {
            let _ = tx.send(Some(Outcome::Visited));
            Ok(())
        }
        Err(e) => {
            let _ = tx.send(Some(Outcome::Failed));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use convoy_engine::EngineError;
    use tokio::sync::Barrier;
    use tokio::time::timeout;

    use super::*;
    use crate::project::ServiceConfig;

    fn project(services: Vec<ServiceConfig>) -> Project {
        Project::new("test", services).expect("valid project")
    }

    fn recording_visit(
        log: Arc<Mutex<Vec<String>>>,
    ) -> impl Fn(String) -> std::pin::Pin<Box<dyn Future<Output = Result<()>> + Send>> + Send + Sync
    {
        move |name| {
            let log = Arc::clone(&log);
            Box::pin(async move {
                log.lock().expect("lock").push(name);
                Ok(())
            })
        }
    }

    #[tokio::test]
    async fn dependency_is_visited_before_dependent() {
        let p = project(vec![
            ServiceConfig::new("web").with_dependency("db"),
            ServiceConfig::new("db"),
        ]);
        let log = Arc::new(Mutex::new(Vec::new()));
        walk(&p, &CancellationToken::new(), recording_visit(Arc::clone(&log)))
            .await
            .expect("walk succeeds");
        assert_eq!(*log.lock().expect("lock"), vec!["db", "web"]);
    }

    #[tokio::test]
    async fn diamond_visits_each_service_exactly_once() {
        let p = project(vec![
            ServiceConfig::new("base"),
            ServiceConfig::new("left").with_dependency("base"),
            ServiceConfig::new("right").with_dependency("base"),
            ServiceConfig::new("top")
                .with_dependency("left")
                .with_dependency("right"),
        ]);
        let log = Arc::new(Mutex::new(Vec::new()));
        walk(&p, &CancellationToken::new(), recording_visit(Arc::clone(&log)))
            .await
            .expect("walk succeeds");

        let visited = log.lock().expect("lock").clone();
        assert_eq!(visited.len(), 4);
        let pos = |name: &str| visited.iter().position(|v| v == name).expect(name);
        assert!(pos("base") < pos("left"));
        assert!(pos("base") < pos("right"));
        assert!(pos("left") < pos("top"));
        assert!(pos("right") < pos("top"));
    }

    #[tokio::test]
    async fn independent_services_run_concurrently() {
        let p = project(vec![ServiceConfig::new("a"), ServiceConfig::new("b")]);
        // Each visit blocks until the other has also started; a serialized
        // walk would deadlock here and trip the timeout.
        let barrier = Arc::new(Barrier::new(2));
        let result = timeout(
            Duration::from_secs(5),
            walk(&p, &CancellationToken::new(), move |_name| {
                let barrier = Arc::clone(&barrier);
                async move {
                    let _ = barrier.wait().await;
                    Ok(())
                }
            }),
        )
        .await;
        result
            .expect("independent services were serialized")
            .expect("walk succeeds");
    }

    #[tokio::test]
    async fn failed_service_prunes_dependents_but_not_siblings() {
        let p = project(vec![
            ServiceConfig::new("db"),
            ServiceConfig::new("web").with_dependency("db"),
            ServiceConfig::new("cache"),
        ]);
        let log = Arc::new(Mutex::new(Vec::new()));
        let visited = Arc::clone(&log);
        let err = walk(&p, &CancellationToken::new(), move |name| {
            let visited = Arc::clone(&visited);
            async move {
                if name == "db" {
                    return Err(OrchestratorError::Start {
                        service: name,
                        source: EngineError::StartFailed {
                            unit_name: "test-db-1".into(),
                            message: "no such image".into(),
                        },
                    });
                }
                visited.lock().expect("lock").push(name);
                Ok(())
            }
        })
        .await
        .expect_err("walk should fail");

        assert!(matches!(err, OrchestratorError::Start { service, .. } if service == "db"));
        let visited = log.lock().expect("lock").clone();
        assert!(!visited.contains(&"web".to_string()), "web must be pruned");
        assert!(visited.contains(&"cache".to_string()), "cache is unrelated");
    }

    #[tokio::test]
    async fn transitive_dependents_are_pruned() {
        let p = project(vec![
            ServiceConfig::new("a"),
            ServiceConfig::new("b").with_dependency("a"),
            ServiceConfig::new("c").with_dependency("b"),
        ]);
        let log = Arc::new(Mutex::new(Vec::new()));
        let visited = Arc::clone(&log);
        let err = walk(&p, &CancellationToken::new(), move |name| {
            let visited = Arc::clone(&visited);
            async move {
                if name == "a" {
                    return Err(OrchestratorError::Cancelled);
                }
                visited.lock().expect("lock").push(name);
                Ok(())
            }
        })
        .await;

        assert!(err.is_err());
        assert!(log.lock().expect("lock").is_empty(), "b and c must be pruned");
    }

    #[tokio::test]
    async fn pre_cancelled_walk_visits_nothing() {
        let p = project(vec![
            ServiceConfig::new("db"),
            ServiceConfig::new("web").with_dependency("db"),
        ]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let log = Arc::new(Mutex::new(Vec::new()));
        let err = walk(&p, &cancel, recording_visit(Arc::clone(&log)))
            .await
            .expect_err("cancelled walk should fail");
        assert!(matches!(err, OrchestratorError::Cancelled));
        assert!(log.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn empty_project_walk_is_a_no_op() {
        let p = project(vec![]);
        walk(&p, &CancellationToken::new(), |_name| async { Ok(()) })
            .await
            .expect("empty walk succeeds");
    }
}
