use crate::{core::ProblemInstance, resolvers::Resolution};
use anyhow::{anyhow, Result};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::JoinHandle,
};

/// A cooperative cancellation flag shared between a resolution run and its
/// caller.
///
/// The resolvers check the flag at least once per enumerated candidate, so a
/// cancellation is observed with bounded latency.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Builds a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` iff cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A resolution run executing on a dedicated worker thread.
///
/// The task is created already running. It is a one-shot future:
/// [`ResolverTask::join`] consumes the task, blocks until the worker
/// finishes, and returns the worker's outcome or propagates its error.
pub struct ResolverTask {
    token: CancellationToken,
    handle: JoinHandle<Result<Resolution>>,
}

impl ResolverTask {
    /// Starts resolving a batch of instances on a new worker thread.
    pub fn spawn(instances: Vec<ProblemInstance>) -> Self {
        let token = CancellationToken::new();
        let worker_token = token.clone();
        let handle =
            std::thread::spawn(move || crate::resolvers::resolve(&instances, &worker_token));
        Self { token, handle }
    }

    /// Returns a token that cancels this run.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Requests cancellation of the run; the worker unwinds at its next
    /// enumeration step and reports [`Resolution::Cancelled`].
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Blocks until the worker finishes, returning its outcome.
    pub fn join(self) -> Result<Resolution> {
        self.handle
            .join()
            .map_err(|_| anyhow!("the resolver worker panicked"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::Proposition, revision::RevisionOperator};
    use std::collections::BTreeSet;

    fn parse(text: &str) -> Proposition {
        Proposition::parse(text).unwrap()
    }

    #[test]
    fn test_token_starts_clear() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_token_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_task_completes() {
        let initial = [parse("a")].into_iter().collect::<BTreeSet<_>>();
        let instance =
            ProblemInstance::new(initial, parse("a"), RevisionOperator::Satisfiability);
        let task = ResolverTask::spawn(vec![instance]);
        match task.join().unwrap() {
            Resolution::Announcement(_) => {}
            other => panic!("expected an announcement, got {:?}", other),
        }
    }

    #[test]
    fn test_cancelled_task_reports_cancellation() {
        // the target is unsatisfiable, so the search over an 8-variable
        // universe can never succeed nor complete in any reasonable time
        let initial = (0..8)
            .map(|i| parse(&format!("v{}", i)))
            .collect::<BTreeSet<_>>();
        let instance = ProblemInstance::new(
            initial,
            parse("v0 and -v0"),
            RevisionOperator::Satisfiability,
        );
        let task = ResolverTask::spawn(vec![instance]);
        task.cancel();
        assert_eq!(Resolution::Cancelled, task.join().unwrap());
    }
}
