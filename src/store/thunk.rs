//! Asynchronous operations dispatched through the store.
//!
//! A [`Thunk`] bundles an operation prefix, its argument and a future. Running
//! it dispatches `<prefix>/pending`, then `<prefix>/fulfilled` or
//! `<prefix>/rejected` once the future resolves. The future itself never sees
//! the store, so the store stays single-owner.
//!
//! Two ways to run one:
//! - [`run`] awaits the future in place (command line)
//! - [`ThunkQueue`] spawns it on tokio and settles it from a per-frame poll (GUI)

use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;

use crate::store::Store;
use crate::store::action::{Action, Fulfilled, Rejection, ThunkArg};

pub type ThunkResult = Result<Fulfilled, Rejection>;

/// Identifies one spawned operation
pub type RequestId = u64;

pub struct Thunk {
    pub type_prefix: &'static str,
    pub arg: ThunkArg,
    future: BoxFuture<'static, ThunkResult>,
    finally: Vec<Action>,
}

impl Thunk {
    pub fn new<F>(type_prefix: &'static str, arg: ThunkArg, future: F) -> Self
    where
        F: Future<Output = ThunkResult> + Send + 'static,
    {
        Self {
            type_prefix,
            arg,
            future: future.boxed(),
            finally: Vec::new(),
        }
    }

    /// An operation that fails without doing any I/O
    pub fn rejected(type_prefix: &'static str, arg: ThunkArg, rejection: Rejection) -> Self {
        Self::new(type_prefix, arg, async move { Err(rejection) })
    }

    /// Dispatch `action` after the operation settles, whatever the outcome
    pub fn finally(mut self, action: Action) -> Self {
        self.finally.push(action);
        self
    }
}

impl std::fmt::Debug for Thunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thunk")
            .field("type_prefix", &self.type_prefix)
            .field("arg", &self.arg)
            .finish_non_exhaustive()
    }
}

/// A finished operation, reported back to whoever spawned it
#[derive(Debug, Clone)]
pub struct Settled {
    pub id: RequestId,
    pub type_prefix: &'static str,
    pub arg: ThunkArg,
    pub outcome: ThunkResult,
}

fn settle(
    store: &mut Store,
    type_prefix: &'static str,
    arg: &ThunkArg,
    outcome: &ThunkResult,
    finally: Vec<Action>,
) {
    match outcome {
        Ok(value) => store.dispatch(Action::fulfilled(type_prefix, arg.clone(), value.clone())),
        Err(rejection) => {
            store.dispatch(Action::rejected(type_prefix, arg.clone(), rejection.clone()))
        }
    }
    for action in finally {
        store.dispatch(action);
    }
}

/// Run an operation to completion, dispatching its lifecycle into `store`
pub async fn run(store: &mut Store, thunk: Thunk) -> ThunkResult {
    let Thunk {
        type_prefix,
        arg,
        future,
        finally,
    } = thunk;

    store.dispatch(Action::pending(type_prefix, arg.clone()));
    let outcome = future.await;
    settle(store, type_prefix, &arg, &outcome, finally);
    outcome
}

/// Result of polling a task
enum PollResult<T> {
    /// No task to poll (task was None)
    NoTask,
    /// Task is still running
    Pending,
    /// Task completed with result (may be Ok or join error)
    Complete(Result<T, tokio::task::JoinError>),
}

/// Poll an optional task handle and return its result if finished.
///
/// The handle is only taken once it has produced its result. The poll runs
/// outside tokio's cooperative budget: the GUI polls every frame from inside
/// one long-lived runtime task, whose budget is never replenished.
fn poll_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    let Some(handle) = task.as_mut() else {
        return PollResult::NoTask;
    };

    if !handle.is_finished() {
        return PollResult::Pending;
    }

    let polled = tokio::task::unconstrained(handle).now_or_never();
    match polled {
        Some(result) => {
            task.take();
            PollResult::Complete(result)
        }
        None => {
            tracing::warn!("Task not ready despite is_finished()");
            PollResult::Pending
        }
    }
}

struct InFlight {
    id: RequestId,
    type_prefix: &'static str,
    arg: ThunkArg,
    finally: Vec<Action>,
    handle: Option<JoinHandle<ThunkResult>>,
}

/// Operations spawned on the tokio runtime, settled by [`ThunkQueue::poll`]
#[derive(Default)]
pub struct ThunkQueue {
    next_id: RequestId,
    in_flight: Vec<InFlight>,
}

impl ThunkQueue {
    /// Dispatch `pending` and start the operation in the background
    pub fn spawn(&mut self, store: &mut Store, thunk: Thunk) -> RequestId {
        let Thunk {
            type_prefix,
            arg,
            future,
            finally,
        } = thunk;

        self.next_id += 1;
        let id = self.next_id;

        store.dispatch(Action::pending(type_prefix, arg.clone()));
        let handle = tokio::spawn(future);

        self.in_flight.push(InFlight {
            id,
            type_prefix,
            arg,
            finally,
            handle: Some(handle),
        });
        id
    }

    /// Number of operations not yet settled
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Settle every finished operation, in spawn order
    pub fn poll(&mut self, store: &mut Store) -> Vec<Settled> {
        let mut settled = Vec::new();
        let mut running = Vec::with_capacity(self.in_flight.len());

        for mut entry in self.in_flight.drain(..) {
            match poll_task(&mut entry.handle) {
                PollResult::Pending => running.push(entry),
                PollResult::NoTask => {}
                PollResult::Complete(result) => {
                    let outcome = result.unwrap_or_else(|e| {
                        tracing::error!("{} task panicked: {}", entry.type_prefix, e);
                        Err(Rejection::from_error(&e))
                    });
                    settle(store, entry.type_prefix, &entry.arg, &outcome, entry.finally);
                    settled.push(Settled {
                        id: entry.id,
                        type_prefix: entry.type_prefix,
                        arg: entry.arg,
                        outcome,
                    });
                }
            }
        }

        self.in_flight = running;
        settled
    }
}
