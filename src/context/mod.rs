//! Context-scoped storage for variable values.
//!
//! # Data Flow
//! ```text
//! ScopedVariable::set(v)
//!     → current context:
//!         scoped slot    inside `scope` / `run` / the spawn helpers
//!         detached slot  inside any other tokio task, keyed by task id
//!         thread slot    outside tokio tasks
//!     → copy-on-write insert into that context's snapshot map
//!
//! context::spawn(fut) / Context::current().scope(fut)
//!     → snapshot of the caller's context moves into the child
//!     → child writes never reach the parent
//! ```
//!
//! # Design Decisions
//! - A context is an immutable map behind an `Arc`; forking is a pointer copy
//! - Every OS thread and every tokio task starts with an empty context
//! - Inside a scope (`scope`, `run`, or the spawn helpers) the task-local slot
//!   shadows everything else
//! - Tasks spawned with plain `tokio::spawn` get a detached context keyed by
//!   their task id, so sibling tasks on one worker thread never share values
//! - Detached contexts cannot observe task exit; once more than
//!   [`DETACHED_LIMIT`] exist the least recently written half is dropped.
//!   Spawn through [`spawn`] when a task must not be evicted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tokio::task::futures::TaskLocalFuture;

use crate::value::Value;

pub mod spawn;

pub use spawn::{spawn, spawn_blocking, spawn_thread};

tokio::task_local! {
    static TASK_CONTEXT: RefCell<Context>;
}

thread_local! {
    static THREAD_CONTEXT: RefCell<Context> = RefCell::new(Context::new());
}

/// Detached contexts kept before the least recently written half is dropped.
pub const DETACHED_LIMIT: usize = 65_536;

/// Contexts of tokio tasks running outside any scope.
static DETACHED: LazyLock<DashMap<tokio::task::Id, Detached>> = LazyLock::new(DashMap::new);

#[derive(Debug, Default)]
struct Detached {
    context: Context,
    touched: u64,
}

fn next_touch() -> u64 {
    static TOUCH: AtomicU64 = AtomicU64::new(0);
    TOUCH.fetch_add(1, Ordering::Relaxed)
}

/// Where the calling code keeps its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Scoped,
    Detached(tokio::task::Id),
    Thread,
}

impl Slot {
    fn current() -> Self {
        if TASK_CONTEXT.try_with(|_| ()).is_ok() {
            Slot::Scoped
        } else if let Some(id) = tokio::task::try_id() {
            Slot::Detached(id)
        } else {
            Slot::Thread
        }
    }
}

/// Identity of a scoped variable inside a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct VarKey(u64);

impl VarKey {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Snapshot of every scoped variable value visible to one execution context.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Arc<HashMap<VarKey, Value>>,
}

impl Context {
    /// An empty context in which no variable is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calling context.
    pub fn current() -> Self {
        match Slot::current() {
            Slot::Scoped => TASK_CONTEXT.with(|cell| cell.borrow().clone()),
            Slot::Detached(id) => DETACHED
                .get(&id)
                .map(|entry| entry.context.clone())
                .unwrap_or_default(),
            Slot::Thread => THREAD_CONTEXT.with(|cell| cell.borrow().clone()),
        }
    }

    /// Number of variables set in this context.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Run `f` with this context as the current one.
    ///
    /// Writes made by `f` stay in this copy and are dropped when it returns.
    pub fn run<R>(self, f: impl FnOnce() -> R) -> R {
        TASK_CONTEXT.sync_scope(RefCell::new(self), f)
    }

    /// Wrap `future` so that it runs with this context as the current one.
    pub fn scope<F: Future>(self, future: F) -> TaskLocalFuture<RefCell<Context>, F> {
        TASK_CONTEXT.scope(RefCell::new(self), future)
    }

    fn get(&self, key: VarKey) -> Option<&Value> {
        self.values.get(&key)
    }

    fn insert(&mut self, key: VarKey, value: Value) {
        Arc::make_mut(&mut self.values).insert(key, value);
    }
}

/// Value of `key` in the current context.
pub(crate) fn read(key: VarKey) -> Option<Value> {
    match Slot::current() {
        Slot::Scoped => TASK_CONTEXT.with(|cell| cell.borrow().get(key).cloned()),
        Slot::Detached(id) => DETACHED
            .get(&id)
            .and_then(|entry| entry.context.get(key).cloned()),
        Slot::Thread => THREAD_CONTEXT.with(|cell| cell.borrow().get(key).cloned()),
    }
}

/// Store `value` under `key` in the current context.
pub(crate) fn write(key: VarKey, value: Value) {
    match Slot::current() {
        Slot::Scoped => TASK_CONTEXT.with(|cell| cell.borrow_mut().insert(key, value)),
        Slot::Detached(id) => {
            {
                let mut entry = DETACHED.entry(id).or_default();
                entry.context.insert(key, value);
                entry.touched = next_touch();
            }
            evict_detached();
        }
        Slot::Thread => THREAD_CONTEXT.with(|cell| cell.borrow_mut().insert(key, value)),
    }
}

fn evict_detached() {
    if DETACHED.len() <= DETACHED_LIMIT {
        return;
    }

    let mut touched: Vec<u64> = DETACHED.iter().map(|entry| entry.touched).collect();
    touched.sort_unstable();
    let keep = DETACHED_LIMIT / 2;
    let cutoff = touched[touched.len().saturating_sub(keep)];
    DETACHED.retain(|_, entry| entry.touched >= cutoff);

    tracing::warn!(
        evicted = touched.len() - DETACHED.len(),
        "Dropped detached task contexts; spawn through clogger::context::spawn to keep them"
    );
}
