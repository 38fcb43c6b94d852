//! Spawning work that inherits the caller's context.

use std::future::Future;

use tokio::task::JoinHandle;

use super::Context;

/// Spawn a tokio task that starts with a snapshot of the caller's context.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(Context::current().scope(future))
}

/// Run a blocking closure on tokio's blocking pool with a snapshot of the
/// caller's context.
pub fn spawn_blocking<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let context = Context::current();
    tokio::task::spawn_blocking(move || context.run(f))
}

/// Spawn an OS thread that starts with a snapshot of the caller's context.
pub fn spawn_thread<F, T>(f: F) -> std::thread::JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let context = Context::current();
    std::thread::spawn(move || context.run(f))
}
