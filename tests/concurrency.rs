//! Context isolation across tasks and threads sharing one logger.

use std::sync::Arc;
use std::time::Duration;

use clogger::context::{self, Context};
use clogger::{ContextLogger, ScopedVariable};
use serde_json::json;

mod common;

use common::CaptureHandler;

fn request_logger(name: &str) -> (Arc<ContextLogger>, Arc<CaptureHandler>) {
    let clogger = ContextLogger::new(name);
    let sink = CaptureHandler::new();
    clogger.add_handler(sink.clone());
    clogger.set_clogvars(vec![ScopedVariable::new("request_id")]);
    (Arc::new(clogger), sink)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_do_not_leak_values() {
    let (clogger, sink) = request_logger("conc.requests");

    let mut handles = Vec::new();
    for i in 0..16 {
        let clogger = clogger.clone();
        handles.push(context::spawn(async move {
            clogger.set_var("request_id", json!(format!("req-{i}"))).unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
            clogger.info(format!("handled {i}")).unwrap();
            clogger.get_var("request_id")
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), Some(json!(format!("req-{i}"))));
    }

    let mut messages = sink.messages();
    messages.sort();
    let mut expected: Vec<String> = (0..16)
        .map(|i| format!("{{'request_id': 'req-{i}'}} - handled {i}"))
        .collect();
    expected.sort();
    assert_eq!(messages, expected);
}

#[tokio::test(flavor = "current_thread")]
async fn test_plain_tokio_spawn_tasks_are_isolated() {
    let (clogger, sink) = request_logger("conc.plain");
    let (b_done, a_resume) = tokio::sync::oneshot::channel();

    let a = clogger.clone();
    let first = tokio::spawn(async move {
        a.set_var("request_id", json!("req-A")).unwrap();
        a_resume.await.unwrap();
        a.info("from A").unwrap();
        a.get_var("request_id")
    });

    let b = clogger.clone();
    let second = tokio::spawn(async move {
        tokio::task::yield_now().await;
        let before = b.get_var("request_id");
        b.set_var("request_id", json!("req-B")).unwrap();
        b.info("from B").unwrap();
        b_done.send(()).unwrap();
        before
    });

    assert_eq!(second.await.unwrap(), None);
    assert_eq!(first.await.unwrap(), Some(json!("req-A")));
    assert_eq!(clogger.get_var("request_id"), None);
    assert_eq!(
        sink.messages(),
        vec![
            "{'request_id': 'req-B'} - from B".to_string(),
            "{'request_id': 'req-A'} - from A".to_string(),
        ]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_helper_spawned_from_plain_task_inherits_its_values() {
    let (clogger, _sink) = request_logger("conc.plain_child");

    let outer = clogger.clone();
    let seen = tokio::spawn(async move {
        outer.set_var("request_id", json!("outer")).unwrap();
        let inner = outer.clone();
        context::spawn(async move { inner.get_var("request_id") })
            .await
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(seen, Some(json!("outer")));
}

#[tokio::test]
async fn test_child_task_inherits_but_does_not_propagate() {
    let (clogger, _sink) = request_logger("conc.inherit");
    clogger.set_var("request_id", json!("parent")).unwrap();

    let child = clogger.clone();
    let seen = context::spawn(async move {
        let inherited = child.get_var("request_id");
        child.set_var("request_id", json!("child")).unwrap();
        (inherited, child.get_var("request_id"))
    })
    .await
    .unwrap();

    assert_eq!(seen, (Some(json!("parent")), Some(json!("child"))));
    assert_eq!(clogger.get_var("request_id"), Some(json!("parent")));
}

#[tokio::test]
async fn test_scoped_future_uses_its_own_context() {
    let (clogger, sink) = request_logger("conc.scope");
    clogger.set_var("request_id", json!("outer")).unwrap();

    let inner = clogger.clone();
    Context::new()
        .scope(async move {
            inner.info("fresh").unwrap();
            inner.set_var("request_id", json!("inner")).unwrap();
            inner.info("set").unwrap();
        })
        .await;

    clogger.info("back").unwrap();
    assert_eq!(
        sink.messages(),
        vec![
            "fresh".to_string(),
            "{'request_id': 'inner'} - set".to_string(),
            "{'request_id': 'outer'} - back".to_string(),
        ]
    );
}

#[test]
fn test_threads_are_isolated() {
    let (clogger, _sink) = request_logger("conc.threads");
    clogger.set_var("request_id", json!("main")).unwrap();

    let sibling = clogger.clone();
    let unset = std::thread::spawn(move || sibling.get_var("request_id"))
        .join()
        .unwrap();
    assert_eq!(unset, None);

    let child = clogger.clone();
    let inherited = context::spawn_thread(move || {
        let seen = child.get_var("request_id");
        child.set_var("request_id", json!("thread")).unwrap();
        seen
    })
    .join()
    .unwrap();

    assert_eq!(inherited, Some(json!("main")));
    assert_eq!(clogger.get_var("request_id"), Some(json!("main")));
}
