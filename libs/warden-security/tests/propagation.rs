#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use warden_security::constants::ANONYMOUS_USERNAME;
use warden_security::{
    ContextSnapshot, ExecutionContext, ExecutionContextExt, SecurityContext,
    TaskLocalExecutionContext,
};

fn request_ctx(session: &str, username: &str) -> SecurityContext {
    SecurityContext::builder(session)
        .username(username)
        .roles([format!("role-of-{username}")])
        .build()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_requests_never_share_a_binding() {
    let exec = TaskLocalExecutionContext::new();

    let requests = (0..32).map(|i| {
        tokio::spawn(TaskLocalExecutionContext::scope(async move {
            let username = format!("user-{i}");
            exec.bind(Some(request_ctx(&format!("req-{i}"), &username)));

            for _ in 0..10 {
                tokio::task::yield_now().await;
                assert_eq!(exec.current_username(), username);
                assert!(exec.has_role(&format!("ROLE-OF-{username}")));
            }

            exec.unbind();
            exec.current_username()
        }))
    });

    for result in futures::future::join_all(requests).await {
        assert_eq!(result.unwrap(), ANONYMOUS_USERNAME);
    }
}

#[tokio::test]
async fn spawned_task_sees_binding_at_spawn_time() {
    let exec = TaskLocalExecutionContext::new();

    TaskLocalExecutionContext::scope(async move {
        exec.bind(Some(request_ctx("req-1", "alice")));

        let (rebound_tx, rebound_rx) = oneshot::channel::<()>();
        let helper = exec.spawn(async move {
            rebound_rx.await.unwrap();
            exec.current_username()
        });

        exec.bind(Some(request_ctx("req-1", "bob")));
        rebound_tx.send(()).unwrap();

        assert_eq!(helper.await.unwrap(), "alice");
        assert_eq!(exec.current_username(), "bob");
    })
    .await;
}

#[tokio::test]
async fn spawned_task_rebinding_does_not_leak_to_parent() {
    let exec = TaskLocalExecutionContext::new();

    TaskLocalExecutionContext::scope(async move {
        exec.bind(Some(request_ctx("req-1", "alice")));

        exec.spawn(async move {
            exec.unbind();
            assert!(exec.current().is_none());
        })
        .await
        .unwrap();

        assert_eq!(exec.current_username(), "alice");
    })
    .await;
}

#[tokio::test]
async fn spawned_task_shares_the_same_context_value() {
    let exec = TaskLocalExecutionContext::new();

    TaskLocalExecutionContext::scope(async move {
        let parent = exec.bind(Some(request_ctx("req-1", "alice"))).unwrap();
        let child = exec.spawn(async move { exec.current() }).await.unwrap();

        assert!(Arc::ptr_eq(&parent, &child.unwrap()));
    })
    .await;
}

#[tokio::test]
async fn plain_tokio_spawn_inherits_nothing() {
    let exec = TaskLocalExecutionContext::new();

    TaskLocalExecutionContext::scope(async move {
        exec.bind(Some(request_ctx("req-1", "alice")));

        let seen = tokio::spawn(async move { exec.current() }).await.unwrap();
        assert!(seen.is_none());
    })
    .await;
}

#[tokio::test]
async fn nested_spawns_keep_the_snapshot() {
    let exec = TaskLocalExecutionContext::new();

    let seen = TaskLocalExecutionContext::scope(async move {
        exec.bind(Some(request_ctx("req-1", "alice")));
        exec.spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            exec.spawn(async move { exec.current_username() })
                .await
                .unwrap()
        })
        .await
        .unwrap()
    })
    .await;

    assert_eq!(seen, "alice");
}

#[tokio::test]
async fn snapshot_can_seed_work_on_another_executor() {
    let exec = TaskLocalExecutionContext::new();

    let snapshot = TaskLocalExecutionContext::scope(async move {
        exec.bind(Some(request_ctx("req-1", "alice")));
        exec.snapshot()
    })
    .await;

    assert_eq!(snapshot.context().unwrap().session_id(), "req-1");

    let username = std::thread::spawn(move || snapshot.sync_scope(|| exec.current_username()))
        .join()
        .unwrap();
    assert_eq!(username, "alice");

    let empty = ContextSnapshot::empty().scope(async move { exec.current() }).await;
    assert!(empty.is_none());
}

#[tokio::test]
async fn injected_as_trait_object() {
    let exec: Arc<dyn ExecutionContext> = Arc::new(TaskLocalExecutionContext::new());

    TaskLocalExecutionContext::scope(async move {
        exec.bind(Some(
            SecurityContext::builder("req-1")
                .roles(["Admin", "User"])
                .build(),
        ));

        assert!(exec.has_role("admin"));
        assert!(exec.has_any_role(&["Guest", "user"]));
        assert!(!exec.has_all_roles(&["Admin", "Guest"]));
        assert!(exec.has_no_role(&["Guest"]));
        assert_eq!(exec.current_username(), ANONYMOUS_USERNAME);
    })
    .await;
}

#[tokio::test]
async fn trait_object_accepts_owned_role_lists() {
    let exec: Arc<dyn ExecutionContext> = Arc::new(TaskLocalExecutionContext::new());
    let required: Vec<String> = vec!["admin".to_owned(), "USER".to_owned()];
    let forbidden: Vec<String> = vec!["Guest".to_owned()];

    TaskLocalExecutionContext::scope(async move {
        assert!(!exec.has_all_roles(&required));
        assert!(exec.has_no_role(&forbidden));

        exec.bind(Some(
            SecurityContext::builder("req-1")
                .roles(["Admin", "User"])
                .build(),
        ));

        assert!(exec.has_all_roles(&required));
        assert!(exec.has_any_role(required.iter().map(String::as_str)));
        assert!(exec.has_no_role(forbidden));
    })
    .await;
}
