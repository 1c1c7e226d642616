//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 模拟 e2e 测试（调度器 + 后端 + HTTP 层）

#[cfg(test)]
mod contract_tests {
    use contracts::{BackendType, Notification, NotificationRequest, ServiceSettings};

    /// HTTP 请求体格式：channels + message
    #[test]
    fn test_notification_request_json_shape() {
        let request: NotificationRequest = serde_json::from_str(
            r#"{"channels": ["Slack", "Email"], "message": "deploy finished"}"#,
        )
        .unwrap();

        assert_eq!(
            request.into_notifications(),
            vec![
                Notification::new("Slack", "deploy finished"),
                Notification::new("Email", "deploy finished"),
            ]
        );

        let value = serde_json::to_value(Notification::new("Slack", "hi")).unwrap();
        assert_eq!(value, serde_json::json!({ "channel": "Slack", "message": "hi" }));
    }

    /// 空配置文件使用默认值
    #[test]
    fn test_settings_defaults_from_empty_toml() {
        let settings =
            config_loader::ConfigLoader::load_from_str("", config_loader::ConfigFormat::Toml)
                .unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.dispatch.workers, 5);
        assert_eq!(settings.dispatch.queue_capacity, 100);
        assert_eq!(settings.dispatch.retry_delay_ms, 1000);
        assert!(settings.backends.is_empty());
    }

    /// backend_type 使用 snake_case
    #[test]
    fn test_backend_type_names() {
        let settings: ServiceSettings = serde_json::from_str(
            r#"{"backends": [{"name": "Slack", "backend_type": "slack"}]}"#,
        )
        .unwrap();
        assert_eq!(settings.backends[0].backend_type, BackendType::Slack);
        assert!(settings.backends[0].params.is_empty());
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::extract::State;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use contracts::{ContractError, DeliveryBackend, Notification};
    use dispatcher::{create_notifier, Notifier, NotifierConfig};
    use tower::ServiceExt;

    /// Backend that fails a fixed number of times before succeeding
    struct FlakyBackend {
        name: String,
        failures: u32,
        calls: Arc<AtomicU32>,
    }

    impl FlakyBackend {
        fn new(name: &str, failures: u32) -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            let backend = Self {
                name: name.to_string(),
                failures,
                calls: Arc::clone(&calls),
            };
            (backend, calls)
        }
    }

    #[async_trait]
    impl DeliveryBackend for FlakyBackend {
        fn name(&self) -> &str {
            &self.name
        }

        async fn send(&self, _message: &str) -> Result<(), ContractError> {
            let previous = self.calls.fetch_add(1, Ordering::SeqCst);
            if previous < self.failures {
                Err(ContractError::backend_delivery(&self.name, "simulated outage"))
            } else {
                Ok(())
            }
        }
    }

    fn notifier() -> Notifier {
        Notifier::new(NotifierConfig {
            queue_capacity: 100,
            retry_delay: Duration::from_millis(10),
        })
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(10), async {
            while !condition() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    /// Unregistered channel: dropped without any backend call
    #[tokio::test]
    async fn test_e2e_unregistered_channel() {
        let notifier = notifier();
        let (backend, calls) = FlakyBackend::new("slack", 0);
        notifier.register_backend(Arc::new(backend)).unwrap();
        notifier.start(1);

        notifier
            .submit(vec![Notification::new("X", "hello")])
            .await
            .unwrap();

        wait_until(|| notifier.metrics().not_found_count == 1).await;
        assert_eq!(notifier.queue_len(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.metrics().delivered_count, 0);
    }

    /// Backend failing twice then succeeding: three attempts, delivered
    #[tokio::test]
    async fn test_e2e_retry_then_delivered() {
        let notifier = notifier();
        let (backend, calls) = FlakyBackend::new("slack", 2);
        notifier.register_backend(Arc::new(backend)).unwrap();
        notifier.start(1);

        notifier
            .submit(vec![Notification::new("slack", "hello")])
            .await
            .unwrap();

        wait_until(|| notifier.metrics().delivered_count == 1).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(notifier.metrics().failed_attempt_count, 2);
        assert_eq!(notifier.metrics().exhausted_count, 0);
    }

    /// Mixed batch over a pool: every notification reaches a terminal outcome
    #[tokio::test]
    async fn test_e2e_mixed_batch_completes() {
        let notifier = notifier();
        let (ok, ok_calls) = FlakyBackend::new("ok", 0);
        let (broken, broken_calls) = FlakyBackend::new("broken", u32::MAX);
        notifier.register_backend(Arc::new(ok)).unwrap();
        notifier.register_backend(Arc::new(broken)).unwrap();
        notifier.start(3);

        let batch: Vec<_> = (0..4)
            .flat_map(|i| {
                [
                    Notification::new("ok", format!("ok {i}")),
                    Notification::new("broken", format!("broken {i}")),
                    Notification::new("missing", format!("missing {i}")),
                ]
            })
            .collect();
        notifier.submit(batch).await.unwrap();

        wait_until(|| notifier.metrics().completed_count() == 12).await;
        let stats = notifier.metrics();
        assert_eq!(stats.delivered_count, 4);
        assert_eq!(stats.exhausted_count, 4);
        assert_eq!(stats.not_found_count, 4);
        assert_eq!(ok_calls.load(Ordering::SeqCst), 4);
        assert_eq!(broken_calls.load(Ordering::SeqCst), 12);
    }

    /// Fake Slack webhook that rejects the first `failures` posts
    async fn spawn_flaky_webhook(failures: u32) -> (String, Arc<AtomicU32>) {
        async fn hook(State((hits, failures)): State<(Arc<AtomicU32>, u32)>) -> (StatusCode, &'static str) {
            if hits.fetch_add(1, Ordering::SeqCst) < failures {
                (StatusCode::INTERNAL_SERVER_ERROR, "server_error")
            } else {
                (StatusCode::OK, "ok")
            }
        }

        let hits = Arc::new(AtomicU32::new(0));
        let app = Router::new()
            .route("/hook", post(hook))
            .with_state((Arc::clone(&hits), failures));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/hook", addr), hits)
    }

    /// Config file -> notifier -> HTTP submission -> Slack webhook
    #[tokio::test]
    async fn test_e2e_config_to_slack_webhook() {
        let (webhook_url, hits) = spawn_flaky_webhook(2).await;
        let config = format!(
            r#"
[dispatch]
workers = 2
retry_delay_ms = 10

[[backends]]
name = "slack"
backend_type = "slack"
[backends.params]
webhook_url = "{webhook_url}"

[[backends]]
name = "Email"
backend_type = "email"
[backends.params]
to = "ops@example.com"
"#
        );

        let settings =
            config_loader::ConfigLoader::load_from_str(&config, config_loader::ConfigFormat::Toml)
                .unwrap();
        let notifier = Arc::new(create_notifier(&settings.dispatch, &settings.backends).unwrap());
        notifier.start(settings.dispatch.workers);
        let app = api::create_router(api::AppState::new(Arc::clone(&notifier)));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/notifications")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"channels": ["slack", "Email"], "message": "deploy finished"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        wait_until(|| notifier.metrics().delivered_count == 2).await;
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(notifier.metrics().failed_attempt_count, 2);

        notifier.shutdown().await;
        assert_eq!(notifier.running_workers(), 0);
    }
}
