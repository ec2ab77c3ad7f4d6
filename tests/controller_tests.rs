
use test_utils::*;

use chrono::DateTime;
use contact_gate::{
    controller::{FormController, UiState},
    errors::AppError,
    repositories::sink::MockSubmissionSink,
    settings::ResponseMode,
    AppState,
};

#[tokio::test]
async fn valid_submission_delivers_and_records() {
    let stub = StubWebhook::spawn("200 OK", r#"{"ok":true}"#);
    let controller = controller_with(
        Some(webhook_client(stub.endpoint(), ResponseMode::JsonAck)),
        3_000,
    );

    let state = controller.submit(valid_input()).await;

    assert_eq!(state, UiState::Success);
    assert_eq!(controller.state(), UiState::Success);
    assert_eq!(controller.handler().ledger().len(), 1);

    let body = stub.last_request_json();
    assert_eq!(body["name"], "Jane");
    assert_eq!(body["email"], "jane@x.com");
    assert_eq!(body["message"], "This message is long enough to pass.");
    assert_eq!(body["user_agent"], "integration-tests/1.0");
    assert_eq!(body["referrer"], "https://example.test/contact");
    assert!(DateTime::parse_from_rfc3339(body["ts"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn negative_ack_surfaces_a_generic_error() {
    let stub = StubWebhook::spawn("200 OK", r#"{"ok":false}"#);
    let controller = controller_with(
        Some(webhook_client(stub.endpoint(), ResponseMode::JsonAck)),
        3_000,
    );

    let state = controller.submit(valid_input()).await;

    assert_eq!(
        state,
        UiState::Error("Something went wrong. Please try again later.".to_string())
    );
    assert!(controller.handler().ledger().is_empty());
}

#[tokio::test]
async fn server_error_surfaces_a_generic_error() {
    let stub = StubWebhook::spawn("500 Internal Server Error", r#"{"ok":true}"#);
    let controller = controller_with(
        Some(webhook_client(stub.endpoint(), ResponseMode::JsonAck)),
        3_000,
    );

    let state = controller.submit(valid_input()).await;

    assert!(matches!(state, UiState::Error(_)));
    assert!(controller.handler().ledger().is_empty());
}

#[tokio::test]
async fn opaque_mode_trusts_unreadable_responses() {
    let stub = StubWebhook::spawn("500 Internal Server Error", "<html>boom</html>");
    let controller = controller_with(
        Some(webhook_client(stub.endpoint(), ResponseMode::Opaque)),
        3_000,
    );

    let state = controller.submit(valid_input()).await;

    assert_eq!(state, UiState::Success);
    assert_eq!(controller.handler().ledger().len(), 1);
}

#[tokio::test]
async fn missing_endpoint_surfaces_a_generic_error() {
    let controller = controller_with(None, 3_000);

    let state = controller.submit(valid_input()).await;

    assert_eq!(
        state,
        UiState::Error("Something went wrong. Please try again later.".to_string())
    );
    assert!(controller.handler().ledger().is_empty());
}

#[tokio::test]
async fn honeypot_submission_is_dropped_without_feedback() {
    let stub = StubWebhook::spawn("200 OK", r#"{"ok":true}"#);
    let controller = controller_with(
        Some(webhook_client(stub.endpoint(), ResponseMode::JsonAck)),
        3_000,
    );

    let mut input = valid_input();
    input.honeypot = "Acme Corp".to_string();
    let state = controller.submit(input).await;

    assert_eq!(state, UiState::Idle);
    assert_eq!(stub.request_count(), 0);
    assert!(controller.handler().ledger().is_empty());
}

#[tokio::test]
async fn instant_submission_is_rejected_before_any_request() {
    let stub = StubWebhook::spawn("200 OK", r#"{"ok":true}"#);
    let controller = controller_with(
        Some(webhook_client(stub.endpoint(), ResponseMode::JsonAck)),
        0,
    );

    let state = controller.submit(valid_input()).await;

    match state {
        UiState::Error(msg) => assert!(msg.contains("quick"), "unexpected message: {msg}"),
        other => panic!("expected an error state, got {other:?}"),
    }
    assert_eq!(stub.request_count(), 0);
}

#[tokio::test]
async fn invalid_email_message_is_specific() {
    let controller = controller_with(None, 3_000);

    let mut input = valid_input();
    input.email = "not-an-email".to_string();
    let state = controller.submit(input).await;

    assert_eq!(
        state,
        UiState::Error("Please enter a valid email address.".to_string())
    );
}

#[tokio::test]
async fn short_message_reports_the_allowed_bounds() {
    let controller = controller_with(None, 3_000);

    let mut input = valid_input();
    input.message = "too short".to_string();
    let state = controller.submit(input).await;

    match state {
        UiState::Error(msg) => {
            assert!(msg.contains("between 20 and 2000"), "unexpected message: {msg}")
        }
        other => panic!("expected an error state, got {other:?}"),
    }
}

#[tokio::test]
async fn fourth_submission_inside_the_window_is_rate_limited() {
    let stub = StubWebhook::spawn("200 OK", r#"{"ok":true}"#);
    let controller = controller_with(
        Some(webhook_client(stub.endpoint(), ResponseMode::JsonAck)),
        3_000,
    );

    for _ in 0..3 {
        assert_eq!(controller.submit(valid_input()).await, UiState::Success);
    }

    let state = controller.submit(valid_input()).await;
    match state {
        UiState::Error(msg) => assert!(msg.contains("10m"), "unexpected message: {msg}"),
        other => panic!("expected an error state, got {other:?}"),
    }
    assert_eq!(stub.request_count(), 3);
    assert_eq!(controller.handler().ledger().len(), 3);
}

#[tokio::test]
async fn sink_failure_leaves_the_ledger_untouched() {
    let mut sink = MockSubmissionSink::new();
    sink.expect_deliver()
        .returning(|_| Err(AppError::Network("connection reset".to_string())));

    let controller = FormController::new(
        memory_handler(),
        Some(sink),
        test_context(),
        chrono::Utc::now() - chrono::Duration::milliseconds(3_000),
    );

    let state = controller.submit(valid_input()).await;

    assert!(matches!(state, UiState::Error(_)));
    assert!(controller.handler().ledger().is_empty());
}

#[tokio::test]
async fn app_state_with_placeholder_endpoint_fails_gracefully() {
    let mut config = test_config();
    config.endpoint_url = Some(
        url::Url::parse("https://script.google.com/PASTE_YOUR_APPS_SCRIPT_WEB_APP_URL_HERE")
            .unwrap(),
    );
    config.min_elapsed_ms = 0;
    config.ledger_path = temp_store_path("appstate")
        .to_string_lossy()
        .into_owned();

    let app = AppState::new(&config, test_context()).unwrap();
    let state = app.contact_form.submit(valid_input()).await;

    assert_eq!(
        state,
        UiState::Error("Something went wrong. Please try again later.".to_string())
    );

    let _ = std::fs::remove_file(&config.ledger_path);
}
