//! Integration tests for the machine API client using mockito

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use aquavend::{
    BaseUrl, Error, HistoryRange, HttpClient, HttpError, MachineConnector, MachineFilter,
    MachineId, MachineStatus, SaleReading, WaterQualityReading,
};
use serde_json::json;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Collects every event emitted while installed
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedLogs {
    fn errors(&self) -> Vec<String> {
        self.0
            .lock()
            .expect("Log lock poisoned")
            .iter()
            .filter(|(level, _)| *level == Level::ERROR)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0
            .lock()
            .expect("Log lock poisoned")
            .push((*event.metadata().level(), visitor.0));
    }
}

/// Collects the name and field names of every span opened while installed
#[derive(Clone, Default)]
struct CapturedSpans(Arc<Mutex<Vec<(String, Vec<String>)>>>);

impl CapturedSpans {
    fn fields_of(&self, name: &str) -> Vec<String> {
        self.0
            .lock()
            .expect("Span lock poisoned")
            .iter()
            .find(|(span, _)| span == name)
            .map(|(_, fields)| fields.clone())
            .unwrap_or_default()
    }
}

impl<S: Subscriber> Layer<S> for CapturedSpans {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let fields = attrs
            .metadata()
            .fields()
            .iter()
            .map(|field| field.name().to_string())
            .collect();
        self.0
            .lock()
            .expect("Span lock poisoned")
            .push((attrs.metadata().name().to_string(), fields));
    }
}

fn client_for(server: &mockito::ServerGuard) -> HttpClient {
    let base_url =
        BaseUrl::from_str(&format!("{}/api", server.url())).expect("Mock url is valid");
    HttpClient::with_base_url(base_url)
}

/// Client pointed at a port nothing listens on
fn unreachable_client() -> HttpClient {
    HttpClient::with_base_url(BaseUrl::from_str("http://127.0.0.1:1/api").expect("Valid url"))
}

const MACHINE_JSON: &str = r#"{
    "id": 42,
    "machine_id": "VM042",
    "name": "Lobby",
    "location": "Building A",
    "status": "online",
    "last_maintenance": null,
    "installation_date": "2024-05-01T08:00:00Z",
    "latest_quality": null,
    "total_sales_today": 750
}"#;

// === Raw operations: success ===

#[tokio::test]
async fn test_get_machines_returns_body() {
    let mut server = mockito::Server::new_async().await;
    let body = json!([{"machine_id": "VM001", "extra": {"nested": [1, 2]}}]);

    let mock = server
        .mock("GET", "/api/machines/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let result = client_for(&server)
        .get_machines()
        .await
        .expect("Request should succeed");

    assert_eq!(result, body);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_machine_detail_path() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/machines/42/")
        .with_status(200)
        .with_body(MACHINE_JSON)
        .create_async()
        .await;

    let result = client_for(&server)
        .get_machine_detail(42_u64)
        .await
        .expect("Request should succeed");

    assert_eq!(result["machine_id"], "VM042");
    assert_eq!(
        result,
        serde_json::from_str::<serde_json::Value>(MACHINE_JSON).expect("Valid json")
    );

    mock.assert_async().await;
}

#[tokio::test]
async fn test_record_quality_posts_payload() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/machines/7/record_quality/")
        .match_header("content-type", "application/json")
        .match_body(r#"{"ph":7.2}"#)
        .with_status(200)
        .with_body(r#"{"id": 1, "ph_level": 7.2}"#)
        .create_async()
        .await;

    let result = client_for(&server)
        .record_quality(7_u64, &json!({"ph": 7.2}))
        .await
        .expect("Request should succeed");

    assert_eq!(result, json!({"id": 1, "ph_level": 7.2}));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_record_sale_posts_payload() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/machines/3/record_sale/")
        .match_header("content-type", "application/json")
        .match_body(r#"{"amount":1.5}"#)
        .with_status(200)
        .with_body(r#"{"ok": true}"#)
        .create_async()
        .await;

    let result = client_for(&server)
        .record_sale(3_u64, &json!({"amount": 1.5}))
        .await
        .expect("Request should succeed");

    assert_eq!(result, json!({"ok": true}));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_raw_operations_ignore_status_code() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/machines/VM404/record_quality/")
        .with_status(404)
        .with_body(r#"{"error": "Machine not found"}"#)
        .create_async()
        .await;

    let result = client_for(&server)
        .record_quality("VM404", &json!({"tds_level": 1.0}))
        .await
        .expect("Json body resolves whatever the status");

    assert_eq!(result, json!({"error": "Machine not found"}));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_machine_id_is_not_encoded() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/machines/site-3/VM001/")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let result = client_for(&server)
        .get_machine_detail("site-3/VM001")
        .await
        .expect("Request should succeed");

    assert_eq!(result, json!({}));

    mock.assert_async().await;
}

// === Raw operations: failure ===

#[tokio::test]
async fn test_raw_operations_log_and_return_transport_error() {
    let logs = CapturedLogs::default();
    let _guard = tracing_subscriber::registry()
        .with(logs.clone())
        .set_default();

    let client = unreachable_client();

    let result = client.get_machines().await;
    assert!(matches!(result, Err(HttpError::Connection(_))));

    let result = client.get_machine_detail("VM001").await;
    assert!(matches!(result, Err(HttpError::Connection(_))));

    let result = client.record_quality("VM001", &json!({"ph": 7.2})).await;
    assert!(matches!(result, Err(HttpError::Connection(_))));

    let result = client.record_sale("VM001", &json!({"amount": 1.5})).await;
    assert!(matches!(result, Err(HttpError::Connection(_))));

    let errors = logs.errors();
    assert_eq!(errors.len(), 4);
    assert!(errors[0].starts_with("Error fetching machines: Connection error"));
    assert!(errors[1].starts_with("Error fetching machine detail: Connection error"));
    assert!(errors[2].starts_with("Error recording quality: Connection error"));
    assert!(errors[3].starts_with("Error recording sale: Connection error"));
}

#[tokio::test]
async fn test_invalid_json_body_is_an_error() {
    let logs = CapturedLogs::default();
    let _guard = tracing_subscriber::registry()
        .with(logs.clone())
        .set_default();

    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/machines/")
        .with_status(500)
        .with_body("<h1>Server Error (500)</h1>")
        .create_async()
        .await;

    let result = client_for(&server).get_machines().await;

    assert!(matches!(result, Err(HttpError::Serialization(_))));
    let errors = logs.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error fetching machines: Serialization error"));

    mock.assert_async().await;
}

// === Typed operations ===

#[tokio::test]
async fn test_machines_with_filter() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/machines/")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("status".into(), "online".into()),
            mockito::Matcher::UrlEncoded("location".into(), "Building A".into()),
        ]))
        .with_status(200)
        .with_body(format!("[{MACHINE_JSON}]"))
        .create_async()
        .await;

    let filter = MachineFilter {
        status: Some(MachineStatus::Online),
        location: Some("Building A".to_string()),
    };
    let machines = client_for(&server)
        .machines(&filter)
        .await
        .expect("Request should succeed");

    assert_eq!(machines.len(), 1);
    assert_eq!(machines[0].machine_id, MachineId::from("VM042"));
    assert_eq!(machines[0].total_sales_today, 750);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_machine_not_found() {
    let logs = CapturedLogs::default();
    let _guard = tracing_subscriber::registry()
        .with(logs.clone())
        .set_default();

    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/machines/VM404/")
        .with_status(404)
        .with_body(r#"{"error": "Machine not found"}"#)
        .create_async()
        .await;

    let result = client_for(&server).machine(&MachineId::from("VM404")).await;

    match result {
        Err(Error::Backend { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Machine not found");
        }
        other => panic!("Expected Error::Backend, got {other:?}"),
    }
    assert_eq!(
        logs.errors(),
        vec!["Error fetching machine detail: Backend error (404): Machine not found".to_string()]
    );

    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_quality() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/machines/VM001/record_quality/")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(json!({
            "tds_level": 85.0,
            "ph_level": 7.1,
            "water_level": 64.5
        })))
        .with_status(200)
        .with_body(
            r#"{"id": 3, "tds_level": 85.0, "ph_level": 7.1, "water_level": 64.5, "timestamp": "2024-05-02T10:00:00Z"}"#,
        )
        .create_async()
        .await;

    let reading = WaterQualityReading {
        tds_level: 85.0,
        ph_level: 7.1,
        water_level: 64.5,
    };
    let stored = client_for(&server)
        .submit_quality(&MachineId::from("VM001"), &reading)
        .await
        .expect("Request should succeed");

    assert_eq!(stored.id, Some(3));
    assert_eq!(stored.water_level, 64.5);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_quality_validation_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/machines/VM001/record_quality/")
        .with_status(400)
        .with_body(r#"{"ph_level":["A valid number is required."]}"#)
        .create_async()
        .await;

    let reading = WaterQualityReading {
        tds_level: 85.0,
        ph_level: 7.1,
        water_level: 64.5,
    };
    let result = client_for(&server)
        .submit_quality(&MachineId::from("VM001"), &reading)
        .await;

    assert!(matches!(
        result,
        Err(Error::Backend { status: 400, ref message }) if message.contains("ph_level")
    ));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_sale() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/machines/VM001/record_sale/")
        .match_body(mockito::Matcher::Json(json!({"volume": 500, "price": "2.50"})))
        .with_status(200)
        .with_body(r#"{"id": 10, "volume": 500, "price": "2.50", "timestamp": "2024-05-02T10:00:00Z"}"#)
        .create_async()
        .await;

    let stored = client_for(&server)
        .submit_sale(&MachineId::from("VM001"), &SaleReading::new(500, 2.5))
        .await
        .expect("Request should succeed");

    assert_eq!(stored.volume, 500);
    assert_eq!(stored.price, "2.50");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_spans_leave_out_request_body() {
    let spans = CapturedSpans::default();
    let _guard = tracing_subscriber::registry()
        .with(spans.clone())
        .set_default();

    let mut server = mockito::Server::new_async().await;
    let quality = server
        .mock("POST", "/api/machines/VM001/record_quality/")
        .with_status(200)
        .with_body(r#"{"tds_level": 85.0, "ph_level": 7.1, "water_level": 64.5}"#)
        .create_async()
        .await;
    let sale = server
        .mock("POST", "/api/machines/VM001/record_sale/")
        .with_status(200)
        .with_body(r#"{"volume": 500, "price": "2.50"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let machine_id = MachineId::from("VM001");
    let reading = WaterQualityReading {
        tds_level: 85.0,
        ph_level: 7.1,
        water_level: 64.5,
    };
    client
        .submit_quality(&machine_id, &reading)
        .await
        .expect("Request should succeed");
    client
        .submit_sale(&machine_id, &SaleReading::new(500, 2.5))
        .await
        .expect("Request should succeed");

    let quality_fields = spans.fields_of("submit_quality");
    assert!(quality_fields.contains(&"machine_id".to_string()));
    assert!(quality_fields.contains(&"base_url".to_string()));
    assert!(!quality_fields.contains(&"reading".to_string()));

    let sale_fields = spans.fields_of("submit_sale");
    assert!(sale_fields.contains(&"machine_id".to_string()));
    assert!(sale_fields.contains(&"base_url".to_string()));
    assert!(!sale_fields.contains(&"sale".to_string()));

    quality.assert_async().await;
    sale.assert_async().await;
}

#[tokio::test]
async fn test_quality_history_range() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/machines/VM001/quality_history/")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("start_date".into(), "2024-05-01T00:00:00".into()),
            mockito::Matcher::UrlEncoded("end_date".into(), "2024-05-02T00:00:00".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"[
                {"id": 1, "tds_level": 80.0, "ph_level": 7.0, "water_level": 90.0, "timestamp": "2024-05-01T06:00:00Z"},
                {"id": 2, "tds_level": 82.0, "ph_level": 7.1, "water_level": 70.0, "timestamp": "2024-05-01T18:00:00Z"}
            ]"#,
        )
        .create_async()
        .await;

    let range = HistoryRange {
        start_date: Some("2024-05-01T00:00:00".to_string()),
        end_date: Some("2024-05-02T00:00:00".to_string()),
    };
    let history = client_for(&server)
        .quality_history(&MachineId::from("VM001"), &range)
        .await
        .expect("Request should succeed");

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, Some(1));
    assert_eq!(history[1].tds_level, 82.0);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_typed_decode_failure() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/machines/")
        .with_status(200)
        .with_body(r#"{"detail": "not a list"}"#)
        .create_async()
        .await;

    let result = client_for(&server)
        .machines(&MachineFilter::default())
        .await;

    assert!(matches!(
        result,
        Err(Error::Http(HttpError::Serialization(_)))
    ));

    mock.assert_async().await;
}
