//! Command-level tests: backend mocked with wiremock, profile in a temp dir

use tempfile::TempDir;
use ultraplan_cli::cli::commands::{compare, documents, plan, waypoints};
use ultraplan_cli::cli::{CommandContext, OutputFormat};
use ultraplan_cli::client::PlannerClient;
use ultraplan_cli::config::ProfileStore;
use ultraplan_cli::route::placement::NewWaypoint;
use ultraplan_cli::PlannerError;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EVENT_ID: &str = "3f7c2a9e-5b1d-4c8e-9a20-7d4e1f6b8c01";

fn test_context(mock_server: &MockServer, dir: &TempDir) -> CommandContext {
    let client = PlannerClient::new(&mock_server.uri()).unwrap();
    let store = ProfileStore::with_dir("test", dir.path().to_path_buf()).unwrap();
    CommandContext::from_parts(client, store, OutputFormat::Json)
}

fn waypoint_json(id: &str, name: &str) -> serde_json::Value {
    let fixture: Vec<serde_json::Value> =
        serde_json::from_str(include_str!("fixtures/waypoints.json")).unwrap();
    let mut wp = fixture
        .into_iter()
        .find(|w| w["name"] == name)
        .unwrap();
    wp["id"] = serde_json::Value::String(id.to_string());
    wp
}

async fn mount_event_and_waypoints(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/api/events/{}", EVENT_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/event.json")),
        )
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/events/{}/waypoints", EVENT_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/waypoints.json")),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_load_plan_tolerates_missing_route_and_legs() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_event_and_waypoints(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/events/{}/route", EVENT_ID)))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "No route"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/calculations/events/{}/legs", EVENT_ID)))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let ctx = test_context(&mock_server, &dir);
    let data = plan::load_plan(&ctx, EVENT_ID).await.unwrap();

    assert_eq!(data.event.name, "Western States 100");
    assert_eq!(data.waypoints.len(), 3);
    assert!(data.route.is_none());
    assert!(data.legs.is_empty());
}

#[tokio::test]
async fn test_load_plan_requires_event() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/events/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"detail": "Event not found"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/gone/waypoints"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let ctx = test_context(&mock_server, &dir);
    let err = plan::load_plan(&ctx, "gone").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_add_waypoint_interpolates_and_marks_stale() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_event_and_waypoints(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/events/{}/route", EVENT_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/route.json")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/waypoints"))
        .and(body_partial_json(serde_json::json!({
            "event_id": EVENT_ID,
            "name": "Waypoint at 0.5 mi",
            "waypoint_type": "water",
            "order_index": 1,
            "stop_time_minutes": 2
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(waypoint_json("wp-new", "Robinson Flat")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = test_context(&mock_server, &dir);
    let input = NewWaypoint {
        distance_miles: "0.5".into(),
        waypoint_type: "water".parse().unwrap(),
        stop_time_minutes: 2,
        ..Default::default()
    };
    waypoints::add(&ctx, Some(EVENT_ID.into()), input)
        .await
        .unwrap();

    assert!(ctx.store.is_stale(EVENT_ID).unwrap());
}

#[tokio::test]
async fn test_add_waypoint_beyond_route_is_rejected() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_event_and_waypoints(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/events/{}/route", EVENT_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/route.json")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/waypoints"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ctx = test_context(&mock_server, &dir);
    let input = NewWaypoint {
        distance_miles: "2".into(),
        ..Default::default()
    };
    let err = waypoints::add(&ctx, Some(EVENT_ID.into()), input)
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .contains("Distance cannot exceed route length (0.83 mi)"));
    assert!(!ctx.store.is_stale(EVENT_ID).unwrap());
}

#[tokio::test]
async fn test_delete_start_waypoint_is_refused() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/waypoints/wp-start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(waypoint_json("wp-start", "START")))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/waypoints/wp-start"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ctx = test_context(&mock_server, &dir);
    let err = waypoints::delete(&ctx, "wp-start", true).await.unwrap_err();

    assert!(matches!(err, PlannerError::ProtectedWaypoint { .. }));
    assert_eq!(err.to_string(), "Cannot delete START waypoint");
}

#[tokio::test]
async fn test_delete_then_calculate_clears_stale() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/waypoints/wp-robinson"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(waypoint_json("wp-robinson", "Robinson Flat")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/waypoints/wp-robinson"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/api/calculations/events/{}/calculate",
            EVENT_ID
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Calculated 1 legs",
            "legs_count": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = test_context(&mock_server, &dir);
    waypoints::delete(&ctx, "wp-robinson", true).await.unwrap();
    assert!(ctx.store.is_stale(EVENT_ID).unwrap());

    plan::calculate(&ctx, Some(EVENT_ID.into())).await.unwrap();
    assert!(!ctx.store.is_stale(EVENT_ID).unwrap());
}

#[tokio::test]
async fn test_plan_export_writes_named_csv() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_event_and_waypoints(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/events/{}/route", EVENT_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/route.json")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/calculations/events/{}/legs", EVENT_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/legs.json")),
        )
        .mount(&mock_server)
        .await;

    let ctx = test_context(&mock_server, &dir);
    let out = dir.path().join("Western_States_100_plan.csv");
    plan::export_csv(&ctx, Some(EVENT_ID.into()), Some(out.clone()))
        .await
        .unwrap();

    let csv = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Event: Western States 100");
    assert_eq!(lines[1], "Date: 2025-06-28");
    assert_eq!(lines[2], "Target Duration: 24h 0m");
    assert!(lines[4].starts_with("Leg,Waypoint,Distance (mi)"));
    assert!(lines[5].starts_with("1,Robinson Flat,30.00,2100,1954,13:12,15:45,"));
    assert!(lines[6].starts_with("2,FINISH,"));
}

#[tokio::test]
async fn test_compare_without_actual_data_succeeds() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(format!(
            "/api/calculations/events/{}/comparison",
            EVENT_ID
        )))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"detail": "No actual data available"})),
        )
        .mount(&mock_server)
        .await;

    let ctx = test_context(&mock_server, &dir);
    compare::show(&ctx, Some(EVENT_ID.into())).await.unwrap();
}

#[tokio::test]
async fn test_unsupported_document_is_rejected_before_upload() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/documents/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let file = dir.path().join("splits.xlsx");
    std::fs::write(&file, b"not really a spreadsheet").unwrap();

    let ctx = test_context(&mock_server, &dir);
    let err = documents::upload(&ctx, &file).await.unwrap_err();
    assert!(matches!(err, PlannerError::InvalidParameter(_)));
}

#[tokio::test]
async fn test_event_id_falls_back_to_default() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = test_context(&mock_server, &dir);

    assert!(ctx.event_id(None).is_err());

    ctx.store
        .update(|p| p.default_event = Some(EVENT_ID.into()))
        .unwrap();
    assert_eq!(ctx.event_id(None).unwrap(), EVENT_ID);
    assert_eq!(ctx.event_id(Some("other".into())).unwrap(), "other");
}
