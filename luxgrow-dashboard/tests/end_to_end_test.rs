use std::sync::Arc;

use luxgrow_api::models::{ClimateReading, ConditionRequest, LuxReading, ServoMode};
use tokio::net::TcpListener;

use luxgrow_dashboard::configs::{Backend, Endpoints, Poll};
use luxgrow_dashboard::dashboard::Dashboard;
use luxgrow_dashboard::models::ActuatorCommand;
use luxgrow_dashboard::services::HttpTransport;
use luxgrow_dashboard::tests::RecordingPresenter;
use luxgrow_mock::store::Store;

struct MockBackend {
    store: Arc<Store>,
    base_url: String,
}

async fn start_backend() -> MockBackend {
    let store = Arc::new(Store::new(15));
    store
        .record_lux(LuxReading {
            lux: 812.0,
            timestamp: None,
        })
        .await;
    store
        .record_climate(ClimateReading {
            temperature: 24.5,
            humidity: 60.0,
            timestamp: None,
        })
        .await;
    store.classify(ConditionRequest::default()).await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(luxgrow_mock::serve(listener, store.clone()));

    MockBackend {
        store,
        base_url: format!("http://{address}"),
    }
}

fn dashboard(base_url: &str, presenter: &Arc<RecordingPresenter>) -> Dashboard {
    let transport = Arc::new(HttpTransport::new(&Backend {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        connect_timeout_secs: 5,
    }));

    Dashboard::new(
        transport,
        presenter.clone(),
        Endpoints::default(),
        &Poll {
            refresh_actuator: false,
            ..Poll::default()
        },
    )
}

#[tokio::test]
async fn test_refresh_against_backend() {
    let backend = start_backend().await;
    let presenter = Arc::new(RecordingPresenter::default());
    let dashboard = dashboard(&backend.base_url, &presenter);

    assert!(dashboard.refresh().await);

    let snapshot = dashboard.snapshot().await.unwrap();
    assert_eq!(snapshot.illuminance, Some(812.0));
    assert_eq!(snapshot.temperature_c, Some(24.5));
    assert_eq!(snapshot.humidity_pct, Some(60.0));
    assert_eq!(snapshot.classification.as_deref(), Some("Cahaya baik"));
    assert_eq!(dashboard.series().await.illuminance(), vec![812.0]);
    assert_eq!(presenter.busy(), vec![true, false]);
}

#[tokio::test]
async fn test_unreachable_backend_yields_empty_snapshot() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let presenter = Arc::new(RecordingPresenter::default());
    let dashboard = dashboard(&format!("http://{address}"), &presenter);

    assert!(dashboard.refresh().await);

    let snapshot = &presenter.snapshots()[0];
    assert_eq!(snapshot.illuminance, None);
    assert_eq!(snapshot.classification, None);
    assert!(dashboard.series().await.is_empty());
    assert_eq!(presenter.busy(), vec![true, false]);
}

#[tokio::test]
async fn test_servo_round_trip_against_backend() {
    let backend = start_backend().await;
    let presenter = Arc::new(RecordingPresenter::default());
    let dashboard = dashboard(&backend.base_url, &presenter);

    let status = dashboard
        .execute(ActuatorCommand::Move {
            name: Some(String::from("OPEN")),
            angle: None,
        })
        .await
        .unwrap();
    assert_eq!(status.mode, ServoMode::Manual);
    assert_eq!(status.last_angle, Some(180));
    assert_eq!(backend.store.take_pending().await.map(|c| c.angle), Some(180));

    let status = dashboard.execute(ActuatorCommand::SetMode(ServoMode::Auto)).await.unwrap();
    assert_eq!(status.mode, ServoMode::Auto);
    assert_eq!(status.last_angle, Some(90));

    // rejected by the backend in auto mode, the refresh still shows the truth
    let status = dashboard
        .execute(ActuatorCommand::Move {
            name: None,
            angle: Some(10.0),
        })
        .await
        .unwrap();
    assert_eq!(status.last_angle, Some(90));

    let views = presenter.actuators();
    assert_eq!(views.len(), 3);
    assert!(views[0].manual_controls_enabled);
    assert_eq!(views[2].mode_label, "AUTO");
    assert_eq!(views[2].angle_label, "90°");
}
