use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use luxgrow_api::models::{ClimateReading, LuxReading};
use tokio::net::TcpListener;
use tokio::time;

use crate::app::create_app;
use crate::settings::Settings;
use crate::simulate::{jitter, simulated_humidity, simulated_lux, simulated_temperature};
use crate::store::Store;

pub mod app;
pub mod errors;
pub mod handles;
pub mod settings;
mod simulate;
pub mod store;

pub async fn run(settings: &Arc<Settings>) -> io::Result<()> {
    let store = Arc::new(Store::new(settings.servo.step));

    if settings.simulator.enabled {
        tokio::spawn(simulate_sensors(
            store.clone(),
            Duration::from_secs(settings.simulator.interval_secs),
        ));
    }

    let ip_addr = settings
        .server
        .host
        .parse::<IpAddr>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let address = SocketAddr::from((ip_addr, settings.server.port));
    let listener = TcpListener::bind(&address).await?;

    tracing::info!("listening on {:?}", address);

    serve(listener, store).await
}

/// Serves the backend on an already bound listener.
pub async fn serve(listener: TcpListener, store: Arc<Store>) -> io::Result<()> {
    axum::serve(listener, create_app(store)).await
}

/// Feeds the store with readings along a compressed day.
async fn simulate_sensors(store: Arc<Store>, period: Duration) {
    const INTERVALS_PER_DAY: u32 = 180;

    let mut interval = time::interval(period);
    let mut index: u32 = 0;

    loop {
        interval.tick().await;

        let day_fraction = (index % INTERVALS_PER_DAY) as f64 / INTERVALS_PER_DAY as f64;
        let lux = jitter(simulated_lux(day_fraction), 50.0).max(0.0);
        let temperature = jitter(simulated_temperature(day_fraction), 0.3);
        let humidity = jitter(simulated_humidity(day_fraction), 1.0).clamp(0.0, 100.0);

        tracing::debug!("Simulated lux={lux:.1} temperature={temperature:.1} humidity={humidity:.1}");

        store
            .record_lux(LuxReading {
                lux,
                timestamp: None,
            })
            .await;
        store
            .record_climate(ClimateReading {
                temperature,
                humidity,
                timestamp: None,
            })
            .await;

        index = index.wrapping_add(1);
    }
}
