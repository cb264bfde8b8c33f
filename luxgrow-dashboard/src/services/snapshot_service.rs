use std::sync::Arc;

use luxgrow_api::models::{ClimateReading, ConditionReading, ConditionRequest, LuxReading};
use serde::de::DeserializeOwned;
use time::OffsetDateTime;

use crate::configs::Endpoints;
use crate::models::Snapshot;
use crate::services::transport::{Transport, decode, encode};

pub struct SnapshotFetcher {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
}

impl SnapshotFetcher {
    pub fn new(transport: Arc<dyn Transport>, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Reads every sensor endpoint concurrently and merges the answers.
    ///
    /// Never fails: a read that errors leaves its fields empty.
    pub async fn fetch_snapshot(&self) -> Snapshot {
        let captured_at = now();

        self.trigger_classification();
        // let the trigger reach the wire before the reads go out
        tokio::task::yield_now().await;

        let (lux, climate, condition) = tokio::join!(
            self.read::<LuxReading>(&self.endpoints.lux),
            self.read::<ClimateReading>(&self.endpoints.dht),
            self.read::<ConditionReading>(&self.endpoints.condition),
        );

        let (temperature_c, humidity_pct) = match climate {
            Some(reading) => (Some(reading.temperature), Some(reading.humidity)),
            None => (None, None),
        };

        Snapshot {
            illuminance: lux.map(|reading| reading.lux),
            temperature_c,
            humidity_pct,
            classification: condition.map(|reading| reading.klasifikasi),
            captured_at,
        }
    }

    /// Asks the backend to reclassify the latest readings. Not awaited.
    fn trigger_classification(&self) {
        let transport = Arc::clone(&self.transport);
        let path = self.endpoints.condition.clone();

        tokio::spawn(async move {
            let result = match encode(&path, &ConditionRequest::default()) {
                Ok(body) => transport.post(&path, &body).await,
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                tracing::warn!("Classification trigger failed: {e}");
            }
        });
    }

    async fn read<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let result = match self.transport.get(path).await {
            Ok(value) => decode::<T>(path, value),
            Err(e) => Err(e),
        };

        match result {
            Ok(reading) => Some(reading),
            Err(e) => {
                tracing::warn!("Sensor read failed: {e}");
                None
            }
        }
    }
}

pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
