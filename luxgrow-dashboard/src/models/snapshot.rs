use luxgrow_api::models::LightCondition;
use time::OffsetDateTime;

use super::SeriesPoint;

/// One merged reading of every sensor field.
///
/// A field is `None` when the request backing it failed. Temperature and
/// humidity share a request, so they are present or absent together.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub illuminance: Option<f64>,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub classification: Option<String>,
    /// When the fetch was started, not when any endpoint answered
    pub captured_at: OffsetDateTime,
}

impl Snapshot {
    pub fn empty(captured_at: OffsetDateTime) -> Self {
        Self {
            illuminance: None,
            temperature_c: None,
            humidity_pct: None,
            classification: None,
            captured_at,
        }
    }

    pub fn condition(&self) -> LightCondition {
        self.classification
            .as_deref()
            .map(LightCondition::from_label)
            .unwrap_or_default()
    }

    /// Chart sample for this snapshot, if both charted metrics arrived.
    pub fn series_point(&self) -> Option<SeriesPoint> {
        Some(SeriesPoint::new(
            self.captured_at,
            self.illuminance?,
            self.temperature_c?,
        ))
    }
}
