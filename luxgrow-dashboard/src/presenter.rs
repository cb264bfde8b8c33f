use luxgrow_api::models::LightCondition;

use crate::models::{ActuatorView, SeriesBuffer, Snapshot};

pub const IDLE_LABEL: &str = "Refresh Data";
pub const BUSY_LABEL: &str = "Updating...";

/// Surface the engine pushes display state into. Calls are made from
/// committed cycles only and must not block.
pub trait Presenter: Send + Sync {
    fn render(&self, snapshot: &Snapshot);

    fn render_actuator(&self, view: &ActuatorView);

    fn render_series(&self, series: &SeriesBuffer);

    /// Toggle the refresh button between [`BUSY_LABEL`] and [`IDLE_LABEL`].
    fn set_busy(&self, busy: bool);
}

pub fn refresh_label(busy: bool) -> &'static str {
    if busy { BUSY_LABEL } else { IDLE_LABEL }
}

/// Badge and icon for a classification.
pub fn condition_badge(condition: LightCondition) -> (&'static str, &'static str) {
    match condition {
        LightCondition::Good => ("✅", "🌿"),
        LightCondition::Low => ("⚠️", "☁️"),
        LightCondition::High => ("🔥", "☀️"),
        LightCondition::Unknown => ("", "🤔"),
    }
}

/// Renders the dashboard as log lines.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn render(&self, snapshot: &Snapshot) {
        let (badge, icon) = condition_badge(snapshot.condition());
        let field = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_else(|| "--".into());

        tracing::info!(
            "{icon} lux={} temperature={}°C humidity={}% condition={badge} {}",
            field(snapshot.illuminance),
            field(snapshot.temperature_c),
            field(snapshot.humidity_pct),
            snapshot.classification.as_deref().unwrap_or("Unknown"),
        );
    }

    fn render_actuator(&self, view: &ActuatorView) {
        tracing::info!(
            "servo mode={} angle={} manual_controls={}",
            view.mode_label,
            view.angle_label,
            if view.manual_controls_enabled { "enabled" } else { "disabled" },
        );
    }

    fn render_series(&self, series: &SeriesBuffer) {
        if let Some(latest) = series.latest() {
            tracing::debug!(
                points = series.len(),
                capacity = series.capacity(),
                "chart {} lux={} temperature={}",
                latest.label,
                latest.illuminance,
                latest.temperature_c,
            );
        }
    }

    fn set_busy(&self, busy: bool) {
        tracing::debug!("{}", refresh_label(busy));
    }
}
