use std::collections::VecDeque;

use time::OffsetDateTime;

pub const DEFAULT_CAPACITY: usize = 20;

/// One chart sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Wall-clock label shown on the x axis, `HH:MM:SS`
    pub label: String,
    /// Logical time of the sample
    pub at: OffsetDateTime,
    /// Illuminance in lux
    pub illuminance: f64,
    /// Temperature in Celsius
    pub temperature_c: f64,
}

impl SeriesPoint {
    pub fn new(at: OffsetDateTime, illuminance: f64, temperature_c: f64) -> Self {
        Self {
            label: format!("{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second()),
            at,
            illuminance,
            temperature_c,
        }
    }
}

/// Fixed-capacity chart window. Appends go to the tail and the oldest
/// point is evicted once the window is full.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBuffer {
    points: VecDeque<SeriesPoint>,
    capacity: usize,
}

impl SeriesBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn append(&mut self, point: SeriesPoint) {
        self.points.push_back(point);

        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn illuminance(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.illuminance).collect()
    }

    pub fn temperature(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.temperature_c).collect()
    }
}

impl Default for SeriesBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
