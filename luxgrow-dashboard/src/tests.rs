//! Scripted transport and recording presenter for exercising the engine
//! without a backend.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::errors::FetchError;
use crate::models::{ActuatorView, SeriesBuffer, Snapshot};
use crate::presenter::Presenter;
use crate::services::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Canned reply for one request.
#[derive(Debug, Clone)]
pub enum Scripted {
    Json(Value),
    Status(u16),
    Offline,
    Delayed(Duration, Box<Scripted>),
}

impl Scripted {
    pub fn delayed(delay: Duration, reply: Scripted) -> Self {
        Scripted::Delayed(delay, Box::new(reply))
    }
}

/// In-memory [`Transport`].
///
/// Each (method, path) holds a queue of replies. Replies are consumed in
/// order and the last one repeats. Unscripted GETs answer 404, unscripted
/// POSTs succeed.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose three sensor endpoints all answer.
    pub fn sensors(lux: f64, temperature: f64, humidity: f64, classification: &str) -> Self {
        let transport = Self::new();
        transport.on_get("/api/realtime/lux", Scripted::Json(json!({ "lux": lux })));
        transport.on_get(
            "/api/realtime/dht",
            Scripted::Json(json!({ "temperature": temperature, "humidity": humidity })),
        );
        transport.on_get(
            "/api/realtime/condition",
            Scripted::Json(json!({ "klasifikasi": classification })),
        );
        transport
    }

    pub fn on_get(&self, path: &str, reply: Scripted) {
        self.script(Method::Get, path, vec![reply]);
    }

    pub fn on_post(&self, path: &str, reply: Scripted) {
        self.script(Method::Post, path, vec![reply]);
    }

    pub fn on_get_sequence(&self, path: &str, replies: Vec<Scripted>) {
        self.script(Method::Get, path, replies);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    /// Body of the most recent POST to `path`.
    pub fn last_body(&self, path: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|call| call.method == Method::Post && call.path == path)
            .and_then(|call| call.body.clone())
    }

    fn script(&self, method: Method, path: &str, replies: Vec<Scripted>) {
        self.replies
            .lock()
            .unwrap()
            .insert((method, path.to_string()), replies.into());
    }

    fn record(&self, method: Method, path: &str, body: Option<Value>) -> Option<Scripted> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });

        let mut replies = self.replies.lock().unwrap();
        let queue = replies.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

async fn resolve(path: &str, mut reply: Scripted) -> Result<Value, FetchError> {
    loop {
        match reply {
            Scripted::Json(value) => return Ok(value),
            Scripted::Status(status) => return Err(FetchError::status(path, status)),
            Scripted::Offline => return Err(FetchError::transport(path, "connection refused")),
            Scripted::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                reply = *inner;
            }
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str) -> Result<Value, FetchError> {
        let reply = self.record(Method::Get, path, None).unwrap_or(Scripted::Status(404));
        resolve(path, reply).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<(), FetchError> {
        let reply = self
            .record(Method::Post, path, Some(body.clone()))
            .unwrap_or(Scripted::Json(Value::Null));
        resolve(path, reply).await.map(|_| ())
    }
}

/// [`Presenter`] that keeps everything it is asked to show.
#[derive(Default)]
pub struct RecordingPresenter {
    snapshots: Mutex<Vec<Snapshot>>,
    actuators: Mutex<Vec<ActuatorView>>,
    series: Mutex<Vec<SeriesBuffer>>,
    busy: Mutex<Vec<bool>>,
}

impl RecordingPresenter {
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.snapshots.lock().unwrap().clone()
    }

    pub fn actuators(&self) -> Vec<ActuatorView> {
        self.actuators.lock().unwrap().clone()
    }

    pub fn series(&self) -> Vec<SeriesBuffer> {
        self.series.lock().unwrap().clone()
    }

    pub fn busy(&self) -> Vec<bool> {
        self.busy.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn render(&self, snapshot: &Snapshot) {
        self.snapshots.lock().unwrap().push(snapshot.clone());
    }

    fn render_actuator(&self, view: &ActuatorView) {
        self.actuators.lock().unwrap().push(view.clone());
    }

    fn render_series(&self, series: &SeriesBuffer) {
        self.series.lock().unwrap().push(series.clone());
    }

    fn set_busy(&self, busy: bool) {
        self.busy.lock().unwrap().push(busy);
    }
}
