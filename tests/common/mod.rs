use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use citizen_safety::{Dashboard, FormField, Notifier, PredictionClient};

/// Notifier that remembers every notice instead of printing it
#[derive(Default)]
pub struct RecordingNotice {
    pub notices: Mutex<Vec<String>>,
}

impl RecordingNotice {
    pub fn count(&self) -> usize {
        self.notices.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotice {
    fn notify_failure(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

/// Dashboard pointed at `base_url` with a filled-in itinerary
pub fn filled_dashboard(base_url: &str) -> (Dashboard, Arc<RecordingNotice>) {
    let notice = Arc::new(RecordingNotice::default());
    let client = PredictionClient::with_base_url(base_url).unwrap();
    let mut dashboard = Dashboard::new(client, notice.clone());
    dashboard.set_field(FormField::FromCity, "Miami, US");
    dashboard.set_field(FormField::ToCity, "Orlando, US");
    dashboard.set_field(FormField::TravelDate, "2025-06-01");
    (dashboard, notice)
}

/// Address on which nothing is listening
pub fn closed_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Warning messages emitted by this crate while the layer is installed
#[derive(Clone, Default)]
pub struct CapturedWarnings(pub Arc<Mutex<Vec<String>>>);

impl CapturedWarnings {
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for CapturedWarnings {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() != Level::WARN || !meta.target().starts_with("citizen_safety") {
            return;
        }
        let mut message = MessageField::default();
        event.record(&mut message);
        self.0.lock().unwrap().push(message.0);
    }
}

#[derive(Default)]
struct MessageField(String);

impl Visit for MessageField {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}
