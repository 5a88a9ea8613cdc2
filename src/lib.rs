//! Terminal client for the route safety prediction service.
//!
//! Collects an itinerary, posts it to the service and renders the predicted
//! risk together with route and weather details.

pub mod commands;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod formatters;
pub mod models;
pub mod notice;
pub mod service;

pub use dashboard::{Dashboard, Outcome};
pub use error::{Error, Result};
pub use models::{FormField, FormState, PredictionResult, SeverityClass, WeatherSummary};
pub use notice::{Notifier, TerminalNotice};
pub use service::PredictionClient;
