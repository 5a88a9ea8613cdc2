use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::constants::{FAILURE_NOTICE, HEATMAP_DOCUMENT};
use crate::error::Result;
use crate::formatters::{format_form, format_heatmap_panel, format_result};
use crate::models::{FormField, FormState, PredictionResult};
use crate::notice::Notifier;
use crate::service::PredictionClient;

/// How a submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response replaced the current result. A `null` body clears it.
    Applied,
    /// The request failed and the notice was shown
    Failed,
}

#[derive(Default)]
struct ResultSlot {
    current: Option<PredictionResult>,
    generation: u64,
}

/// The itinerary form, its latest prediction and the heatmap panel.
///
/// Submissions are not cancelled by later ones. Whichever response
/// completes last is the one displayed.
pub struct Dashboard {
    form: FormState,
    slot: Arc<Mutex<ResultSlot>>,
    issued: Arc<AtomicU64>,
    client: PredictionClient,
    notifier: Arc<dyn Notifier>,
    heatmap: PathBuf,
    show_details: bool,
}

impl Dashboard {
    pub fn new(client: PredictionClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            form: FormState::default(),
            slot: Arc::new(Mutex::new(ResultSlot::default())),
            issued: Arc::new(AtomicU64::new(0)),
            client,
            notifier,
            heatmap: PathBuf::from(HEATMAP_DOCUMENT),
            show_details: false,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn client(&self) -> &PredictionClient {
        &self.client
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Flips whether model inputs are rendered; returns the new setting
    pub fn toggle_details(&mut self) -> bool {
        self.show_details = !self.show_details;
        self.show_details
    }

    /// Snapshot of the currently displayed prediction
    pub fn result(&self) -> Option<PredictionResult> {
        self.lock_slot().current.clone()
    }

    /// Validates the form and prepares one request with a snapshot of it.
    ///
    /// Nothing is sent until the returned future is polled. The future owns
    /// everything it needs, so the form can keep changing meanwhile.
    pub fn submit(&self) -> Result<impl Future<Output = Outcome> + Send + 'static> {
        self.form.validate()?;

        let form = self.form.clone();
        let client = self.client.clone();
        let slot = Arc::clone(&self.slot);
        let notifier = Arc::clone(&self.notifier);
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(
            "Submitting itinerary #{}: {} -> {} on {} at {}",
            generation,
            form.from_city,
            form.to_city,
            form.travel_date,
            form.travel_time
        );

        Ok(async move {
            match client.predict_route(&form).await {
                Ok(result) => {
                    let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
                    if generation < slot.generation {
                        tracing::warn!(
                            "Response to submission #{} arrived after #{} and replaces it",
                            generation,
                            slot.generation
                        );
                    }
                    slot.current = result;
                    slot.generation = generation;
                    Outcome::Applied
                }
                Err(e) => {
                    tracing::error!("Error fetching prediction: {}", e);
                    notifier.notify_failure(FAILURE_NOTICE);
                    Outcome::Failed
                }
            }
        })
    }

    /// Renders the form and result panel followed by the heatmap panel
    pub fn render(&self) -> String {
        let mut output = String::from("=== Citizen Safety Assistant ===\n\n");
        output.push_str(&format_form(&self.form));

        if let Some(result) = &self.lock_slot().current {
            output.push('\n');
            output.push_str(&format_result(result, self.show_details));
        }

        output.push('\n');
        output.push_str(&format_heatmap_panel(&self.heatmap));
        output
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, ResultSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
