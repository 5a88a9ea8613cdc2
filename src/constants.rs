/// User agent string for HTTP requests
pub const USER_AGENT: &str = "citizen-safety-client/0.1.0";

/// Base URL of the route prediction service
pub const PREDICTION_SERVICE_BASE: &str = "http://127.0.0.1:5000";

/// Path of the prediction endpoint on the service
pub const PREDICT_ROUTE_PATH: &str = "/predict_route";

/// Static heatmap document, relative to the working directory
pub const HEATMAP_DOCUMENT: &str = "public/Accident_Hotspots.html";

/// Travel time pre-filled in a fresh form
pub const DEFAULT_TRAVEL_TIME: &str = "12:00";

/// Shown to the user whenever a submission fails
pub const FAILURE_NOTICE: &str = "Failed to fetch prediction. Make sure backend is running.";
