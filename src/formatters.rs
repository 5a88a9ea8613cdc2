use std::path::Path;

use crate::models::{FormField, FormState, PredictionResult, WeatherSummary};

/// Formats the current form values
pub fn format_form(form: &FormState) -> String {
    let mut output = String::from("Itinerary:\n");
    for field in FormField::ALL {
        let marker = if field.is_required() { "*" } else { " " };
        output.push_str(&format!(
            "  {}{:<12} {}\n",
            marker,
            field.key(),
            form.get(field)
        ));
    }
    output
}

/// Formats a prediction as the result panel, tagged with its severity class.
/// Missing values render as empty text.
pub fn format_result(result: &PredictionResult, show_details: bool) -> String {
    let mut output = format!(
        "[{}] {}\n",
        result.severity_class(),
        text(&result.message)
    );
    if let Some(error) = &result.error {
        output.push_str(&format!("  Service error: {}\n", error));
    }
    output.push_str(&format!("  Route: {}\n", text(&result.route)));
    output.push_str(&format!(
        "  Distance: {} miles\n",
        number(result.distance_miles)
    ));
    output.push_str(&format!(
        "  Duration: {} min\n",
        number(result.estimated_duration_min)
    ));
    output.push_str(&format_weather("Weather from", result.weather_from.as_ref()));
    output.push_str(&format_weather("Weather to", result.weather_to.as_ref()));

    if show_details {
        if let Some(inputs) = &result.feature_input {
            output.push_str("  Model inputs:\n");
            for (name, value) in inputs {
                output.push_str(&format!("    {}: {}\n", name, value));
            }
        }
    }
    output
}

fn format_weather(label: &str, weather: Option<&WeatherSummary>) -> String {
    let Some(weather) = weather else {
        return format!("  {}: , \n", label);
    };

    let mut output = format!(
        "  {}: {}, {}\n",
        label,
        text(&weather.weather_main),
        text(&weather.weather_desc)
    );

    let readings: Vec<String> = [
        weather.temp_f.map(|v| format!("{:.1}\u{00b0}F", v)),
        weather.humidity.map(|v| format!("humidity {}%", v)),
        weather.wind_mph.map(|v| format!("wind {:.1} mph", v)),
        weather.visibility_mi.map(|v| format!("visibility {:.1} mi", v)),
        weather.precip_in.map(|v| format!("precipitation {:.2} in", v)),
        weather.pressure_in.map(|v| format!("pressure {:.2} in", v)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !readings.is_empty() {
        output.push_str(&format!("    {}\n", readings.join(", ")));
    }
    output
}

/// Formats the heatmap panel. The document itself is produced elsewhere;
/// only its location and presence are shown.
pub fn format_heatmap_panel(document: &Path) -> String {
    let availability = match std::fs::metadata(document) {
        Ok(meta) if meta.is_file() => format!("available, {} bytes", meta.len()),
        _ => "not found".to_string(),
    };
    format!(
        "Accident Heatmap\n  Source: {} ({})\n",
        document.display(),
        availability
    )
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(body: serde_json::Value) -> PredictionResult {
        PredictionResult::from_slice(body.to_string().as_bytes())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn result_panel_carries_severity_class() {
        let result = decode(json!({
            "severity": 3,
            "message": "High Risk",
            "route": "Miami → Orlando",
            "distance_miles": 205.37,
            "estimated_duration_min": 246.4,
            "weather_from": { "weather_main": "Rain", "weather_desc": "heavy rain" },
            "weather_to": { "weather_main": "Clouds", "weather_desc": "overcast clouds" }
        }));

        assert_eq!(
            format_result(&result, false),
            "[danger] High Risk\n\
             \x20 Route: Miami → Orlando\n\
             \x20 Distance: 205.37 miles\n\
             \x20 Duration: 246.4 min\n\
             \x20 Weather from: Rain, heavy rain\n\
             \x20 Weather to: Clouds, overcast clouds\n"
        );
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        let result = decode(json!({ "distance_miles": 100, "estimated_duration_min": 120.0 }));
        let panel = format_result(&result, false);
        assert!(panel.contains("Distance: 100 miles"));
        assert!(panel.contains("Duration: 120 min"));
    }

    #[test]
    fn missing_weather_renders_empty() {
        let result = decode(json!({ "severity": 99, "message": "Unknown" }));
        let panel = format_result(&result, false);
        assert!(panel.starts_with("[unknown] Unknown\n"));
        assert!(panel.contains("  Weather from: , \n"));
        assert!(panel.contains("  Weather to: , \n"));
        assert!(panel.contains("  Distance:  miles\n"));
    }

    #[test]
    fn service_error_is_shown() {
        let result = decode(json!({ "error": "Could not geocode one or both cities." }));
        let panel = format_result(&result, false);
        assert!(panel.starts_with("[unknown] \n"));
        assert!(panel.contains("Service error: Could not geocode one or both cities."));
    }

    #[test]
    fn weather_readings_follow_the_summary() {
        let result = decode(json!({
            "weather_from": {
                "weather_main": "Clear",
                "weather_desc": "clear sky",
                "temp_F": 71.26,
                "wind_mph": 8
            }
        }));
        let panel = format_result(&result, false);
        assert!(panel.contains("  Weather from: Clear, clear sky\n    71.3\u{00b0}F, wind 8.0 mph\n"));
    }

    #[test]
    fn model_inputs_only_with_details() {
        let result = decode(json!({ "feature_input": { "Duration(min)": 12.5 } }));
        assert!(!format_result(&result, false).contains("Model inputs"));
        assert!(format_result(&result, true).contains("    Duration(min): 12.5\n"));
    }

    #[test]
    fn heatmap_panel_reports_missing_document() {
        let panel = format_heatmap_panel(Path::new("no/such/heatmap.html"));
        assert_eq!(
            panel,
            "Accident Heatmap\n  Source: no/such/heatmap.html (not found)\n"
        );
    }

    #[test]
    fn form_lists_every_field() {
        let form = FormState::default();
        let output = format_form(&form);
        for field in FormField::ALL {
            assert!(output.contains(field.key()));
        }
        assert!(output.contains("12:00"));
    }
}
