//! Prompt builders and response schemas.

use std::fmt::Write as _;

use serde_json::{Value, json};

use crate::sim::summary::ForecastSummary;
use crate::sim::types::{Forecast, HOURS_PER_DAY, PanelConfig};

/// Asks the model to act as a forecaster for `panel`.
pub fn prediction_prompt(panel: &PanelConfig) -> String {
    format!(
        "You are a solar energy analyst producing an hourly photovoltaic output forecast.\n\
         Behave like a physics-based PV model: account for sun position at the site, \
         panel orientation, and typical mostly-clear weather for the season.\n\
         \n\
         System:\n\
         - Location: latitude {lat}, longitude {lon}\n\
         - Capacity: {cap} kWp\n\
         - Tilt: {tilt} degrees from horizontal\n\
         - Azimuth: {az} degrees from north (180 = south-facing)\n\
         \n\
         Return a JSON array with exactly {n} objects, one per hour 0 to 23, each with \
         an integer `hour` and a number `power_kw`. Output follows a bell curve peaking \
         near solar noon, is zero at night, and never exceeds the capacity.",
        lat = panel.latitude,
        lon = panel.longitude,
        cap = panel.capacity_kw,
        tilt = panel.tilt_deg,
        az = panel.azimuth_deg,
        n = HOURS_PER_DAY,
    )
}

/// Schema for the prediction response: an array of `{hour, power_kw}`.
pub fn prediction_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "hour": {
                    "type": "INTEGER",
                    "description": "Hour of the day, 0 to 23."
                },
                "power_kw": {
                    "type": "NUMBER",
                    "description": "Predicted output in kilowatts."
                }
            },
            "required": ["hour", "power_kw"]
        }
    })
}

/// Asks for a title, explanation, and suggestions about the first
/// `max_points` hours of `forecast`.
pub fn insight_prompt(forecast: &Forecast, max_points: usize) -> String {
    let mut data = String::new();
    for p in forecast.iter().take(max_points) {
        let _ = writeln!(data, "Time: {}, Forecast: {:.2} kW", p.label(), p.power_kw);
    }

    format!(
        "Analyze this solar PV generation forecast for a homeowner or small business owner. \
         Keep it concise and actionable.\n\
         \n\
         Data:\n\
         {data}\n\
         Provide:\n\
         1. A short, catchy title.\n\
         2. A brief explanation of the generation pattern.\n\
         3. Two or three practical suggestions for when to run high-energy appliances \
         or charge vehicles."
    )
}

/// Schema for the insight response.
pub fn insight_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "Short headline for the insight."
            },
            "explanation": {
                "type": "STRING",
                "description": "Brief explanation of the forecast pattern."
            },
            "suggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Practical suggestions."
            }
        },
        "required": ["title", "explanation", "suggestions"]
    })
}

/// System instruction grounding a chat session in one forecast.
pub fn chat_context(forecast: &Forecast, panel: Option<&PanelConfig>) -> String {
    let mut ctx = String::from(
        "You are an AI solar analyst. Answer questions about the forecast below. \
         Be brief, use plain text, and say so when a question cannot be answered \
         from the data.\n\n",
    );

    if let Some(p) = panel {
        let _ = writeln!(
            ctx,
            "Panel: {} kWp at {:.4}, {:.4}, tilt {} deg, azimuth {} deg, model {}.",
            p.capacity_kw, p.latitude, p.longitude, p.tilt_deg, p.azimuth_deg, p.model
        );
        let summary = ForecastSummary::from_forecast(forecast, p.capacity_kw);
        let _ = writeln!(
            ctx,
            "Peak {:.2} kW at {:02}:00, {:.2} kWh over the day.",
            summary.peak_kw, summary.peak_hour, summary.total_kwh
        );
    }

    ctx.push_str("Hourly forecast:\n");
    for p in forecast {
        let _ = writeln!(ctx, "{} {:.2} kW", p.label(), p.power_kw);
    }
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{CurveSimulator, FixedNoise, ModelVariant};

    fn panel() -> PanelConfig {
        PanelConfig {
            latitude: 40.7128,
            longitude: -74.006,
            capacity_kw: 5.0,
            tilt_deg: 20.0,
            azimuth_deg: 180.0,
            model: ModelVariant::Physics,
        }
    }

    fn forecast() -> Forecast {
        CurveSimulator
            .simulate(&panel(), &mut FixedNoise::midpoint())
            .expect("valid config")
    }

    #[test]
    fn prediction_prompt_embeds_panel() {
        let prompt = prediction_prompt(&panel());
        assert!(prompt.contains("latitude 40.7128"));
        assert!(prompt.contains("longitude -74.006"));
        assert!(prompt.contains("5 kWp"));
        assert!(prompt.contains("exactly 24 objects"));
    }

    #[test]
    fn insight_prompt_truncates_points() {
        let prompt = insight_prompt(&forecast(), 20);
        assert_eq!(prompt.matches("Time: ").count(), 20);
        assert!(prompt.contains("Time: 12:00, Forecast: 5.00 kW"));
        assert!(!prompt.contains("Time: 20:00"));
    }

    #[test]
    fn chat_context_lists_every_hour() {
        let ctx = chat_context(&forecast(), Some(&panel()));
        assert!(ctx.contains("Peak 5.00 kW at 12:00"));
        assert!(ctx.contains("23:00 0.00 kW"));
    }

    #[test]
    fn schemas_require_fields() {
        assert_eq!(prediction_schema()["items"]["required"][1], "power_kw");
        assert_eq!(insight_schema()["required"][2], "suggestions");
    }
}
