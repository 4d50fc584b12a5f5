//! Shared fixtures for the integration tests.

use libretto::types::content::BlobResourceContents;
use libretto::{
    CallToolResult, ErrorData, GetPromptResult, Implementation, ParamType, PromptMessage,
    Registry, Signature,
};
use serde_json::{json, Value};

/// A registry with one of everything.
pub fn weather_registry() -> Registry {
    Registry::new(Implementation::new("weather", "0.1.0"))
        .with_instructions("Ask for the weather by city name.")
        .tool(
            "get_weather",
            Signature::new("get_weather")
                .doc("Get the current weather for a city.")
                .param("city", ParamType::String)
                .returns(ParamType::String),
            |args| {
                let city = args.str("city").unwrap_or_default();
                Ok(CallToolResult::text(format!("Sunny in {}", city)))
            },
        )
        .tool_with_skip(
            "average",
            Signature::new("average")
                .doc("Average some readings.")
                .untyped("ctx")
                .param("readings", ParamType::array(ParamType::Number))
                .param_with_default("round", ParamType::Boolean, json!(false)),
            &["ctx"],
            |args| {
                let readings: Vec<f64> = args.get_as("readings")?;
                if readings.is_empty() {
                    return Ok(CallToolResult::error("no readings"));
                }
                let mean = readings.iter().sum::<f64>() / readings.len() as f64;
                let round: bool = args.get_as("round")?;
                let mean = if round { mean.round() } else { mean };
                Ok(CallToolResult::text(mean.to_string()))
            },
        )
        .prompt(
            "forecast",
            Signature::new("forecast")
                .doc("Ask for a forecast.")
                .param("city", ParamType::String)
                .param_with_default("days", ParamType::Integer, json!(3)),
            |args| {
                let days: i64 = args.get_as("days")?;
                let city = args.str("city").unwrap_or_default();
                Ok(GetPromptResult::new(vec![PromptMessage::user_text(format!(
                    "Forecast for {} days in {}",
                    days, city
                ))]))
            },
        )
        .resource(
            "config://server",
            "config",
            Signature::new("config").doc("Server configuration."),
            |_| {
                Ok(BlobResourceContents::new(
                    "config://server",
                    json!({ "units": "metric" }).to_string(),
                ))
            },
        )
        .resource_template(
            "stations://{id}/readings",
            "station_readings",
            Signature::new("station_readings")
                .doc("Recent readings for a station.")
                .param("id", ParamType::Integer),
            |args| {
                let id: i64 = args.get_as("id")?;
                if id > 100 {
                    return Err(ErrorData::resource_not_found(&format!(
                        "stations://{}/readings",
                        id
                    )));
                }
                Ok(BlobResourceContents::new(
                    format!("stations://{}/readings", id),
                    json!([12.5, 13.0]).to_string(),
                ))
            },
        )
        .expect("valid resource template")
}

pub fn request(id: i64, method: &str, params: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params })
}
