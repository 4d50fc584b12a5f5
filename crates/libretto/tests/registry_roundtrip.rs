mod common;

use common::{request, weather_registry};
use libretto::types::messages::{ClientRequest, Envelope};
use libretto::{
    decode_envelope, decode_response, encode_envelope, EncodeMode, ErrorData, JsonRpcMessage,
    RegistryConfig, Registry,
};
use serde_json::{json, Value};

fn result_of(registry: &Registry, message: Value) -> Value {
    let response = registry.handle_message(message).expect("a response");
    assert!(response.get("error").is_none(), "unexpected error: {}", response);
    response["result"].clone()
}

fn error_of(registry: &Registry, message: Value) -> Value {
    let response = registry.handle_message(message).expect("a response");
    assert!(response.get("result").is_none(), "unexpected result: {}", response);
    response["error"].clone()
}

#[test]
fn test_initialize_advertises_registrations() {
    let registry = weather_registry();
    let result = result_of(
        &registry,
        request(
            1,
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "test-client", "version": "1.0.0" },
            }),
        ),
    );

    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "weather");
    assert_eq!(result["instructions"], "Ask for the weather by city name.");
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["capabilities"]["prompts"].is_object());
    assert!(result["capabilities"]["resources"].is_object());
    assert!(result["capabilities"]["logging"].is_object());
}

#[test]
fn test_get_weather_listing() {
    let registry = weather_registry();
    let result = result_of(&registry, request(1, "tools/list", json!({})));

    assert_eq!(
        result["tools"][0],
        json!({
            "name": "get_weather",
            "description": "Get the current weather for a city.",
            "inputSchema": {
                "type": "object",
                "properties": { "city": { "type": "string" } },
                "required": ["city"],
                "additionalProperties": false,
            },
        })
    );
}

#[test]
fn test_skipped_parameter_is_hidden() {
    let registry = weather_registry();
    let result = result_of(&registry, request(1, "tools/list", json!({})));

    let average = &result["tools"][1]["inputSchema"];
    assert!(average["properties"].get("ctx").is_none());
    assert_eq!(average["properties"]["round"]["default"], false);
    assert_eq!(average["required"], json!(["readings"]));
}

#[test]
fn test_call_tool() {
    let registry = weather_registry();

    let result = result_of(
        &registry,
        request(
            1,
            "tools/call",
            json!({ "name": "average", "arguments": { "readings": [1, 2, 4.5] } }),
        ),
    );
    assert_eq!(result["content"][0]["text"], "2.5");
    assert!(result.get("isError").is_none());

    let result = result_of(
        &registry,
        request(2, "tools/call", json!({ "name": "average", "arguments": { "readings": [] } })),
    );
    assert_eq!(result["isError"], true);
}

#[test]
fn test_call_tool_reports_every_bad_argument() {
    let registry = weather_registry();
    let error = error_of(
        &registry,
        request(
            1,
            "tools/call",
            json!({ "name": "average", "arguments": { "readings": "lots", "units": "c" } }),
        ),
    );

    assert_eq!(error["code"], ErrorData::INVALID_PARAMS);
    let fields: Vec<&str> = error["data"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["readings", "units"]);
}

#[test]
fn test_prompts() {
    let registry = weather_registry();

    let listing = result_of(&registry, request(1, "prompts/list", json!({})));
    assert_eq!(
        listing["prompts"][0]["arguments"],
        json!([
            { "name": "city", "description": "", "required": true },
            { "name": "days", "description": "", "required": false },
        ])
    );

    let result = result_of(
        &registry,
        request(
            2,
            "prompts/get",
            json!({ "name": "forecast", "arguments": { "city": "Tokyo", "days": 5 } }),
        ),
    );
    assert_eq!(result["description"], "Ask for a forecast.");
    assert_eq!(result["messages"][0]["role"], "user");
    assert_eq!(result["messages"][0]["content"]["text"], "Forecast for 5 days in Tokyo");
}

#[test]
fn test_resources() {
    let registry = weather_registry();

    let listing = result_of(&registry, request(1, "resources/list", json!({})));
    assert_eq!(listing["resources"][0]["uri"], "config://server");
    assert_eq!(listing["resources"][0]["description"], "Server configuration.");

    let templates = result_of(&registry, request(2, "resources/templates/list", json!({})));
    assert_eq!(
        templates["resourceTemplates"][0]["uriTemplate"],
        "stations://{id}/readings"
    );

    let fixed = result_of(
        &registry,
        request(3, "resources/read", json!({ "uri": "config://server" })),
    );
    assert_eq!(fixed["resource"]["uri"], "config://server");

    let templated = result_of(
        &registry,
        request(4, "resources/read", json!({ "uri": "stations://7/readings" })),
    );
    assert_eq!(templated["resource"]["uri"], "stations://7/readings");
}

#[test]
fn test_resource_errors() {
    let registry = weather_registry();

    let error = error_of(
        &registry,
        request(1, "resources/read", json!({ "uri": "stations://seven/readings" })),
    );
    assert_eq!(error["code"], ErrorData::INVALID_PARAMS);
    assert_eq!(error["data"]["errors"][0]["field"], "id");

    let error = error_of(
        &registry,
        request(2, "resources/read", json!({ "uri": "nowhere://at/all" })),
    );
    assert_eq!(error["code"], ErrorData::INVALID_PARAMS);

    // Handler-raised errors pass through untouched
    let error = error_of(
        &registry,
        request(3, "resources/read", json!({ "uri": "stations://999/readings" })),
    );
    assert_eq!(error["code"], ErrorData::INVALID_PARAMS);
}

#[test]
fn test_subscriptions() {
    let registry = weather_registry();
    assert!(registry.resource_updated("stations://7/readings").is_none());

    result_of(
        &registry,
        request(1, "resources/subscribe", json!({ "uri": "stations://7/readings" })),
    );
    assert!(registry.resource_updated("stations://7/readings").is_some());

    result_of(
        &registry,
        request(2, "resources/unsubscribe", json!({ "uri": "stations://7/readings" })),
    );
    assert!(registry.resource_updated("stations://7/readings").is_none());
}

#[test]
fn test_protocol_errors_are_told_apart() {
    let registry = weather_registry();

    let error = error_of(
        &registry,
        json!({ "jsonrpc": "1.0", "id": 1, "method": "ping" }),
    );
    assert_eq!(error["code"], ErrorData::INVALID_REQUEST);

    let error = error_of(&registry, request(2, "tools/dance", json!({})));
    assert_eq!(error["code"], ErrorData::METHOD_NOT_FOUND);
    assert_eq!(error["data"]["method"], "tools/dance");

    let error = error_of(&registry, request(3, "tools/call", json!({ "arguments": {} })));
    assert_eq!(error["code"], ErrorData::INVALID_PARAMS);

    let error = error_of(
        &registry,
        json!({ "jsonrpc": "2.0", "id": 4, "method": "ping", "extra": true }),
    );
    assert_eq!(error["code"], ErrorData::INVALID_REQUEST);
}

#[test]
fn test_error_response_keeps_request_id() {
    let registry = weather_registry();
    let response = registry
        .handle_message(json!({ "jsonrpc": "2.0", "id": "abc", "method": "nope" }))
        .unwrap();
    assert_eq!(response["id"], "abc");
    assert_eq!(response["jsonrpc"], "2.0");
}

#[test]
fn test_handle_str_parse_error() {
    let registry = weather_registry();
    let response: Value = serde_json::from_str(&registry.handle_str("{not json").unwrap()).unwrap();
    assert_eq!(response["error"]["code"], ErrorData::PARSE_ERROR);
    assert_eq!(response["id"], Value::Null);

    let response: Value = serde_json::from_str(
        &registry
            .handle_str(r#"{"jsonrpc":"2.0","id":9,"method":"ping"}"#)
            .unwrap(),
    )
    .unwrap();
    assert_eq!(response["result"], json!({}));
}

#[test]
fn test_strict_mode_from_config() {
    let config = RegistryConfig::from_toml_str("[codec]\nmode = \"strict\"").unwrap();
    let registry = Registry::from_config(&config);

    let result = result_of(&registry, request(1, "tools/list", json!({})));
    assert_eq!(result["tools"], json!([]));
    assert_eq!(result["nextCursor"], Value::Null);
}

#[test]
fn test_typed_envelope_round_trip() {
    let message = JsonRpcMessage::request(
        7,
        "tools/call",
        Some(json!({ "name": "get_weather", "arguments": { "city": "Oslo" } })),
    );
    let raw = serde_json::to_value(&message).unwrap();

    let envelope = decode_envelope(raw.clone()).unwrap();
    match &envelope {
        Envelope::Request {
            request: ClientRequest::CallTool(params),
            ..
        } => assert_eq!(params.name, "get_weather"),
        other => panic!("unexpected envelope: {:?}", other),
    }

    let encoded = encode_envelope(&envelope, EncodeMode::Compact).unwrap();
    assert_eq!(encoded, raw);
}

#[test]
fn test_response_decodes() {
    let registry = weather_registry();
    let raw = registry
        .handle_message(request(1, "tools/call", json!({ "name": "get_weather", "arguments": { "city": "Lima" } })))
        .unwrap();

    let response = decode_response(raw).unwrap();
    assert!(!response.is_error());
    assert_eq!(response.result().unwrap()["content"][0]["text"], "Sunny in Lima");
}
