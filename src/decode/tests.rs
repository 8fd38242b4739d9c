//! Tests for decode module

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_decoder_config_defaults() {
    let config = DecoderConfig::json();
    assert_eq!(config.format, DecoderFormat::Json);
    assert!(config.records_path.is_none());

    let config = DecoderConfig::jsonl();
    assert_eq!(config.format, DecoderFormat::Jsonl);

    let config = DecoderConfig::json().with_records_path("data");
    assert_eq!(config.records_path.as_deref(), Some("data"));
}

#[test]
fn test_json_decoder_array() {
    let decoder = JsonDecoder::new();
    let items = decoder
        .decode(r#"[{"id": "org1"}, {"id": "org2"}]"#)
        .unwrap();

    assert_eq!(items, vec![json!({"id": "org1"}), json!({"id": "org2"})]);
}

#[test]
fn test_json_decoder_object_is_single_item() {
    let decoder = JsonDecoder::new();
    let items = decoder.decode(r#"{"id": "org1"}"#).unwrap();
    assert_eq!(items, vec![json!({"id": "org1"})]);
}

#[test]
fn test_json_decoder_empty_body() {
    let decoder = JsonDecoder::new();
    assert!(decoder.decode("").unwrap().is_empty());
    assert!(decoder.decode("  \n").unwrap().is_empty());
    assert!(decoder.decode("null").unwrap().is_empty());
}

#[test]
fn test_json_decoder_with_path() {
    let decoder = JsonDecoder::with_path("data.items");
    let items = decoder
        .decode(r#"{"data": {"items": [1, 2, 3]}, "total": 3}"#)
        .unwrap();
    assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
}

#[test]
fn test_json_decoder_path_with_index() {
    let decoder = JsonDecoder::with_path("$.pages.1.items");
    let items = decoder
        .decode(r#"{"pages": [{"items": ["a"]}, {"items": ["b", "c"]}]}"#)
        .unwrap();
    assert_eq!(items, vec![json!("b"), json!("c")]);
}

#[test]
fn test_json_decoder_missing_path() {
    let decoder = JsonDecoder::with_path("missing");
    assert!(decoder.decode(r#"{"data": []}"#).unwrap().is_empty());
}

#[test]
fn test_json_decoder_invalid() {
    let decoder = JsonDecoder::new();
    let err = decoder.decode("not json").unwrap_err();
    assert!(matches!(err, crate::error::Error::Decode { .. }));
}

#[test]
fn test_jsonl_decoder() {
    let decoder = JsonlDecoder::new();
    let items = decoder.decode("{\"id\": 1}\n\n{\"id\": 2}\n").unwrap();
    assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[test]
fn test_jsonl_decoder_invalid_line() {
    let decoder = JsonlDecoder::new();
    let err = decoder.decode("{\"id\": 1}\nbroken").unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_decoder_config_build() {
    let decoder = DecoderConfig::json().with_records_path("items").build();
    let items = decoder.decode(r#"{"items": [{"id": 1}]}"#).unwrap();
    assert_eq!(items, vec![json!({"id": 1})]);

    let decoder = DecoderConfig::jsonl().build();
    assert_eq!(decoder.decode("1\n2").unwrap().len(), 2);
}
