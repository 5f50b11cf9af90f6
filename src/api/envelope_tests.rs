//! Tests for response envelope decoding.

use super::{ApiEnvelope, ApiError, DEFAULT_ERROR_MESSAGE, unwrap_envelope};
use serde_json::{Map, Value, json};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("test body must be an object, got {other}"),
    }
}

mod success {
    use super::*;

    #[test]
    fn ok_status_returns_data() {
        let data = unwrap_envelope(object(json!({
            "status": "OK",
            "data": {"id": "tx_1"}
        })))
        .unwrap();

        assert_eq!(data, json!({"id": "tx_1"}));
    }

    #[test]
    fn array_data_is_kept() {
        let data = unwrap_envelope(object(json!({"status": "OK", "data": [1, 2]}))).unwrap();
        assert_eq!(data, json!([1, 2]));
    }

    #[test]
    fn missing_data_becomes_empty_object() {
        let data = unwrap_envelope(object(json!({"status": "OK"}))).unwrap();
        assert_eq!(data, json!({}));
    }

    #[test]
    fn scalar_data_becomes_empty_object() {
        for scalar in [json!("text"), json!(12), json!(true), Value::Null] {
            let data = unwrap_envelope(object(json!({"status": "OK", "data": scalar}))).unwrap();
            assert_eq!(data, json!({}));
        }
    }

    #[test]
    fn missing_or_unknown_status_is_success() {
        for status in [None, Some(json!("PENDING")), Some(json!(1)), Some(json!("error"))] {
            let mut body = object(json!({"data": {"ok": true}}));
            if let Some(status) = status {
                body.insert("status".into(), status);
            }

            assert_eq!(
                ApiEnvelope::decode(body),
                ApiEnvelope::Success {
                    data: json!({"ok": true})
                }
            );
        }
    }
}

mod failure {
    use super::*;

    #[test]
    fn error_status_carries_message_code_and_details() {
        let error = unwrap_envelope(object(json!({
            "status": "ERROR",
            "message": "Insufficient funds",
            "error_code": "INSUFFICIENT_FUNDS",
            "errors": [{"field": "amount"}]
        })))
        .unwrap_err();

        match error {
            ApiError::Logical {
                message,
                code,
                details,
            } => {
                assert_eq!(message, "Insufficient funds");
                assert_eq!(code.as_deref(), Some("INSUFFICIENT_FUNDS"));
                assert_eq!(details, json!([{"field": "amount"}]));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn logical_error_reports_http_200() {
        let error = unwrap_envelope(object(json!({"status": "ERROR"}))).unwrap_err();
        assert_eq!(error.http_status(), Some(200));
    }

    #[test]
    fn empty_or_missing_message_uses_default() {
        for body in [
            json!({"status": "ERROR"}),
            json!({"status": "ERROR", "message": ""}),
            json!({"status": "ERROR", "message": null}),
        ] {
            let error = unwrap_envelope(object(body)).unwrap_err();
            assert_eq!(error.to_string(), DEFAULT_ERROR_MESSAGE);
        }
    }

    #[test]
    fn non_string_error_code_is_dropped() {
        let error =
            unwrap_envelope(object(json!({"status": "ERROR", "error_code": 42}))).unwrap_err();
        assert_eq!(error.api_code(), None);
    }

    #[test]
    fn object_errors_are_kept() {
        let error = unwrap_envelope(object(json!({
            "status": "ERROR",
            "errors": {"phone_number": ["invalid"]}
        })))
        .unwrap_err();

        assert_eq!(error.details(), Some(&json!({"phone_number": ["invalid"]})));
    }

    #[test]
    fn scalar_errors_become_empty_array() {
        let error =
            unwrap_envelope(object(json!({"status": "ERROR", "errors": "bad"}))).unwrap_err();
        assert_eq!(error.details(), Some(&json!([])));
    }

    #[test]
    fn data_is_ignored_on_error() {
        let envelope = ApiEnvelope::decode(object(json!({
            "status": "ERROR",
            "message": "Duplicate reference",
            "data": {"id": "tx_1"}
        })));

        assert!(matches!(envelope, ApiEnvelope::Failure { .. }));
    }
}
