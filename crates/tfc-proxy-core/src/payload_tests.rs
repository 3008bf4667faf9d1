//! Tests for inbound payload decoding.

use super::*;
use serde_json::json;

mod decoding_tests {
    use super::*;

    /// A complete payload decodes every field by its wire name.
    #[test]
    fn test_full_payload_decodes() {
        let body = json!({
            "payload_version": 1,
            "notification_configuration_id": "nc-AeUQ2zfKZzW9TiGZ",
            "run_url": "https://app.terraform.io/app/acme/my-workspace/runs/run-FwnENkvDnrpyFC7M",
            "run_id": "run-FwnENkvDnrpyFC7M",
            "run_message": "Add five new queue workers",
            "run_created_at": "2019-01-25T18:34:00.000Z",
            "run_created_by": "sample-user",
            "workspace_id": "ws-XdeUVMWShTesDMME",
            "workspace_name": "my-workspace",
            "organization_name": "acme",
            "notifications": [
                {
                    "message": "Run Canceled",
                    "trigger": "run:errored",
                    "run_status": "errored",
                    "run_updated_at": "2019-01-25T18:37:04.000Z",
                    "run_updated_by": "sample-user",
                    "run_message": "Add five new queue workers"
                }
            ]
        });

        let payload: InboundPayload = serde_json::from_value(body).unwrap();

        assert_eq!(payload.payload_version, 1);
        assert_eq!(payload.notification_configuration_id, "nc-AeUQ2zfKZzW9TiGZ");
        assert_eq!(payload.run_id, "run-FwnENkvDnrpyFC7M");
        assert_eq!(payload.workspace_name, "my-workspace");
        assert_eq!(payload.organization_name, "acme");
        assert_eq!(payload.notifications.len(), 1);

        let event = payload.first_notification().unwrap();
        assert_eq!(event.message, "Run Canceled");
        assert_eq!(event.run_status, "errored");
        assert_eq!(event.run_updated_by.as_deref(), Some("sample-user"));
    }

    /// Null scalars decode to empty values rather than failing.
    #[test]
    fn test_null_fields_decode_to_empty() {
        let body = json!({
            "payload_version": null,
            "run_id": null,
            "workspace_name": null,
            "notifications": [
                { "message": null, "trigger": "verification", "run_status": null, "run_updated_by": null }
            ]
        });

        let payload: InboundPayload = serde_json::from_value(body).unwrap();

        assert_eq!(payload.payload_version, 0);
        assert_eq!(payload.run_id, "");
        assert_eq!(payload.workspace_name, "");

        let event = payload.first_notification().unwrap();
        assert_eq!(event.message, "");
        assert_eq!(event.run_status, "");
        assert_eq!(event.run_updated_by, None);
    }

    /// Missing keys, including the whole notifications array, are tolerated.
    #[test]
    fn test_missing_fields_use_defaults() {
        let payload: InboundPayload = serde_json::from_str("{}").unwrap();

        assert_eq!(payload, InboundPayload::default());
        assert!(payload.first_notification().is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = json!({
            "run_id": "run-1",
            "unexpected": { "nested": true },
            "notifications": []
        });

        let payload: InboundPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.run_id, "run-1");
    }

    /// A wrongly typed field is still a decode error.
    #[test]
    fn test_wrong_type_is_rejected() {
        let result = serde_json::from_str::<InboundPayload>(r#"{"run_id": 42}"#);
        assert!(result.is_err());
    }

    /// Order of the notifications array is preserved.
    #[test]
    fn test_notification_order_preserved() {
        let body = json!({
            "notifications": [
                { "message": "first" },
                { "message": "second" }
            ]
        });

        let payload: InboundPayload = serde_json::from_value(body).unwrap();

        assert_eq!(payload.notifications[0].message, "first");
        assert_eq!(payload.notifications[1].message, "second");
        assert_eq!(payload.first_notification().unwrap().message, "first");
    }
}

mod notification_event_tests {
    use super::*;

    #[test]
    fn test_verification_trigger_is_detected() {
        let event = NotificationEvent {
            trigger: "verification".to_string(),
            ..Default::default()
        };
        assert!(event.is_verification());
        assert_eq!(event.status_label(), "verification");
    }

    /// The sentinel is matched case-sensitively.
    #[test]
    fn test_other_triggers_are_run_events() {
        for trigger in ["run:created", "Verification", "", "verification "] {
            let event = NotificationEvent {
                trigger: trigger.to_string(),
                run_status: "applied".to_string(),
                ..Default::default()
            };
            assert!(!event.is_verification(), "trigger {:?}", trigger);
            assert_eq!(event.status_label(), "applied");
        }
    }
}
