// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use travel_tracker_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("buffer overflow".into());
        assert_eq!(err.to_string(), "Serialization error: buffer overflow");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Trip name must not be empty".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: Trip name must not be empty"
        );
    }

    #[test]
    fn validation_error_empty_message() {
        let err = CoreError::ValidationError(String::new());
        assert_eq!(err.to_string(), "Validation failed: ");
    }

    #[test]
    fn trip_not_found() {
        let err = CoreError::TripNotFound("abc-123".into());
        assert_eq!(err.to_string(), "Trip not found: abc-123");
    }

    #[test]
    fn credential_missing() {
        let err = CoreError::CredentialMissing;
        assert_eq!(err.to_string(), "No API credential configured");
    }

    #[test]
    fn assistant() {
        let err = CoreError::Assistant {
            provider: "Gemini".into(),
            message: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "Assistant error (Gemini): quota exceeded");
    }

    #[test]
    fn assistant_empty_provider() {
        let err = CoreError::Assistant {
            provider: String::new(),
            message: "unknown".into(),
        };
        assert_eq!(err.to_string(), "Assistant error (): unknown");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}

// ── Debug trait ─────────────────────────────────────────────────────

mod debug_trait {
    use super::*;

    #[test]
    fn all_variants_are_debug() {
        // Ensure Debug is derived and doesn't panic
        let variants: Vec<CoreError> = vec![
            CoreError::Serialization("test".into()),
            CoreError::Deserialization("test".into()),
            CoreError::FileIO("test".into()),
            CoreError::ValidationError("test".into()),
            CoreError::TripNotFound("test".into()),
            CoreError::CredentialMissing,
            CoreError::Assistant {
                provider: "p".into(),
                message: "m".into(),
            },
            CoreError::Network("test".into()),
        ];

        for variant in &variants {
            let debug = format!("{:?}", variant);
            assert!(!debug.is_empty());
        }
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::FileIO(msg) => assert!(msg.contains("file not found")),
            other => panic!("Expected FileIO, got {:?}", other),
        }
    }

    #[test]
    fn from_io_error_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::FileIO(msg) => assert!(msg.contains("access denied")),
            other => panic!("Expected FileIO, got {:?}", other),
        }
    }

    #[test]
    fn from_io_error_preserves_message() {
        let msg = "custom IO error with special chars: ąść";
        let io_err = std::io::Error::other(msg);
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::FileIO(m) => assert!(m.contains(msg)),
            other => panic!("Expected FileIO, got {:?}", other),
        }
    }

    #[test]
    fn from_serde_json_error() {
        // Trigger a real serde_json error
        let result: Result<String, _> = serde_json::from_str("{{invalid json");
        let json_err = result.unwrap_err();
        let core_err: CoreError = json_err.into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn from_serde_json_error_eof() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("");
        let json_err = result.unwrap_err();
        let core_err: CoreError = json_err.into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(msg.contains("EOF")),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn from_reqwest_error_is_network() {
        // Port 1 on loopback is never listening: connection is refused
        // immediately, producing a real reqwest error without any network.
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/ping")
            .send()
            .await
            .unwrap_err();

        let core_err: CoreError = err.into();
        match &core_err {
            CoreError::Network(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Network, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn from_reqwest_error_never_leaks_query_values() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/v1/models/gemini-pro:generateContent")
            .query(&[("key", "super-secret-key")])
            .send()
            .await
            .unwrap_err();

        let core_err: CoreError = err.into();
        let display = core_err.to_string();
        assert!(display.starts_with("Network error:"));
        assert!(!display.contains("super-secret-key"), "{display}");
    }
}

// ── Error is std::error::Error ──────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::TripNotFound("test".into()));
        // Should compile and Display should work
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn core_error_implements_send() {
        fn assert_send<T: Send>() {}
        assert_send::<CoreError>();
    }

    #[test]
    fn core_error_implements_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<CoreError>();
    }
}

// ── Edge cases ──────────────────────────────────────────────────────

mod edge_cases {
    use super::*;

    #[test]
    fn very_long_error_message() {
        let long_msg = "x".repeat(10_000);
        let err = CoreError::Network(long_msg.clone());
        assert_eq!(err.to_string(), format!("Network error: {}", long_msg));
    }

    #[test]
    fn unicode_in_error_message() {
        let err = CoreError::Assistant {
            provider: "日本API".into(),
            message: "接続エラー".into(),
        };
        assert_eq!(err.to_string(), "Assistant error (日本API): 接続エラー");
    }

    #[test]
    fn newlines_in_error_message() {
        let err = CoreError::FileIO("line1\nline2\nline3".into());
        let display = err.to_string();
        assert!(display.contains("line1\nline2\nline3"));
    }

    #[test]
    fn trip_not_found_with_uuid_string() {
        let id = uuid::Uuid::new_v4();
        let err = CoreError::TripNotFound(id.to_string());
        assert_eq!(err.to_string(), format!("Trip not found: {id}"));
    }
}
