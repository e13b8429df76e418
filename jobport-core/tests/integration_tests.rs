//! Integration tests for jobport-core infrastructure

use jobport_core::{
    validation_error, ClientConfig, ErrorContext, JobportError, Role, Session, UserAccount,
};

#[test]
fn test_error_taxonomy_user_messages() {
    let rejected = JobportError::auth_rejected("Email đã tồn tại trong hệ thống", "auth_api");
    assert_eq!(rejected.user_message(), "Email đã tồn tại trong hệ thống");

    // A contract failure must never read like a credential problem
    let malformed = JobportError::malformed("response missing token", "auth_api");
    let text = malformed.user_message();
    assert!(!text.to_lowercase().contains("password"));
    assert!(!text.to_lowercase().contains("credential"));

    let transport = JobportError::transport("connection refused", "auth_api");
    assert!(transport.is_recoverable());
    assert!(!rejected.is_recoverable());

    // Logging must not panic
    transport.log();
    rejected.log();
}

#[test]
fn test_error_context_carries_component() {
    let error = validation_error!("bad field", "email", "test_component");
    match &error {
        JobportError::Validation {
            field, context, ..
        } => {
            assert_eq!(field.as_deref(), Some("email"));
            assert_eq!(context.component, "test_component");
            assert!(!context.error_id.is_empty());
        }
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_empty_auth_rejected_message_falls_back() {
    let rejected = JobportError::auth_rejected("", "auth_api");
    assert!(!rejected.user_message().is_empty());
}

#[test]
fn test_session_construction_is_all_or_nothing() {
    let user = UserAccount {
        user_id: 1,
        full_name: "Admin".to_string(),
        email: "admin@portal.vn".to_string(),
        role: Role::Admin,
    };

    assert!(Session::new(user.clone(), "jwt".to_string()).is_ok());
    assert!(Session::new(user, String::new()).is_err());
}

#[test]
fn test_env_overrides_win_over_file_values() {
    let config = ClientConfig::default();
    std::env::set_var("JOBPORT_API_URL", "https://portal.example.com/api");
    let config = config.apply_env_overrides();
    std::env::remove_var("JOBPORT_API_URL");
    assert_eq!(config.api.base_url, "https://portal.example.com/api");
    assert!(config.validate().is_ok());
}

#[test]
fn test_error_context_builder() {
    let context = ErrorContext::new("session_store")
        .with_operation("hydrate")
        .with_metadata("slot", "user")
        .with_suggestion("Clear the credential directory");
    assert_eq!(context.component, "session_store");
    assert_eq!(context.operation.as_deref(), Some("hydrate"));
    assert_eq!(context.metadata.get("slot").map(String::as_str), Some("user"));
    assert_eq!(context.recovery_suggestions.len(), 1);
}
