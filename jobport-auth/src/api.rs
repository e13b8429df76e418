//! Auth API client
//!
//! HTTP collaborator for `/auth/login` and `/auth/register`. The backend
//! answers with a success-flag envelope: `{success, message, token, user}`
//! on success, `{success: false, errorCode, error}` on refusal. All
//! contract validation happens here so the session store only ever sees a
//! fully formed [`Session`] or one of the three failure kinds.

use async_trait::async_trait;
use jobport_core::{ApiConfig, JobportError, JobportResult, Role, Session, UserAccount};
use serde::{Deserialize, Serialize};
use tracing::debug;

const COMPONENT: &str = "auth_api";

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "roleId")]
    pub role: Role,
}

/// Raw response envelope. Every field is optional; validation decides what
/// a missing piece means.
#[derive(Debug, Deserialize)]
struct AuthResponseBody {
    success: Option<bool>,
    message: Option<String>,
    error: Option<String>,
    #[serde(rename = "errorCode")]
    #[allow(dead_code)]
    error_code: Option<String>,
    token: Option<String>,
    user: Option<serde_json::Value>,
}

/// The Auth API collaborator, behind a trait so the session store can be
/// exercised against stub implementations.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a session
    async fn login(&self, email: &str, password: &str) -> JobportResult<Session>;

    /// Create an account and sign it in
    async fn register(&self, request: RegisterRequest) -> JobportResult<Session>;
}

/// reqwest-based implementation talking to the configured base URL
pub struct HttpAuthBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthBackend {
    pub fn new(config: &ApiConfig) -> JobportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                JobportError::transport_with_source(
                    format!("Failed to create HTTP client: {}", e),
                    Box::new(e),
                    COMPONENT,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_auth<B: Serialize>(&self, endpoint: &str, body: &B) -> JobportResult<Session> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        debug!("Posting auth request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                JobportError::transport_with_source(
                    format!("Request to {} failed: {}", url, e),
                    Box::new(e),
                    COMPONENT,
                )
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            JobportError::transport_with_source(
                format!("Failed to read response body from {}: {}", url, e),
                Box::new(e),
                COMPONENT,
            )
        })?;

        match serde_json::from_str::<AuthResponseBody>(&text) {
            Ok(parsed) => {
                if status.is_success() {
                    session_from_body(parsed)
                } else if let Some(message) = parsed.error.or(parsed.message) {
                    // Non-2xx with a structured body is an explicit refusal
                    Err(JobportError::auth_rejected(message, COMPONENT))
                } else {
                    Err(JobportError::transport(
                        format!("HTTP {} from {}", status.as_u16(), url),
                        COMPONENT,
                    ))
                }
            }
            Err(_) if status.is_success() => Err(JobportError::malformed(
                "Auth endpoint returned 2xx with a non-JSON body",
                COMPONENT,
            )),
            Err(_) => Err(JobportError::transport(
                format!(
                    "HTTP {} from {}: {}",
                    status.as_u16(),
                    url,
                    status.canonical_reason().unwrap_or("unknown error")
                ),
                COMPONENT,
            )),
        }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, email: &str, password: &str) -> JobportResult<Session> {
        self.post_auth(
            "auth/login",
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    async fn register(&self, request: RegisterRequest) -> JobportResult<Session> {
        self.post_auth("auth/register", &request).await
    }
}

/// Validate a 2xx envelope into a session.
///
/// An explicit `success: false` is a refusal with the server's message; a
/// claimed success that omits the token or a well-formed user record is a
/// contract violation, which must stay distinct from "wrong password".
fn session_from_body(body: AuthResponseBody) -> JobportResult<Session> {
    if body.success == Some(false) {
        let message = body.error.or(body.message).unwrap_or_default();
        return Err(JobportError::auth_rejected(message, COMPONENT));
    }

    let token = match body.token {
        Some(token) if !token.trim().is_empty() => token,
        _ => {
            return Err(JobportError::malformed(
                "Auth response claims success but carries no token",
                COMPONENT,
            ))
        }
    };

    let user_value = body.user.ok_or_else(|| {
        JobportError::malformed("Auth response claims success but carries no user record", COMPONENT)
    })?;

    if !user_value.is_object() {
        return Err(JobportError::malformed(
            "Auth response user record is not an object",
            COMPONENT,
        ));
    }

    let user: UserAccount = serde_json::from_value(user_value).map_err(|e| {
        JobportError::malformed(
            format!("Auth response user record failed validation: {}", e),
            COMPONENT,
        )
    })?;

    Session::new(user, token).map_err(|e| {
        JobportError::malformed(
            format!("Auth response user record is incomplete: {}", e),
            COMPONENT,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> AuthResponseBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn success_envelope_yields_session() {
        let session = session_from_body(body(
            r#"{
                "success": true,
                "message": "Đăng nhập thành công",
                "token": "jwt-abc",
                "user": {"userId": 5, "fullName": "Le Thi C", "email": "c@x.vn", "roleId": 3}
            }"#,
        ))
        .unwrap();

        assert_eq!(session.token, "jwt-abc");
        assert_eq!(session.user.role, Role::Candidate);
        assert_eq!(session.user.email, "c@x.vn");
    }

    #[test]
    fn missing_success_flag_still_counts_as_success() {
        // Login responses from older backend builds omit the flag entirely
        let session = session_from_body(body(
            r#"{"token": "t", "user": {"userId": 1, "fullName": "A", "email": "a@x.vn", "roleId": 1}}"#,
        ))
        .unwrap();
        assert_eq!(session.user.role, Role::Admin);
    }

    #[test]
    fn explicit_refusal_carries_server_message() {
        let err = session_from_body(body(
            r#"{"success": false, "errorCode": "EMAIL_EXISTS", "error": "email exists"}"#,
        ))
        .unwrap_err();

        match err {
            JobportError::AuthRejected { message, .. } => assert_eq!(message, "email exists"),
            other => panic!("expected AuthRejected, got {:?}", other),
        }
    }

    #[test]
    fn refusal_falls_back_to_message_field() {
        let err = session_from_body(body(
            r#"{"success": false, "message": "Mật khẩu không chính xác"}"#,
        ))
        .unwrap_err();
        match err {
            JobportError::AuthRejected { message, .. } => {
                assert_eq!(message, "Mật khẩu không chính xác")
            }
            other => panic!("expected AuthRejected, got {:?}", other),
        }
    }

    #[test]
    fn missing_token_is_malformed_not_rejected() {
        let err = session_from_body(body(
            r#"{"success": true, "user": {"userId": 1, "fullName": "A", "email": "a@x.vn", "roleId": 2}}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, JobportError::MalformedResponse { .. }));
    }

    #[test]
    fn non_object_user_is_malformed() {
        let err =
            session_from_body(body(r#"{"success": true, "token": "t", "user": [1, 2]}"#))
                .unwrap_err();
        assert!(matches!(err, JobportError::MalformedResponse { .. }));
    }

    #[test]
    fn user_missing_identity_fields_is_malformed() {
        let err = session_from_body(body(
            r#"{"success": true, "token": "t", "user": {"userId": 1, "fullName": "", "email": "", "roleId": 2}}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, JobportError::MalformedResponse { .. }));
    }

    #[test]
    fn extra_user_fields_are_tolerated() {
        let session = session_from_body(body(
            r#"{
                "success": true,
                "token": "t",
                "user": {"userId": 9, "fullName": "D", "email": "d@x.vn", "roleId": 2,
                         "phone": "0900000000", "createdAt": "2024-01-01"}
            }"#,
        ))
        .unwrap();
        assert_eq!(session.user.user_id, 9);
    }

    #[test]
    fn register_request_serializes_role_id_number() {
        let request = RegisterRequest {
            full_name: "Pham E".to_string(),
            email: "e@x.vn".to_string(),
            password: "secret".to_string(),
            role: Role::Employer,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["fullName"], "Pham E");
        assert_eq!(value["roleId"], 2);
    }
}
