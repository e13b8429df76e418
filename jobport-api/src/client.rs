//! Portal REST client
//!
//! Bearer-authenticated client for the portal's CRUD endpoints. Requests
//! go out with the session token; responses come back through the typed
//! models so callers never see raw wire JSON.

use crate::models::{
    CandidateApplication, CandidateProfile, CandidateProfileDraft, EmployerApplication,
    EmployerDraft, EmployerProfile, EmployerStats, Interview, JobPage, JobPosting, JobQuery,
    Notification,
};
use crate::status::{ApplicationStatus, InterviewStatus};
use jobport_core::{ApiConfig, ErrorContext, JobportError, JobportResult, Session};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

const COMPONENT: &str = "portal_client";

/// HTTP client for the portal API, carrying an optional bearer token
pub struct PortalClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl PortalClient {
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
            token: None,
        })
    }

    /// Attach the current session's bearer token to subsequent requests
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = Some(session.token.clone());
        self
    }

    /// Replace or drop the bearer token in place
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    // --- Jobs -----------------------------------------------------------

    /// `GET /jobs` with optional search filters
    pub async fn list_jobs(&self, query: &JobQuery) -> JobportResult<JobPage> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(keyword) = &query.keyword {
            params.push(("keyword", keyword.clone()));
        }
        if let Some(location) = &query.location {
            params.push(("diaDiem", location.clone()));
        }
        if let Some(employment_type) = &query.employment_type {
            params.push(("loaiHinh", employment_type.clone()));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = query.size {
            params.push(("size", size.to_string()));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let endpoint = if query_string.is_empty() {
            "jobs".to_string()
        } else {
            format!("jobs?{}", query_string)
        };

        self.get_json(&endpoint).await
    }

    /// `GET /jobs/{id}`
    pub async fn job_detail(&self, job_id: i64) -> JobportResult<JobPosting> {
        self.get_json(&format!("jobs/{}", job_id)).await
    }

    /// `GET /jobs/employer/{ntdId}`
    pub async fn jobs_by_employer(&self, employer_id: i64) -> JobportResult<Vec<JobPosting>> {
        self.get_json(&format!("jobs/employer/{}", employer_id)).await
    }

    /// `POST /jobs` - employer publishes a posting
    pub async fn create_job(&self, draft: &crate::models::JobDraft) -> JobportResult<()> {
        self.send_expect_ok(self.request(reqwest::Method::POST, "jobs").json(draft))
            .await
    }

    /// `PUT /jobs/{tinId}`
    pub async fn update_job(
        &self,
        job_id: i64,
        draft: &crate::models::JobDraft,
    ) -> JobportResult<()> {
        self.send_expect_ok(
            self.request(reqwest::Method::PUT, &format!("jobs/{}", job_id))
                .json(draft),
        )
        .await
    }

    /// `DELETE /jobs/{tinId}`
    pub async fn delete_job(&self, job_id: i64) -> JobportResult<()> {
        self.send_expect_ok(self.request(reqwest::Method::DELETE, &format!("jobs/{}", job_id)))
            .await
    }

    // --- Applications ---------------------------------------------------

    /// `POST /applications` - candidate applies to a posting
    pub async fn submit_application(
        &self,
        candidate_id: i64,
        job_id: i64,
        note: Option<&str>,
    ) -> JobportResult<()> {
        let body = json!({
            "ungVienID": candidate_id,
            "tinID": job_id,
            "ghiChu": note,
        });
        self.send_expect_ok(self.request(reqwest::Method::POST, "applications").json(&body))
            .await
    }

    /// `GET /applications/user/{userId}` - a candidate's history
    pub async fn applications_for_user(
        &self,
        user_id: i64,
    ) -> JobportResult<Vec<CandidateApplication>> {
        self.get_json(&format!("applications/user/{}", user_id)).await
    }

    /// `GET /applications/job/{jobId}` - applicants to one posting
    pub async fn applications_for_job(
        &self,
        job_id: i64,
    ) -> JobportResult<Vec<EmployerApplication>> {
        self.get_json(&format!("applications/job/{}", job_id)).await
    }

    /// `PUT /applications/{ungTuyenID}` - employer moves an application
    /// through the workflow
    pub async fn update_application_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        note: Option<&str>,
    ) -> JobportResult<()> {
        let body = json!({
            "trangThai": String::from(status),
            "ghiChu": note,
        });
        self.send_expect_ok(
            self.request(
                reqwest::Method::PUT,
                &format!("applications/{}", application_id),
            )
            .json(&body),
        )
        .await
    }

    // --- Interviews -----------------------------------------------------

    /// `POST /interviews/send` - employer invites a candidate
    pub async fn send_interview(
        &self,
        application_id: i64,
        scheduled_at: &str,
        location: &str,
        interviewer: &str,
        message: &str,
    ) -> JobportResult<()> {
        let body = json!({
            "ungTuyenID": application_id,
            "ngayHen": scheduled_at,
            "diaDiem": location,
            "nguoiPhongVan": interviewer,
            "noiDungThu": message,
        });
        self.send_expect_ok(self.request(reqwest::Method::POST, "interviews/send").json(&body))
            .await
    }

    /// `GET /interviews/by-employer/{ntdId}`
    pub async fn interviews_by_employer(&self, employer_id: i64) -> JobportResult<Vec<Interview>> {
        self.get_json(&format!("interviews/by-employer/{}", employer_id))
            .await
    }

    /// `PUT /interviews/{lichHenID}` - candidate answers the invitation
    pub async fn update_interview_status(
        &self,
        interview_id: i64,
        status: InterviewStatus,
    ) -> JobportResult<()> {
        let body = json!({ "trangThai": String::from(status) });
        self.send_expect_ok(
            self.request(reqwest::Method::PUT, &format!("interviews/{}", interview_id))
                .json(&body),
        )
        .await
    }

    // --- Notifications --------------------------------------------------

    /// `GET /notifications/user/{userId}`
    pub async fn notifications_for_user(&self, user_id: i64) -> JobportResult<Vec<Notification>> {
        self.get_json(&format!("notifications/user/{}", user_id)).await
    }

    /// `PUT /notifications/{notiId}/read`
    pub async fn mark_notification_read(&self, notification_id: i64) -> JobportResult<()> {
        self.send_expect_ok(self.request(
            reqwest::Method::PUT,
            &format!("notifications/{}/read", notification_id),
        ))
        .await
    }

    // --- Employers and profiles -----------------------------------------

    /// `GET /employers` - full employer list (admin view)
    pub async fn list_employers(&self) -> JobportResult<Vec<EmployerProfile>> {
        self.get_json("employers").await
    }

    /// `GET /employers/detail/{ntdId}`
    pub async fn employer_detail(&self, employer_id: i64) -> JobportResult<EmployerProfile> {
        self.get_json(&format!("employers/detail/{}", employer_id)).await
    }

    /// `GET /employers/{userId}` - resolve the employer record owned by a
    /// user account
    pub async fn employer_by_user(&self, user_id: i64) -> JobportResult<EmployerProfile> {
        self.get_json(&format!("employers/{}", user_id)).await
    }

    /// `POST /employers` - admin adds an employer record
    pub async fn create_employer(&self, draft: &EmployerDraft) -> JobportResult<()> {
        self.send_expect_ok(self.request(reqwest::Method::POST, "employers").json(draft))
            .await
    }

    /// `PUT /employers/{ntdId}` - admin edit, or the employer's own
    /// company page
    pub async fn update_employer(
        &self,
        employer_id: i64,
        draft: &EmployerDraft,
    ) -> JobportResult<()> {
        self.send_expect_ok(
            self.request(reqwest::Method::PUT, &format!("employers/{}", employer_id))
                .json(draft),
        )
        .await
    }

    /// `DELETE /employers/{ntdId}`
    pub async fn delete_employer(&self, employer_id: i64) -> JobportResult<()> {
        self.send_expect_ok(
            self.request(reqwest::Method::DELETE, &format!("employers/{}", employer_id)),
        )
        .await
    }

    /// `GET /profile/user/{userId}` - a candidate's own profile
    pub async fn profile_for_user(&self, user_id: i64) -> JobportResult<CandidateProfile> {
        self.get_json(&format!("profile/user/{}", user_id)).await
    }

    /// `POST /profile` - first save of a candidate profile
    pub async fn create_profile(&self, draft: &CandidateProfileDraft) -> JobportResult<()> {
        self.send_expect_ok(self.request(reqwest::Method::POST, "profile").json(draft))
            .await
    }

    /// `PUT /profile/{ungVienId}`
    pub async fn update_profile(
        &self,
        profile_id: i64,
        draft: &CandidateProfileDraft,
    ) -> JobportResult<()> {
        self.send_expect_ok(
            self.request(reqwest::Method::PUT, &format!("profile/{}", profile_id))
                .json(draft),
        )
        .await
    }

    // --- Statistics -----------------------------------------------------

    /// `GET /statistics/employer/{ntdId}` - dashboard aggregates for an
    /// employer
    pub async fn employer_statistics(&self, employer_id: i64) -> JobportResult<EmployerStats> {
        self.get_json(&format!("statistics/employer/{}", employer_id))
            .await
    }

    // --- Plumbing -------------------------------------------------------

    fn request(&self, method: reqwest::Method, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        debug!(%method, url, "Portal API request");

        let mut builder = self.client.request(method, &url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> JobportResult<T> {
        let response = self
            .request(reqwest::Method::GET, endpoint)
            .send()
            .await
            .map_err(|e| {
                JobportError::transport_with_source(
                    format!("Request to {} failed: {}", endpoint, e),
                    Box::new(e),
                    COMPONENT,
                )
            })?;

        let response = Self::check_status(response, endpoint).await?;

        response.json::<T>().await.map_err(|e| {
            JobportError::malformed(
                format!("Response from {} failed validation: {}", endpoint, e),
                COMPONENT,
            )
        })
    }

    async fn send_expect_ok(&self, builder: reqwest::RequestBuilder) -> JobportResult<()> {
        let response = builder.send().await.map_err(|e| {
            JobportError::transport_with_source(
                format!("Portal request failed: {}", e),
                Box::new(e),
                COMPONENT,
            )
        })?;

        Self::check_status(response, "portal").await.map(|_| ())
    }

    /// Map a non-2xx response to the error taxonomy, preferring the
    /// backend's structured `{error}` body when one is present
    async fn check_status(
        response: reqwest::Response,
        endpoint: &str,
    ) -> JobportResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .or_else(|| value.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        Err(JobportError::Api {
            message: format!("{} ({})", message, endpoint),
            status: Some(status.as_u16()),
            context: ErrorContext::new(COMPONENT)
                .with_operation(endpoint)
                .with_suggestion(match status.as_u16() {
                    401 => "Log in again to refresh the session token",
                    403 => "The current role is not allowed to do this",
                    404 => "Check the identifier",
                    _ => "Check the portal API status",
                }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobport_core::{Role, UserAccount};

    fn config() -> ApiConfig {
        ApiConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            timeout_seconds: 5,
            user_agent: "jobport-test".to_string(),
        }
    }

    #[test]
    fn base_url_is_normalized() {
        let client = PortalClient::new(&config()).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn with_session_attaches_token() {
        let user = UserAccount {
            user_id: 1,
            full_name: "A".to_string(),
            email: "a@x.vn".to_string(),
            role: Role::Candidate,
        };
        let session = Session::new(user, "jwt-1".to_string()).unwrap();
        let client = PortalClient::new(&config()).unwrap().with_session(&session);
        assert_eq!(client.token.as_deref(), Some("jwt-1"));
    }
}
