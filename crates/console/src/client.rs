//! REST client for the RemindCare API.
//!
//! Wraps the `/api/v1` endpoints using [`reqwest`]. Successful responses
//! arrive in a `{ "data": ... }` envelope, except login which returns its
//! body bare. Failures carry `{ "error", "code" }`.

use remindcare_core::dashboard::DashboardStats;
use remindcare_core::patient::{CreatePatient, Patient, PatientSortKey, UpdatePatient};
use remindcare_core::profile::{NotificationSettings, UpdateNotificationSettings, UpdateProfile};
use remindcare_core::query::SortDirection;
use remindcare_core::reminder::Reminder;
use remindcare_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Errors from the API client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connection refused, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message} ({status} {code})")]
    Api {
        status: u16,
        /// Machine-readable code from the error body, e.g. `NOT_FOUND`.
        code: String,
        message: String,
    },
}

impl ClientError {
    /// The server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
}

/// Signed-in staff member as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaffProfile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: StaffProfile,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Query string for `GET /patients`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<PatientSortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

/// Query string for `GET /reminders`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReminderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

/// HTTP client bound to one API server.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// * `api_url` - server root, e.g. `http://localhost:3000`.
    pub fn new(api_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/api/v1", api_url.trim_end_matches('/')),
            token: None,
        }
    }

    /// Bearer token sent with every request; `None` sends no header.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // ---- auth ----

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<LoginResponse>().await?)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/logout")
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- dashboard ----

    pub async fn dashboard(&self) -> Result<DashboardStats, ClientError> {
        self.get("/dashboard").await
    }

    // ---- patients ----

    pub async fn patients(&self, filter: &PatientFilter) -> Result<Vec<Patient>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/patients")
            .query(filter)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn patient(&self, id: DbId) -> Result<Patient, ClientError> {
        self.get(&format!("/patients/{id}")).await
    }

    /// Reminder history for one patient, latest first.
    pub async fn patient_reminders(&self, id: DbId) -> Result<Vec<Reminder>, ClientError> {
        self.get(&format!("/patients/{id}/reminders")).await
    }

    pub async fn create_patient(&self, input: &CreatePatient) -> Result<Patient, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/patients")
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn update_patient(
        &self,
        id: DbId,
        input: &UpdatePatient,
    ) -> Result<Patient, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/patients/{id}"))
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn delete_patient(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/patients/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- reminders ----

    pub async fn reminders(&self, filter: &ReminderFilter) -> Result<Vec<Reminder>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/reminders")
            .query(filter)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn resend_reminder(&self, id: DbId) -> Result<Reminder, ClientError> {
        let response = self
            .request(reqwest::Method::POST, &format!("/reminders/{id}/resend"))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // ---- profile ----

    pub async fn profile(&self) -> Result<StaffProfile, ClientError> {
        self.get("/profile").await
    }

    pub async fn update_profile(&self, input: &UpdateProfile) -> Result<StaffProfile, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, "/profile")
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn notifications(&self) -> Result<NotificationSettings, ClientError> {
        self.get("/profile/notifications").await
    }

    /// Only the settings present in `input` change.
    pub async fn update_notifications(
        &self,
        input: &UpdateNotificationSettings,
    ) -> Result<NotificationSettings, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, "/profile/notifications")
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // ---- private helpers ----

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::parse_data(response).await
    }

    /// Return the response unchanged on success, or an [`ClientError::Api`]
    /// built from the `{error, code}` body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.code, body.error),
            Err(_) => ("UNKNOWN".to_string(), text),
        };

        tracing::debug!(status = status.as_u16(), %code, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    /// Unwrap the `data` envelope of a successful response.
    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<DataEnvelope<T>>().await?.data)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_api_prefix() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000/api/v1");
        assert!(!client.has_token());
    }

    #[test]
    fn only_401_counts_as_unauthorized() {
        let api = |status| ClientError::Api {
            status,
            code: "X".into(),
            message: "x".into(),
        };
        assert!(api(401).is_unauthorized());
        assert!(!api(403).is_unauthorized());
    }

    #[test]
    fn envelope_unwraps_data() {
        let body = r#"{"data":{"id":1,"name":"Dr. Jane Smith","email":"doctor@example.com","role":"doctor"}}"#;
        let parsed: DataEnvelope<StaffProfile> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.name, "Dr. Jane Smith");
    }

    #[test]
    fn empty_filter_serializes_to_nothing() {
        let json = serde_json::to_value(PatientFilter::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));

        let json = serde_json::to_value(PatientFilter {
            sort: Some(PatientSortKey::NextFollowup),
            direction: Some(SortDirection::Desc),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sort": "next_followup", "direction": "desc"})
        );
    }
}
