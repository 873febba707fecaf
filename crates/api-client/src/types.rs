//! Wire types for the skincare REST API. Field names are `snake_case` as
//! the server sends them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skincare_core::notifications::NotificationFrequency;
use skincare_core::routines::RoutineType;
use skincare_core::Patch;

pub use skincare_core::errors::{FieldProblem, ProblemDetails};

// ─────────────────────────────────────────────────────────────────────────────
// Envelopes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u32,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageWindow {
    pub limit: u32,
    pub offset: u32,
}

/// Paginated list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
    pub pagination: PageWindow,
}

/// Unpaginated list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

/// Form body of `POST auth/token`. The server calls the email `username`.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

#[derive(Serialize)]
pub struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Products
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductCreateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductUpdateRequest {
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub brand: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub purpose: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub description: Patch<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Routines
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub routine_type: RoutineType,
    #[serde(default)]
    pub notes: Option<String>,
    pub performed_at: DateTime<Utc>,
    #[serde(default)]
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Serialize)]
pub struct RoutineCreateRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub routine_type: Option<RoutineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub performed_at: DateTime<Utc>,
    pub product_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RoutineUpdateRequest {
    #[serde(rename = "type", skip_serializing_if = "Patch::is_unchanged")]
    pub routine_type: Patch<RoutineType>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub notes: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub performed_at: Patch<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub product_ids: Patch<Vec<String>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Notification rules
// ─────────────────────────────────────────────────────────────────────────────

/// Flat rule record. `time_of_day` is an ISO offset time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRuleResponse {
    pub id: String,
    pub time_of_day: String,
    pub enabled: bool,
    pub frequency: NotificationFrequency,
    #[serde(default)]
    pub every_n: Option<i64>,
    #[serde(default)]
    pub weekdays: Option<Vec<i32>>,
}

#[derive(Debug, Serialize)]
pub struct NotificationRuleCreateRequest {
    pub time_of_day: String,
    pub frequency: NotificationFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub every_n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<i32>>,
}

#[derive(Debug, Serialize)]
pub struct NotificationRuleUpdateRequest {
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub time_of_day: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub frequency: Patch<NotificationFrequency>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub every_n: Patch<u32>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub weekdays: Patch<Vec<i32>>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub enabled: Patch<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Users & devices
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub username: String,
}

#[derive(Serialize)]
pub struct UserRegisterRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub email: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub surname: Patch<String>,
}

#[derive(Debug, Serialize)]
pub struct DeviceTokenRequest<'a> {
    pub meta: &'a str,
    pub fcm_token: &'a str,
}
