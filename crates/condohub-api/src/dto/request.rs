//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use condohub_auth::{Credentials, Registration};
use condohub_entity::user::UserRole;

/// Letters and spaces only.
fn validate_person_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().all(|c| c.is_alphabetic() || c == ' ') {
        Ok(())
    } else {
        Err(ValidationError::new("name_chars")
            .with_message("Name may contain only letters and spaces".into()))
    }
}

/// Rejects whitespace-only values that still satisfy `length(min = 1)`.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("Value must not be blank".into()))
    } else {
        Ok(())
    }
}

/// POST /api/users/register body.
#[derive(Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(
        length(min = 1, max = 50, message = "Name must be 1 to 50 characters"),
        custom(function = "validate_person_name")
    )]
    pub name: String,
    /// Email.
    #[validate(
        email(message = "Email must be valid"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    /// Password; strength rules are enforced by the session authority.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Apartment number.
    #[validate(
        length(min = 1, max = 20, message = "Apartment is required"),
        custom(function = "validate_not_blank")
    )]
    pub apartment: String,
    /// Building block.
    #[validate(range(min = 1, max = 2, message = "Block must be 1 or 2"))]
    pub block: i16,
    /// Requested role, resident when absent.
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            apartment: req.apartment,
            block: req.block,
            role: req.role,
        }
    }
}

/// POST /api/users/login body.
#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Apartment number.
    #[validate(length(min = 1, message = "Apartment is required"))]
    pub apartment: String,
    /// Building block.
    #[validate(range(min = 1, max = 2, message = "Block must be 1 or 2"))]
    pub block: i16,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(req: LoginRequest) -> Self {
        Credentials {
            apartment: req.apartment,
            block: req.block,
            password: req.password,
        }
    }
}

/// PUT /api/users/profile body. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 50, message = "Name must be 1 to 50 characters"),
        custom(function = "validate_person_name")
    )]
    pub name: Option<String>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, max = 64, message = "Password must be 8 to 64 characters"))]
    pub password: Option<String>,
    /// Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email must be valid"))]
    pub email: Option<String>,
    /// Apartment number.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub apartment: Option<String>,
    /// Building block.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 2, message = "Block must be 1 or 2"))]
    pub block: Option<i16>,
}

/// POST /api/bookings body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Resource being booked.
    #[validate(length(min = 1, message = "resourceId is required"))]
    pub resource_id: String,
    /// Booking owner, when booking on behalf of someone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Start, as sent by the client (ISO 8601).
    #[validate(length(min = 1, message = "startTime is required"))]
    pub start_time: String,
    /// End, as sent by the client (ISO 8601).
    #[validate(length(min = 1, message = "endTime is required"))]
    pub end_time: String,
}

/// Query of GET /api/bookings. Unknown parameters are forwarded as well.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    /// Lower date bound.
    pub start_date: Option<String>,
    /// Upper date bound.
    pub end_date: Option<String>,
    /// Remaining parameters.
    #[serde(flatten)]
    pub extra: std::collections::BTreeMap<String, String>,
}

impl BookingListQuery {
    /// Flattens into ordered query pairs.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self.extra.into_iter().collect();
        if let Some(start) = self.start_date {
            pairs.push(("startDate".to_string(), start));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate".to_string(), end));
        }
        pairs
    }
}

/// Query of GET /api/bookings/availability/{resource_id}.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// Window start.
    pub start_time: String,
    /// Window end.
    pub end_time: String,
}

/// Query of GET /api/bookings/reserved-times.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedTimesQuery {
    /// Kind of resource, e.g. `gym`.
    pub resource_type: String,
    /// Day to inspect.
    pub date: String,
}

/// POST/PUT /api/notices body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NoticeRequest {
    /// Headline.
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,
    /// Body text.
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// POST/PUT /api/resources body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResourceRequest {
    /// Resource name, e.g. `Party room`.
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    /// Resource kind, used by reserved-times lookups.
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub kind: String,
    /// Free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How many people it holds.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub capacity: Option<u32>,
}
