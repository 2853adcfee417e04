//! Access token returned by `cwctl sectoken get`.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Refresh this long before the reported expiry.
pub const EXPIRY_BUFFER_SECS: i64 = 300;
/// A token this young is never refetched.
pub const RECENT_SECS: i64 = 300;

/// A bearer token plus the local time it was received.
///
/// Expiry is measured from `created_at` and the reported lifetime, never
/// from a server clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: Option<i64>,
    ) -> Self {
        Self::created_at(access_token, token_type, expires_in, Utc::now())
    }

    pub fn created_at(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            expires_in,
            created_at,
        }
    }

    /// When the token stops being valid. `None` when no lifetime was
    /// reported or the lifetime runs past the representable range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let lifetime = TimeDelta::try_seconds(self.expires_in?)?;
        self.created_at.checked_add_signed(lifetime)
    }

    pub fn about_to_expire(&self) -> bool {
        self.about_to_expire_at(Utc::now())
    }

    pub fn about_to_expire_at(&self, now: DateTime<Utc>) -> bool {
        let Some(expires_at) = self.expires_at() else {
            return false;
        };
        match expires_at.checked_sub_signed(TimeDelta::seconds(EXPIRY_BUFFER_SECS)) {
            Some(refresh_at) => now >= refresh_at,
            None => true,
        }
    }

    pub fn recently_created(&self) -> bool {
        self.recently_created_at(Utc::now())
    }

    pub fn recently_created_at(&self, now: DateTime<Utc>) -> bool {
        self.created_at
            .checked_add_signed(TimeDelta::seconds(RECENT_SECS))
            .map_or(true, |window_end| now < window_end)
    }

    /// `Authorization` header value, e.g. `Bearer abc`.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}
