//! User profile as returned by the API

use serde::{Deserialize, Serialize};

/// Profile of an account holder.
///
/// Mirrors the wire schema field for field so a decode/encode cycle loses
/// nothing: optional fields stay optional and the five boolean flags are
/// required. Field names follow the wire schema.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinfl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_inn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_vat_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_address: Option<String>,
    pub has_second_unit_of_measure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type_id: Option<i64>,
    pub is_simple_user: bool,
    pub is_org_admin: bool,
    pub is_super_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_currency_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_org_areas_of_activities: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_firebase_device_tokens: Option<Vec<DeviceToken>>,
}

/// Push notification registration attached to a profile.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceToken {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
}

impl UserProfile {
    /// Name to show in the UI: full name, then short name, then user name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.short_name.as_deref())
            .or(self.user_name.as_deref())
            .unwrap_or("User")
    }

    /// Two-letter monogram.
    ///
    /// Uses the first letters of first and last name when both exist,
    /// otherwise the first two characters of [`Self::display_name`].
    #[must_use]
    pub fn initials(&self) -> String {
        let first = self.first_name.as_deref().and_then(|n| n.chars().next());
        let last = self.last_name.as_deref().and_then(|n| n.chars().next());
        match (first, last) {
            (Some(f), Some(l)) => [f, l].iter().collect::<String>().to_uppercase(),
            _ => self
                .display_name()
                .chars()
                .take(2)
                .collect::<String>()
                .to_uppercase(),
        }
    }
}
