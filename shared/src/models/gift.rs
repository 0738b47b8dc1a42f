//! Gift Model

use serde::{Deserialize, Serialize};

/// Gift catalog entry.
///
/// Retired entries are deactivated, never deleted, so historical selections
/// keep a valid target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Gift {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub strapline: String,
    pub description: String,
    pub led_by_name: String,
    pub led_by_role: String,
    /// Free-text duration label ("90 minutes", "2 hours")
    pub duration: Option<String>,
    pub format: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create gift payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCreate {
    pub slug: String,
    pub title: String,
    pub strapline: String,
    pub description: String,
    pub led_by_name: String,
    pub led_by_role: String,
    pub duration: Option<String>,
    pub format: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

/// Update gift payload (all fields optional; absent fields keep their value)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftUpdate {
    pub title: Option<String>,
    pub strapline: Option<String>,
    pub description: Option<String>,
    pub led_by_name: Option<String>,
    pub led_by_role: Option<String>,
    pub duration: Option<String>,
    pub format: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

impl GiftUpdate {
    /// True when the payload carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.strapline.is_none()
            && self.description.is_none()
            && self.led_by_name.is_none()
            && self.led_by_role.is_none()
            && self.duration.is_none()
            && self.format.is_none()
            && self.sort_order.is_none()
            && self.is_active.is_none()
    }
}
