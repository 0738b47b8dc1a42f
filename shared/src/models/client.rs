//! Client Model

use serde::{Deserialize, Serialize};

/// Client entity (invited recipient).
///
/// `selected_gift_id` and `selected_at` are null together and written
/// together, exactly once; the selection never reverts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub id: String,
    /// Bearer credential for self-service access. Never logged.
    pub token: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub email: String,
    pub selected_gift_id: Option<String>,
    pub selected_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCreate {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub email: String,
}

/// Update client payload (partial; absent fields keep their value)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
}

impl ClientUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.company_name.is_none()
            && self.email.is_none()
    }
}

/// Client with the title of its selected gift (for admin list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ClientWithGift {
    pub id: String,
    pub token: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub email: String,
    pub selected_gift_id: Option<String>,
    pub selected_gift_title: Option<String>,
    pub selected_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Admin list/detail projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminClient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub email: String,
    pub token: String,
    pub has_selected_gift: bool,
    pub selected_gift_id: Option<String>,
    pub selected_gift_title: Option<String>,
    pub selected_at: Option<i64>,
    pub created_at: i64,
}

impl From<ClientWithGift> for AdminClient {
    fn from(c: ClientWithGift) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            company_name: c.company_name,
            email: c.email,
            token: c.token,
            has_selected_gift: c.selected_gift_id.is_some(),
            selected_gift_id: c.selected_gift_id,
            selected_gift_title: c.selected_gift_title,
            selected_at: c.selected_at,
            created_at: c.created_at,
        }
    }
}

/// Public projection returned to the invite page: identity and selection
/// state only, never the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub email: String,
    pub has_selected_gift: bool,
    pub selected_gift_id: Option<String>,
}

impl From<Client> for ClientProfile {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            company_name: c.company_name,
            email: c.email,
            has_selected_gift: c.selected_gift_id.is_some(),
            selected_gift_id: c.selected_gift_id,
        }
    }
}

/// Response for `GET /api/client-and-gifts`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAndGifts {
    pub client: ClientProfile,
    pub gifts: Vec<super::Gift>,
}

/// Response for a successful `POST /api/select-gift`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionConfirmed {
    pub success: bool,
    pub selected_gift_id: String,
    pub selected_at: i64,
}

/// Response for `POST /api/admin/clients`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCreated {
    pub client: AdminClient,
    pub invite_url: String,
}
