use serde::Deserialize;

use crate::domain::entities::customer::default_active;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub trade: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub hourly_rate_cents: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}
