use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub customer_since: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
}

pub(crate) fn default_active() -> bool {
    true
}
