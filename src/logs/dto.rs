use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::dto::PublicUser;
use crate::db::UsageLogEntry;

#[derive(Debug, Deserialize)]
pub struct LogUsageRequest {
    #[serde(default)]
    pub plant_name: String,
    #[serde(default)]
    pub pesticide: String,
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct LogItem {
    pub id: Uuid,
    pub plant_name: String,
    pub pesticide: String,
    pub amount: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub notes: String,
}

impl From<UsageLogEntry> for LogItem {
    fn from(e: UsageLogEntry) -> Self {
        Self {
            id: e.id,
            plant_name: e.plant_name,
            pesticide: e.pesticide,
            amount: e.amount,
            date: e.date,
            notes: e.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoggedUsageResponse {
    pub message: String,
    pub entry: LogItem,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user: PublicUser,
    pub total_applications: usize,
    pub plants_monitored: usize,
    pub monthly_applications: usize,
    pub recent_logs: Vec<LogItem>,
}
