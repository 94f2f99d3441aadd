use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Daily attendance status. Stored and transmitted as the literal
/// strings "Present" / "Absent".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One attendance mark. At most one record exists per (employee_id, date).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "2024-06-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}
