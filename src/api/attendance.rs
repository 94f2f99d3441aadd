use crate::{
    error::ApiError,
    model::attendance::{AttendanceRecord, AttendanceStatus},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "2024-06-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateAttendance {
    #[schema(example = "Absent")]
    pub status: AttendanceStatus,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct AttendanceKey {
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "2024-06-01", format = "date", value_type = String)]
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub date_filter: Option<NaiveDate>,
}

async fn employee_exists(pool: &SqlitePool, employee_id: &str) -> Result<bool, ApiError> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

fn employee_not_found(employee_id: &str) -> ApiError {
    ApiError::NotFound(format!("Employee with ID '{}' not found", employee_id))
}

fn mark_not_found(employee_id: &str, date: NaiveDate) -> ApiError {
    ApiError::NotFound(format!(
        "No attendance record found for employee '{}' on {}",
        employee_id, date
    ))
}

/// Mark Attendance
///
/// Upserts on the (employee_id, date) natural key: a second mark for the
/// same day overwrites the status instead of inserting a duplicate.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP-001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();

    if payload.employee_id.is_empty() {
        return Err(ApiError::Validation(
            "Field 'employee_id' must not be empty".to_string(),
        ));
    }

    if !employee_exists(pool.get_ref(), &payload.employee_id).await? {
        return Err(employee_not_found(&payload.employee_id));
    }

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(1) FROM attendance WHERE employee_id = ? AND date = ?",
    )
    .bind(&payload.employee_id)
    .bind(payload.date)
    .fetch_one(pool.get_ref())
    .await?;

    if existing > 0 {
        sqlx::query("UPDATE attendance SET status = ? WHERE employee_id = ? AND date = ?")
            .bind(payload.status)
            .bind(&payload.employee_id)
            .bind(payload.date)
            .execute(pool.get_ref())
            .await?;
        debug!(
            employee_id = %payload.employee_id,
            date = %payload.date,
            status = %payload.status,
            "Attendance mark overwritten"
        );
    } else {
        sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (?, ?, ?)")
            .bind(&payload.employee_id)
            .bind(payload.date)
            .bind(payload.status)
            .execute(pool.get_ref())
            .await?;
        info!(
            employee_id = %payload.employee_id,
            date = %payload.date,
            status = %payload.status,
            "Attendance marked"
        );
    }

    Ok(HttpResponse::Created().json(AttendanceRecord {
        employee_id: payload.employee_id,
        date: payload.date,
        status: payload.status,
    }))
}

/// List Attendance
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(
        ("date_filter", Query, description = "Restrict to an exact date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "All attendance records, newest date first", body = [AttendanceRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = match query.date_filter {
        Some(date) => {
            sqlx::query_as::<_, AttendanceRecord>(
                r#"
                SELECT employee_id, date, status
                FROM attendance
                WHERE date = ?
                ORDER BY date DESC
                "#,
            )
            .bind(date)
            .fetch_all(pool.get_ref())
            .await?
        }
        None => {
            sqlx::query_as::<_, AttendanceRecord>(
                r#"
                SELECT employee_id, date, status
                FROM attendance
                ORDER BY date DESC
                "#,
            )
            .fetch_all(pool.get_ref())
            .await?
        }
    };

    debug!(count = records.len(), filter = ?query.date_filter, "Fetched attendance list");
    Ok(HttpResponse::Ok().json(records))
}

/// Get Employee Attendance
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Records for the employee, newest date first", body = [AttendanceRecord]),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP-001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    if !employee_exists(pool.get_ref(), &employee_id).await? {
        return Err(employee_not_found(&employee_id));
    }

    let records = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT employee_id, date, status
        FROM attendance
        WHERE employee_id = ?
        ORDER BY date DESC
        "#,
    )
    .bind(&employee_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Update Attendance
///
/// Update-only: unlike marking, this never creates a record for an
/// unmarked (employee_id, date).
#[utoipa::path(
    put,
    path = "/api/attendance/{employee_id}/{date}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        ("date", Path, description = "Attendance date (YYYY-MM-DD)")
    ),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Attendance updated", body = AttendanceRecord),
        (status = 404, description = "Employee or attendance record not found", body = Object, example = json!({
            "message": "No attendance record found for employee 'EMP-001' on 2024-06-01"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, NaiveDate)>,
    payload: web::Json<UpdateAttendance>,
) -> Result<HttpResponse, ApiError> {
    let (employee_id, date) = path.into_inner();
    let status = payload.status;

    if !employee_exists(pool.get_ref(), &employee_id).await? {
        return Err(employee_not_found(&employee_id));
    }

    let result = sqlx::query("UPDATE attendance SET status = ? WHERE employee_id = ? AND date = ?")
        .bind(status)
        .bind(&employee_id)
        .bind(date)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(mark_not_found(&employee_id, date));
    }

    info!(employee_id = %employee_id, date = %date, status = %status, "Attendance updated");
    Ok(HttpResponse::Ok().json(AttendanceRecord {
        employee_id,
        date,
        status,
    }))
}

/// Delete Attendance
#[utoipa::path(
    delete,
    path = "/api/attendance/{employee_id}/{date}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        ("date", Path, description = "Attendance date (YYYY-MM-DD)")
    ),
    responses(
        (status = 204, description = "Attendance record deleted"),
        (status = 404, description = "No matching attendance record", body = Object, example = json!({
            "message": "No attendance record found for employee 'EMP-001' on 2024-06-01"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, NaiveDate)>,
) -> Result<HttpResponse, ApiError> {
    let (employee_id, date) = path.into_inner();

    let result = sqlx::query("DELETE FROM attendance WHERE employee_id = ? AND date = ?")
        .bind(&employee_id)
        .bind(date)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(mark_not_found(&employee_id, date));
    }

    info!(employee_id = %employee_id, date = %date, "Attendance deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// Bulk Delete Attendance
///
/// Each pair is deleted independently; pairs with no matching record are
/// silently skipped, unlike the single delete. Partial-failure-tolerant
/// by contract.
#[utoipa::path(
    post,
    path = "/api/attendance/bulk-delete",
    request_body = [AttendanceKey],
    responses(
        (status = 204, description = "Matching records deleted, missing pairs skipped"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn bulk_delete_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<Vec<AttendanceKey>>,
) -> Result<HttpResponse, ApiError> {
    let keys = payload.into_inner();
    let mut removed = 0u64;

    for key in &keys {
        let result = sqlx::query("DELETE FROM attendance WHERE employee_id = ? AND date = ?")
            .bind(&key.employee_id)
            .bind(key.date)
            .execute(pool.get_ref())
            .await?;
        removed += result.rows_affected();
    }

    info!(requested = keys.len(), removed, "Bulk attendance delete");
    Ok(HttpResponse::NoContent().finish())
}
