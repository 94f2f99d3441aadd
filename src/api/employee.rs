use crate::{error::ApiError, model::employee::Employee};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "John Doe", value_type = String)]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineering", value_type = String)]
    pub department: String,
}

impl CreateEmployee {
    /// Rejects malformed input before any storage access.
    fn validate(&self) -> Result<(), ApiError> {
        for (field, value) in [
            ("employee_id", &self.employee_id),
            ("full_name", &self.full_name),
            ("department", &self.department),
        ] {
            if value.is_empty() {
                return Err(ApiError::Validation(format!(
                    "Field '{}' must not be empty",
                    field
                )));
            }
        }
        if !is_valid_email(&self.email) {
            return Err(ApiError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation failure or duplicate id/email", body = Object, example = json!({
            "message": "Employee with ID 'EMP-001' already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate()?;

    // The id check precedes the email check: whichever fails first
    // determines the reported reason.
    let by_id = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(1) FROM employees WHERE employee_id = ?",
    )
    .bind(&payload.employee_id)
    .fetch_one(pool.get_ref())
    .await?;

    if by_id > 0 {
        return Err(ApiError::Conflict(format!(
            "Employee with ID '{}' already exists",
            payload.employee_id
        )));
    }

    let by_email =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM employees WHERE email = ?")
            .bind(&payload.email)
            .fetch_one(pool.get_ref())
            .await?;

    if by_email > 0 {
        return Err(ApiError::Conflict(format!(
            "Employee with email '{}' already exists",
            payload.email
        )));
    }

    sqlx::query(
        r#"
        INSERT INTO employees (employee_id, full_name, email, department)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&payload.employee_id)
    .bind(&payload.full_name)
    .bind(&payload.email)
    .bind(&payload.department)
    .execute(pool.get_ref())
    .await?;

    info!(employee_id = %payload.employee_id, "Employee created");

    // The created record echoes the input exactly; there are no
    // server-generated fields.
    let employee = Employee {
        employee_id: payload.employee_id,
        full_name: payload.full_name,
        email: payload.email,
        department: payload.department,
    };
    Ok(HttpResponse::Created().json(employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, sorted by full name", body = [Employee]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT employee_id, full_name, email, department
        FROM employees
        ORDER BY full_name ASC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    debug!(count = employees.len(), "Fetched employee list");
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP-001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT employee_id, full_name, email, department
        FROM employees
        WHERE employee_id = ?
        "#,
    )
    .bind(&employee_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| {
        ApiError::NotFound(format!("Employee with ID '{}' not found", employee_id))
    })?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee
///
/// Removes the employee row first, then every attendance mark that
/// references it. The two statements are not wrapped in a transaction;
/// a crash between them leaves orphaned marks (accepted weak-consistency
/// window).
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee and attendance records deleted"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP-001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
        .bind(&employee_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!(
            "Employee with ID '{}' not found",
            employee_id
        )));
    }

    let cascaded = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
        .bind(&employee_id)
        .execute(pool.get_ref())
        .await?;

    info!(
        employee_id = %employee_id,
        attendance_removed = cascaded.rows_affected(),
        "Employee deleted"
    );
    Ok(HttpResponse::NoContent().finish())
}
