use crate::api::attendance::{AttendanceKey, MarkAttendance, UpdateAttendance};
use crate::api::employee::CreateEmployee;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

Lightweight Human Resource Management System.

### 🔹 Key Features
- **Employee Directory**
  - Create, list, view, and delete employee records
  - Unique employee ID and email enforced on create
  - Deleting an employee cascades to its attendance records
- **Attendance Ledger**
  - One mark per employee per day, upserted on repeat marks
  - Date-filtered listing and per-employee history
  - Update-only edits, single and bulk deletion

### 📦 Response Format
- JSON-based RESTful responses
- Dates in ISO 8601 calendar-date form (`YYYY-MM-DD`)
- Errors as `{"message": "..."}` naming the offending identifier

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance,
        crate::api::attendance::bulk_delete_attendance,
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            AttendanceRecord,
            AttendanceStatus,
            MarkAttendance,
            UpdateAttendance,
            AttendanceKey
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Attendance", description = "Attendance ledger APIs"),
    )
)]
pub struct ApiDoc;
