use crate::{
    api::{attendance, employee},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;
use sqlx::SqlitePool;

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "HRMS Lite API is running",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[get("/health")]
pub async fn health(pool: web::Data<SqlitePool>) -> impl Responder {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool.get_ref())
        .await
    {
        Ok(_) => "connected",
        Err(_) => "unreachable",
    };
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "database": database,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = 60_000 / requests_per_min as u64;
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms.max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(index).service(health);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_api_per_min))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::mark_attendance))
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    // /attendance/bulk-delete
                    .service(
                        web::resource("/bulk-delete")
                            .route(web::post().to(attendance::bulk_delete_attendance)),
                    )
                    // /attendance/employee/{id}
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(attendance::employee_attendance)),
                    )
                    // /attendance/{id}/{date}
                    .service(
                        web::resource("/{employee_id}/{date}")
                            .route(web::put().to(attendance::update_attendance))
                            .route(web::delete().to(attendance::delete_attendance)),
                    ),
            ),
    );
}
