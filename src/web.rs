use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};

use crate::config::UnitConfig;
use crate::form::validate_snapshot;
use crate::parser::{normalize_beds, read_bed_sheet};
use crate::staffing::{recompute, StaffingSnapshot};

// Read-only settings shared by every worker; the calculator itself is stateless
pub struct AppState {
    pub config: UnitConfig,
}

fn bad_request(error: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": error.to_string()
    }))
}

fn recompute_response(snapshot: StaffingSnapshot, config: &UnitConfig) -> HttpResponse {
    match recompute(&snapshot, config) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            tracing::warn!(error = %e, "rejected snapshot");
            bad_request(e)
        }
    }
}

// Full recomputation from a JSON snapshot; beds left out of the list are empty
async fn recompute_snapshot(
    req: web::Json<StaffingSnapshot>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut snapshot = req.into_inner();

    if let Err(e) = validate_snapshot(&snapshot) {
        return Ok(bad_request(e));
    }
    snapshot.beds = match normalize_beds(snapshot.beds, state.config.bed_count) {
        Ok(beds) => beds,
        Err(e) => return Ok(bad_request(e)),
    };

    Ok(recompute_response(snapshot, &state.config))
}

// Bed sheet upload (CSV body), calculated with default role settings
async fn upload_bed_sheet(body: web::Bytes, state: web::Data<AppState>) -> Result<HttpResponse> {
    match read_bed_sheet(body.as_ref(), state.config.bed_count) {
        Ok(beds) => Ok(recompute_response(StaffingSnapshot::with_beds(beds), &state.config)),
        Err(e) => Ok(bad_request(format!("Failed to process CSV: {}", e))),
    }
}

async fn get_config(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&state.config))
}

/// Registers the API routes; shared by the server and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/recompute", web::post().to(recompute_snapshot))
        .route("/api/upload", web::post().to(upload_bed_sheet))
        .route("/api/config", web::get().to(get_config));
}

pub async fn start_server(port: u16, config: UnitConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState { config });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
