use actix_files::Files;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::config::{make_rng, WebConfig};
use crate::form::{validate_submission, write_assignments, write_preferences, EmployeeSubmission};
use crate::parser::{populate_store, read_preferences};
use crate::schedule::{generate, Day, EmployeeStore, GeneratedSchedule, Shift};

/// Shared state. Each mutex also serializes access to the store, so only one
/// request can be generating at a time.
pub struct AppState {
    pub store: Mutex<EmployeeStore>,
    pub outcome: Mutex<Option<GeneratedSchedule>>,
    pub admin_password: String,
    pub seed: Option<u64>,
}

impl AppState {
    pub fn new(config: &WebConfig) -> Self {
        Self {
            store: Mutex::new(EmployeeStore::new()),
            outcome: Mutex::new(None),
            admin_password: config.admin_password.clone(),
            seed: config.seed,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Serialize)]
pub struct CellDemand {
    day: Day,
    shift: Shift,
    /// Employees who asked for this shift
    requested: usize,
    /// Employees on it in the current schedule
    assigned: usize,
}

#[derive(Serialize)]
pub struct EmployeeStats {
    name: String,
    days_worked: usize,
    preferred_days: usize,
}

#[derive(Serialize)]
pub struct StatsResponse {
    cells: Vec<CellDemand>,
    employees: Vec<EmployeeStats>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("State lock poisoned"))
}

fn is_admin(req: &HttpRequest, state: &AppState) -> bool {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    password == state.admin_password
}

/// Regenerates the schedule from the current store contents
fn regenerate(state: &AppState) -> Result<GeneratedSchedule> {
    let mut store = lock(&state.store)?;
    let mut rng = make_rng(state.seed);
    let outcome = generate(&mut store, &mut rng)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;
    *lock(&state.outcome)? = Some(outcome.clone());
    Ok(outcome)
}

// Admin login endpoint; the page checks the password here before uploading
async fn admin_login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

// Admin CSV upload endpoint: replaces every employee with the file contents
async fn admin_upload(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_admin(&req, &state) {
        return Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    let records = match read_preferences(body.as_ref()) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "rejected uploaded CSV");
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })));
        }
    };

    {
        let mut fresh = EmployeeStore::new();
        populate_store(&mut fresh, &records)
            .map_err(|e| actix_web::error::ErrorBadRequest(e.to_string()))?;
        *lock(&state.store)? = fresh;
    }
    let outcome = regenerate(&state)?;
    info!(employees = records.len(), shortfalls = outcome.shortfalls.len(), "schedule generated from upload");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Schedule generated successfully",
        "employees": records.len(),
        "shortfalls": outcome.shortfalls,
    })))
}

// Single employee form endpoint
async fn add_employee(
    req: web::Json<EmployeeSubmission>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let record = match validate_submission(&req) {
        Ok(record) => record,
        Err(error) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": error})));
        }
    };

    lock(&state.store)?
        .add(&record.name, record.preference_lists())
        .map_err(|e| actix_web::error::ErrorBadRequest(e.to_string()))?;
    let outcome = regenerate(&state)?;
    info!(employee = %record.name, "employee added");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": format!("Employee {} added successfully!", record.name),
        "shortfalls": outcome.shortfalls,
    })))
}

// Schedule endpoint
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let outcome = lock(&state.outcome)?;
    match outcome.as_ref() {
        Some(outcome) => Ok(HttpResponse::Ok().json(outcome)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Schedule not available"}))),
    }
}

// Stats endpoint
async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock(&state.store)?;
    if store.is_empty() {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No data available"})));
    }

    let mut cells = Vec::new();
    for day in Day::ALL {
        for shift in Shift::ALL {
            let requested = store.iter().filter(|e| e.prefers(day, shift)).count();
            let assigned = store
                .iter()
                .filter(|e| e.assigned_shift(day) == Some(shift))
                .count();
            cells.push(CellDemand { day, shift, requested, assigned });
        }
    }

    let employees = store
        .iter()
        .map(|e| EmployeeStats {
            name: e.name.clone(),
            days_worked: e.days_worked,
            preferred_days: e.preferences.len(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(StatsResponse { cells, employees }))
}

// Eligibility query: who asked for this shift and can still take it
async fn get_eligible(
    path: web::Path<(Day, Shift)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (day, shift) = path.into_inner();
    let store = lock(&state.store)?;
    let names: Vec<&str> = store
        .eligible(day, shift)
        .into_iter()
        .filter_map(|id| store.get(id))
        .map(|e| e.name.as_str())
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({"day": day, "shift": shift, "eligible": names})))
}

async fn export_preferences(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock(&state.store)?;
    let mut buf = Vec::new();
    write_preferences(&store, &mut buf)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;
    Ok(csv_download("preferences.csv", buf))
}

async fn export_assignments(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock(&state.store)?;
    let mut buf = Vec::new();
    write_assignments(&store, &mut buf)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;
    Ok(csv_download("schedule.csv", buf))
}

fn csv_download(filename: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(body)
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers every route; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/login", web::post().to(admin_login))
        .route("/api/upload", web::post().to(admin_upload))
        .route("/api/employees", web::post().to(add_employee))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/stats", web::get().to(get_stats))
        .route("/api/eligible/{day}/{shift}", web::get().to(get_eligible))
        .route("/api/export/preferences", web::get().to(export_preferences))
        .route("/api/export/assignments", web::get().to(export_assignments));
}

pub async fn start_server(config: WebConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(&config));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
