use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{HealthResponse, NearestShelterQuery, NearestShelterResponse, NewVictim};
use crate::routes::{registry_error, validation_error, AppState};

/// Configure allocation routes: shelter matching and task auto-assignment
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/shelters/nearest", web::get().to(nearest_shelter))
        .route("/victims", web::post().to(register_victim))
        .route("/victims", web::get().to(list_victims))
        .route("/tasks/{id}/auto-assign", web::post().to(auto_assign_task));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Nearest shelter preview
///
/// GET /api/v1/shelters/nearest?latitude={lat}&longitude={lon}
///
/// Does not change occupancy. Returns `{"found": false}` when every shelter
/// is full.
async fn nearest_shelter(
    state: web::Data<AppState>,
    query: web::Query<NearestShelterQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    match state.registry.nearest_available_shelter(&query.coordinate()) {
        Ok(decision) => HttpResponse::Ok().json(NearestShelterResponse::from(decision)),
        Err(e) => registry_error(e),
    }
}

/// Register a victim and place them in the nearest shelter with room
///
/// POST /api/v1/victims
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "name": "string",
///   "age": 34,
///   "gender": "male|female|other",
///   "medicalCondition": "string",
///   "location": { "latitude": 19.07, "longitude": 72.87 }
/// }
/// ```
///
/// A registration with no shelter available still succeeds; the victim is
/// stored without `assignedShelterId` and `shelter` is null.
async fn register_victim(
    state: web::Data<AppState>,
    req: web::Json<NewVictim>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.registry.register_victim(req.into_inner()) {
        Ok(registration) => HttpResponse::Created().json(registration),
        Err(e) => registry_error(e),
    }
}

async fn list_victims(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.registry.victims())
}

/// Run skill-based assignment for a task
///
/// POST /api/v1/tasks/{id}/auto-assign
///
/// Responds with the decision; `no_eligible_volunteer` leaves the task in
/// `created` status.
async fn auto_assign_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let task_id = path.into_inner();

    match state.registry.auto_assign_task(&task_id) {
        Ok(decision) => HttpResponse::Ok().json(decision),
        Err(e) => registry_error(e),
    }
}
