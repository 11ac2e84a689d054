use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    AssignTaskRequest, NewDonation, NewResource, NewShelter, NewTask, NewVolunteer, ResourceUpdate,
    ShelterUpdate, TaskAction, VolunteerUpdate,
};
use crate::routes::{registry_error, validation_error, AppState};

/// Configure roster and inventory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/shelters", web::get().to(list_shelters))
        .route("/shelters", web::post().to(add_shelter))
        .route("/shelters/{id}", web::get().to(get_shelter))
        .route("/shelters/{id}", web::patch().to(update_shelter))
        .route("/shelters/{id}/resources", web::get().to(shelter_resources))
        .route("/shelters/{id}/tasks", web::get().to(shelter_tasks))
        .route("/volunteers", web::get().to(list_volunteers))
        .route("/volunteers", web::post().to(add_volunteer))
        .route("/volunteers/{id}", web::patch().to(update_volunteer))
        .route("/volunteers/{id}/tasks", web::get().to(volunteer_tasks))
        .route("/tasks", web::get().to(list_tasks))
        .route("/tasks", web::post().to(add_task))
        .route("/tasks/{id}", web::get().to(get_task))
        .route("/tasks/{id}/assign", web::post().to(assign_task))
        .route("/tasks/{id}/{action}", web::post().to(transition_task))
        .route("/resources", web::post().to(add_resource))
        .route("/resources/{id}", web::patch().to(update_resource))
        .route("/donations", web::get().to(list_donations))
        .route("/donations", web::post().to(add_donation));
}

async fn list_shelters(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.registry.shelters())
}

async fn get_shelter(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.registry.shelter(&path) {
        Ok(shelter) => HttpResponse::Ok().json(shelter),
        Err(e) => registry_error(e),
    }
}

async fn add_shelter(state: web::Data<AppState>, req: web::Json<NewShelter>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    match state.registry.add_shelter(req.into_inner()) {
        Ok(shelter) => HttpResponse::Created().json(shelter),
        Err(e) => registry_error(e),
    }
}

/// Coordinator edit of capacity, occupancy, contacts or location
async fn update_shelter(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ShelterUpdate>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    match state.registry.update_shelter(&path, req.into_inner()) {
        Ok(shelter) => HttpResponse::Ok().json(shelter),
        Err(e) => registry_error(e),
    }
}

async fn shelter_resources(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().json(state.registry.resources_by_shelter(&path))
}

async fn shelter_tasks(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().json(state.registry.tasks_by_shelter(&path))
}

async fn list_volunteers(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.registry.volunteers())
}

/// Save a volunteer profile
///
/// POST /api/v1/volunteers
///
/// A user has at most one profile: posting again for the same `userId`
/// updates the existing one instead of creating a second.
async fn add_volunteer(state: web::Data<AppState>, req: web::Json<NewVolunteer>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    match state.registry.save_volunteer_profile(req.into_inner()) {
        Ok((volunteer, true)) => HttpResponse::Created().json(volunteer),
        Ok((volunteer, false)) => HttpResponse::Ok().json(volunteer),
        Err(e) => registry_error(e),
    }
}

async fn update_volunteer(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<VolunteerUpdate>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    match state.registry.update_volunteer(&path, req.into_inner()) {
        Ok(volunteer) => HttpResponse::Ok().json(volunteer),
        Err(e) => registry_error(e),
    }
}

async fn volunteer_tasks(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    if let Err(e) = state.registry.volunteer(&path) {
        return registry_error(e);
    }
    HttpResponse::Ok().json(state.registry.tasks_by_volunteer(&path))
}

async fn list_tasks(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.registry.tasks())
}

async fn get_task(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.registry.task(&path) {
        Ok(task) => HttpResponse::Ok().json(task),
        Err(e) => registry_error(e),
    }
}

async fn add_task(state: web::Data<AppState>, req: web::Json<NewTask>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    match state.registry.add_task(req.into_inner()) {
        Ok(task) => HttpResponse::Created().json(task),
        Err(e) => registry_error(e),
    }
}

/// Manual assignment by a coordinator
///
/// POST /api/v1/tasks/{id}/assign
async fn assign_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AssignTaskRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    match state.registry.assign_task(&path, &req.volunteer_id) {
        Ok(task) => HttpResponse::Ok().json(task),
        Err(e) => registry_error(e),
    }
}

/// Volunteer response to a task
///
/// POST /api/v1/tasks/{id}/{accept|decline|complete}
async fn transition_task(
    state: web::Data<AppState>,
    path: web::Path<(String, TaskAction)>,
) -> impl Responder {
    let (task_id, action) = path.into_inner();
    match state.registry.transition_task(&task_id, action) {
        Ok(task) => HttpResponse::Ok().json(task),
        Err(e) => registry_error(e),
    }
}

async fn add_resource(state: web::Data<AppState>, req: web::Json<NewResource>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    match state.registry.add_resource(req.into_inner()) {
        Ok(resource) => HttpResponse::Created().json(resource),
        Err(e) => registry_error(e),
    }
}

async fn update_resource(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ResourceUpdate>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    match state.registry.update_resource(&path, req.into_inner()) {
        Ok(resource) => HttpResponse::Ok().json(resource),
        Err(e) => registry_error(e),
    }
}

async fn list_donations(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.registry.donations())
}

/// Record a donation
///
/// POST /api/v1/donations
///
/// The quantity is added to the shelter's resource of the same type when
/// one exists.
async fn add_donation(state: web::Data<AppState>, req: web::Json<NewDonation>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    match state.registry.add_donation(req.into_inner()) {
        Ok(donation) => HttpResponse::Created().json(donation),
        Err(e) => registry_error(e),
    }
}
