use crate::handler::relationship::*;
use crate::handler::web_response::error_body;
use actix_web::{error, web, HttpResponse};
use log::info;

/// Body parse failures become `400 {"error": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        info!("Rejected request body: {}", err);
        let resp = HttpResponse::BadRequest().json(error_body(&err.to_string()));
        error::InternalError::from_response(err, resp).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/mentors", web::post().to(mentor_create))
        .route("/students", web::post().to(student_create))
        .route(
            "/assign-student/{mentor_id}/{student_id}",
            web::put().to(assign_student),
        )
        .route("/unassigned-students", web::get().to(unassigned_students))
        .route(
            "/assign-mentor/{student_id}/{mentor_id}",
            web::put().to(assign_mentor),
        )
        .route("/mentor-students/{mentor_id}", web::get().to(mentor_students))
        .route("/previous-mentor/{student_id}", web::get().to(previous_mentor));
}
