use crate::data_model::mentor::NewMentor;
use crate::data_model::student::NewStudent;
use crate::handler::web_response::{conv_error, message_body};
use crate::state::state::State;
use actix_web::{web, HttpResponse};

pub async fn mentor_create(data: web::Data<State>, body: web::Json<NewMentor>) -> HttpResponse {
    match data.relationships.create_mentor(body.into_inner()).await {
        Ok(mentor) => HttpResponse::Created().json(mentor),
        Err(e) => conv_error(e, "Could not create Mentor"),
    }
}

pub async fn student_create(data: web::Data<State>, body: web::Json<NewStudent>) -> HttpResponse {
    match data.relationships.create_student(body.into_inner()).await {
        Ok(student) => HttpResponse::Created().json(student),
        Err(e) => conv_error(e, "Could not create Student"),
    }
}

pub async fn assign_student(
    data: web::Data<State>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (mentor_id, student_id) = path.into_inner();
    match data
        .relationships
        .assign_student(&mentor_id, &student_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(message_body("Student assigned to Mentor")),
        Err(e) => conv_error(e, "Could not assign Student to Mentor"),
    }
}

pub async fn unassigned_students(data: web::Data<State>) -> HttpResponse {
    match data.relationships.unassigned_students().await {
        Ok(students) => HttpResponse::Ok().json(students),
        Err(e) => conv_error(e, "Could not retrieve unassigned students"),
    }
}

pub async fn assign_mentor(
    data: web::Data<State>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (student_id, mentor_id) = path.into_inner();
    match data
        .relationships
        .reassign_mentor(&student_id, &mentor_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(message_body("Mentor assigned to Student")),
        Err(e) => conv_error(e, "Could not assign Mentor to Student"),
    }
}

pub async fn mentor_students(data: web::Data<State>, path: web::Path<String>) -> HttpResponse {
    match data.relationships.mentor_students(&path.into_inner()).await {
        Ok(students) => HttpResponse::Ok().json(students),
        Err(e) => conv_error(e, "Could not retrieve mentor students"),
    }
}

pub async fn previous_mentor(data: web::Data<State>, path: web::Path<String>) -> HttpResponse {
    match data.relationships.previous_mentor(&path.into_inner()).await {
        Ok(mentor) => HttpResponse::Ok().json(mentor),
        Err(e) => conv_error(e, "Could not retrieve previous Mentor"),
    }
}
