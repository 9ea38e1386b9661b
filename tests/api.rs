use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use mentorship::handler::route::configure;
use mentorship::state::state::State;
use mentorship::state::store::new_id;
use mentorship::state::store_local::StoreLocal;
use serde_json::{json, Value};
use std::sync::Arc;

fn state() -> web::Data<State> {
    web::Data::new(State::new(Arc::new(StoreLocal::new())))
}

macro_rules! app {
    () => {
        test::init_service(App::new().app_data(state()).configure(configure)).await
    };
}

async fn post_json<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

async fn send<S>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

#[actix_web::test]
async fn create_mentor_returns_created_document() {
    let app = app!();
    let (status, body) = post_json(&app, "/mentors", json!({ "name": "Alice" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["students"], json!([]));
    assert_eq!(body["_id"].as_str().unwrap().len(), 24);
}

#[actix_web::test]
async fn create_student_has_no_mentor() {
    let app = app!();
    let (status, body) = post_json(&app, "/students", json!({ "name": "Bob", "age": 7 })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["mentor"], Value::Null);
    assert!(body.get("age").is_none());
}

#[actix_web::test]
async fn bad_bodies_are_rejected() {
    let app = app!();
    let (status, body) = post_json(&app, "/mentors", json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "name must not be empty" }));

    let (status, body) = post_json(&app, "/students", json!({ "nick": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn assign_and_query_scenario() {
    let app = app!();
    let (_, alice) = post_json(&app, "/mentors", json!({ "name": "Alice" })).await;
    let (_, bob) = post_json(&app, "/students", json!({ "name": "Bob" })).await;
    let m1 = alice["_id"].as_str().unwrap();
    let s1 = bob["_id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        test::TestRequest::put().uri(&format!("/assign-student/{}/{}", m1, s1)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Student assigned to Mentor" }));

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("/mentor-students/{}", m1)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Bob");
    assert_eq!(list[0]["mentor"], m1);

    let (status, body) = send(&app, test::TestRequest::get().uri("/unassigned-students")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("/previous-mentor/{}", s1)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["students"], json!([s1]));
}

#[actix_web::test]
async fn assign_student_with_unknown_mentor_is_404() {
    let app = app!();
    let (_, bob) = post_json(&app, "/students", json!({ "name": "Bob" })).await;
    let uri = format!("/assign-student/{}/{}", new_id(), bob["_id"].as_str().unwrap());
    let (status, body) = send(&app, test::TestRequest::put().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Mentor not found" }));
}

#[actix_web::test]
async fn reassign_moves_student_between_mentors() {
    let app = app!();
    let (_, a) = post_json(&app, "/mentors", json!({ "name": "A" })).await;
    let (_, b) = post_json(&app, "/mentors", json!({ "name": "B" })).await;
    let (_, s) = post_json(&app, "/students", json!({ "name": "S" })).await;
    let (a, b, s) = (
        a["_id"].as_str().unwrap(),
        b["_id"].as_str().unwrap(),
        s["_id"].as_str().unwrap(),
    );

    send(&app, test::TestRequest::put().uri(&format!("/assign-student/{}/{}", a, s))).await;
    let (status, body) = send(
        &app,
        test::TestRequest::put().uri(&format!("/assign-mentor/{}/{}", s, b)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Mentor assigned to Student" }));

    let (_, a_list) = send(&app, test::TestRequest::get().uri(&format!("/mentor-students/{}", a))).await;
    assert_eq!(a_list, json!([]));
    let (_, b_list) = send(&app, test::TestRequest::get().uri(&format!("/mentor-students/{}", b))).await;
    assert_eq!(b_list.as_array().unwrap().len(), 1);
    let (_, prev) = send(&app, test::TestRequest::get().uri(&format!("/previous-mentor/{}", s))).await;
    assert_eq!(prev["name"], "B");
    assert_eq!(prev["students"], json!([s]));
}

#[actix_web::test]
async fn reassign_to_unknown_mentor_keeps_assignment() {
    let app = app!();
    let (_, m) = post_json(&app, "/mentors", json!({ "name": "Alice" })).await;
    let (_, s) = post_json(&app, "/students", json!({ "name": "Bob" })).await;
    let (m, s) = (m["_id"].as_str().unwrap(), s["_id"].as_str().unwrap());
    send(&app, test::TestRequest::put().uri(&format!("/assign-student/{}/{}", m, s))).await;

    let uri = format!("/assign-mentor/{}/{}", s, new_id());
    let (status, body) = send(&app, test::TestRequest::put().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Mentor not found" }));

    let (_, prev) = send(&app, test::TestRequest::get().uri(&format!("/previous-mentor/{}", s))).await;
    assert_eq!(prev["_id"], m);
}

#[actix_web::test]
async fn missing_documents_are_404() {
    let app = app!();
    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("/mentor-students/{}", new_id())),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Mentor not found" }));

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("/previous-mentor/{}", new_id())),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Student not found" }));

    let (_, s) = post_json(&app, "/students", json!({ "name": "Bob" })).await;
    let uri = format!("/previous-mentor/{}", s["_id"].as_str().unwrap());
    let (status, body) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Previous Mentor not found" }));
}

#[actix_web::test]
async fn malformed_ids_are_500() {
    let app = app!();
    let (status, body) = send(&app, test::TestRequest::get().uri("/mentor-students/xyz")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Could not retrieve mentor students" }));

    let (status, body) = send(&app, test::TestRequest::put().uri("/assign-mentor/xyz/abc")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Could not assign Mentor to Student" }));
}

#[actix_web::test]
async fn unassigned_lists_only_students_without_mentor() {
    let app = app!();
    let (_, m) = post_json(&app, "/mentors", json!({ "name": "Alice" })).await;
    let (_, a) = post_json(&app, "/students", json!({ "name": "A" })).await;
    let (_, b) = post_json(&app, "/students", json!({ "name": "B" })).await;
    let uri = format!(
        "/assign-student/{}/{}",
        m["_id"].as_str().unwrap(),
        a["_id"].as_str().unwrap()
    );
    send(&app, test::TestRequest::put().uri(&uri)).await;

    let (_, list) = send(&app, test::TestRequest::get().uri("/unassigned-students")).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["_id"], b["_id"]);
    assert!(list.iter().all(|s| s["mentor"].is_null()));
}

#[actix_web::test]
async fn reassign_of_unknown_student_is_404() {
    let app = app!();
    let (_, m) = post_json(&app, "/mentors", json!({ "name": "Alice" })).await;
    let m = m["_id"].as_str().unwrap();

    let uri = format!("/assign-mentor/{}/{}", new_id(), m);
    let (status, body) = send(&app, test::TestRequest::put().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Student not found" }));

    let (_, list) = send(&app, test::TestRequest::get().uri(&format!("/mentor-students/{}", m))).await;
    assert_eq!(list, json!([]));
}

#[actix_web::test]
async fn uppercase_ids_resolve_to_the_same_document() {
    let app = app!();
    let (_, m) = post_json(&app, "/mentors", json!({ "name": "Alice" })).await;
    let upper = m["_id"].as_str().unwrap().to_uppercase();

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("/mentor-students/{}", upper)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
