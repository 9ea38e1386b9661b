pub mod relationship;
pub mod route;
pub mod web_response;
