//! Mentor/student assignment backend.
//!
//! Mentors own a list of student ids, students point back at their mentor.
//! [`server::relationship::RelationshipService`] keeps both sides in step on
//! top of a [`state::store::Store`] backend; `handler` exposes it over HTTP.

pub mod args;
pub mod data_model;
pub mod error;
pub mod handler;
pub mod server;
pub mod state;
