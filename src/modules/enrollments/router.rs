use axum::{
    Router,
    routing::{delete, post},
};

use crate::state::AppState;

use super::controller::{enroll_student, get_roster, unenroll_student};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll_student).get(get_roster))
        .route("/{id}", delete(unenroll_student))
}
