//! Route table for the ticket pages, mounted at the root.

use axum::routing::get;
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Ticket routes.
///
/// ```text
/// GET    /                  -> list
/// GET    /new               -> new_form
/// POST   /new               -> submit
/// GET    /{ticket}          -> view
/// GET    /{ticket}/image    -> image
/// ```
///
/// `/new` is a static segment and wins over `/{ticket}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list))
        .route("/new", get(tickets::new_form).post(tickets::submit))
        .route("/{ticket}", get(tickets::view))
        .route("/{ticket}/image", get(tickets::image))
}
