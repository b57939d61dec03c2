//! Handlers for the ticket pages.
//!
//! ```text
//! GET  /                 list
//! GET  /new              new_form
//! POST /new              submit
//! GET  /{ticket}         view
//! GET  /{ticket}/image   image
//! ```

use axum::extract::{Multipart, Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use qrtickets_core::error::CoreError;
use qrtickets_core::qr::decode_qr_blocking;
use qrtickets_core::thumbnail::make_thumbnail_blocking;
use qrtickets_core::ticket::{ticket_not_found, TicketId};
use qrtickets_db::models::ticket::NewTicket;
use qrtickets_db::repositories::{InsertError, TicketRepo};

use crate::error::{AppError, AppResult};
use crate::render;
use crate::state::AppState;

/// Multipart field carrying the ticket number.
pub const FIELD_TICKET: &str = "ticket";
/// Multipart field carrying the QR code scan.
pub const FIELD_QR: &str = "qr";
/// Multipart field carrying the attendee photo.
pub const FIELD_IMAGE: &str = "image";

/// Ticket numbers that collide with a static route and could never be viewed
/// at `/{ticket}`.
pub const RESERVED_TICKETS: &[&str] = &["new"];

/// Raw contents of the upload form. Empty file parts are treated as absent.
#[derive(Debug, Default)]
struct TicketForm {
    ticket: Option<String>,
    qr: Option<Vec<u8>>,
    image: Option<Vec<u8>>,
}

impl TicketForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(AppError::from)?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                FIELD_TICKET => {
                    let text = field
                        .text()
                        .await
                        .map_err(AppError::from)?;
                    form.ticket = Some(text);
                }
                FIELD_QR | FIELD_IMAGE => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(AppError::from)?;
                    let data = (!data.is_empty()).then(|| data.to_vec());
                    if name == FIELD_QR {
                        form.qr = data;
                    } else {
                        form.image = data;
                    }
                }
                other => {
                    tracing::debug!(field = other, "Ignoring unknown form field");
                }
            }
        }

        Ok(form)
    }
}

/// GET /
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let tickets = TicketRepo::list_summaries(&state.pool).await?;
    Ok(render::list_page(&tickets))
}

/// GET /new
pub async fn new_form() -> Html<String> {
    render::new_form_page()
}

/// POST /new
///
/// Decodes the QR scan and thumbnails the photo off the async runtime, then
/// inserts one row. An unreadable QR scan is stored as no QR; an unreadable
/// photo rejects the submission. A duplicate ticket number sends the user
/// back to the list without touching the existing row.
pub async fn submit(State(state): State<AppState>, multipart: Multipart) -> AppResult<Response> {
    let form = TicketForm::read(multipart).await?;
    let ticket = submitted_ticket(form.ticket.as_deref().unwrap_or_default())?;

    let qr = match form.qr {
        Some(bytes) => match decode_qr_blocking(bytes).await {
            Ok(payload) => Some(payload),
            Err(CoreError::Decode(err)) => {
                tracing::warn!(ticket = %ticket, error = %err, "QR scan unreadable, storing ticket without QR");
                None
            }
            Err(err) => return Err(err.into()),
        },
        None => None,
    };

    let photo = match form.image {
        Some(bytes) => Some(make_thumbnail_blocking(bytes).await?),
        None => None,
    };

    let input = NewTicket { ticket, qr, photo };
    match TicketRepo::insert(&state.pool, &input).await {
        Ok(row) => {
            tracing::info!(ticket = %input.ticket, has_qr = row.qr.is_some(), has_photo = row.has_photo(), "Ticket registered");
            Ok(Redirect::to(&render::ticket_path(input.ticket.as_str())).into_response())
        }
        Err(InsertError::DuplicateKey { ticket }) => {
            tracing::info!(%ticket, "Ticket number already registered, discarding submission");
            Ok(Redirect::to("/").into_response())
        }
        Err(InsertError::Database(err)) => Err(err.into()),
    }
}

/// GET /{ticket}
pub async fn view(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<Html<String>> {
    let ticket = path_ticket(&raw)?;
    let row = TicketRepo::find(&state.pool, &ticket)
        .await?
        .ok_or_else(|| AppError::Core(ticket_not_found(&ticket)))?;
    Ok(render::detail_page(&row))
}

/// GET /{ticket}/image
///
/// Raw JPEG bytes. 404 when the ticket is unknown or has no photo.
pub async fn image(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<Response> {
    let ticket = path_ticket(&raw)?;
    let photo = TicketRepo::find_photo(&state.pool, &ticket)
        .await?
        .ok_or_else(|| AppError::Core(ticket_not_found(&ticket)))?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Photo for ticket",
                id: ticket.to_string(),
            })
        })?;
    Ok(([(CONTENT_TYPE, "image/jpeg")], photo).into_response())
}

/// Fallback for unmatched paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, render::not_found_page("This page"))
}

/// Parse the form's ticket number. Surrounding whitespace from the text input
/// is dropped here; path lookups compare verbatim.
fn submitted_ticket(raw: &str) -> AppResult<TicketId> {
    let ticket = TicketId::parse(raw.trim())?;
    if RESERVED_TICKETS.contains(&ticket.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Ticket number '{ticket}' is reserved"
        ))));
    }
    Ok(ticket)
}

/// A path segment that fails parsing can never name a stored ticket, so it is a miss
/// rather than a validation failure.
fn path_ticket(raw: &str) -> AppResult<TicketId> {
    TicketId::parse(raw).map_err(|_| {
        AppError::Core(CoreError::NotFound {
            entity: qrtickets_core::ticket::TICKET_ENTITY,
            id: raw.to_string(),
        })
    })
}
