//! Repository for the `tickets` table.

use sqlx::PgPool;
use qrtickets_core::ticket::TicketId;

use crate::models::ticket::{NewTicket, Ticket, TicketSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "ticket, qr, photo, created_at";

/// Insertion order; `ticket` breaks ties between identical timestamps.
const ORDER: &str = "ORDER BY created_at, ticket";

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Outcome of a failed [`TicketRepo::insert`].
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    /// A row with this ticket number already exists; it was left untouched.
    #[error("Ticket {ticket} is already registered")]
    DuplicateKey { ticket: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides the read and insert operations for tickets. There is no update
/// or delete: a ticket row is immutable once written.
pub struct TicketRepo;

impl TicketRepo {
    /// List every ticket without photo bytes, in insertion order.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<TicketSummary>, sqlx::Error> {
        let query = format!(
            "SELECT ticket, qr, photo IS NOT NULL AS has_photo, created_at
             FROM tickets {ORDER}"
        );
        sqlx::query_as::<_, TicketSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a ticket by its number.
    pub async fn find(pool: &PgPool, ticket: &TicketId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE ticket = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(ticket.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Fetch only the photo column.
    ///
    /// The outer `Option` is `None` when the ticket does not exist, the inner
    /// one when it exists without a photo.
    pub async fn find_photo(
        pool: &PgPool,
        ticket: &TicketId,
    ) -> Result<Option<Option<Vec<u8>>>, sqlx::Error> {
        let row: Option<(Option<Vec<u8>>,)> =
            sqlx::query_as("SELECT photo FROM tickets WHERE ticket = $1")
                .bind(ticket.as_str())
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(photo,)| photo))
    }

    /// Insert a new ticket, returning the stored row.
    ///
    /// A unique violation on the primary key becomes
    /// [`InsertError::DuplicateKey`]; the existing row is not modified.
    pub async fn insert(pool: &PgPool, input: &NewTicket) -> Result<Ticket, InsertError> {
        let query = format!(
            "INSERT INTO tickets (ticket, qr, photo)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(input.ticket.as_str())
            .bind(&input.qr)
            .bind(&input.photo)
            .fetch_one(pool)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    tracing::debug!(ticket = %input.ticket, "Insert hit primary key");
                    InsertError::DuplicateKey {
                        ticket: input.ticket.to_string(),
                    }
                } else {
                    InsertError::Database(err)
                }
            })
    }

    /// Number of registered tickets.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tickets")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}
