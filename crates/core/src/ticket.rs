//! Ticket identifier.
//!
//! Ticket numbers are supplied by whoever registers the ticket and become the
//! primary key of the `tickets` table. They are stored exactly as given, so
//! lookups compare byte for byte; any trimming of form input happens before
//! parsing.

use std::fmt;

use crate::error::CoreError;

/// Entity name used in `CoreError::NotFound`.
pub const TICKET_ENTITY: &str = "Ticket";

/// Longest accepted ticket number, in bytes. Keeps the key well under the
/// btree index row limit.
pub const MAX_TICKET_LEN: usize = 256;

/// A user-supplied ticket number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketId(String);

impl TicketId {
    /// Parse a raw form or path value into a ticket number.
    ///
    /// Fails with `CoreError::Validation` when the value is empty, longer than
    /// [`MAX_TICKET_LEN`] bytes, or contains a NUL character (which PostgreSQL
    /// text columns cannot hold).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.is_empty() {
            return Err(CoreError::Validation(
                "Ticket number must not be empty".to_string(),
            ));
        }
        if raw.len() > MAX_TICKET_LEN {
            return Err(CoreError::Validation(format!(
                "Ticket number must be at most {MAX_TICKET_LEN} bytes (got {})",
                raw.len()
            )));
        }
        if raw.contains('\0') {
            return Err(CoreError::Validation(
                "Ticket number must not contain NUL characters".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the `NotFound` error for a missing ticket.
pub fn ticket_not_found(id: &TicketId) -> CoreError {
    CoreError::NotFound {
        entity: TICKET_ENTITY,
        id: id.to_string(),
    }
}
