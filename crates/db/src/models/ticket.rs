//! Ticket entity model and DTOs for the `tickets` table.

use qrtickets_core::ticket::TicketId;
use qrtickets_core::types::Timestamp;
use sqlx::FromRow;

/// A full row from the `tickets` table, photo bytes included.
#[derive(Debug, Clone, FromRow)]
pub struct Ticket {
    pub ticket: String,
    /// Decoded QR payload; `None` when no scan was uploaded or it was unreadable.
    pub qr: Option<String>,
    /// JPEG thumbnail; `None` when no photo was uploaded.
    pub photo: Option<Vec<u8>>,
    pub created_at: Timestamp,
}

impl Ticket {
    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }
}

/// A `tickets` row without the photo bytes, for listing.
#[derive(Debug, Clone, FromRow)]
pub struct TicketSummary {
    pub ticket: String,
    pub qr: Option<String>,
    pub has_photo: bool,
    pub created_at: Timestamp,
}

/// DTO for registering a new ticket.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub ticket: TicketId,
    pub qr: Option<String>,
    pub photo: Option<Vec<u8>>,
}
