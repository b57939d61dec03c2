//! Domain layer for the ticket registry.
//!
//! Holds the ticket identifier type, the error taxonomy, and the two
//! CPU-bound upload transforms (QR decoding and thumbnail resizing). Nothing
//! here touches the network or the database.

pub mod error;
pub mod qr;
pub mod thumbnail;
pub mod ticket;
pub mod types;
