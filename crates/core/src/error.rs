#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure to turn uploaded bytes into a QR payload or a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The bytes are not an image in any supported container format.
    #[error("Unreadable image: {0}")]
    Image(String),

    /// The image decoded, but no QR code could be found or read in it.
    #[error("No QR code found in image")]
    NoQrCode,

    /// The thumbnail could not be re-encoded.
    #[error("Could not encode thumbnail: {0}")]
    Encode(String),
}
