use thiserror::Error;

/// Coarse grouping of failures, used by callers that map errors onto
/// transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Expired,
    Auth,
    Internal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SantaError {
    #[error("Need at least 2 unique players")]
    InsufficientPlayers { found: usize },
    #[error("Room not found")]
    RoomNotFound,
    #[error("Room expired")]
    RoomExpired,
    #[error("Name not in this room")]
    NameNotInRoom,
    #[error("Wrong secret code")]
    WrongCode,
    #[error("could not generate a unique {what} after {attempts} attempts")]
    GenerationExhausted { what: &'static str, attempts: usize },
}

impl SantaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SantaError::InsufficientPlayers { .. } => ErrorKind::Validation,
            SantaError::RoomNotFound | SantaError::NameNotInRoom => ErrorKind::NotFound,
            SantaError::RoomExpired => ErrorKind::Expired,
            SantaError::WrongCode => ErrorKind::Auth,
            SantaError::GenerationExhausted { .. } => ErrorKind::Internal,
        }
    }
}
