//! Secret Santa draws: name normalization, derangement assignment, secret
//! codes, and expiring rooms.
//!
//! Nothing here touches the network, the clock or a global RNG. Callers pass
//! an `rand::Rng` and the current Unix time in milliseconds.

pub mod codes;
pub mod derange;
pub mod error;
pub mod name;
pub mod service;
pub mod store;

pub use codes::{issue_all_codes, issue_code};
pub use derange::{derange, rotate};
pub use error::{ErrorKind, SantaError};
pub use name::normalize_name;
pub use service::{CreateRoom, CreatedRoom, Reveal, RoomService, RoomView, ROOM_TTL_MS};
pub use store::{generate_room_code, normalize_room_code, Room, RoomStore};
