//! In-memory room table with lazy expiry.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::SantaError;

/// Room code alphabet: upper-case alphanumerics minus look-alikes (0/O, 1/I).
pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const ROOM_CODE_LEN: usize = 6;

/// Six symbols from a 32-symbol alphabet. No check against live rooms is
/// made; with 32^6 codes a clash is unlikely but possible, and `put`
/// replaces whatever room held the code.
pub fn generate_room_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| ROOM_CODE_ALPHABET[rng.gen_range(0..ROOM_CODE_ALPHABET.len())] as char)
        .collect()
}

pub fn normalize_room_code(raw: &str) -> String {
    raw.to_uppercase()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub members: Vec<String>,
    pub assignments: HashMap<String, String>,
    pub codes: HashMap<String, String>,
    /// Unix milliseconds.
    pub expires_at: u64,
}

impl Room {
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }

    pub fn is_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }
}

#[derive(Debug, Default)]
pub struct RoomStore {
    rooms: HashMap<String, Room>,
}

impl RoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, code: impl Into<String>, room: Room) {
        self.rooms.insert(code.into(), room);
    }

    /// Looks up a room, evicting it if it has expired.
    ///
    /// This is a read with a side effect: the first lookup after expiry
    /// removes the entry and reports `RoomExpired`; later lookups report
    /// `RoomNotFound`.
    pub fn get(&mut self, code: &str, now: u64) -> Result<&Room, SantaError> {
        let expired = self
            .rooms
            .get(code)
            .ok_or(SantaError::RoomNotFound)?
            .is_expired(now);
        if expired {
            self.rooms.remove(code);
            tracing::debug!(room = code, "evicted expired room");
            return Err(SantaError::RoomExpired);
        }
        self.rooms.get(code).ok_or(SantaError::RoomNotFound)
    }

    pub fn delete(&mut self, code: &str) -> Option<Room> {
        self.rooms.remove(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rooms.contains_key(code)
    }

    /// Drops every room past its expiry. Returns how many were removed.
    pub fn sweep_expired(&mut self, now: u64) -> usize {
        let before = self.rooms.len();
        self.rooms.retain(|_, room| !room.is_expired(now));
        before - self.rooms.len()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
