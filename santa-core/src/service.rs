//! Create / join / reveal orchestration.
//!
//! Room lifecycle is `Active` until `now > expires_at`, then `Expired` until
//! the next lookup evicts it. Rooms are never edited after creation.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::codes::issue_all_codes;
use crate::derange::derange;
use crate::name::normalize_name;
use crate::store::{generate_room_code, normalize_room_code, Room, RoomStore};
use crate::SantaError;

/// Rooms live for five minutes from creation.
pub const ROOM_TTL_MS: u64 = 5 * 60 * 1000;

pub const DEFAULT_ORGANIZER: &str = "ORGANIZER";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRoom {
    pub organizer_name: Option<String>,
    #[serde(deserialize_with = "null_as_false")]
    pub include_organizer: bool,
    #[serde(deserialize_with = "present_names")]
    pub members: Vec<String>,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// A `null` list, or a `null` entry in it, counts as not given.
fn present_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let names = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(names.into_iter().flatten().flatten().collect())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRoom {
    pub room_code: String,
    pub codes: HashMap<String, String>,
    pub expires_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub members: Vec<String>,
    pub expires_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reveal {
    pub gift_to: String,
}

/// Normalizes, appends the organizer when asked, and de-duplicates keeping
/// first-seen order.
pub fn collect_members(request: &CreateRoom) -> Vec<String> {
    let mut names: Vec<String> = request
        .members
        .iter()
        .filter_map(|raw| normalize_name(raw))
        .collect();

    if request.include_organizer {
        let organizer = request
            .organizer_name
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(DEFAULT_ORGANIZER);
        if let Some(name) = normalize_name(organizer) {
            names.push(name);
        }
    }

    let mut seen = HashSet::with_capacity(names.len());
    names.retain(|name| seen.insert(name.clone()));
    names
}

pub struct RoomService<R> {
    store: RoomStore,
    rng: R,
}

impl<R: Rng> RoomService<R> {
    pub fn new(rng: R) -> Self {
        Self {
            store: RoomStore::new(),
            rng,
        }
    }

    pub fn store(&self) -> &RoomStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RoomStore {
        &mut self.store
    }

    pub fn create_room(&mut self, request: &CreateRoom, now: u64) -> Result<CreatedRoom, SantaError> {
        let members = collect_members(request);
        let insufficient = SantaError::InsufficientPlayers {
            found: members.len(),
        };
        if members.len() < 2 {
            tracing::debug!(found = members.len(), "not enough players for a draw");
            return Err(insufficient);
        }
        let giftees = derange(&members, &mut self.rng).ok_or(insufficient)?;

        let assignments: HashMap<String, String> =
            members.iter().cloned().zip(giftees).collect();
        let codes = issue_all_codes(&members, &mut self.rng)?;

        let room_code = generate_room_code(&mut self.rng);
        let expires_at = now.saturating_add(ROOM_TTL_MS);

        tracing::info!(room = %room_code, members = members.len(), expires_at, "room created");
        self.store.put(
            room_code.clone(),
            Room {
                members,
                assignments,
                codes: codes.clone(),
                expires_at,
            },
        );

        Ok(CreatedRoom {
            room_code,
            codes,
            expires_at,
        })
    }

    pub fn join_room(&mut self, room_code: &str, now: u64) -> Result<RoomView, SantaError> {
        let room = self.store.get(&normalize_room_code(room_code), now)?;
        Ok(RoomView {
            members: room.members.clone(),
            expires_at: room.expires_at,
        })
    }

    pub fn reveal(
        &mut self,
        room_code: &str,
        name: &str,
        code: &str,
        now: u64,
    ) -> Result<Reveal, SantaError> {
        let room = self.store.get(&normalize_room_code(room_code), now)?;

        let name = normalize_name(name)
            .filter(|n| room.is_member(n))
            .ok_or(SantaError::NameNotInRoom)?;
        if room.codes.get(&name).map(String::as_str) != Some(code.trim()) {
            return Err(SantaError::WrongCode);
        }

        let gift_to = room
            .assignments
            .get(&name)
            .cloned()
            .ok_or(SantaError::NameNotInRoom)?;
        Ok(Reveal { gift_to })
    }
}
