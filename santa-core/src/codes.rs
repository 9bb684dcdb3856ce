//! Per-participant secret codes.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::SantaError;

pub const SECRET_CODE_MIN: u16 = 1000;
pub const SECRET_CODE_MAX: u16 = 9999;

/// Draws allowed per code before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 1_000;

/// Draws four-digit codes until one is not in `used`, records it and
/// returns it.
pub fn issue_code<R: Rng + ?Sized>(
    used: &mut HashSet<String>,
    rng: &mut R,
) -> Result<String, SantaError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = rng.gen_range(SECRET_CODE_MIN..=SECRET_CODE_MAX).to_string();
        if used.insert(code.clone()) {
            return Ok(code);
        }
    }
    Err(SantaError::GenerationExhausted {
        what: "secret code",
        attempts: MAX_CODE_ATTEMPTS,
    })
}

/// One code per member, pairwise distinct across the room.
pub fn issue_all_codes<R: Rng + ?Sized>(
    members: &[String],
    rng: &mut R,
) -> Result<HashMap<String, String>, SantaError> {
    let mut used = HashSet::with_capacity(members.len());
    let mut codes = HashMap::with_capacity(members.len());
    for name in members {
        let code = issue_code(&mut used, rng)?;
        codes.insert(name.clone(), code);
    }
    Ok(codes)
}
