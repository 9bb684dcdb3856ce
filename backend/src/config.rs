//! Process configuration from environment variables.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SWEEP_SECS: u64 = 60;

/// Binds 0.0.0.0 on `PORT`, default 8000.
pub fn server_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, parse_port(env::var("PORT").ok())))
}

/// `SWEEP_INTERVAL_SECS`, default 60. `0` turns the sweeper off.
pub fn sweep_interval() -> Option<Duration> {
    parse_sweep_interval(env::var("SWEEP_INTERVAL_SECS").ok())
}

/// `SANTA_SEED` fixes the draw RNG for reproducible runs.
pub fn rng_seed() -> Option<u64> {
    env::var("SANTA_SEED").ok().and_then(|v| v.trim().parse().ok())
}

fn parse_port(raw: Option<String>) -> u16 {
    raw.and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn parse_sweep_interval(raw: Option<String>) -> Option<Duration> {
    let secs = raw
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_SWEEP_SECS);
    (secs > 0).then(|| Duration::from_secs(secs))
}
