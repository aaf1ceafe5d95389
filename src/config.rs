//! Runner configuration from the command line and environment.
//!
//! Command-line flags take precedence over environment variables. Empty
//! environment values are treated as unset.
//!
//! | Flag | Environment | Meaning |
//! |------|-------------|---------|
//! | `--seed <u32>` | `BLOCKFALL_SEED` | RNG seed (default: derived from the clock) |
//! | `--log <path>` | `BLOCKFALL_LOG_PATH` | Append a JSON-lines event log |
//! | `--release-timeout <ms>` | `BLOCKFALL_RELEASE_TIMEOUT_MS` | Held-key auto-release timeout |

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::input::handler::DEFAULT_KEY_RELEASE_TIMEOUT_MS;

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";
pub const ENV_RELEASE_TIMEOUT_MS: &str = "BLOCKFALL_RELEASE_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub key_release_timeout_ms: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }
}

impl RunConfig {
    /// Load from `std::env::args` and the process environment.
    pub fn load() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// Build from explicit arguments (without the program name) and an
    /// environment lookup.
    pub fn from_sources(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        let env = |key: &str| {
            env(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        if let Some(v) = env(ENV_SEED) {
            config.seed = Some(parse_u32(ENV_SEED, &v)?);
        }
        if let Some(v) = env(ENV_LOG_PATH) {
            config.log_path = Some(PathBuf::from(v));
        }
        if let Some(v) = env(ENV_RELEASE_TIMEOUT_MS) {
            config.key_release_timeout_ms = parse_u32(ENV_RELEASE_TIMEOUT_MS, &v)?;
        }

        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--seed" | "--log" | "--release-timeout" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("config: missing value for {}", flag))?;
                    match flag {
                        "--seed" => config.seed = Some(parse_u32(flag, v)?),
                        "--log" => config.log_path = Some(PathBuf::from(v)),
                        _ => config.key_release_timeout_ms = parse_u32(flag, v)?,
                    }
                }
                other => {
                    return Err(anyhow!("config: unknown argument: {}", other));
                }
            }
            i += 1;
        }

        Ok(config)
    }

    /// The configured seed, or one derived from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
                .unwrap_or(1)
        })
    }
}

fn parse_u32(name: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| anyhow!("config: invalid {} value: {}", name, value))
}
