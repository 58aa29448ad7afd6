//! Command-line configuration for the terminal runner.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::{MAX_PLAYERS, MIN_PLAYERS};

pub const DEFAULT_STEP_MS: u64 = 300;

pub const USAGE: &str = "\
usage: ladder-games [--seed N] [--step-ms MS] [--player NAME]... [--log PATH]

  --seed N        seed for every draw (default: from the clock)
  --step-ms MS    delay between animated steps (default: 300)
  --player NAME   add a player; repeat 2 to 4 times (default: two unnamed)
  --log PATH      write debug logs to PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u32,
    pub step_ms: u64,
    pub players: Vec<String>,
    pub log: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            step_ms: DEFAULT_STEP_MS,
            players: vec![String::new(), String::new()],
            log: None,
        }
    }
}

/// Parse arguments (without the program name). `Ok(None)` means help was asked for.
pub fn parse_run_args(args: &[String]) -> Result<Option<RunConfig>> {
    let mut config = RunConfig::default();
    let mut players = Vec::new();
    let mut i = 0usize;

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => return Ok(None),
            "--seed" | "--step-ms" | "--player" | "--log" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for {}", flag))?;
                match flag {
                    "--seed" => {
                        config.seed = v
                            .parse::<u32>()
                            .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                    }
                    "--step-ms" => {
                        config.step_ms = v
                            .parse::<u64>()
                            .map_err(|_| anyhow!("invalid --step-ms value: {}", v))?;
                    }
                    "--player" => players.push(v.clone()),
                    _ => config.log = Some(PathBuf::from(v)),
                }
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    if !players.is_empty() {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(anyhow!(
                "--player given {} times; a game needs {} to {} players",
                players.len(),
                MIN_PLAYERS,
                MAX_PLAYERS
            ));
        }
        config.players = players;
    }

    Ok(Some(config))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
