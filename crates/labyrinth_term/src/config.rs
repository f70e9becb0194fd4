//! Session config resolution: file, then environment, then command line.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use labyrinth::generator::MazeDifficulty;
use labyrinth::grid::round_down_to_odd;
use labyrinth::ledger::LedgerPolicy;
use labyrinth::session::{SessionConfig, SizePolicy};
use tracing::{info, warn};

use crate::error::AppError;

pub const SEED_ENV: &str = "LABYRINTH_SEED";

/// Command-line overrides; `None`/`false` leaves the file value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub size: Option<u32>,
    pub difficulty: Option<MazeDifficulty>,
    pub best_moves: bool,
    pub no_advance: bool,
}

/// Decimal or `0x`-prefixed hex.
pub fn parse_seed(s: &str) -> Option<u64> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

pub fn load_file(path: &Path) -> Result<SessionConfig, AppError> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            let cfg = SessionConfig::from_json_str(&raw).map_err(|source| AppError::Config {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Loaded config from {}", path.display());
            Ok(cfg)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(SessionConfig::default()),
        Err(source) => Err(AppError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Apply the env seed (if set and valid), then the command line.
pub fn apply_overrides(
    mut cfg: SessionConfig,
    env_seed: Option<&str>,
    ov: &Overrides,
) -> Result<SessionConfig, AppError> {
    if let Some(v) = env_seed {
        match parse_seed(v) {
            Some(seed) => cfg.seed = seed,
            None => warn!("Unknown {} value: {}", SEED_ENV, v),
        }
    }

    if let Some(seed) = ov.seed {
        cfg.seed = seed;
    }
    if let Some(difficulty) = ov.difficulty {
        cfg.size = SizePolicy::Preset { difficulty };
    }
    if let Some(n) = ov.size {
        let side = round_down_to_odd(n)
            .ok_or_else(|| AppError::Usage(format!("--size must be at least 5 (got {n})")))?;
        cfg.size = SizePolicy::Fixed {
            width: side,
            height: side,
        };
    }
    if ov.best_moves && cfg.ledger != LedgerPolicy::BestMoves {
        cfg.ledger = LedgerPolicy::BestMoves;
        // A key chosen for levels would mix the two records.
        cfg.storage_key.clear();
    }
    if ov.no_advance {
        cfg.auto_advance = false;
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex_seeds() {
        assert_eq!(parse_seed("42"), Some(42));
        assert_eq!(parse_seed(" 0x4D41 "), Some(0x4D41));
        assert_eq!(parse_seed("0XFF"), Some(255));
        assert_eq!(parse_seed("maze"), None);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!(
            "labyrinth-config-missing-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        assert_eq!(load_file(&path).unwrap(), SessionConfig::default());
    }

    #[test]
    fn bad_file_reports_path() {
        let path = std::env::temp_dir().join(format!(
            "labyrinth-config-bad-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ \"seed\": [] }").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.to_string().contains("labyrinth-config-bad"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn command_line_beats_env_beats_file() {
        let file = SessionConfig {
            seed: 1,
            ..SessionConfig::default()
        };

        let cfg = apply_overrides(file.clone(), Some("0x10"), &Overrides::default()).unwrap();
        assert_eq!(cfg.seed, 16);

        let ov = Overrides {
            seed: Some(99),
            ..Overrides::default()
        };
        let cfg = apply_overrides(file.clone(), Some("0x10"), &ov).unwrap();
        assert_eq!(cfg.seed, 99);

        // Garbage in the environment is ignored.
        let cfg = apply_overrides(file, Some("nope"), &Overrides::default()).unwrap();
        assert_eq!(cfg.seed, 1);
    }

    #[test]
    fn size_flag_rounds_down_to_odd() {
        let ov = Overrides {
            size: Some(12),
            ..Overrides::default()
        };
        let cfg = apply_overrides(SessionConfig::default(), None, &ov).unwrap();
        assert_eq!(
            cfg.size,
            SizePolicy::Fixed {
                width: 11,
                height: 11
            }
        );

        let tiny = Overrides {
            size: Some(4),
            ..Overrides::default()
        };
        assert!(matches!(
            apply_overrides(SessionConfig::default(), None, &tiny),
            Err(AppError::Usage(_))
        ));
    }

    #[test]
    fn best_moves_switches_key() {
        let file = SessionConfig {
            storage_key: "custom.level".into(),
            ..SessionConfig::default()
        };
        let ov = Overrides {
            best_moves: true,
            no_advance: true,
            ..Overrides::default()
        };
        let cfg = apply_overrides(file, None, &ov).unwrap();
        assert_eq!(cfg.ledger, LedgerPolicy::BestMoves);
        assert_eq!(cfg.storage_key(), "labyrinth.best_moves");
        assert!(!cfg.auto_advance);
    }
}
