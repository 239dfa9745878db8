//! Error types for the front end.  The simulation core itself never fails:
//! a full pool drops the spawn and reports it through return values.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal I/O error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
