use thiserror::Error;

/// Invalid simulation settings, reported before any day is simulated
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Number of simulated days must be greater than zero")]
    NoDays,

    #[error("Number of simulated days {days} exceeds the limit of {max}")]
    TooManyDays { days: usize, max: usize },

    #[error("{name} window must be greater than zero")]
    ZeroWindow { name: &'static str },

    #[error("Starting cash must be a positive finite amount, got {0}")]
    InvalidCash(f64),

    #[error("{name} must be a positive finite price, got {value}")]
    InvalidPrice { name: &'static str, value: f64 },

    #[error("Step standard deviation must be finite and non-negative, got {0}")]
    InvalidStepStdDev(f64),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Ledger misuse. The runner never triggers these for a well-formed signal stream.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Already have an open position (day {day})")]
    PositionAlreadyOpen { day: usize },

    #[error("No open position to close (day {day})")]
    NoOpenPosition { day: usize },

    #[error("Cannot trade at non-positive price {price} (day {day})")]
    InvalidPrice { day: usize, price: f64 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
