//! Error types for battlefield operations.
//!
//! Every error here is recoverable and reported synchronously to the caller.
//! Failed operations leave the battlefield untouched, so callers may retry
//! freely.

use thiserror::Error;

use crate::{MAX_COUNTRIES, MAX_SOLDIERS_PER_COUNTRY, MAX_TANKS_PER_COUNTRY, MIN_COMBATANTS};

/// Validation failures when enlisting a country.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountryError {
    /// The battlefield already holds the maximum number of countries.
    #[error("maximum number of countries ({max}) reached", max = MAX_COUNTRIES)]
    LimitExceeded,
    /// A country with this name is already enlisted.
    #[error("country '{0}' already exists")]
    DuplicateName(String),
    /// The requested soldier contingent is outside the permitted range.
    #[error("soldier count must be between 1 and {max}, got {0}", max = MAX_SOLDIERS_PER_COUNTRY)]
    SoldierCountOutOfRange(u32),
    /// The requested tank contingent is outside the permitted range.
    #[error("tank count must be between 0 and {max}, got {0}", max = MAX_TANKS_PER_COUNTRY)]
    TankCountOutOfRange(u32),
}

/// State failures on simulation lifecycle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlError {
    /// `start` was called while the tick loop is already running.
    #[error("simulation is already running")]
    AlreadyRunning,
    /// `stop` was called while the tick loop is not running.
    #[error("simulation is not running")]
    NotRunning,
    /// `start` was called before enough countries were enlisted.
    #[error("cannot start the simulation with fewer than {min} countries", min = MIN_COMBATANTS)]
    InsufficientCountries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_error_messages() {
        assert_eq!(
            CountryError::LimitExceeded.to_string(),
            "maximum number of countries (5) reached"
        );
        assert_eq!(
            CountryError::DuplicateName("Aquila".to_owned()).to_string(),
            "country 'Aquila' already exists"
        );
        assert_eq!(
            CountryError::SoldierCountOutOfRange(11).to_string(),
            "soldier count must be between 1 and 10, got 11"
        );
        assert_eq!(
            CountryError::TankCountOutOfRange(4).to_string(),
            "tank count must be between 0 and 3, got 4"
        );
    }

    #[test]
    fn control_error_messages() {
        assert_eq!(
            ControlError::AlreadyRunning.to_string(),
            "simulation is already running"
        );
        assert_eq!(
            ControlError::NotRunning.to_string(),
            "simulation is not running"
        );
        assert_eq!(
            ControlError::InsufficientCountries.to_string(),
            "cannot start the simulation with fewer than 2 countries"
        );
    }
}
