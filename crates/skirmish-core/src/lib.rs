//! # Skirmish Core
//!
//! Grid battlefield core simulation for Skirmish.
//!
//! Countries enlist soldiers and tanks on a fixed square grid. Each tick every
//! unit takes one uniformly random orthogonal step, co-located enemies fight
//! under simple combat rules, and countries with no surviving units leave the
//! field, until at most one country remains.
//!
//! ## Architecture
//!
//! - **Units** ([`unit`]): soldier/tank model and single-step movement
//! - **Countries** ([`country`]): faction identity and reporting snapshots
//! - **Resolver** ([`resolver`]): pure per-cell combat resolution
//! - **Battlefield** ([`battlefield`]): the aggregate owning all state
//! - **Simulator** ([`simulator`]): lock-guarded engine handle plus the
//!   background tick loop with start/stop/restart control
//!
//! ## Usage
//!
//! ```rust,ignore
//! use skirmish_core::{Battlefield, Simulator};
//!
//! let sim = Simulator::new(Battlefield::new());
//! sim.add_country("Aquila", 5, 2)?;
//! sim.add_country("Borea", 5, 2)?;
//! sim.start()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod battlefield;
pub mod country;
pub mod error;
pub mod resolver;
pub mod simulator;
pub mod unit;

#[cfg(test)]
mod tests;

pub use battlefield::Battlefield;
pub use country::{Country, CountryId, CountryState};
pub use error::{ControlError, CountryError};
pub use resolver::resolve_collisions;
pub use simulator::Simulator;
pub use unit::{legal_moves, Unit, UnitId, UnitKind};

use std::time::Duration;

/// Side length of the square battlefield grid, in cells.
pub const GRID_SIZE: i32 = 10;

/// Maximum number of countries enlisted at once.
pub const MAX_COUNTRIES: usize = 5;

/// Largest soldier contingent a single country may enlist.
pub const MAX_SOLDIERS_PER_COUNTRY: u32 = 10;

/// Largest tank contingent a single country may enlist.
pub const MAX_TANKS_PER_COUNTRY: u32 = 3;

/// Fewest enlisted countries required before the simulation may start.
pub const MIN_COMBATANTS: usize = 2;

/// Fixed delay between background ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
