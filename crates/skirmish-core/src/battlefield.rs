//! Battlefield aggregate: the single source of truth for countries and units.
//!
//! The `Battlefield` owns the flat unit collection, the country registry and
//! the id counter. Per-country soldier/tank views are derived from the flat
//! collection on demand rather than mirrored, so they cannot drift.
//!
//! # Determinism
//!
//! The battlefield owns a `ChaCha8Rng`: construct it with
//! [`Battlefield::with_seed`] and a whole battle replays identically.
//! Countries are stored in a `BTreeMap` so reporting order is stable.
//!
//! # Example
//!
//! ```
//! use skirmish_core::Battlefield;
//!
//! let mut field = Battlefield::with_seed(42);
//! field.add_country("Aquila", 5, 2).unwrap();
//! field.add_country("Borea", 5, 2).unwrap();
//!
//! field.run_step();
//! assert!(field.state().len() <= 2);
//! ```

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::country::{Country, CountryId, CountryState};
use crate::error::CountryError;
use crate::resolver::resolve_collisions;
use crate::unit::{Unit, UnitKind};
use crate::{MAX_COUNTRIES, MAX_SOLDIERS_PER_COUNTRY, MAX_TANKS_PER_COUNTRY};

/// Aggregate root for one battle: all units, all countries, one RNG.
///
/// All mutation goes through [`add_country`](Self::add_country),
/// [`run_step`](Self::run_step) and [`clear`](Self::clear); concurrent
/// access is the [`Simulator`](crate::Simulator)'s business, which wraps the
/// battlefield in a single coarse lock.
#[derive(Debug, Clone)]
pub struct Battlefield {
    units: Vec<Unit>,
    countries: BTreeMap<String, Country>,
    next_country_id: CountryId,
    tick: u64,
    rng: ChaCha8Rng,
}

impl Battlefield {
    /// Creates an empty battlefield with an entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Creates an empty battlefield with a fixed seed, for replayable runs.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            units: Vec::new(),
            countries: BTreeMap::new(),
            next_country_id: CountryId::FIRST,
            tick: 0,
            rng,
        }
    }

    /// Enlists a country with the given contingents on random cells.
    ///
    /// All validation happens before any mutation: a rejected call leaves
    /// the battlefield exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`CountryError::LimitExceeded`] when 5 countries are enlisted
    /// - [`CountryError::DuplicateName`] when `name` is taken
    /// - [`CountryError::SoldierCountOutOfRange`] unless `1 <= soldiers <= 10`
    /// - [`CountryError::TankCountOutOfRange`] unless `tanks <= 3`
    pub fn add_country(
        &mut self,
        name: &str,
        soldiers: u32,
        tanks: u32,
    ) -> Result<CountryId, CountryError> {
        if self.countries.len() >= MAX_COUNTRIES {
            return Err(CountryError::LimitExceeded);
        }
        if self.countries.contains_key(name) {
            return Err(CountryError::DuplicateName(name.to_owned()));
        }
        if !(1..=MAX_SOLDIERS_PER_COUNTRY).contains(&soldiers) {
            return Err(CountryError::SoldierCountOutOfRange(soldiers));
        }
        if tanks > MAX_TANKS_PER_COUNTRY {
            return Err(CountryError::TankCountOutOfRange(tanks));
        }

        let id = self.next_country_id;
        self.next_country_id = id.next();
        for ordinal in 1..=soldiers {
            self.units
                .push(Unit::spawn(name, id, UnitKind::Soldier, ordinal, &mut self.rng));
        }
        for ordinal in 1..=tanks {
            self.units
                .push(Unit::spawn(name, id, UnitKind::Tank, ordinal, &mut self.rng));
        }
        self.countries.insert(name.to_owned(), Country::new(name, id));
        info!(country = name, id = %id, soldiers, tanks, "country enlisted");
        Ok(id)
    }

    /// Executes one tick: move every unit, fight out contested cells, prune
    /// the fallen and remove defeated countries.
    pub fn run_step(&mut self) {
        for unit in &mut self.units {
            unit.step(&mut self.rng);
        }
        resolve_collisions(&mut self.units);
        self.units.retain(Unit::active);
        self.remove_defeated();
        self.tick += 1;
        debug!(
            tick = self.tick,
            units = self.units.len(),
            countries = self.countries.len(),
            "tick complete"
        );
    }

    /// Drops countries whose derived soldier and tank views are both empty.
    fn remove_defeated(&mut self) {
        let units = &self.units;
        let defeated: Vec<String> = self
            .countries
            .iter()
            .filter(|(_, country)| !units.iter().any(|u| u.country_id() == country.id()))
            .map(|(name, _)| name.clone())
            .collect();
        for name in defeated {
            self.countries.remove(&name);
            info!(country = %name, "country eliminated");
        }
    }

    /// Reports active soldier/tank counts per enlisted country.
    #[must_use]
    pub fn state(&self) -> BTreeMap<String, CountryState> {
        self.countries
            .iter()
            .map(|(name, country)| {
                let mut state = CountryState::default();
                for unit in &self.units {
                    if unit.active() && unit.country_id() == country.id() {
                        match unit.kind() {
                            UnitKind::Soldier => state.soldiers += 1,
                            UnitKind::Tank => state.tanks += 1,
                        }
                    }
                }
                (name.clone(), state)
            })
            .collect()
    }

    /// Removes every country and unit and resets the id counter.
    pub fn clear(&mut self) {
        self.units.clear();
        self.countries.clear();
        self.next_country_id = CountryId::FIRST;
        self.tick = 0;
        debug!("battlefield cleared");
    }

    /// Returns all units still on the field, e.g. for a renderer.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Returns the number of enlisted countries.
    #[must_use]
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    /// Looks up the numeric id of an enlisted country.
    #[must_use]
    pub fn country_id(&self, name: &str) -> Option<CountryId> {
        self.countries.get(name).map(Country::id)
    }

    /// Returns the number of completed ticks since the last clear.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }
}

impl Default for Battlefield {
    fn default() -> Self {
        Self::new()
    }
}
