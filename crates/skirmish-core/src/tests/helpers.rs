//! Test helper functions for building battlefield scenarios.

use glam::IVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::battlefield::Battlefield;
use crate::country::CountryId;
use crate::unit::{Unit, UnitKind};

/// Builds a unit of the given kind parked on a fixed cell.
pub fn make_unit(country: &str, country_id: u32, kind: UnitKind, pos: IVec2) -> Unit {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut unit = Unit::spawn(country, CountryId::new(country_id), kind, 1, &mut rng);
    unit.place(pos);
    unit
}

/// A seeded battlefield with the given rosters already enlisted.
pub fn seeded_battlefield(seed: u64, rosters: &[(&str, u32, u32)]) -> Battlefield {
    let mut field = Battlefield::with_seed(seed);
    for &(name, soldiers, tanks) in rosters {
        field
            .add_country(name, soldiers, tanks)
            .expect("enlist test country");
    }
    field
}
