//! Pure per-cell combat resolution.
//!
//! [`resolve_collisions`] is a pure pass over a lock-held snapshot of the
//! unit collection: it only flips `active` flags and never touches
//! positions, membership, or the registry. Pruning of the fallen is the
//! caller's job ([`Battlefield::run_step`](crate::Battlefield::run_step)).
//!
//! # Combat rules
//!
//! Units sharing a cell form a group. Groups with fewer than two members, or
//! whose members all belong to one country, are safe. In a contested group:
//!
//! 1. every pair of tanks from different countries destroys both,
//! 2. if the group contains any tank, all soldiers from other countries
//!    fall; tanks never fall to soldiers,
//! 3. only in tank-free groups, every pair of soldiers from different
//!    countries destroys both.
//!
//! All three rules are evaluated against the group membership as it stood at
//! the start of the pass, so a tank destroyed by rule 1 still clears enemy
//! soldiers from its cell in rule 2.

use std::collections::HashMap;

use glam::IVec2;

use crate::unit::{Unit, UnitKind};

/// Applies the combat rules to every occupied cell, updating `active` flags.
///
/// Deactivation is idempotent: a unit on the losing side of several pairings
/// simply stays inactive.
pub fn resolve_collisions(units: &mut [Unit]) {
    let mut cells: HashMap<IVec2, Vec<usize>> = HashMap::new();
    for (idx, unit) in units.iter().enumerate() {
        if unit.active() {
            cells.entry(unit.pos()).or_default().push(idx);
        }
    }

    for occupants in cells.values() {
        resolve_cell(units, occupants);
    }
}

/// Fights out one cell. `occupants` indexes the active units sharing it.
fn resolve_cell(units: &mut [Unit], occupants: &[usize]) {
    if occupants.len() < 2 {
        return;
    }
    let first = units[occupants[0]].country_id();
    if occupants.iter().all(|&i| units[i].country_id() == first) {
        return;
    }

    let tanks: Vec<usize> = occupants
        .iter()
        .copied()
        .filter(|&i| units[i].kind() == UnitKind::Tank)
        .collect();
    let soldiers: Vec<usize> = occupants
        .iter()
        .copied()
        .filter(|&i| units[i].kind() == UnitKind::Soldier)
        .collect();

    for (n, &a) in tanks.iter().enumerate() {
        for &b in &tanks[n + 1..] {
            if units[a].country_id() != units[b].country_id() {
                units[a].deactivate();
                units[b].deactivate();
            }
        }
    }

    // Tank presence is taken from the start-of-pass membership: a tank that
    // just fell above still clears enemy soldiers from its cell.
    if !tanks.is_empty() {
        for &t in &tanks {
            for &s in &soldiers {
                if units[t].country_id() != units[s].country_id() {
                    units[s].deactivate();
                }
            }
        }
    }

    if tanks.is_empty() && soldiers.len() > 1 {
        for (n, &a) in soldiers.iter().enumerate() {
            for &b in &soldiers[n + 1..] {
                if units[a].country_id() != units[b].country_id() {
                    units[a].deactivate();
                    units[b].deactivate();
                }
            }
        }
    }
}
