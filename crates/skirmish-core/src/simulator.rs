//! Lock-guarded engine handle and the background tick loop.
//!
//! The `Simulator` owns the battlefield behind a single coarse mutex and
//! drives it from a background thread on a fixed cadence. Control calls and
//! ticks are strictly serialized by that lock: no tick is ever observed
//! half-applied, and enlistment can never race a pruning pass.
//!
//! The loop is cancelled through an explicit channel rather than a polled
//! flag: [`stop`](Simulator::stop) drops the sender and joins the thread
//! handle, so it returns only once the loop has observably exited. That
//! join guarantee is what makes [`restart`](Simulator::restart) safe to
//! clear state afterwards.

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::battlefield::Battlefield;
use crate::country::{CountryId, CountryState};
use crate::error::{ControlError, CountryError};
use crate::unit::Unit;
use crate::{MIN_COMBATANTS, TICK_INTERVAL};

/// Handle to the running tick thread.
struct Worker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Concurrency-safe handle around one [`Battlefield`].
///
/// Construct one instance and share it (e.g. behind an `Arc`) with whatever
/// composes the transport layer; every method takes `&self`. There is no
/// process-wide singleton.
pub struct Simulator {
    shared: Arc<Mutex<Battlefield>>,
    worker: Mutex<Option<Worker>>,
    interval: Duration,
}

impl Simulator {
    /// Wraps a battlefield for concurrent use at the fixed tick cadence.
    #[must_use]
    pub fn new(battlefield: Battlefield) -> Self {
        Self {
            shared: Arc::new(Mutex::new(battlefield)),
            worker: Mutex::new(None),
            interval: TICK_INTERVAL,
        }
    }

    // The cadence is fixed by contract; only tests shorten it.
    #[cfg(test)]
    pub(crate) fn with_interval(battlefield: Battlefield, interval: Duration) -> Self {
        Self {
            shared: Arc::new(Mutex::new(battlefield)),
            worker: Mutex::new(None),
            interval,
        }
    }

    /// Enlists a country; see [`Battlefield::add_country`].
    ///
    /// # Errors
    ///
    /// Propagates the [`CountryError`] of a rejected enlistment.
    pub fn add_country(
        &self,
        name: &str,
        soldiers: u32,
        tanks: u32,
    ) -> Result<CountryId, CountryError> {
        self.battlefield().add_country(name, soldiers, tanks)
    }

    /// Reports per-country active unit counts from one consistent instant.
    #[must_use]
    pub fn state(&self) -> BTreeMap<String, CountryState> {
        self.battlefield().state()
    }

    /// Snapshots all units still on the field.
    #[must_use]
    pub fn units(&self) -> Vec<Unit> {
        self.battlefield().units().to_vec()
    }

    /// Returns the number of completed ticks since the last restart.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.battlefield().tick()
    }

    /// Spawns the background tick loop.
    ///
    /// # Errors
    ///
    /// - [`ControlError::AlreadyRunning`] when the loop is active
    /// - [`ControlError::InsufficientCountries`] below 2 enlisted countries
    pub fn start(&self) -> Result<(), ControlError> {
        let mut slot = self.worker.lock().expect("worker slot lock poisoned");
        if slot.is_some() {
            return Err(ControlError::AlreadyRunning);
        }
        if self.battlefield().country_count() < MIN_COMBATANTS {
            return Err(ControlError::InsufficientCountries);
        }

        let (stop_tx, stop_rx) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let interval = self.interval;
        let handle = thread::Builder::new()
            .name("skirmish-tick".to_owned())
            .spawn(move || tick_loop(&shared, &stop_rx, interval))
            .expect("failed to spawn tick thread");
        *slot = Some(Worker { stop_tx, handle });
        info!("simulation started");
        Ok(())
    }

    /// Stops the background tick loop and waits for it to terminate.
    ///
    /// On return the loop thread has exited: no further tick executes.
    ///
    /// # Errors
    ///
    /// [`ControlError::NotRunning`] when no loop is active.
    pub fn stop(&self) -> Result<(), ControlError> {
        let mut slot = self.worker.lock().expect("worker slot lock poisoned");
        let worker = slot.take().ok_or(ControlError::NotRunning)?;
        drop(worker.stop_tx);
        if worker.handle.join().is_err() {
            warn!("tick thread panicked before shutdown");
        }
        info!("simulation stopped");
        Ok(())
    }

    /// Stops the loop if running, then clears the battlefield.
    ///
    /// Always succeeds and is idempotent: afterwards there are zero
    /// countries, zero units, and the simulation is stopped.
    pub fn restart(&self) {
        let _ = self.stop();
        self.battlefield().clear();
        info!("simulation restarted");
    }

    /// Returns whether the background loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker.lock().expect("worker slot lock poisoned").is_some()
    }

    fn battlefield(&self) -> MutexGuard<'_, Battlefield> {
        self.shared.lock().expect("battlefield lock poisoned")
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(Battlefield::new())
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Body of the background thread: tick, then wait out the cadence on the
/// stop channel, which doubles as the cancellation signal.
fn tick_loop(shared: &Mutex<Battlefield>, stop_rx: &Receiver<()>, interval: Duration) {
    debug!("tick loop entered");
    loop {
        shared.lock().expect("battlefield lock poisoned").run_step();
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("tick loop exited");
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: Duration = Duration::from_millis(5);

    fn two_country_sim() -> Simulator {
        let sim = Simulator::with_interval(Battlefield::with_seed(1), FAST);
        sim.add_country("Aquila", 3, 1).unwrap();
        sim.add_country("Borea", 3, 1).unwrap();
        sim
    }

    mod start_tests {
        use super::*;

        #[test]
        fn start_needs_two_countries() {
            let sim = Simulator::with_interval(Battlefield::with_seed(1), FAST);
            assert_eq!(sim.start(), Err(ControlError::InsufficientCountries));
            sim.add_country("Aquila", 1, 0).unwrap();
            assert_eq!(sim.start(), Err(ControlError::InsufficientCountries));
            sim.add_country("Borea", 1, 0).unwrap();
            assert_eq!(sim.start(), Ok(()));
        }

        #[test]
        fn start_twice_is_rejected() {
            let sim = two_country_sim();
            sim.start().unwrap();
            assert_eq!(sim.start(), Err(ControlError::AlreadyRunning));
        }

        #[test]
        fn loop_actually_ticks() {
            let sim = two_country_sim();
            sim.start().unwrap();
            thread::sleep(Duration::from_millis(50));
            sim.stop().unwrap();
            assert!(sim.tick() >= 1);
        }
    }

    mod stop_tests {
        use super::*;

        #[test]
        fn stop_without_start_is_rejected() {
            let sim = two_country_sim();
            assert_eq!(sim.stop(), Err(ControlError::NotRunning));
        }

        #[test]
        fn stop_joins_the_loop() {
            let sim = two_country_sim();
            sim.start().unwrap();
            thread::sleep(Duration::from_millis(25));
            sim.stop().unwrap();
            assert!(!sim.is_running());

            // With the thread joined, the tick counter must be frozen.
            let frozen = sim.tick();
            thread::sleep(Duration::from_millis(30));
            assert_eq!(sim.tick(), frozen);
        }

        #[test]
        fn stop_start_cycles() {
            let sim = two_country_sim();
            for _ in 0..3 {
                sim.start().unwrap();
                assert!(sim.is_running());
                sim.stop().unwrap();
                assert!(!sim.is_running());
            }
        }
    }

    mod restart_tests {
        use super::*;

        #[test]
        fn restart_clears_a_running_simulation() {
            let sim = two_country_sim();
            sim.start().unwrap();
            thread::sleep(Duration::from_millis(20));
            sim.restart();

            assert!(!sim.is_running());
            assert!(sim.state().is_empty());
            assert!(sim.units().is_empty());
            assert_eq!(sim.tick(), 0);
        }

        #[test]
        fn restart_is_idempotent_when_stopped() {
            let sim = two_country_sim();
            sim.restart();
            sim.restart();
            assert!(sim.state().is_empty());
        }

        #[test]
        fn ids_start_over_after_restart() {
            let sim = two_country_sim();
            sim.restart();
            assert_eq!(sim.add_country("Cedra", 1, 0).unwrap(), CountryId::FIRST);
        }
    }
}
