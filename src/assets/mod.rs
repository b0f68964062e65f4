//=========================================================================
// Asset Manager
//
// Two-phase asynchronous resource-loading barrier with progress
// reporting.
//
// Architecture:
// ```text
//   manifest ──▶ AssetManager ──when_must_load()──▶ [must workers] ──┐
//                     │                                              │
//                     │          fan-in (channel) ◀──────────────────┘
//                     │               │ barrier resolves
//                     └──load()───────┴─▶ [optional workers] ─▶ all loaded
//
//   Orchestrator (logic thread): observe() once per tick
//     └─ progress ratios + one-shot loaded-transition flags
// ```
//
// Invariants:
// - Optional loading cannot begin, and all-loaded cannot become true,
//   before must-loaded is true. `load()` enforces the must barrier
//   idempotently, so calling it without a prior `when_must_load()` still
//   loads every must asset to completion first.
// - Once resolved, a payload's `Arc` is stable for the session.
// - Every fetch settles its descriptor, success or failure, so the
//   barrier always resolves: a failed must asset surfaces as an error
//   from the barrier, a failed optional asset is logged and swallowed.
// - `must_loaded` is a success latch. A must-phase failure leaves it
//   false, holding observers in the loading phase instead of letting
//   them draw with unresolved payloads.
//
// Worker threads are detached; disposal does not cancel in-flight
// fetches.
//
//=========================================================================

//=== Submodules ==========================================================

mod fetcher;

pub use fetcher::{AssetDescriptor, AssetFetcher, AssetKind, AssetPayload};

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

//=== External Crates =====================================================

use crossbeam_channel::unbounded;
use log::{debug, error, warn};
use thiserror::Error;

//=== AssetError ==========================================================

/// Failures of the loading protocol.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    /// A fetcher reported a failure for one descriptor.
    #[error("failed to fetch asset `{key}` from {url}: {reason}")]
    Fetch { key: String, url: String, reason: String },

    /// One or more startup-gating assets failed; the barrier resolved but
    /// startup cannot proceed.
    #[error("must asset(s) failed to load: {keys:?}")]
    MustAssetsFailed { keys: Vec<String> },
}

//=== Manifest ============================================================

/// The application's descriptor table: logical name → descriptor.
pub type AssetManifest = HashMap<String, AssetDescriptor>;

//=== LoadObservation =====================================================

/// Per-tick view of the load state, taken by the single authorized
/// consumer (the orchestrator).
///
/// The `*_just_*` fields are one-shot: reading an observation clears
/// them, so a transition is reported on exactly one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadObservation {
    pub must_loaded: bool,
    pub all_loaded: bool,
    pub must_progress: f64,
    pub optional_progress: f64,

    //--- One-Shot Transition Flags ----------------------------------------
    pub must_just_loaded: bool,
    pub started_loading_all: bool,
    pub all_just_loaded: bool,
}

//=== Internal State ======================================================

enum LoadPhase {
    Must,
    Optional,
}

struct AssetSlot {
    descriptor: AssetDescriptor,
    payload: Option<Arc<AssetPayload>>,
    failed: bool,
}

#[derive(Default)]
struct LoadState {
    must_total: usize,
    optional_total: usize,
    must_settled: usize,
    optional_settled: usize,
    must_loaded: bool,
    all_loaded: bool,
    failed_must: Vec<String>,

    //--- One-Shot Dirty Flags ---------------------------------------------
    dirty_must_loaded: bool,
    dirty_started_load_all: bool,
    dirty_all_loaded: bool,
}

struct Inner {
    slots: Mutex<HashMap<String, AssetSlot>>,
    state: Mutex<LoadState>,
    fetcher: Arc<dyn AssetFetcher>,
}

// A poisoned lock only means a fetcher panicked mid-settle; the settled
// counters stay coherent, so recover the guard instead of propagating.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

//=== AssetManager ========================================================

/// Shared handle to one runtime's asset table and load state.
///
/// Cheap to clone; the loader thread drives [`load`](Self::load) while
/// the orchestrator polls [`observe`](Self::observe) and applications
/// dereference payloads with [`get`](Self::get). The barrier methods are
/// intended for a single loading driver per instance.
#[derive(Clone)]
pub struct AssetManager {
    inner: Arc<Inner>,
}

impl AssetManager {
    /// Builds the table from a manifest and the injected fetch seam.
    pub fn new(manifest: AssetManifest, fetcher: Arc<dyn AssetFetcher>) -> Self {
        let mut state = LoadState::default();
        let mut slots = HashMap::with_capacity(manifest.len());

        for (key, descriptor) in manifest {
            if descriptor.must {
                state.must_total += 1;
            } else {
                state.optional_total += 1;
            }
            slots.insert(key, AssetSlot { descriptor, payload: None, failed: false });
        }

        Self {
            inner: Arc::new(Inner {
                slots: Mutex::new(slots),
                state: Mutex::new(state),
                fetcher,
            }),
        }
    }

    //--- Payload Access ---------------------------------------------------

    /// Resolved payload for a logical name, if it has settled
    /// successfully. The returned `Arc` is stable for the session.
    pub fn get(&self, key: &str) -> Option<Arc<AssetPayload>> {
        lock(&self.inner.slots)
            .get(key)
            .and_then(|slot| slot.payload.clone())
    }

    //--- Barrier Operations -----------------------------------------------

    /// Blocks until every `must` descriptor has settled.
    ///
    /// Fans every pending must descriptor out to a worker thread and
    /// joins them through a channel. Idempotent: once the must phase has
    /// succeeded, later calls return immediately; after a failure, later
    /// calls report the same error without re-fetching the settled keys.
    ///
    /// # Errors
    ///
    /// [`AssetError::MustAssetsFailed`] if any must asset settled as a
    /// failure. The barrier itself still resolved, but `must_loaded`
    /// stays false: the lifecycle never reports a must phase that did
    /// not fully succeed, so startup surfaces the error instead of
    /// drawing with missing payloads.
    pub fn when_must_load(&self) -> Result<(), AssetError> {
        if lock(&self.inner.state).must_loaded {
            return Ok(());
        }

        let pending = self.pending_keys(true);
        self.run_phase(pending, LoadPhase::Must);

        let mut state = lock(&self.inner.state);
        if !state.failed_must.is_empty() {
            return Err(AssetError::MustAssetsFailed { keys: state.failed_must.clone() });
        }

        state.must_loaded = true;
        state.dirty_must_loaded = true;
        Ok(())
    }

    /// Loads everything: enforces the must barrier, then fans out the
    /// remaining descriptors.
    ///
    /// # Errors
    ///
    /// Propagates a must-phase failure; optional-phase failures are
    /// logged and swallowed (the all-loaded latch still sets, so the
    /// lifecycle can complete without the failed extras).
    pub fn load(&self) -> Result<(), AssetError> {
        if lock(&self.inner.state).all_loaded {
            return Ok(());
        }

        self.when_must_load()?;

        // The deferred phase is entered only once the barrier succeeded.
        lock(&self.inner.state).dirty_started_load_all = true;

        let pending = self.pending_keys(false);
        self.run_phase(pending, LoadPhase::Optional);

        let mut state = lock(&self.inner.state);
        state.all_loaded = true;
        state.dirty_all_loaded = true;

        Ok(())
    }

    //--- Per-Tick Observation ---------------------------------------------

    /// Takes the per-tick load observation, consuming the one-shot
    /// transition flags. Single authorized consumer: the orchestrator.
    pub fn observe(&self) -> LoadObservation {
        let mut state = lock(&self.inner.state);

        let observation = LoadObservation {
            must_loaded: state.must_loaded,
            all_loaded: state.all_loaded,
            must_progress: progress(state.must_settled, state.must_total),
            optional_progress: progress(state.optional_settled, state.optional_total),
            must_just_loaded: state.dirty_must_loaded,
            started_loading_all: state.dirty_started_load_all,
            all_just_loaded: state.dirty_all_loaded,
        };

        state.dirty_must_loaded = false;
        state.dirty_started_load_all = false;
        state.dirty_all_loaded = false;

        observation
    }

    //--- Internal Helpers -------------------------------------------------

    /// Keys of the given phase that have not settled yet.
    fn pending_keys(&self, must: bool) -> Vec<String> {
        lock(&self.inner.slots)
            .iter()
            .filter(|(_, slot)| {
                slot.descriptor.must == must && slot.payload.is_none() && !slot.failed
            })
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Fans the keys out to worker threads and blocks until every one has
    /// settled. Workers are detached; the join is the channel disconnect.
    fn run_phase(&self, keys: Vec<String>, phase: LoadPhase) {
        if keys.is_empty() {
            return;
        }

        let (tx, rx) = unbounded::<(String, Result<AssetPayload, AssetError>)>();

        for key in keys {
            let descriptor = match lock(&self.inner.slots).get(&key) {
                Some(slot) => slot.descriptor.clone(),
                None => continue,
            };

            let fetcher = Arc::clone(&self.inner.fetcher);
            let tx = tx.clone();
            thread::spawn(move || {
                let result = fetcher.fetch(&key, &descriptor);
                let _ = tx.send((key, result));
            });
        }
        drop(tx);

        while let Ok((key, result)) = rx.recv() {
            self.settle(&key, result, &phase);
        }
    }

    /// Records one fetch outcome and advances the phase counters.
    fn settle(&self, key: &str, result: Result<AssetPayload, AssetError>, phase: &LoadPhase) {
        let failed = {
            let mut slots = lock(&self.inner.slots);
            let Some(slot) = slots.get_mut(key) else {
                return;
            };

            match result {
                Ok(payload) => {
                    if payload.kind() != slot.descriptor.kind {
                        warn!(
                            "asset `{}` decoded as {:?} but was declared {:?}",
                            key,
                            payload.kind(),
                            slot.descriptor.kind
                        );
                    }
                    debug!("asset `{}` resolved ({})", key, slot.descriptor.url);
                    slot.payload = Some(Arc::new(payload));
                    false
                }
                Err(err) => {
                    error!("asset `{}` failed: {}", key, err);
                    slot.failed = true;
                    true
                }
            }
        };

        let mut state = lock(&self.inner.state);
        match phase {
            LoadPhase::Must => {
                state.must_settled += 1;
                if failed {
                    state.failed_must.push(key.to_string());
                }
            }
            LoadPhase::Optional => {
                state.optional_settled += 1;
            }
        }
    }
}

/// Settled fraction of a phase; an empty phase counts as complete.
fn progress(settled: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        settled as f64 / total as f64
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
