#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use sargassum_drift::source::{LocalRepository, PredictedCoordinate, PredictionResponse};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Every variable the configuration layer reads, unset.
pub const CLEAN_DRIFT_ENV: &[(&str, Option<&str>)] = &[
    ("DRIFT_SOURCE_TYPE", None),
    ("DRIFT_SOURCE_URL", None),
    ("DRIFT_RENDER_SEED", None),
    ("HOST", None),
    ("PORT", None),
];

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Cancún coordinates from the coastal registry.
pub const CANCUN: (f64, f64) = (21.1619, -86.8515);

/// A provider payload in upstream order: arrival at Cancún listed first,
/// open-ocean origin last.
pub fn cancun_arrival_points() -> Vec<(f64, f64, Option<f64>)> {
    vec![
        (CANCUN.0, CANCUN.1, Some(40.0)),
        (21.25, -86.55, Some(32.0)),
        (21.35, -86.25, Some(18.0)),
        (21.45, -85.95, Some(10.0)),
    ]
}

pub fn response_from(points: &[(f64, f64, Option<f64>)]) -> PredictionResponse {
    PredictionResponse {
        predicted_coordinates: points
            .iter()
            .map(|&(lat, lon, area)| PredictedCoordinate::new(lat, lon, area))
            .collect(),
        iterations_count: points.len() as u32,
    }
}

pub fn cancun_repository() -> LocalRepository {
    LocalRepository::with_points(&cancun_arrival_points())
}
