//! Loading a prediction into an animation.

use super::adapter::adapt;
use super::animation::AnimationController;
use crate::models::DriftSeries;
use crate::source::PredictionRepository;

/// Fetch once from `repo` and adapt the result. Never fails: provider errors
/// yield the fallback series.
pub async fn load_series<R>(repo: &R) -> DriftSeries
where
    R: PredictionRepository + ?Sized,
{
    log::info!("Loading prediction from {}", repo.describe());
    adapt(repo.fetch_prediction().await)
}

/// Fetch, adapt and hand the series to `controller`.
///
/// The controller lock is not held while the fetch is pending; a response
/// arriving after teardown is dropped by the controller.
pub async fn load_into<R>(controller: &AnimationController, repo: &R) -> DriftSeries
where
    R: PredictionRepository + ?Sized,
{
    let series = load_series(repo).await;
    controller.load(series.clone());
    series
}
