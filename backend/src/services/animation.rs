//! Trajectory animation controller.
//!
//! Owns the loaded drift series, the step position and the play timer, and
//! re-renders the surface on every change. The controller is a cheap
//! cloneable handle; all clones drive the same animation.
//!
//! # Lifecycle
//!
//! ```text
//! load ──► paused ──play──► playing ──pause──► paused
//!              ▲                │
//!              └──── load ──────┘        teardown ──► torn down (terminal)
//! ```
//!
//! While playing, a tokio task advances one step per period and wraps to
//! step 0 after the last one. At most one such task exists at a time.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::statistics::{compute_statistics, DerivedStatistics};
use crate::config::DriftConfig;
use crate::models::{CoastalRegistry, DateRange, DriftSeries, FilterState, SiteFilter};
use crate::render::{fit_to_filtered, RenderOptions, RenderSurface, SceneComposer};

/// Default delay between two animation steps.
pub const STEP_PERIOD: Duration = Duration::from_millis(1500);

/// Observable animation position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimationState {
    pub current_step: usize,
    pub total_steps: usize,
    pub is_animating: bool,
}

impl AnimationState {
    pub fn is_at_end(&self) -> bool {
        self.total_steps > 0 && self.current_step == self.total_steps - 1
    }
}

struct Inner {
    series: DriftSeries,
    state: AnimationState,
    filter: FilterState,
    statistics: DerivedStatistics,
    registry: Arc<CoastalRegistry>,
    composer: SceneComposer,
    surface: Box<dyn RenderSurface>,
    timer: Option<JoinHandle<()>>,
    period: Duration,
    torn_down: bool,
}

impl Inner {
    fn render(&mut self) {
        let Inner {
            composer,
            surface,
            series,
            filter,
            state,
            ..
        } = self;
        composer.render_step(surface.as_mut(), series, &filter.site, state.current_step);
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }

    fn step_forward(&mut self) -> bool {
        if self.state.total_steps == 0 || self.state.current_step + 1 >= self.state.total_steps {
            return false;
        }
        self.state.current_step += 1;
        log::debug!(
            "Step {}/{}",
            self.state.current_step + 1,
            self.state.total_steps
        );
        self.render();
        true
    }

    fn advance_or_wrap(&mut self) {
        if self.state.total_steps == 0 {
            return;
        }
        if !self.step_forward() {
            self.state.current_step = 0;
            log::debug!("Animation wrapped to the first step");
            self.render();
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

/// Handle to a trajectory animation bound to one render surface.
#[derive(Clone)]
pub struct AnimationController {
    inner: Arc<Mutex<Inner>>,
}

impl AnimationController {
    pub fn new(
        surface: Box<dyn RenderSurface>,
        registry: Arc<CoastalRegistry>,
        options: RenderOptions,
    ) -> Self {
        let composer = SceneComposer::new(Arc::clone(&registry), options);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                series: DriftSeries::empty(),
                state: AnimationState::default(),
                filter: FilterState::default(),
                statistics: DerivedStatistics {
                    monitored_site_count: registry.len(),
                    ..Default::default()
                },
                registry,
                composer,
                surface,
                timer: None,
                period: STEP_PERIOD,
                torn_down: false,
            })),
        }
    }

    /// Controller using the `[render]` options and `[animation]` step period
    /// of `config`.
    pub fn from_config(
        surface: Box<dyn RenderSurface>,
        registry: Arc<CoastalRegistry>,
        config: &DriftConfig,
    ) -> Self {
        Self::new(surface, registry, RenderOptions::from(&config.render))
            .with_period(config.animation.step_period())
    }

    /// Use a different step period for subsequent `play` calls.
    pub fn with_period(self, period: Duration) -> Self {
        self.inner.lock().period = period;
        self
    }

    /// Replace the series, reset to step 0 (paused) and recompute statistics.
    ///
    /// Ignored after [`teardown`](Self::teardown).
    pub fn load(&self, series: DriftSeries) {
        let mut inner = self.inner.lock();
        if inner.torn_down {
            log::debug!("Ignoring series loaded after teardown");
            return;
        }
        inner.cancel_timer();

        inner.statistics = compute_statistics(series.samples(), &inner.registry);
        inner.state = AnimationState {
            current_step: 0,
            total_steps: series.len(),
            is_animating: false,
        };
        inner.series = series;

        let Inner {
            surface,
            series,
            filter,
            ..
        } = &mut *inner;
        fit_to_filtered(surface.as_mut(), series, &filter.site);
        inner.render();
    }

    /// Move one step forward; no-op on the last step.
    pub fn step_forward(&self) -> bool {
        let mut inner = self.inner.lock();
        !inner.torn_down && inner.step_forward()
    }

    /// Move one step back; no-op on step 0.
    pub fn step_backward(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.torn_down || inner.state.current_step == 0 {
            return false;
        }
        inner.state.current_step -= 1;
        log::debug!(
            "Step {}/{}",
            inner.state.current_step + 1,
            inner.state.total_steps
        );
        inner.render();
        true
    }

    /// One timer tick: advance, wrapping to step 0 after the last step.
    pub fn tick(&self) {
        let mut inner = self.inner.lock();
        if !inner.torn_down {
            inner.advance_or_wrap();
        }
    }

    /// Start periodic advancement.
    ///
    /// Must be called from within a tokio runtime; otherwise nothing is
    /// scheduled and the controller stays paused.
    pub fn play(&self) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("Cannot start animation outside a tokio runtime: {}", e);
                return;
            }
        };

        let mut inner = self.inner.lock();
        if inner.torn_down {
            return;
        }
        inner.cancel_timer();
        inner.state.is_animating = true;

        let weak = Arc::downgrade(&self.inner);
        let period = inner.period;
        inner.timer = Some(runtime.spawn(run_timer(weak, period)));
        log::debug!("Animation playing every {:?}", period);
    }

    /// Stop periodic advancement, keeping the current step.
    pub fn pause(&self) {
        let mut inner = self.inner.lock();
        inner.cancel_timer();
        if inner.state.is_animating {
            log::debug!("Animation paused at step {}", inner.state.current_step);
        }
        inner.state.is_animating = false;
    }

    pub fn toggle(&self) {
        if self.state().is_animating {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Apply a new filter to the in-memory series, refit and re-render.
    pub fn set_filter(&self, filter: FilterState) {
        let mut inner = self.inner.lock();
        if inner.torn_down {
            return;
        }
        inner.filter = filter;
        log::debug!("Filter changed to {:?}", inner.filter.site);

        let Inner {
            surface,
            series,
            filter,
            ..
        } = &mut *inner;
        fit_to_filtered(surface.as_mut(), series, &filter.site);
        inner.render();
    }

    pub fn set_site_filter(&self, site: SiteFilter) {
        let date_range = self.inner.lock().filter.date_range;
        self.set_filter(FilterState { site, date_range });
    }

    /// Record the selected date range. Samples are undated, so nothing is re-rendered.
    pub fn set_date_range(&self, range: Option<DateRange>) {
        let mut inner = self.inner.lock();
        if !inner.torn_down {
            inner.filter.date_range = range;
        }
    }

    /// Cancel any pending timer and ignore all further mutations. Idempotent.
    pub fn teardown(&self) {
        let mut inner = self.inner.lock();
        inner.cancel_timer();
        inner.state.is_animating = false;
        if !inner.torn_down {
            log::debug!("Animation controller torn down");
        }
        inner.torn_down = true;
    }

    pub fn state(&self) -> AnimationState {
        self.inner.lock().state
    }

    pub fn statistics(&self) -> DerivedStatistics {
        self.inner.lock().statistics.clone()
    }

    pub fn filter(&self) -> FilterState {
        self.inner.lock().filter.clone()
    }

    pub fn series(&self) -> DriftSeries {
        self.inner.lock().series.clone()
    }

    /// Whether a timer task is currently attached.
    pub fn is_scheduled(&self) -> bool {
        self.inner
            .lock()
            .timer
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.lock().torn_down
    }
}

async fn run_timer(inner: Weak<Mutex<Inner>>, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let keep_going = match inner.upgrade() {
            Some(inner) => {
                let mut guard = inner.lock();
                if guard.state.is_animating && !guard.torn_down {
                    guard.advance_or_wrap();
                    true
                } else {
                    false
                }
            }
            None => false,
        };
        if !keep_going {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ConcentrationSample, GeoBounds, GeoPoint, Intensity, SeriesOrigin, Trajectory,
        TrajectoryPoint,
    };
    use crate::render::{RecordingSurface, FIT_PADDING_PX};

    fn series(n: usize) -> DriftSeries {
        let tag = "sargassum-prediction";
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|i| (21.5 - i as f64 * 0.05, -86.2 - i as f64 * 0.1))
            .collect();
        let trajectory = Trajectory {
            location: tag.to_string(),
            points: coords
                .iter()
                .map(|&(lat, lon)| TrajectoryPoint::new(lat, lon, tag))
                .collect(),
        };
        let samples = coords
            .iter()
            .map(|&(lat, lon)| ConcentrationSample {
                latitude: lat,
                longitude: lon,
                area_km2: 12.0,
                density: 30,
                intensity: Intensity::Low,
                location: tag.to_string(),
            })
            .collect();
        DriftSeries::from_parts(SeriesOrigin::Live, n as u32, vec![trajectory], samples)
    }

    fn controller() -> (AnimationController, RecordingSurface) {
        let surface = RecordingSurface::new();
        let controller = AnimationController::new(
            Box::new(surface.clone()),
            CoastalRegistry::shared(),
            RenderOptions {
                mark_affected_sites: false,
                seed: Some(9),
            },
        );
        (controller, surface)
    }

    #[test]
    fn test_load_resets_state_and_renders() {
        let (c, surface) = controller();
        c.load(series(4));

        assert_eq!(
            c.state(),
            AnimationState {
                current_step: 0,
                total_steps: 4,
                is_animating: false
            }
        );
        assert_eq!(surface.clear_count(), 1);
        assert!(surface.snapshot().last_fit.is_some());
        assert_eq!(c.statistics().total_biomass_km2, 48.0);
    }

    #[test]
    fn test_step_bounds() {
        let (c, _) = controller();
        c.load(series(3));

        assert!(!c.step_backward());
        assert!(c.step_forward());
        assert!(c.step_forward());
        assert!(!c.step_forward());
        assert_eq!(c.state().current_step, 2);
        assert!(c.state().is_at_end());
        assert!(c.step_backward());
        assert_eq!(c.state().current_step, 1);
    }

    #[test]
    fn test_tick_wraps_around() {
        let (c, _) = controller();
        c.load(series(2));
        c.tick();
        assert_eq!(c.state().current_step, 1);
        c.tick();
        assert_eq!(c.state().current_step, 0);
    }

    #[test]
    fn test_empty_series_is_inert() {
        let (c, _) = controller();
        c.load(DriftSeries::empty());
        assert!(!c.step_forward());
        assert!(!c.step_backward());
        c.tick();
        assert_eq!(c.state(), AnimationState::default());
    }

    #[test]
    fn test_play_outside_runtime_stays_paused() {
        let (c, _) = controller();
        c.load(series(3));
        c.play();
        assert!(!c.state().is_animating);
        assert!(!c.is_scheduled());
    }

    #[test]
    fn test_teardown_blocks_mutations() {
        let (c, surface) = controller();
        c.load(series(3));
        c.teardown();
        c.teardown();

        let clears = surface.clear_count();
        assert!(!c.step_forward());
        c.tick();
        c.load(series(5));
        assert_eq!(c.state().total_steps, 3);
        assert_eq!(c.state().current_step, 0);
        assert_eq!(surface.clear_count(), clears);
    }

    #[test]
    fn test_filter_change_keeps_total_steps() {
        let (c, surface) = controller();
        c.load(series(3));
        c.set_site_filter(SiteFilter::from_selection("nowhere"));

        assert_eq!(c.state().total_steps, 3);
        assert!(surface.commands().is_empty());

        c.set_site_filter(SiteFilter::All);
        assert!(!surface.commands().is_empty());
    }

    #[test]
    fn test_filter_change_refits_to_kept_steps() {
        let (c, surface) = controller();
        let s = series(4);
        let full = GeoBounds::from_points(&s.steps().iter().map(|st| st.position()).collect::<Vec<_>>());
        c.load(s.clone());
        assert_eq!(surface.snapshot().last_fit, full.map(|b| (b, FIT_PADDING_PX)));

        // Keeps steps 0 and 1 only
        c.set_site_filter(SiteFilter::Vicinity {
            center: GeoPoint::new(21.5, -86.2),
            radius_deg: 0.12,
        });
        let kept: Vec<GeoPoint> = s.steps()[..2].iter().map(|st| st.position()).collect();
        let narrowed = GeoBounds::from_points(&kept).unwrap();
        assert_eq!(surface.snapshot().last_fit, Some((narrowed, FIT_PADDING_PX)));
        assert_ne!(Some(narrowed), full);

        // Nothing passes: the viewport stays where it was
        c.set_site_filter(SiteFilter::from_selection("nowhere"));
        assert_eq!(surface.snapshot().last_fit, Some((narrowed, FIT_PADDING_PX)));
    }

    #[test]
    fn test_from_config_uses_settings() {
        let config = DriftConfig::from_toml_str(
            "[animation]\nstep_period_ms = 250\n[render]\nmark_affected_sites = true\nseed = 4\n",
        )
        .unwrap();
        let c = AnimationController::from_config(
            Box::new(RecordingSurface::new()),
            CoastalRegistry::shared(),
            &config,
        );

        let inner = c.inner.lock();
        assert_eq!(inner.period, Duration::from_millis(250));
        assert!(inner.composer.options().mark_affected_sites);
        assert_eq!(inner.composer.options().seed, Some(4));
    }

    #[test]
    fn test_date_range_is_advisory() {
        let (c, surface) = controller();
        c.load(series(3));
        let clears = surface.clear_count();
        let day = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        c.set_date_range(Some(DateRange::single_day(day)));

        assert_eq!(c.filter().date_range, Some(DateRange::single_day(day)));
        assert_eq!(surface.clear_count(), clears);
    }
}
