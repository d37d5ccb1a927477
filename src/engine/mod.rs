use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::CloudConfig;
use crate::error::Result;
use crate::layout::CloudLayout;
use crate::model::LabelSet;
use crate::motion::scheduler::{RotationPhase, RotationScheduler};
use crate::motion::showcase::{Showcase, ShowcaseEvent};
use crate::render::projection::{project_galaxy, project_sphere, ProjectedPosition, RotationState};
use crate::render::transition::Tween;
use crate::render::{CloudVariant, RenderItem, RenderState};
use crate::route::{Route, Router};

/// Who put the current focus there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSource {
    Pointer,
    Showcase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focus {
    pub label: String,
    pub source: FocusSource,
}

/// The cloud engine: Labels → Layout → (Scheduler, Showcase) → Projection → Tween
///
/// Single-threaded and driven entirely by `frame(now)` calls with a
/// monotonic timestamp. Every timer belongs to this instance, so dropping or
/// shutting the engine down leaves nothing scheduled.
pub struct CloudEngine {
    config: CloudConfig,
    layout: Arc<CloudLayout>,
    router: Router,
    scheduler: RotationScheduler,
    showcase: Showcase,
    focus: Option<Focus>,
    tween: Tween,
    /// Positions drawn on the previous frame, by layout index
    last_drawn: Vec<ProjectedPosition>,
    /// Showcase countdown should (re)start on the next idle frame
    arm_showcase: bool,
}

impl CloudEngine {
    /// Validate `config` and start with an empty label set.
    pub fn new(config: CloudConfig) -> Result<Self> {
        config.validate()?;
        let empty = LabelSet::empty();
        let layout = CloudLayout::build(&empty, &config.style, &config.sphere, &config.galaxy)?;
        let router = Router::new(config.category.clone(), &empty);
        let scheduler = RotationScheduler::new(config.motion.clone());
        let showcase = Showcase::new(config.showcase.clone(), StdRng::from_entropy());

        log::debug!(
            "cloud engine created ({:?}, category {:?}, showcase {})",
            config.variant,
            config.category,
            if config.showcase.enabled { "on" } else { "off" }
        );

        Ok(Self {
            config,
            layout: Arc::new(layout),
            router,
            scheduler,
            showcase,
            focus: None,
            tween: Tween::idle(),
            last_drawn: Vec::new(),
            arm_showcase: true,
        })
    }

    /// Seed the showcase picker, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.showcase = Showcase::seeded(self.config.showcase.clone(), seed);
        self
    }

    /// Convenience: `new` followed by `set_labels`.
    pub fn with_labels(config: CloudConfig, set: LabelSet) -> Result<Self> {
        let mut engine = Self::new(config)?;
        engine.set_labels(set)?;
        Ok(engine)
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    pub fn variant(&self) -> CloudVariant {
        self.config.variant
    }

    /// Replace the label set. Returns `false` when `set` has the same
    /// fingerprint as the current one and the derived layout was reused.
    ///
    /// A real change cancels every timer and drops any focus. The rotation
    /// angle is kept.
    pub fn set_labels(&mut self, set: LabelSet) -> Result<bool> {
        if set.fingerprint() == self.layout.fingerprint() && set.len() == self.layout.len() {
            log::trace!("label set unchanged, layout reused");
            return Ok(false);
        }

        let layout = CloudLayout::build(&set, &self.config.style, &self.config.sphere, &self.config.galaxy)?;
        self.router = Router::new(self.config.category.clone(), &set);
        self.layout = Arc::new(layout);
        self.reset_motion();
        self.last_drawn.clear();

        log::debug!("label set replaced: {} labels", set.len());
        Ok(true)
    }

    /// Shared handle to the current derived layout.
    pub fn layout(&self) -> Arc<CloudLayout> {
        Arc::clone(&self.layout)
    }

    pub fn focused(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    pub fn phase(&self) -> RotationPhase {
        self.scheduler.phase()
    }

    pub fn rotation(&self) -> RotationState {
        self.scheduler.rotation()
    }

    /// Pointer (or keyboard) focus on `label`. Unknown labels are ignored and
    /// return `false`. Moving straight from one label to another hands focus
    /// over without passing through the cooldown.
    pub fn pointer_enter(&mut self, label: &str, now: Duration) -> bool {
        if self.layout.get(label).is_none() {
            log::debug!("focus request for unknown label {:?} ignored", label);
            return false;
        }
        self.showcase.cancel();
        self.set_focus(label, FocusSource::Pointer, now);
        true
    }

    /// Pointer left the focused label (or the cloud).
    pub fn pointer_leave(&mut self, now: Duration) {
        if matches!(&self.focus, Some(f) if f.source == FocusSource::Pointer) {
            self.clear_focus(now);
        }
    }

    /// Route for `label`, if it belongs to the current set.
    pub fn activate(&self, label: &str) -> Option<Route> {
        let route = self.router.route_for(label);
        match &route {
            Some(r) => log::debug!("activate {:?} → {}", label, r),
            None => log::debug!("activate for unknown label {:?} ignored", label),
        }
        route
    }

    /// Advance to `now` and produce the frame's render state.
    pub fn frame(&mut self, now: Duration) -> RenderState {
        if self.scheduler.advance(now) {
            self.arm_showcase = true;
        }

        let idle = self.scheduler.phase() == RotationPhase::IdleRotating && self.focus.is_none();
        if self.arm_showcase && idle {
            self.showcase.arm(now);
            self.arm_showcase = false;
        }

        let showcase_focus = matches!(&self.focus, Some(f) if f.source == FocusSource::Showcase);
        if idle || showcase_focus {
            if let Some(event) = self.showcase.poll(now, self.layout.len()) {
                self.on_showcase(event, now);
            }
        }

        let mut positions = self.project();
        self.tween.apply(&mut positions, now);
        self.last_drawn.clone_from(&positions);

        self.render_state(positions)
    }

    /// Cancel every timer and drop focus. The engine stays usable.
    pub fn shutdown(&mut self) {
        self.reset_motion();
        log::debug!("cloud engine shut down");
    }

    // ── internals ──

    fn set_focus(&mut self, label: &str, source: FocusSource, now: Duration) {
        let changed = self.focus.as_ref().map_or(true, |f| f.label != label);
        self.focus = Some(Focus {
            label: label.to_string(),
            source,
        });
        self.scheduler.focus(now);
        if changed {
            log::trace!("focus → {:?} ({:?})", label, source);
            self.tween
                .start(self.last_drawn.clone(), now, self.config.variant.focus_transition());
        }
    }

    fn clear_focus(&mut self, now: Duration) {
        if let Some(f) = self.focus.take() {
            log::trace!("focus released from {:?}", f.label);
            self.scheduler.release(now);
            self.tween
                .start(self.last_drawn.clone(), now, self.config.variant.idle_transition());
        }
    }

    fn on_showcase(&mut self, event: ShowcaseEvent, now: Duration) {
        match event {
            ShowcaseEvent::Spotlight(rank) => {
                let Some(style) = self.layout.styles().get(rank) else {
                    log::trace!("stale showcase rank {} ignored", rank);
                    return;
                };
                let label = style.label.clone();
                self.set_focus(&label, FocusSource::Showcase, now);
            }
            ShowcaseEvent::Release => {
                if matches!(&self.focus, Some(f) if f.source == FocusSource::Showcase) {
                    self.clear_focus(now);
                }
            }
        }
    }

    fn reset_motion(&mut self) {
        self.scheduler.cancel_timers();
        self.showcase.cancel();
        self.tween.cancel();
        self.focus = None;
        self.arm_showcase = true;
    }

    fn project(&self) -> Vec<ProjectedPosition> {
        let focus = self.focus.as_ref().and_then(|f| self.layout.get(&f.label));
        let rotation = self.scheduler.rotation();
        let radius = self.layout.radius();

        self.layout
            .styles()
            .iter()
            .map(|style| match self.config.variant {
                CloudVariant::Sphere => {
                    project_sphere(style, radius, &rotation, focus, &self.config.sphere)
                }
                CloudVariant::Galaxy => project_galaxy(style, focus, &self.config.galaxy),
            })
            .collect()
    }

    fn render_state(&self, positions: Vec<ProjectedPosition>) -> RenderState {
        let mut items: Vec<RenderItem> = self
            .layout
            .styles()
            .iter()
            .zip(positions)
            .map(|(style, position)| RenderItem {
                label: style.label.clone(),
                weight: style.weight,
                rank: style.rank,
                font_size_rem: style.font_size_rem,
                padding: style.padding,
                color: style.color,
                href: self
                    .router
                    .route_for(&style.label)
                    .map(|r| r.path())
                    .unwrap_or_default(),
                position,
            })
            .collect();

        // Back-to-front; the focused label carries the top z-index
        items.sort_by(|a, b| {
            a.position
                .z_index
                .cmp(&b.position.z_index)
                .then(a.position.depth.total_cmp(&b.position.depth))
        });

        let focused = self.focus.as_ref().map(|f| f.label.clone());
        let transition = if focused.is_some() {
            self.config.variant.focus_transition()
        } else {
            self.config.variant.idle_transition()
        };

        RenderState {
            variant: self.config.variant,
            empty_message: items.is_empty().then(|| self.config.empty_message.clone()),
            items,
            transition,
            phase: self.scheduler.phase(),
            rotation: self.scheduler.rotation(),
            focused,
        }
    }
}

impl Drop for CloudEngine {
    fn drop(&mut self) {
        self.reset_motion();
        log::debug!("cloud engine dropped ({} labels)", self.layout.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn abc() -> LabelSet {
        LabelSet::new([("A", 10.0), ("B", 5.0), ("C", 1.0)]).unwrap()
    }

    fn many(n: usize) -> LabelSet {
        LabelSet::new((0..n).map(|i| (format!("tag{i:02}"), (n - i) as f32))).unwrap()
    }

    #[test]
    fn test_empty_input_renders_message() {
        let mut engine = CloudEngine::new(CloudConfig::default()).unwrap();
        let state = engine.frame(ms(0));
        assert!(state.is_empty());
        assert_eq!(state.empty_message.as_deref(), Some("No items found."));
        assert!(!engine.pointer_enter("anything", ms(10)));
        assert_eq!(engine.phase(), RotationPhase::IdleRotating);
    }

    #[test]
    fn test_single_label_is_visible() {
        let set = LabelSet::new([("Solo", 5.0)]).unwrap();
        let mut engine = CloudEngine::with_labels(CloudConfig::default(), set).unwrap();
        let state = engine.frame(ms(0));
        assert_eq!(state.items.len(), 1);
        assert!(state.empty_message.is_none());
        let solo = &state.items[0];
        assert!(solo.position.opacity > 0.0);
        assert!(solo.position.scale > 0.0);
        assert_eq!(solo.href, "/keywords/solo");
    }

    #[test]
    fn test_direct_handoff_keeps_one_focus() {
        let mut engine = CloudEngine::with_labels(CloudConfig::default(), abc()).unwrap();
        engine.frame(ms(0));
        assert!(engine.pointer_enter("B", ms(100)));
        engine.frame(ms(116));
        assert!(engine.pointer_enter("C", ms(200)));
        let state = engine.frame(ms(1200));

        assert_eq!(state.focused.as_deref(), Some("C"));
        assert_eq!(state.phase, RotationPhase::FocusedPaused);
        assert_eq!(state.items.iter().filter(|i| i.position.focused).count(), 1);
        assert_eq!(state.items.last().unwrap().label, "C");
        assert_eq!(state.focused_item().unwrap().label, "C");
    }

    #[test]
    fn test_rotation_resumes_without_jump() {
        let mut engine = CloudEngine::with_labels(CloudConfig::default(), abc()).unwrap();
        for i in 0..=60 {
            engine.frame(ms(i * 16));
        }
        engine.pointer_enter("A", ms(1000));
        engine.frame(ms(1000));
        let frozen = engine.rotation();

        engine.pointer_leave(ms(1200));
        assert_eq!(engine.phase(), RotationPhase::CooldownBeforeResume);
        engine.frame(ms(2000));
        assert_eq!(engine.rotation().angle_x, frozen.angle_x);

        let state = engine.frame(ms(2700));
        assert_eq!(state.phase, RotationPhase::IdleRotating);
        assert_eq!(state.rotation.angle_x, frozen.angle_x);
        assert_eq!(state.rotation.angle_y, frozen.angle_y);

        engine.frame(ms(2716));
        let step = engine.rotation().angle_x - frozen.angle_x;
        assert!(step > 0.0 && step < 0.01, "step {step}");
    }

    #[test]
    fn test_focus_moves_label_to_front() {
        let mut engine = CloudEngine::with_labels(CloudConfig::default(), abc()).unwrap();
        engine.frame(ms(0));
        engine.pointer_enter("B", ms(10));
        // Past the 0.8s focus transition
        let state = engine.frame(ms(2000));
        let b = state.item("B").unwrap();
        assert!(b.position.focused);
        assert_eq!(b.position.opacity, 1.0);
        assert!(b.position.screen_y.abs() < 1e-3);
        assert_eq!(state.transition, CloudVariant::Sphere.focus_transition());
    }

    #[test]
    fn test_focus_change_is_tweened() {
        let mut engine = CloudEngine::with_labels(CloudConfig::default(), abc()).unwrap();
        let before = engine.frame(ms(0)).item("C").unwrap().position;
        engine.pointer_enter("C", ms(0));
        let target = engine.frame(ms(5000)).item("C").unwrap().position;

        let mut engine = CloudEngine::with_labels(CloudConfig::default(), abc()).unwrap();
        engine.frame(ms(0));
        engine.pointer_enter("C", ms(0));
        let mid = engine.frame(ms(200)).item("C").unwrap().position;
        let lo = before.screen_x.min(target.screen_x) - 1e-3;
        let hi = before.screen_x.max(target.screen_x) + 1e-3;
        assert!(mid.screen_x >= lo && mid.screen_x <= hi);
        assert!(mid.screen_x != target.screen_x || before.screen_x == target.screen_x);
    }

    #[test]
    fn test_unknown_label_is_noop() {
        let mut engine = CloudEngine::with_labels(CloudConfig::default(), abc()).unwrap();
        engine.frame(ms(0));
        assert!(!engine.pointer_enter("Z", ms(10)));
        assert!(engine.focused().is_none());
        assert_eq!(engine.phase(), RotationPhase::IdleRotating);
        assert_eq!(engine.activate("Z"), None);
    }

    #[test]
    fn test_activate_routes() {
        let set = LabelSet::new([("User Interface", 75.0), ("design", 100.0)]).unwrap();
        let engine = CloudEngine::with_labels(CloudConfig::default(), set).unwrap();
        assert_eq!(engine.activate("User Interface").unwrap().path(), "/keywords/user-interface");
        assert_eq!(engine.activate("design").unwrap().path(), "/keywords/design");
    }

    #[test]
    fn test_memoised_layout() {
        let mut engine = CloudEngine::with_labels(CloudConfig::default(), abc()).unwrap();
        let first = engine.layout();
        assert!(!engine.set_labels(abc()).unwrap());
        assert!(Arc::ptr_eq(&first, &engine.layout()));

        let changed = LabelSet::new([("A", 10.0), ("B", 6.0), ("C", 1.0)]).unwrap();
        assert!(engine.set_labels(changed).unwrap());
        assert!(!Arc::ptr_eq(&first, &engine.layout()));
    }

    #[test]
    fn test_new_labels_drop_focus_and_keep_angle() {
        let mut engine = CloudEngine::with_labels(CloudConfig::default(), abc()).unwrap();
        for i in 0..30 {
            engine.frame(ms(i * 16));
        }
        engine.pointer_enter("A", ms(500));
        let angle = engine.rotation();
        engine.set_labels(many(5)).unwrap();
        assert!(engine.focused().is_none());
        assert_eq!(engine.phase(), RotationPhase::IdleRotating);
        assert_eq!(engine.rotation().angle_x, angle.angle_x);
    }

    #[test]
    fn test_showcase_spotlights_top_k() {
        let cfg = CloudConfig::tag_galaxy();
        let mut engine = CloudEngine::with_labels(cfg, many(30)).unwrap().with_seed(11);
        engine.frame(ms(0));
        assert!(engine.frame(ms(2999)).focused.is_none());

        // One spotlight every 3s: 1.5s hold, then 1.5s cooldown
        let mut t = 3000;
        for _ in 0..5 {
            let state = engine.frame(ms(t));
            let focused = state.focused_item().expect("showcase focus");
            assert!(focused.rank < 10, "rank {}", focused.rank);
            assert_eq!(engine.focused().unwrap().source, FocusSource::Showcase);
            assert_eq!(state.phase, RotationPhase::FocusedPaused);

            let state = engine.frame(ms(t + 1500));
            assert!(state.focused.is_none());
            assert_eq!(state.phase, RotationPhase::CooldownBeforeResume);

            let state = engine.frame(ms(t + 2999));
            assert!(state.focused.is_none());

            t += 3000;
        }
    }

    #[test]
    fn test_showcase_restarts_countdown_after_pointer() {
        let cfg = CloudConfig::tag_galaxy();
        let mut engine = CloudEngine::with_labels(cfg, many(12)).unwrap().with_seed(8);
        engine.frame(ms(0));
        assert!(engine.pointer_enter("tag03", ms(1000)));
        engine.frame(ms(1000));
        engine.pointer_leave(ms(2000));

        // Resumes at 3.5s, a fresh 3s countdown ends at 6.5s
        let state = engine.frame(ms(3500));
        assert_eq!(state.phase, RotationPhase::IdleRotating);
        assert!(engine.frame(ms(6499)).focused.is_none());
        engine.frame(ms(6500));
        assert_eq!(engine.focused().unwrap().source, FocusSource::Showcase);
    }

    #[test]
    fn test_pointer_preempts_showcase() {
        let cfg = CloudConfig::tag_galaxy();
        let mut engine = CloudEngine::with_labels(cfg, many(12)).unwrap().with_seed(5);
        engine.frame(ms(0));
        engine.frame(ms(3000));
        assert_eq!(engine.focused().unwrap().source, FocusSource::Showcase);

        assert!(engine.pointer_enter("tag11", ms(3100)));
        // The showcase hold would have expired at 4.5s
        let state = engine.frame(ms(6000));
        assert_eq!(state.focused.as_deref(), Some("tag11"));
        assert_eq!(engine.focused().unwrap().source, FocusSource::Pointer);

        engine.pointer_leave(ms(6000));
        engine.frame(ms(7500));
        assert_eq!(engine.phase(), RotationPhase::IdleRotating);
        assert!(engine.focused().is_none());
    }

    #[test]
    fn test_keyword_sphere_never_showcases() {
        let mut engine = CloudEngine::with_labels(CloudConfig::default(), many(20)).unwrap();
        for i in 0..=600 {
            let state = engine.frame(ms(i * 16));
            assert!(state.focused.is_none());
        }
    }

    #[test]
    fn test_items_carry_weight_badge() {
        let set = LabelSet::new([("rust", 12.0), ("wasm", 2.5)]).unwrap();
        let mut engine = CloudEngine::with_labels(CloudConfig::tag_galaxy(), set).unwrap();
        let state = engine.frame(ms(0));
        assert_eq!(state.item("rust").unwrap().weight_badge(), "12");
        assert_eq!(state.item("wasm").unwrap().weight_badge(), "2.5");
    }

    #[test]
    fn test_galaxy_scatters_unfocused() {
        let cfg = CloudConfig::tag_galaxy();
        let mut engine = CloudEngine::with_labels(cfg, abc()).unwrap().with_seed(1);
        let idle = engine.frame(ms(0));
        assert!(idle.items.iter().all(|i| i.position.z_index == 0));

        engine.pointer_enter("A", ms(100));
        let state = engine.frame(ms(2000));
        assert_eq!(state.item("A").unwrap().position.z_index, 20);
        assert_eq!(state.item("B").unwrap().position.z_index, 10);
        assert_eq!(state.item("C").unwrap().position.z_index, 10);
        assert_eq!(state.items.last().unwrap().label, "A");
    }

    #[test]
    fn test_shutdown_cancels_everything() {
        let mut engine = CloudEngine::with_labels(CloudConfig::tag_galaxy(), many(8)).unwrap();
        engine.frame(ms(0));
        engine.pointer_enter("tag00", ms(10));
        engine.pointer_leave(ms(20));
        engine.shutdown();
        assert_eq!(engine.phase(), RotationPhase::IdleRotating);
        assert!(engine.focused().is_none());
    }
}
