//! Engine: data ownership and public API with command application + widget
//! stepping.
//!
//! Methods:
//! - new, add_counter, add_carousel, load_manifest, prebind (resolver),
//!   update (apply inputs -> advance countdowns -> advance counters)
//!
//! The engine owns no timers and performs no I/O: hosts call update() with
//! elapsed seconds and the input events collected since the previous call.
//! Calls run to completion, so all shared state is only ever touched between
//! updates, the same no-race discipline the page event loop provides.

use crate::binding::{BindingTable, SlotKey, TargetResolver};
use crate::carousel::{Carousel, CarouselSpec};
use crate::config::Config;
use crate::counter::{Counter, CounterSpec, StepOutcome};
use crate::gesture::{classify_swipe, SwipeDirection};
use crate::geometry::Viewport;
use crate::ids::{CarouselId, CounterId, IdAllocator};
use crate::inputs::{CarouselCommand, Inputs, PageEvent};
use crate::manifest::PageManifest;
use crate::outputs::{Change, CoreEvent, Outputs};
use serde::{Deserialize, Serialize};
use vitrine_api_core::Value;

/// Ids assigned while loading a manifest, in declaration order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ManifestIds {
    pub counters: Vec<CounterId>,
    pub carousels: Vec<CarouselId>,
}

/// Engine (core) with host-agnostic handle type fixed to String.
#[derive(Debug)]
pub struct Engine {
    // Owned data
    cfg: Config,
    ids: IdAllocator,
    counters: Vec<Counter>,
    carousels: Vec<Carousel>,
    viewport: Viewport,

    // Systems
    binds: BindingTable,

    // Per-tick outputs
    outputs: Outputs,

    // Re-check counter visibility on the next update (page load, scroll,
    // resize, geometry updates).
    check_visibility: bool,
}

impl Engine {
    /// Create a new engine with the given config.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            counters: Vec::new(),
            carousels: Vec::new(),
            viewport: Viewport::default(),
            binds: BindingTable::new(),
            outputs: Outputs::default(),
            check_visibility: true,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Register a counter, returning its CounterId.
    pub fn add_counter(&mut self, spec: CounterSpec) -> CounterId {
        let id = self.ids.alloc_counter();
        self.counters.push(Counter::new(id, spec));
        self.check_visibility = true;
        id
    }

    /// Register a carousel, returning its CarouselId. Its first slide is
    /// shown and rotation starts on the next update.
    pub fn add_carousel(&mut self, spec: CarouselSpec) -> CarouselId {
        let id = self.ids.alloc_carousel();
        self.carousels.push(Carousel::new(id, spec, &self.cfg));
        id
    }

    /// Register every widget a validated manifest declares.
    pub fn load_manifest(&mut self, manifest: PageManifest) -> ManifestIds {
        let mut ids = ManifestIds::default();
        for spec in manifest.counters {
            ids.counters.push(self.add_counter(spec));
        }
        for spec in manifest.carousels {
            ids.carousels.push(self.add_carousel(spec));
        }
        ids
    }

    /// One-time binding against a provided resolver.
    /// Iterates every slot of every widget and resolves canonical slot
    /// paths into host handles.
    pub fn prebind(&mut self, resolver: &mut dyn TargetResolver) {
        let mut keys: Vec<SlotKey> = Vec::new();
        for c in &self.counters {
            keys.push(SlotKey::CounterValue(c.id));
            keys.push(SlotKey::CounterAnimate(c.id));
        }
        for c in &self.carousels {
            for i in 0..c.slide_count() as u32 {
                keys.push(SlotKey::Slide(c.id, i));
            }
            for i in 0..c.dot_count() as u32 {
                keys.push(SlotKey::Dot(c.id, i));
            }
        }
        for key in keys {
            if let Some(handle) = resolver.resolve(&key.path().to_string()) {
                self.binds.upsert(key, handle);
            }
        }
    }

    /// Public accessor for a carousel's current slide index.
    pub fn carousel_index(&self, carousel: CarouselId) -> Option<usize> {
        self.carousels
            .iter()
            .find(|c| c.id == carousel)
            .map(|c| c.current())
    }

    /// Public accessor for whether a carousel's rotation is paused.
    pub fn carousel_paused(&self, carousel: CarouselId) -> Option<bool> {
        self.carousels
            .iter()
            .find(|c| c.id == carousel)
            .map(|c| c.rotation.is_paused())
    }

    /// Public accessor for the value a counter display currently shows.
    pub fn counter_display(&self, counter: CounterId) -> Option<i64> {
        self.counters
            .iter()
            .find(|c| c.id == counter)
            .map(|c| c.displayed())
    }

    /// Public accessor for whether a counter's one-shot latch has fired.
    pub fn counter_started(&self, counter: CounterId) -> Option<bool> {
        self.counters
            .iter()
            .find(|c| c.id == counter)
            .map(|c| c.started())
    }

    /// Step the engine by dt seconds with the given inputs, producing
    /// outputs: initialize fresh carousels, apply inputs, fire due
    /// auto-rotations, latch newly visible counters, advance animations.
    pub fn update(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        let dt_ms = dt * 1000.0;
        self.outputs.clear();

        // 1) First update after registration: show slide 0.
        self.init_new_carousels();

        // 2) Page events
        for ev in inputs.page_events {
            match ev {
                PageEvent::Scrolled => self.check_visibility = true,
                PageEvent::ViewportResized { viewport } => {
                    self.viewport = viewport;
                    self.check_visibility = true;
                }
            }
        }

        // 3) Counter geometry updates
        for upd in inputs.counter_updates {
            if let Some(c) = self.counters.iter_mut().find(|c| c.id == upd.counter) {
                if let Some(rect) = upd.rect {
                    c.rect = rect;
                    self.check_visibility = true;
                }
            } else {
                log::warn!("counter update for unknown id {:?}", upd.counter);
            }
        }

        // 4) Carousel commands (manual transitions restart the countdown)
        for cmd in inputs.carousel_cmds {
            self.apply_carousel_cmd(cmd);
        }

        // 5) Auto-rotation: one advance per expired interval
        for ci in 0..self.carousels.len() {
            if self.carousels[ci].is_inert() {
                continue;
            }
            let fires = self.carousels[ci].rotation.tick(dt_ms);
            for _ in 0..fires {
                let next = self.carousels[ci].next_index();
                self.goto_slide(ci, next);
            }
        }

        // 6) Visibility checks and one-shot latching
        if self.check_visibility {
            self.check_visibility = false;
            self.latch_visible_counters();
        }

        // 7) Counter animation steps
        self.advance_counters(dt_ms);

        &self.outputs
    }

    /// Emit the initial writes for carousels registered since the last
    /// update. Zero-slide carousels are inert and stay silent.
    fn init_new_carousels(&mut self) {
        for ci in 0..self.carousels.len() {
            if !self.carousels[ci].needs_init {
                continue;
            }
            self.carousels[ci].needs_init = false;
            if self.carousels[ci].is_inert() {
                continue;
            }
            let current = self.carousels[ci].current();
            self.goto_slide(ci, current);
        }
    }

    fn apply_carousel_cmd(&mut self, cmd: CarouselCommand) {
        let (id, ci) = match self.find_carousel(&cmd) {
            Some(found) => found,
            None => return,
        };
        if self.carousels[ci].is_inert() {
            return;
        }
        match cmd {
            CarouselCommand::SelectSlide { index, .. } => {
                if index >= self.carousels[ci].slide_count() {
                    log::warn!(
                        "slide index {index} out of range for carousel {:?}",
                        id
                    );
                    return;
                }
                self.carousels[ci].rotation.restart();
                self.goto_slide(ci, index);
            }
            CarouselCommand::NextSlide { .. } => {
                self.carousels[ci].rotation.restart();
                let next = self.carousels[ci].next_index();
                self.goto_slide(ci, next);
            }
            CarouselCommand::PrevSlide { .. } => {
                self.carousels[ci].rotation.restart();
                let prev = self.carousels[ci].prev_index();
                self.goto_slide(ci, prev);
            }
            CarouselCommand::PointerEntered { .. } => {
                if !self.carousels[ci].rotation.is_paused() {
                    self.carousels[ci].rotation.pause();
                    self.outputs
                        .push_event(CoreEvent::RotationPaused { carousel: id });
                }
            }
            CarouselCommand::PointerLeft { .. } => {
                let was_paused = self.carousels[ci].rotation.is_paused();
                self.carousels[ci].rotation.restart();
                if was_paused {
                    self.outputs
                        .push_event(CoreEvent::RotationResumed { carousel: id });
                }
            }
            CarouselCommand::TouchStarted { x, .. } => {
                self.carousels[ci].touch_start_x = Some(x);
            }
            CarouselCommand::TouchEnded { x, .. } => {
                let Some(start_x) = self.carousels[ci].touch_start_x.take() else {
                    return;
                };
                let displacement = x - start_x;
                match classify_swipe(displacement, self.cfg.swipe_threshold_px) {
                    Some(SwipeDirection::Left) => {
                        self.carousels[ci].rotation.restart();
                        let next = self.carousels[ci].next_index();
                        self.goto_slide(ci, next);
                    }
                    Some(SwipeDirection::Right) => {
                        self.carousels[ci].rotation.restart();
                        let prev = self.carousels[ci].prev_index();
                        self.goto_slide(ci, prev);
                    }
                    None => {}
                }
            }
        }
    }

    fn find_carousel(&self, cmd: &CarouselCommand) -> Option<(CarouselId, usize)> {
        let id = match cmd {
            CarouselCommand::SelectSlide { carousel, .. }
            | CarouselCommand::NextSlide { carousel }
            | CarouselCommand::PrevSlide { carousel }
            | CarouselCommand::PointerEntered { carousel }
            | CarouselCommand::PointerLeft { carousel }
            | CarouselCommand::TouchStarted { carousel, .. }
            | CarouselCommand::TouchEnded { carousel, .. } => *carousel,
        };
        match self.carousels.iter().position(|c| c.id == id) {
            Some(ci) => Some((id, ci)),
            None => {
                log::warn!("command for unknown carousel {:?}", id);
                None
            }
        }
    }

    /// The single transition primitive: show `index`, hide the rest, mirror
    /// the dots, update the current index.
    fn goto_slide(&mut self, ci: usize, index: usize) {
        let (id, from, slides, dots) = {
            let c = &self.carousels[ci];
            (c.id, c.current(), c.slide_count(), c.dot_count())
        };
        debug_assert!(index < slides);
        self.carousels[ci].set_current(index);
        for i in 0..slides {
            self.push_write(SlotKey::Slide(id, i as u32), Value::Bool(i == index));
        }
        for i in 0..dots {
            self.push_write(SlotKey::Dot(id, i as u32), Value::Bool(i == index));
        }
        if from != index {
            log::debug!("carousel {:?} slide {from} -> {index}", id);
            self.outputs.push_event(CoreEvent::SlideChanged {
                carousel: id,
                from,
                to: index,
            });
        }
    }

    /// Latch every not-yet-started counter whose box is fully inside the
    /// viewport.
    fn latch_visible_counters(&mut self) {
        let viewport = self.viewport;
        let mut latched: Vec<CounterId> = Vec::new();
        for c in &mut self.counters {
            if !c.started() && c.rect.fully_within(&viewport) && c.latch() {
                latched.push(c.id);
            }
        }
        for id in latched {
            log::debug!("counter {:?} latched", id);
            self.push_write(SlotKey::CounterAnimate(id), Value::Bool(true));
            self.outputs
                .push_event(CoreEvent::CounterStarted { counter: id });
        }
    }

    fn advance_counters(&mut self, dt_ms: f32) {
        let cfg = self.cfg.clone();
        let mut results: Vec<(CounterId, StepOutcome)> = Vec::new();
        for c in &mut self.counters {
            let outcome = c.advance(dt_ms, &cfg);
            if outcome != StepOutcome::Idle {
                results.push((c.id, outcome));
            }
        }
        for (id, outcome) in results {
            match outcome {
                StepOutcome::Running(value) => {
                    self.push_write(SlotKey::CounterValue(id), Value::Int(value));
                }
                StepOutcome::Finished(value) => {
                    self.push_write(SlotKey::CounterValue(id), Value::Int(value));
                    self.outputs.push_event(CoreEvent::CounterFinished {
                        counter: id,
                        value,
                    });
                }
                StepOutcome::Idle => {}
            }
        }
    }

    /// Emit one change, keyed by the resolved handle when a binding exists,
    /// else by the canonical slot path.
    fn push_write(&mut self, key: SlotKey, value: Value) {
        let path = key.path();
        let resolved = match self.binds.get(key) {
            Some(row) => row.handle.clone(),
            None => path.to_string(),
        };
        self.outputs.push_change(Change {
            key: resolved,
            path,
            value,
        });
    }
}
