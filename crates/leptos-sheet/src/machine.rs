//! Bottom Sheet State Machine
//!
//! Closed -> Opening -> OpenCollapsed <-> OpenExpanded -> Closing -> Closed
//!
//! Drag state lives inside the open variant, so a closed sheet can never be
//! "dragging". The machine is advanced by `tick(dt_ms)`; events are returned
//! from `tick` once an animation has settled.

use log::debug;

use crate::geometry::{SheetGeometry, SheetHeight, DEFAULT_BOTTOM_INSET, DEFAULT_TOP_INSET};
use crate::tween::Tween;

/// Default open/close/snap duration
pub const DEFAULT_ANIMATION_MS: f64 = 300.0;

/// Release thresholds. Units are px and px/ms; positive is downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragThresholds {
    pub distance: f64,
    pub velocity: f64,
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self {
            distance: 100.0,
            velocity: 0.5,
        }
    }
}

/// Construction-time options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetConfig {
    pub height: SheetHeight,
    pub close_on_backdrop_press: bool,
    pub enable_swipe_down: bool,
    pub enable_drag_to_expand: bool,
    pub animation_duration_ms: f64,
    pub top_inset: f64,
    pub bottom_inset: f64,
    pub thresholds: DragThresholds,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            height: SheetHeight::Auto,
            close_on_backdrop_press: true,
            enable_swipe_down: true,
            enable_drag_to_expand: true,
            animation_duration_ms: DEFAULT_ANIMATION_MS,
            top_inset: DEFAULT_TOP_INSET,
            bottom_inset: DEFAULT_BOTTOM_INSET,
            thresholds: DragThresholds::default(),
        }
    }
}

/// Coarse state, as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetPhase {
    Closed,
    Opening,
    OpenCollapsed,
    OpenExpanded,
    Closing,
}

/// Emitted by `tick` after the matching animation settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetEvent {
    Opened,
    Expanded,
    Collapsed,
    /// Host should run its close callback
    Closed,
}

/// Decision taken when a drag is released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Close,
    Collapse,
    Expand,
    SnapBack,
    /// Sheet was not being dragged
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rest {
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    y: f64,
    t_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    /// Offset the sheet was at when the finger went down
    origin: f64,
    start_y: f64,
    /// Clamped displacement from `origin`
    displacement: f64,
    prev: Sample,
    last: Sample,
}

impl Drag {
    /// px/ms over the last two samples
    fn velocity(&self) -> f64 {
        let dt = self.last.t_ms - self.prev.t_ms;
        if dt > 0.0 {
            (self.last.y - self.prev.y) / dt
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Still,
    Dragging(Drag),
    /// Animating towards the rest offset
    Settling(Tween),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Closed,
    Opening { offset: Tween, backdrop: Tween },
    /// `rest` is where the sheet is heading; `announced` is the last rest the
    /// host was told about. They differ only while a transition is unsettled.
    Open { rest: Rest, announced: Rest, motion: Motion },
    Closing { offset: Tween, backdrop: Tween },
}

const OPEN_STILL: State = State::Open {
    rest: Rest::Collapsed,
    announced: Rest::Collapsed,
    motion: Motion::Still,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetMachine {
    config: SheetConfig,
    geometry: SheetGeometry,
    state: State,
}

impl SheetMachine {
    pub fn new(config: SheetConfig, viewport_height: f64) -> Self {
        Self {
            geometry: SheetGeometry::new(viewport_height, config.height, config.top_inset, config.bottom_inset),
            config,
            state: State::Closed,
        }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn geometry(&self) -> &SheetGeometry {
        &self.geometry
    }

    /// Recompute sizes after a viewport change
    pub fn resize(&mut self, viewport_height: f64) {
        self.geometry = SheetGeometry::new(
            viewport_height,
            self.config.height,
            self.config.top_inset,
            self.config.bottom_inset,
        );
        if let State::Open { rest: Rest::Expanded, .. } = self.state {
            if !self.geometry.can_expand() {
                self.state = OPEN_STILL;
            }
        }
    }

    pub fn phase(&self) -> SheetPhase {
        match self.state {
            State::Closed => SheetPhase::Closed,
            State::Opening { .. } => SheetPhase::Opening,
            State::Open { rest: Rest::Collapsed, .. } => SheetPhase::OpenCollapsed,
            State::Open { rest: Rest::Expanded, .. } => SheetPhase::OpenExpanded,
            State::Closing { .. } => SheetPhase::Closing,
        }
    }

    /// Whether the host should keep the sheet mounted
    pub fn is_visible(&self) -> bool {
        self.state != State::Closed
    }

    pub fn is_expanded(&self) -> bool {
        self.phase() == SheetPhase::OpenExpanded
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Open { motion: Motion::Dragging(_), .. })
    }

    /// Current drag displacement, 0 when not dragging
    pub fn drag_offset(&self) -> f64 {
        match self.state {
            State::Open { motion: Motion::Dragging(drag), .. } => drag.displacement,
            _ => 0.0,
        }
    }

    /// True while `tick` has work to do
    pub fn is_animating(&self) -> bool {
        matches!(
            self.state,
            State::Opening { .. } | State::Closing { .. } | State::Open { motion: Motion::Settling(_), .. }
        )
    }

    /// Current vertical translation (see [`crate::geometry`])
    pub fn offset(&self) -> f64 {
        match self.state {
            State::Closed => self.geometry.hidden_offset(),
            State::Opening { offset, .. } | State::Closing { offset, .. } => offset.value(),
            State::Open { rest, motion, .. } => match motion {
                Motion::Still => self.rest_offset(rest),
                Motion::Dragging(drag) => drag.origin + drag.displacement,
                Motion::Settling(tween) => tween.value(),
            },
        }
    }

    pub fn backdrop_opacity(&self) -> f64 {
        match self.state {
            State::Closed => 0.0,
            State::Opening { backdrop, .. } | State::Closing { backdrop, .. } => backdrop.value(),
            State::Open { .. } => 1.0,
        }
    }

    pub fn can_expand(&self) -> bool {
        self.geometry.can_expand()
    }

    fn drag_enabled(&self) -> bool {
        self.config.enable_swipe_down || self.config.enable_drag_to_expand
    }

    fn rest_offset(&self, rest: Rest) -> f64 {
        match rest {
            Rest::Collapsed => self.geometry.collapsed_offset(),
            Rest::Expanded => self.geometry.expanded_offset(),
        }
    }

    fn duration(&self) -> f64 {
        self.config.animation_duration_ms
    }

    // ========================
    // Explicit controls
    // ========================

    pub fn open(&mut self) {
        let (from, opacity) = match self.state {
            State::Closed => (self.geometry.hidden_offset(), 0.0),
            // Re-open from wherever the close animation got to
            State::Closing { offset, backdrop } => (offset.value(), backdrop.value()),
            _ => return,
        };
        debug!("[sheet] open from {:.1}", from);
        self.state = State::Opening {
            offset: Tween::new(from, self.geometry.collapsed_offset(), self.duration()),
            backdrop: Tween::new(opacity, 1.0, self.duration()),
        };
    }

    pub fn close(&mut self) {
        let opacity = match self.state {
            State::Closed | State::Closing { .. } => return,
            State::Opening { backdrop, .. } => backdrop.value(),
            State::Open { .. } => 1.0,
        };
        let from = self.offset();
        debug!("[sheet] close from {:.1}", from);
        self.state = State::Closing {
            offset: Tween::new(from, self.geometry.hidden_offset(), self.duration()),
            backdrop: Tween::new(opacity, 0.0, self.duration()),
        };
    }

    pub fn expand(&mut self) {
        if !self.geometry.can_expand() {
            return;
        }
        if let State::Open { rest: Rest::Collapsed, .. } = self.state {
            self.settle_to(Rest::Expanded);
        }
    }

    pub fn collapse(&mut self) {
        if let State::Open { rest: Rest::Expanded, .. } = self.state {
            self.settle_to(Rest::Collapsed);
        }
    }

    /// Tap on the dimmed area behind the sheet
    pub fn backdrop_press(&mut self) {
        if self.config.close_on_backdrop_press {
            self.close();
        }
    }

    fn settle_to(&mut self, rest: Rest) {
        let announced = match self.state {
            State::Open { announced, .. } => announced,
            _ => Rest::Collapsed,
        };
        let tween = Tween::new(self.offset(), self.rest_offset(rest), self.duration());
        self.state = State::Open {
            rest,
            announced,
            motion: Motion::Settling(tween),
        };
    }

    // ========================
    // Gestures
    // ========================

    /// Finger down on the handle. Takes over any running animation at its
    /// current value. Returns false when the sheet ignores drags.
    pub fn drag_start(&mut self, y: f64, t_ms: f64) -> bool {
        if !self.drag_enabled() {
            return false;
        }
        let (rest, announced) = match self.state {
            State::Closed => return false,
            State::Open { rest, announced, .. } => (rest, announced),
            // Grabbing a sheet mid open/close leaves it open where it is
            State::Opening { .. } | State::Closing { .. } => (Rest::Collapsed, Rest::Collapsed),
        };
        let sample = Sample { y, t_ms };
        self.state = State::Open {
            rest,
            announced,
            motion: Motion::Dragging(Drag {
                origin: self.offset(),
                start_y: y,
                displacement: 0.0,
                prev: sample,
                last: sample,
            }),
        };
        true
    }

    pub fn drag_move(&mut self, y: f64, t_ms: f64) {
        let (min, max) = self.drag_bounds();
        if let State::Open { motion: Motion::Dragging(drag), .. } = &mut self.state {
            drag.displacement = (y - drag.start_y).clamp(min, max);
            drag.prev = drag.last;
            drag.last = Sample { y, t_ms };
        }
    }

    /// Finger up. Velocity comes from the last pointer samples.
    pub fn drag_end(&mut self, y: f64, t_ms: f64) -> Release {
        self.drag_move(y, t_ms);
        match self.state {
            State::Open { motion: Motion::Dragging(drag), .. } => self.release(drag.displacement, drag.velocity()),
            _ => Release::Ignored,
        }
    }

    /// Gesture aborted by the browser. Returns to the rest the drag started
    /// from without judging the samples.
    pub fn drag_cancel(&mut self) -> Release {
        match self.state {
            State::Open { rest, motion: Motion::Dragging(_), .. } => {
                self.settle_to(rest);
                Release::SnapBack
            }
            _ => Release::Ignored,
        }
    }

    /// Three-way release rule: strong down, strong up, or ambiguous
    pub fn release(&mut self, displacement: f64, velocity: f64) -> Release {
        let rest = match self.state {
            State::Open { rest, motion: Motion::Dragging(_), .. } => rest,
            _ => return Release::Ignored,
        };
        let th = self.config.thresholds;
        let strong_down = displacement > th.distance || velocity > th.velocity;
        let strong_up = displacement < -th.distance || velocity < -th.velocity;

        let decision = if strong_down {
            match rest {
                Rest::Expanded => Release::Collapse,
                Rest::Collapsed if self.config.enable_swipe_down => Release::Close,
                Rest::Collapsed => Release::SnapBack,
            }
        } else if strong_up && rest == Rest::Collapsed && self.config.enable_drag_to_expand && self.geometry.can_expand() {
            Release::Expand
        } else {
            Release::SnapBack
        };
        debug!("[sheet] release d={:.1} v={:.2} -> {:?}", displacement, velocity, decision);

        match decision {
            Release::Close => self.close(),
            Release::Collapse => self.settle_to(Rest::Collapsed),
            Release::Expand => self.settle_to(Rest::Expanded),
            Release::SnapBack => self.settle_to(rest),
            Release::Ignored => {}
        }
        decision
    }

    /// Allowed displacement range for the current drag
    fn drag_bounds(&self) -> (f64, f64) {
        let State::Open { rest, motion: Motion::Dragging(drag), .. } = self.state else {
            return (0.0, 0.0);
        };
        let top = if self.config.enable_drag_to_expand && self.geometry.can_expand() {
            self.geometry.expanded_offset()
        } else {
            self.rest_offset(rest).min(drag.origin)
        };
        let bottom = self.geometry.hidden_offset().max(drag.origin);
        (top - drag.origin, bottom - drag.origin)
    }

    // ========================
    // Time
    // ========================

    /// Advance running animations by `dt_ms`
    pub fn tick(&mut self, dt_ms: f64) -> Vec<SheetEvent> {
        let mut events = Vec::new();
        match &mut self.state {
            State::Opening { offset, backdrop } => {
                backdrop.advance(dt_ms);
                if offset.advance(dt_ms) {
                    self.state = OPEN_STILL;
                    events.push(SheetEvent::Opened);
                }
            }
            State::Closing { offset, backdrop } => {
                backdrop.advance(dt_ms);
                if offset.advance(dt_ms) {
                    self.state = State::Closed;
                    events.push(SheetEvent::Closed);
                }
            }
            State::Open { rest, announced, motion: Motion::Settling(tween) } => {
                if tween.advance(dt_ms) {
                    let rest = *rest;
                    if rest != *announced {
                        events.push(match rest {
                            Rest::Collapsed => SheetEvent::Collapsed,
                            Rest::Expanded => SheetEvent::Expanded,
                        });
                    }
                    self.state = State::Open { rest, announced: rest, motion: Motion::Still };
                }
            }
            State::Closed | State::Open { .. } => {}
        }
        events
    }

    /// Run animations to completion; returns everything emitted
    pub fn finish_animations(&mut self) -> Vec<SheetEvent> {
        let mut events = Vec::new();
        while self.is_animating() {
            events.extend(self.tick(self.duration().max(1.0)));
        }
        events
    }
}
