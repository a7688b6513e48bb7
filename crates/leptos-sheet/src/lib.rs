//! Leptos Bottom Sheet
//!
//! Expandable, swipe-to-dismiss bottom sheet for Leptos using pointer events.
//! The gesture and animation logic lives in [`SheetMachine`]; this module only
//! feeds it pointer samples and animation frames.

mod geometry;
mod machine;
mod tween;

pub use geometry::{SheetGeometry, SheetHeight, AUTO_HEIGHT_RATIO, DEFAULT_BOTTOM_INSET, DEFAULT_TOP_INSET};
pub use machine::{
    DragThresholds, Release, Rest, SheetConfig, SheetEvent, SheetMachine, SheetPhase, DEFAULT_ANIMATION_MS,
};
pub use tween::Tween;

use leptos::ev;
use leptos::leptos_dom::helpers::{request_animation_frame, window_event_listener};
use leptos::prelude::*;
use log::debug;

/// Fallback when the window size is unknown
const FALLBACK_VIEWPORT_PX: f64 = 800.0;

/// Reactive handle to one sheet
#[derive(Clone, Copy)]
pub struct SheetHandle {
    machine: RwSignal<SheetMachine>,
    /// True while an animation-frame loop is scheduled
    running: StoredValue<bool>,
    on_event: Callback<SheetEvent>,
}

pub fn create_sheet(config: SheetConfig, on_event: Callback<SheetEvent>) -> SheetHandle {
    SheetHandle {
        machine: RwSignal::new(SheetMachine::new(config, viewport_height())),
        running: StoredValue::new(false),
        on_event,
    }
}

impl SheetHandle {
    pub fn phase(&self) -> SheetPhase {
        self.machine.with(|m| m.phase())
    }

    pub fn is_visible(&self) -> bool {
        self.machine.with(|m| m.is_visible())
    }

    pub fn is_expanded(&self) -> bool {
        self.machine.with(|m| m.is_expanded())
    }

    pub fn is_dragging(&self) -> bool {
        self.machine.with(|m| m.is_dragging())
    }

    pub fn can_expand(&self) -> bool {
        self.machine.with(|m| m.can_expand())
    }

    /// Translation in px from the collapsed rest position
    pub fn offset(&self) -> f64 {
        self.machine.with(|m| m.offset())
    }

    pub fn backdrop_opacity(&self) -> f64 {
        self.machine.with(|m| m.backdrop_opacity())
    }

    /// Height of the sheet panel (the expanded height)
    pub fn panel_height(&self) -> f64 {
        self.machine.with(|m| m.geometry().expanded_height)
    }

    /// Space above the collapsed sheet
    pub fn collapsed_top(&self) -> f64 {
        self.machine.with(|m| {
            let g = m.geometry();
            g.viewport_height - g.bottom_inset - g.collapsed_height
        })
    }

    pub fn open(&self) {
        self.machine.update(|m| m.open());
        self.animate();
    }

    pub fn close(&self) {
        self.machine.update(|m| m.close());
        self.animate();
    }

    pub fn expand(&self) {
        self.machine.update(|m| m.expand());
        self.animate();
    }

    pub fn collapse(&self) {
        self.machine.update(|m| m.collapse());
        self.animate();
    }

    pub fn backdrop_press(&self) {
        self.machine.update(|m| m.backdrop_press());
        self.animate();
    }

    pub fn resize(&self, viewport_height: f64) {
        self.machine.update(|m| m.resize(viewport_height));
    }

    /// Start the frame loop unless one is already scheduled
    fn animate(&self) {
        if self.running.get_value() || !self.machine.with_untracked(|m| m.is_animating()) {
            return;
        }
        self.running.set_value(true);
        schedule_frame(*self, now_ms());
    }

    fn dispatch(&self, events: Vec<SheetEvent>) {
        for event in events {
            debug!("[sheet] {:?}", event);
            self.on_event.run(event);
        }
    }
}

fn schedule_frame(handle: SheetHandle, last: f64) {
    request_animation_frame(move || {
        let now = now_ms();
        // Signal gone means the sheet was unmounted; drop the loop silently
        let Some(events) = handle.machine.try_update(|m| m.tick(now - last)) else {
            return;
        };
        let still_animating = handle.machine.with_untracked(|m| m.is_animating());
        if !still_animating {
            handle.running.set_value(false);
        }
        handle.dispatch(events);
        if still_animating {
            schedule_frame(handle, now);
        }
    });
}

/// Create pointerdown handler for the sheet's drag handle
pub fn make_on_pointerdown(handle: SheetHandle) -> impl Fn(web_sys::PointerEvent) + Copy + 'static {
    move |ev: web_sys::PointerEvent| {
        if !ev.is_primary() {
            return;
        }
        let started = handle
            .machine
            .try_update(|m| m.drag_start(ev.client_y() as f64, ev.time_stamp()))
            .unwrap_or(false);
        if started {
            ev.prevent_default();
        }
    }
}

/// Bind window-level pointermove / pointerup / pointercancel handlers for the lifetime of
/// the current owner, so drags keep tracking outside the handle.
pub fn bind_global_pointer(handle: SheetHandle) {
    let on_move = window_event_listener(ev::pointermove, move |ev| {
        if handle.machine.with_untracked(|m| m.is_dragging()) {
            handle.machine.update(|m| m.drag_move(ev.client_y() as f64, ev.time_stamp()));
        }
    });

    let release = move |y: f64, t: f64| {
        if handle.machine.with_untracked(|m| m.is_dragging()) {
            let decision = handle.machine.try_update(|m| m.drag_end(y, t));
            debug!("[sheet] drag released: {:?}", decision);
            handle.animate();
        }
    };
    let on_up = window_event_listener(ev::pointerup, move |ev| {
        release(ev.client_y() as f64, ev.time_stamp());
    });
    let on_cancel = window_event_listener(ev::pointercancel, move |_| {
        if handle.machine.with_untracked(|m| m.is_dragging()) {
            let decision = handle.machine.try_update(|m| m.drag_cancel());
            debug!("[sheet] drag cancelled: {:?}", decision);
            handle.animate();
        }
    });
    let on_resize = window_event_listener(ev::resize, move |_| {
        handle.resize(viewport_height());
    });

    on_cleanup(move || {
        on_move.remove();
        on_up.remove();
        on_cancel.remove();
        on_resize.remove();
    });
}

fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_PX)
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
