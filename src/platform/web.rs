//! Browser event listeners and the animation-frame loop

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

use crate::GameError;

struct Registration {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

/// Owns every listener closure it registers so they can all be removed.
///
/// Dropping the set without calling `remove_all` leaves the listeners
/// attached but with freed closures, so owners call `remove_all` on teardown.
#[derive(Default)]
pub struct ListenerSet {
    registrations: Vec<Registration>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<T>(
        &mut self,
        target: &T,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<(), GameError>
    where
        T: AsRef<EventTarget>,
    {
        let target = target.as_ref().clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.registrations.push(Registration {
            target,
            event,
            closure,
        });
        Ok(())
    }

    /// Detach everything. Safe to call repeatedly.
    pub fn remove_all(&mut self) {
        for reg in self.registrations.drain(..) {
            let _ = reg
                .target
                .remove_event_listener_with_callback(reg.event, reg.closure.as_ref().unchecked_ref());
        }
    }
}

type FrameClosure = Closure<dyn FnMut(f64)>;

/// requestAnimationFrame loop that can be cancelled.
///
/// The closure re-schedules itself through a shared slot; `stop` cancels the
/// pending frame and empties the slot, which breaks the Rc cycle.
pub struct AnimationLoop {
    slot: Rc<RefCell<Option<FrameClosure>>>,
    handle: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, GameError> {
        let window = web_sys::window().ok_or_else(|| GameError::Js("no window".into()))?;
        let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let slot_inner = slot.clone();
        let handle_inner = handle.clone();
        let window_inner = window.clone();
        *slot.borrow_mut() = Some(Closure::new(move |time: f64| {
            handle_inner.set(None);
            on_frame(time);
            // `stop` may have run inside on_frame
            if let Some(closure) = slot_inner.borrow().as_ref() {
                match window_inner.request_animation_frame(closure.as_ref().unchecked_ref()) {
                    Ok(id) => handle_inner.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
                }
            }
        }));

        let id = {
            let borrowed = slot.borrow();
            let closure = borrowed
                .as_ref()
                .ok_or_else(|| GameError::Js("frame closure missing".into()))?;
            window.request_animation_frame(closure.as_ref().unchecked_ref())?
        };
        handle.set(Some(id));
        Ok(Self { slot, handle })
    }

    pub fn is_running(&self) -> bool {
        self.slot
            .try_borrow()
            .map(|slot| slot.is_some())
            .unwrap_or(true)
    }

    /// Cancel the pending frame and release the closure. Idempotent.
    pub fn stop(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Dropping the closure mid-frame is fine: wasm-bindgen defers the
        // free until the current invocation returns.
        if let Ok(mut slot) = self.slot.try_borrow_mut() {
            slot.take();
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
