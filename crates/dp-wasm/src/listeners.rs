//! Document-level mouse listeners feeding the pad.
//!
//! The three capture listeners are created once and added or removed as a
//! set, mirroring the pad's capture flag.

use crate::DomPad;
use crate::dom::js_error;
use dp_core::PadError;
use dp_editor::Signal;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, MouseEvent};

/// Listener registration call needed to follow the capture flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Add,
    Remove,
}

/// Whether the listener set is currently registered.
///
/// Kept apart from the DOM calls so a repeated begin never adds a second
/// copy of the listeners.
#[derive(Debug, Default)]
struct Registration {
    attached: bool,
}

impl Registration {
    /// The change that brings the registration in line with `capturing`.
    fn plan(&self, capturing: bool) -> Option<Change> {
        match (self.attached, capturing) {
            (false, true) => Some(Change::Add),
            (true, false) => Some(Change::Remove),
            _ => None,
        }
    }

    fn commit(&mut self, change: Change) {
        self.attached = change == Change::Add;
    }
}

pub struct CaptureListeners {
    target: EventTarget,
    handlers: SmallVec<[(Signal, Closure<dyn FnMut(MouseEvent)>); 3]>,
    registration: Registration,
}

impl CaptureListeners {
    pub fn new(target: EventTarget, pad: &Rc<RefCell<DomPad>>) -> Self {
        let handlers = Signal::ALL
            .iter()
            .map(|&signal| {
                let pad = Rc::clone(pad);
                let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                    let input = signal.event(
                        f64::from(event.client_x()),
                        f64::from(event.client_y()),
                        event.buttons(),
                    );
                    let Ok(mut pad) = pad.try_borrow_mut() else {
                        log::warn!("dropped {} while pad is busy", signal.event_type());
                        return;
                    };
                    if let Err(err) = pad.handle(&input) {
                        log::error!("{} handler failed: {err}", signal.event_type());
                    }
                });
                (signal, closure)
            })
            .collect();

        Self {
            target,
            handlers,
            registration: Registration::default(),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.registration.attached
    }

    /// Add all handlers. No-op if already attached.
    pub fn attach(&mut self) -> Result<(), PadError> {
        self.sync(true)
    }

    /// Remove all handlers. No-op if not attached.
    pub fn detach(&mut self) -> Result<(), PadError> {
        self.sync(false)
    }

    /// Attach or detach to match the pad's capture flag.
    pub fn sync(&mut self, capturing: bool) -> Result<(), PadError> {
        let Some(change) = self.registration.plan(capturing) else {
            return Ok(());
        };
        for (signal, closure) in &self.handlers {
            let callback = closure.as_ref().unchecked_ref();
            match change {
                Change::Add => self
                    .target
                    .add_event_listener_with_callback(signal.event_type(), callback),
                Change::Remove => self
                    .target
                    .remove_event_listener_with_callback(signal.event_type(), callback),
            }
            .map_err(js_error)?;
        }
        self.registration.commit(change);
        log::debug!("capture listeners {change:?}");
        Ok(())
    }
}

impl Drop for CaptureListeners {
    fn drop(&mut self) {
        // Closures are freed with `self`; the document must not keep calling them
        if let Err(err) = self.detach() {
            log::warn!("failed to remove capture listeners: {err}");
        }
    }
}
