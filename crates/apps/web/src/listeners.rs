use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, MouseEvent};

/// Mouse or pointer listener that is removed when the guard is dropped.
pub struct MouseListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

impl MouseListener {
    /// `event` is a `MouseEvent` type such as `"click"`, or a pointer event
    /// (`PointerEvent` extends `MouseEvent`).
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(MouseEvent) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for MouseListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
