use gtk::prelude::*;
use gtk4 as gtk;

/// Pointer-motion listener that lives exactly as long as one drag.
///
/// The controller is attached when the value is created and removed again
/// when it is dropped, so every way out of a drag releases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerChange {
    Attach,
    Release,
    Keep,
}

/// What to do with the subscription once a message has been handled.
pub fn pointer_change(attached: bool, dragging: bool) -> PointerChange {
    match (attached, dragging) {
        (false, true) => PointerChange::Attach,
        (true, false) => PointerChange::Release,
        _ => PointerChange::Keep,
    }
}

pub struct PointerSubscription {
    widget: gtk::Widget,
    controller: gtk::EventControllerMotion,
}

impl PointerSubscription {
    pub fn attach(
        widget: &impl IsA<gtk::Widget>,
        on_move: impl Fn(f64) + 'static,
        on_leave: impl Fn() + 'static,
    ) -> Self {
        let controller = gtk::EventControllerMotion::new();
        controller.connect_motion(move |_, x, _| on_move(x));
        controller.connect_leave(move |_| on_leave());

        let widget = widget.clone().upcast::<gtk::Widget>();
        widget.add_controller(controller.clone());
        log::debug!("Pointer subscription attached");

        Self { widget, controller }
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        self.widget.remove_controller(&self.controller);
        log::debug!("Pointer subscription released");
    }
}
