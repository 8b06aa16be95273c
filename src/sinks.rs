//! Display sink interface implemented by the UI layer.
//!
//! The binding core only ever calls these setters; it never reads sink state.

use tracing::trace;

use crate::mutation::{ColorToken, DisplayMutation, MutationOp, SinkId};

/// One display element. Setters a widget does not support are no-ops.
pub trait DisplaySink {
    fn set_text(&mut self, _text: &str) {}
    fn set_color(&mut self, _color: ColorToken) {}
    fn set_rgb(&mut self, _r: f64, _g: f64, _b: f64) {}
    fn set_numeric_value(&mut self, _value: f64) {}
    fn set_visible(&mut self, _visible: bool) {}
}

/// Lookup from [`SinkId`] to the live widget, owned by the UI thread.
pub trait SinkRegistry {
    fn sink_mut(&mut self, id: SinkId) -> Option<&mut dyn DisplaySink>;
}

/// Apply one mutation. Unknown targets are skipped.
pub fn apply_mutation<R: SinkRegistry + ?Sized>(registry: &mut R, mutation: DisplayMutation) {
    let DisplayMutation { target, op } = mutation;
    let Some(sink) = registry.sink_mut(target) else {
        trace!(?target, "no sink registered for mutation");
        return;
    };
    match op {
        MutationOp::SetText(text) => sink.set_text(&text),
        MutationOp::SetColor(color) => sink.set_color(color),
        MutationOp::SetRgb { r, g, b } => sink.set_rgb(r, g, b),
        MutationOp::SetNumeric(v) => sink.set_numeric_value(v),
        MutationOp::SetVisible(v) => sink.set_visible(v),
    }
}
