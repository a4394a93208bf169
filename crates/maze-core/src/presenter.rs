//! Presentation surface driven by the controller.

use std::sync::Arc;

use maze_model::{Dimension, DisplayTier};

/// UI collaborator that renders controller transitions.
///
/// Methods take `&self`; implementations use interior mutability so one
/// presenter can be shared with whatever hosts the controller.
pub trait Presenter: Send + Sync {
    fn show_field_error(&self, field: Dimension, message: &str);

    fn hide_field_error(&self, field: Dimension);

    /// Show the normalized value of an accepted field (`5.9` is shown as `5`).
    fn set_field_value(&self, field: Dimension, value: u32);

    fn set_loading(&self, loading: bool);

    /// Write `text` to the output area. `None` keeps the current tier.
    fn render_output(&self, text: &str, tier: Option<DisplayTier>);
}

impl<P: Presenter + ?Sized> Presenter for &P {
    fn show_field_error(&self, field: Dimension, message: &str) {
        (**self).show_field_error(field, message);
    }

    fn hide_field_error(&self, field: Dimension) {
        (**self).hide_field_error(field);
    }

    fn set_field_value(&self, field: Dimension, value: u32) {
        (**self).set_field_value(field, value);
    }

    fn set_loading(&self, loading: bool) {
        (**self).set_loading(loading);
    }

    fn render_output(&self, text: &str, tier: Option<DisplayTier>) {
        (**self).render_output(text, tier);
    }
}

impl<P: Presenter + ?Sized> Presenter for Arc<P> {
    fn show_field_error(&self, field: Dimension, message: &str) {
        (**self).show_field_error(field, message);
    }

    fn hide_field_error(&self, field: Dimension) {
        (**self).hide_field_error(field);
    }

    fn set_field_value(&self, field: Dimension, value: u32) {
        (**self).set_field_value(field, value);
    }

    fn set_loading(&self, loading: bool) {
        (**self).set_loading(loading);
    }

    fn render_output(&self, text: &str, tier: Option<DisplayTier>) {
        (**self).render_output(text, tier);
    }
}
