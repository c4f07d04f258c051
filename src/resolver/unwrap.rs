//! Which slice of a value each view kind's template receives.

use crate::core::ViewKind;
use crate::value::{Value, TYPE_KEY};

/// Data shape a template expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataShape {
    /// A bare array. `{_type, data: [...]}` wrappers are unwrapped.
    BareArray,
    /// The value as given. Charts need `type`, `labels` and `series` next to
    /// `data`, so they stay whole.
    Whole,
}

pub fn data_shape(view: &ViewKind) -> DataShape {
    match view {
        ViewKind::StatsList | ViewKind::ItemTable | ViewKind::ActionButtons | ViewKind::Array => {
            DataShape::BareArray
        }
        _ => DataShape::Whole,
    }
}

/// The inner array of a typed wrapper when the kind wants a bare array.
pub fn unwrapped_array(view: &ViewKind, value: &Value) -> Option<Value> {
    if data_shape(view) != DataShape::BareArray {
        return None;
    }
    let object = value.as_object()?;
    if !object.contains_key(TYPE_KEY) {
        return None;
    }
    object.get("data").filter(|data| data.as_array().is_some())
}

/// Data handed to the template for `view`.
pub fn unwrap_data(view: &ViewKind, value: &Value) -> Value {
    unwrapped_array(view, value).unwrap_or_else(|| value.clone())
}
