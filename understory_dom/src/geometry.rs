// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric clamping and self-excluding hit testing.

use kurbo::Point;

use crate::Dom;

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: with inverted bounds the lower
/// bound wins, which is what constraint code expects when a dragged box is
/// larger than its container.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value <= min {
        min
    } else if value >= max {
        max
    } else {
        value
    }
}

/// Topmost element under `point`, ignoring `hide`.
///
/// `hide` (typically the element being dragged, which sits right under the
/// pointer) is made invisible for the duration of the query. Its previous
/// inline `visibility` is restored afterwards.
pub fn find_below<H: Dom>(dom: &mut H, point: Point, hide: Option<&H::Element>) -> Option<H::Element> {
    let Some(el) = hide else {
        return dom.element_from_point(point);
    };
    let previous = dom.inline_style(el, "visibility");
    dom.set_style(el, "visibility", "hidden");
    let below = dom.element_from_point(point);
    match previous {
        Some(value) if !value.is_empty() => dom.set_style(el, "visibility", &value),
        _ => dom.remove_style(el, "visibility"),
    }
    below
}
