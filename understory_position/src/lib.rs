// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_position --heading-base-level=0

//! Understory Position: place a floating element next to a reference element.
//!
//! [`position`] is a one-shot placement for popovers, menus and tooltips. The
//! target is assumed to be absolutely positioned already; `position` writes
//! its inline `top`/`left` in document coordinates.
//!
//! ## Placement rules
//!
//! - `Left`/`Right`: the target sits `gap` away from the reference's side. If
//!   the requested side overflows the viewport, the opposite side is used when
//!   it fits. A target that would start left of the viewport always goes right,
//!   where it can at least be scrolled to.
//! - `Top`/`Bottom`: the target sits `gap` above or below. The side is never
//!   re-chosen.
//! - Alignment on the perpendicular axis defaults to [`Align::Top`] for side
//!   placements and [`Align::Left`] for vertical ones.
//! - If the result runs past the bottom of the viewport (keeping an 8 unit
//!   margin), it is nudged up by the overflow, unless that would push it above
//!   the viewport top.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_dom::Dom;
//! use understory_position::{position, Align, Location, PositionOptions};
//! use understory_test_dom::TestDom;
//!
//! let mut dom = TestDom::new(Size::new(800.0, 600.0));
//! let body = dom.body();
//! let button = dom.add(&body, "button", Rect::new(100.0, 100.0, 200.0, 130.0));
//! let menu = dom.add(&body, "div", Rect::new(0.0, 0.0, 60.0, 40.0));
//!
//! let opts = PositionOptions::at(Location::Bottom).with_align(Align::Center);
//! let top_left = position(&mut dom, &menu, &button, &opts).unwrap();
//! assert_eq!((top_left.x, top_left.y), (120.0, 138.0));
//! assert_eq!(dom.style(&menu, "left"), Some("120px"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod options;

use alloc::format;
use alloc::string::String;

use kurbo::Point;
use understory_dom::Dom;

pub use options::{Align, DEFAULT_GAP, Location, PositionOptions};

/// Bottom margin kept between a nudged target and the viewport edge.
const BOTTOM_MARGIN: f64 = 8.0;

/// Configuration errors raised by [`position`] and option parsing.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PositionError {
    /// The location keyword is not one of `left`, `right`, `top`, `bottom`.
    #[error("unknown position location `{0}`")]
    UnknownLocation(String),
    /// The alignment does not apply to the location's axis.
    #[error("alignment `{align}` cannot be used with location `{at}`")]
    MismatchedAlign {
        /// Requested location.
        at: Location,
        /// Offending alignment.
        align: Align,
    },
}

/// Places `target` next to `reference`.
///
/// Returns the chosen top-left corner in viewport coordinates. The inline
/// `top`/`left` written to `target` are that point plus the window scroll.
pub fn position<H: Dom>(
    dom: &mut H,
    target: &H::Element,
    reference: &H::Element,
    options: &PositionOptions,
) -> Result<Point, PositionError> {
    let align = options.resolved_align()?;
    let gap = options.gap;

    let size = dom.bounding_rect(target).size();
    let refr = dom.bounding_rect(reference);
    let viewport = dom.viewport_size();

    let (left, mut top) = if options.at.is_horizontal() {
        let left_on_right = refr.x1 + gap;
        let left_on_left = refr.x0 - gap - size.width;
        let fits_left = left_on_left >= 0.0;
        let fits_right = left_on_right + size.width <= viewport.width;
        let left = match options.at {
            Location::Right if !fits_right && fits_left => left_on_left,
            Location::Left if fits_left => left_on_left,
            _ => left_on_right,
        };
        let top = match align {
            Align::Bottom => refr.y1,
            Align::Center => refr.y0 + refr.height() / 2.0 - size.height / 2.0,
            _ => refr.y0,
        };
        (left, top)
    } else {
        let top = match options.at {
            Location::Top => refr.y0 - gap - size.height,
            _ => refr.y1 + gap,
        };
        let left = match align {
            Align::Right => refr.x1 - size.width,
            Align::Center => refr.x0 + refr.width() / 2.0 - size.width / 2.0,
            _ => refr.x0,
        };
        (left, top)
    };

    let overflow = top + size.height + BOTTOM_MARGIN - viewport.height;
    if overflow > 0.0 && top > overflow {
        top -= overflow;
    }

    tracing::debug!(at = %options.at, %align, left, top, "positioned element");

    let scroll = dom.scroll_offset();
    dom.set_style(target, "top", &format!("{}px", top + scroll.y));
    dom.set_style(target, "left", &format!("{}px", left + scroll.x));
    Ok(Point::new(left, top))
}
