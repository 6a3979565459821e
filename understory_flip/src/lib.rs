// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_flip --heading-base-level=0

//! Understory FLIP: animate element reordering with First-Last-Invert-Play.
//!
//! ## Workflow
//!
//! 1) [`capture`] the elements that are about to move. Their bounding
//!    rectangles are recorded immediately ("First").
//! 2) Mutate the document: reorder, insert, resize ("Last").
//! 3) [`Capture::invert`] re-measures every element and applies a transform
//!    that puts it back where it was captured, so nothing visibly jumps.
//! 4) [`Inverted::play`] waits two animation frames, so the inverted state is
//!    painted, then clears the transform with a timed transition. The element
//!    slides from its old slot into its new one.
//!
//! Each step consumes the previous one, so a capture can only be inverted
//! once, and only an inverted set can be played.
//!
//! `play` completes `duration + 50ms` after the transition starts, at which
//! point the inline `transform` and `transition-duration` are removed. It uses
//! that fixed margin instead of `transitionend`, which is not delivered for
//! interrupted or skipped transitions.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Rect, Size};
//! use understory_dom::Dom;
//! use understory_flip::capture;
//! use understory_test_dom::TestDom;
//!
//! let mut dom = TestDom::new(Size::new(400.0, 300.0));
//! let body = dom.body();
//! let a = dom.add(&body, "li", Rect::new(0.0, 0.0, 100.0, 20.0));
//! let b = dom.add(&body, "li", Rect::new(0.0, 20.0, 100.0, 40.0));
//!
//! let first = capture(&dom, [a, b]);
//! // Swap the two rows.
//! dom.set_layout(&a, Rect::new(0.0, 20.0, 100.0, 40.0));
//! dom.set_layout(&b, Rect::new(0.0, 0.0, 100.0, 20.0));
//!
//! let inverted = first.invert(&mut dom);
//! assert_eq!(dom.bounding_rect(&a), Rect::new(0.0, 0.0, 100.0, 20.0));
//!
//! pollster::block_on(inverted.play(&mut dom, Duration::from_millis(200)));
//! assert_eq!(dom.bounding_rect(&a), Rect::new(0.0, 20.0, 100.0, 40.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::format;
use core::fmt::Debug;
use core::time::Duration;

use kurbo::Rect;
use smallvec::SmallVec;
use understory_dom::{Dom, FrameScheduler};

/// Animation length used when the caller has no preference.
pub const DEFAULT_PLAY_DURATION: Duration = Duration::from_millis(500);

/// Slack added to the animation length before inline styles are cleaned up.
pub const COMPLETION_MARGIN: Duration = Duration::from_millis(50);

/// Records the bounding rectangle of each element, in order.
pub fn capture<H: Dom>(dom: &H, elements: impl IntoIterator<Item = H::Element>) -> Capture<H::Element> {
    let entries: SmallVec<[(H::Element, Rect); 8]> = elements
        .into_iter()
        .map(|el| {
            let rect = dom.bounding_rect(&el);
            (el, rect)
        })
        .collect();
    tracing::trace!(count = entries.len(), "captured element rects");
    Capture { entries }
}

/// Elements and their rectangles at capture time.
#[derive(Clone, Debug)]
#[must_use = "a capture does nothing until it is inverted"]
pub struct Capture<E> {
    entries: SmallVec<[(E, Rect); 8]>,
}

impl<E: Clone + PartialEq + Debug> Capture<E> {
    /// Number of captured elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Captured rectangle of `el`, if it is part of this capture.
    pub fn rect_of(&self, el: &E) -> Option<Rect> {
        self.entries
            .iter()
            .find(|(captured, _)| captured == el)
            .map(|(_, rect)| *rect)
    }

    /// Offsets every element back onto its captured rectangle.
    ///
    /// Call this after the document has been mutated. The applied transform is
    /// `translate(old - new)` of each element's top-left corner.
    pub fn invert<H: Dom<Element = E>>(self, dom: &mut H) -> Inverted<E> {
        let mut elements = SmallVec::with_capacity(self.entries.len());
        for (el, origin) in self.entries {
            let rect = dom.bounding_rect(&el);
            let dx = origin.x0 - rect.x0;
            let dy = origin.y0 - rect.y0;
            dom.set_style(&el, "transform", &format!("translate({dx}px, {dy}px)"));
            elements.push(el);
        }
        Inverted { elements }
    }
}

/// Elements sitting on their old rectangles, ready to animate home.
#[derive(Clone, Debug)]
#[must_use = "inverted elements stay offset until played"]
pub struct Inverted<E> {
    elements: SmallVec<[E; 8]>,
}

impl<E: Clone + PartialEq + Debug> Inverted<E> {
    /// Elements that will be animated.
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    /// Transitions every element to its new position over `duration`.
    ///
    /// Resolves `duration + 50ms` after the transition was started, once the
    /// inline `transform` and `transition-duration` have been cleared.
    pub async fn play<H>(self, dom: &mut H, duration: Duration)
    where
        H: Dom<Element = E> + FrameScheduler,
    {
        // Two frames: the first may run before the inverted state is painted.
        dom.next_frame().await;
        dom.next_frame().await;

        let transition = format!("{}ms", duration.as_millis());
        for el in &self.elements {
            dom.set_style(el, "transform", "translate(0px, 0px)");
            dom.set_style(el, "transition-duration", &transition);
        }

        dom.sleep(duration + COMPLETION_MARGIN).await;

        for el in &self.elements {
            dom.remove_style(el, "transform");
            dom.remove_style(el, "transition-duration");
        }
        tracing::trace!(count = self.elements.len(), "flip playback finished");
    }
}
