// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag --heading-base-level=0

//! Understory Drag: pointer-driven drag and drop over a [`Dom`](understory_dom::Dom) host.
//!
//! ## Overview
//!
//! A [`DragEngine`] turns raw pointer input into a drag lifecycle:
//!
//! - Pointer-down on a registered element arms a session for that pointer.
//!   Move, up and cancel are bound on the capture target under a namespace
//!   equal to the pointer id, and the pointer is captured.
//! - Once the pointer moves more than [`DRAG_THRESHOLD`] on either axis,
//!   `DRAGSTART` fires on the source and the session becomes active.
//! - While active, every move repositions the dragged element, then fires
//!   droppable events (`DRAGLEAVE`, `DRAGENTER` or `DRAGOVER`), then `DRAG`.
//! - Release fires `DROP` on the droppable under the pointer, then `DRAGEND`.
//!   Cancellation fires only `DRAGEND`. Either way every binding, class and
//!   style the session added is removed.
//!
//! Each event first runs the controller callback for its kind, then is
//! dispatched into the document as a bubbling, cancelable
//! [`CustomEvent`](understory_dom::CustomEvent) whose `detail` is a
//! [`DragEventDetail`]. The detail's `data` is the session payload: what a
//! callback or listener writes there is seen by every later event.
//!
//! ## What moves
//!
//! [`DragTarget`] selects the source itself, a ghost copy, or nothing. The
//! moved element keeps its positioning scheme: `fixed` and `absolute`
//! elements get inline `top`/`left`, anything else an inline
//! `translate(..)` stacked on its original translation. Axis locks and a
//! containment rectangle with a [`HitboxSpec`] further restrict movement.
//!
//! ## Classes
//!
//! While active the source carries [`SOURCE_CLASS`], the body
//! [`CURSOR_CLASS`], and the current droppable [`OVER_CLASS`]. Ghosts are
//! created with [`GHOST_CLASS`].
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_dom::{Dom, PointerId, PointerInput, PointerKind};
//! use understory_drag::{DragController, DragEngine, PointerResponse};
//! use understory_test_dom::TestDom;
//!
//! let mut dom = TestDom::new(Size::new(400.0, 300.0));
//! let body = dom.body();
//! let card = dom.add(&body, "div", Rect::new(10.0, 10.0, 60.0, 40.0));
//!
//! let mut engine = DragEngine::new();
//! let controller: DragController<TestDom, u32> =
//!     DragController::new(0).on_drag(|_dom, ev| ev.detail.data += 1);
//! engine.draggable(&mut dom, &card, None, controller).unwrap();
//!
//! let pointer = PointerId(1);
//! let down = PointerInput::new(pointer, PointerKind::Down, Point::new(20.0, 20.0), card);
//! assert_eq!(engine.handle_pointer(&mut dom, &card, &down), PointerResponse::Handled);
//!
//! let moved = PointerInput::new(pointer, PointerKind::Move, Point::new(50.0, 20.0), card);
//! assert_eq!(engine.handle_pointer(&mut dom, &card, &moved), PointerResponse::PreventDefault);
//! assert_eq!(dom.style(&card, "transform"), Some("translate(30px, 0px)"));
//!
//! let up = PointerInput::new(pointer, PointerKind::Up, Point::new(50.0, 20.0), card);
//! engine.handle_pointer(&mut dom, &card, &up);
//! assert_eq!(engine.session_count(), 0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod engine;
mod event;
mod hitbox;
mod session;

use kurbo::Vec2;

pub use controller::{
    CandidateHandler, Constraints, Container, DragController, DragHandler, DragTarget, Droppable,
    DroppableResolver, GhostFactory, GhostOptions,
};
pub use engine::DragEngine;
pub use event::{DragCandidate, DragEvent, DragEventDetail, DragEventKind};
pub use hitbox::HitboxSpec;
pub use session::DragPhase;

/// Movement, per axis, a pointer must exceed before a drag starts.
pub const DRAG_THRESHOLD: Vec2 = Vec2::new(5.0, 5.0);

/// Added to the source while a drag is active.
pub const SOURCE_CLASS: &str = "drag-source";

/// Added to ghost elements when they are created.
pub const GHOST_CLASS: &str = "drag-ghost";

/// Added to the body while a drag is active.
pub const CURSOR_CLASS: &str = "drag-cursor";

/// Added to the droppable currently under the pointer.
pub const OVER_CLASS: &str = "drag-over";

/// Namespace of the pointer-down bindings made by [`DragEngine::draggable`].
pub const DRAGGABLE_NAMESPACE: &str = "draggable";

/// Body style disabled during a drag so text is not selected.
pub(crate) const USER_SELECT_PROPERTY: &str = "-webkit-user-select";

/// What the host should do with the native pointer event it forwarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerResponse {
    /// No registration or session was interested.
    Ignored,
    /// Consumed by the engine; default handling may proceed.
    Handled,
    /// An active drag consumed it; prevent default and stop propagation.
    PreventDefault,
}

/// Registration errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    /// The whole document was made draggable without a selector.
    #[error("making the document draggable requires a selector")]
    MissingSelector,
}
