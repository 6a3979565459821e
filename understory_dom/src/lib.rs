// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dom --heading-base-level=0

//! Understory DOM: the host capability set used by pointer-driven interactions.
//!
//! ## Overview
//!
//! The drag, FLIP, and positioning crates never talk to a browser directly.
//! They are written against the [`Dom`] trait, which names exactly the
//! capabilities they consume:
//!
//! - Geometry queries: bounding rectangles, offset origins, scroll and viewport size.
//! - Style access: computed style reads and inline style writes.
//! - Tree queries: `closest`, `contains`, connectivity, point hit testing.
//! - Element lifecycle: deep clones, appending, removal.
//! - Pointer capture and namespaced listener bindings.
//! - Custom event dispatch with a mutable `detail` payload.
//!
//! A `web-sys` binding, a retained-mode toolkit, or an in-memory test host can
//! all implement it. Animation-frame and timer waits live in the separate
//! [`FrameScheduler`] trait, since only animation code needs them.
//!
//! ## Geometry utilities
//!
//! The [`geometry`] module holds the small numeric helpers shared by every
//! interaction crate:
//!
//! ```
//! use understory_dom::geometry::clamp;
//! use understory_dom::Transform;
//!
//! assert_eq!(clamp(12.0, 0.0, 10.0), 10.0);
//! assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
//!
//! let t = Transform::parse("matrix(1, 0, 0, 1, 24, -8)");
//! assert_eq!((t.translate_x, t.translate_y), (24.0, -8.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod event;
pub mod geometry;
mod host;
pub mod pointer;
mod scheduler;
mod transform;

pub use event::CustomEvent;
pub use host::Dom;
pub use pointer::{PointerId, PointerInput, PointerKind};
pub use scheduler::FrameScheduler;
pub use transform::Transform;

pub use kurbo::{Point, Rect, Size, Vec2};
