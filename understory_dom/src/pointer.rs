// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input as delivered by the host.

use kurbo::Point;

/// Identifier of an active pointer (`PointerEvent.pointerId`).
///
/// Two fingers on a touch screen, or a pen and a mouse, report distinct ids and
/// can therefore drive independent gestures at the same time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub i32);

/// The pointer event types interactions listen for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// `pointerdown`
    Down,
    /// `pointermove`
    Move,
    /// `pointerup`
    Up,
    /// `pointercancel`
    Cancel,
}

impl PointerKind {
    /// The DOM event name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Down => "pointerdown",
            Self::Move => "pointermove",
            Self::Up => "pointerup",
            Self::Cancel => "pointercancel",
        }
    }
}

/// A raw pointer event.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInput<E> {
    /// Which pointer produced the event.
    pub pointer_id: PointerId,
    /// Event type.
    pub kind: PointerKind,
    /// Pointer position in viewport coordinates (`clientX`, `clientY`).
    pub client: Point,
    /// The element the event was originally targeted at.
    pub target: E,
}

impl<E> PointerInput<E> {
    /// Creates a pointer event.
    pub fn new(pointer_id: PointerId, kind: PointerKind, client: Point, target: E) -> Self {
        Self {
            pointer_id,
            kind,
            client,
            target,
        }
    }
}
