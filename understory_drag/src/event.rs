// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag lifecycle events and their payloads.

use kurbo::{Point, Rect};
use understory_dom::{CustomEvent, PointerInput, Transform};

/// The seven drag lifecycle events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    /// The pointer crossed the movement threshold; the drag is now active.
    DragStart,
    /// Every pointer move while active, after any droppable events.
    Drag,
    /// The drag ended, whether by release or cancellation.
    DragEnd,
    /// The pointer entered a new droppable.
    DragEnter,
    /// The pointer left the previous droppable.
    DragLeave,
    /// The pointer moved while over the same droppable.
    DragOver,
    /// The pointer was released over a droppable.
    Drop,
}

impl DragEventKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::DragStart,
        Self::Drag,
        Self::DragEnd,
        Self::DragEnter,
        Self::DragLeave,
        Self::DragOver,
        Self::Drop,
    ];

    /// Event name used when dispatching into the document.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DragStart => "DRAGSTART",
            Self::Drag => "DRAG",
            Self::DragEnd => "DRAGEND",
            Self::DragEnter => "DRAGENTER",
            Self::DragLeave => "DRAGLEAVE",
            Self::DragOver => "DRAGOVER",
            Self::Drop => "DROP",
        }
    }

    /// `true` for the events targeted at a droppable rather than the source.
    pub const fn is_drop_event(self) -> bool {
        matches!(
            self,
            Self::DragEnter | Self::DragLeave | Self::DragOver | Self::Drop
        )
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// A drag lifecycle event as delivered to callbacks and DOM listeners.
pub type DragEvent<E, D> = CustomEvent<DragEventDetail<E, D>>;

/// Snapshot of a drag session attached to every lifecycle event.
///
/// `data` is the only mutable part. Changes made by a callback or by a DOM
/// listener are carried into every later event of the same session.
#[derive(Clone, Debug)]
pub struct DragEventDetail<E, D> {
    /// Session payload.
    pub data: D,
    pub(crate) source: E,
    pub(crate) source_origin_rect: Rect,
    pub(crate) source_origin_transform: Transform,
    pub(crate) ghost: Option<E>,
    pub(crate) ghost_origin_rect: Option<Rect>,
    pub(crate) ghost_origin_transform: Option<Transform>,
    pub(crate) droppable: Option<E>,
    pub(crate) over: Option<E>,
    pub(crate) origin: Point,
    pub(crate) client: Point,
    pub(crate) pointer: PointerInput<E>,
}

impl<E, D> DragEventDetail<E, D> {
    /// The element the drag was started on.
    pub fn source(&self) -> &E {
        &self.source
    }

    /// Bounding rectangle of the source when the session was armed.
    pub fn source_origin_rect(&self) -> Rect {
        self.source_origin_rect
    }

    /// Computed transform of the source when the session was armed.
    pub fn source_origin_transform(&self) -> Transform {
        self.source_origin_transform
    }

    /// The ghost element, if the session uses one.
    pub fn ghost(&self) -> Option<&E> {
        self.ghost.as_ref()
    }

    /// Bounding rectangle of the ghost once it was attached to the body.
    pub fn ghost_origin_rect(&self) -> Option<Rect> {
        self.ghost_origin_rect
    }

    /// Computed transform of the ghost when it was created.
    pub fn ghost_origin_transform(&self) -> Option<Transform> {
        self.ghost_origin_transform
    }

    /// The droppable involved in this event, if any.
    pub fn droppable(&self) -> Option<&E> {
        self.droppable.as_ref()
    }

    /// The topmost element under the pointer, ignoring the dragged element.
    pub fn over(&self) -> Option<&E> {
        self.over.as_ref()
    }

    /// Pointer position at pointer-down, in viewport coordinates.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Current pointer position, in viewport coordinates.
    pub fn client(&self) -> Point {
        self.client
    }

    /// The pointer input that produced this event.
    pub fn pointer(&self) -> &PointerInput<E> {
        &self.pointer
    }
}

/// Passed to `on_candidate` when a pointer-down arms a session.
#[derive(Clone, Debug, PartialEq)]
pub struct DragCandidate<E> {
    /// Element that would be dragged.
    pub source: E,
    /// Pointer position at pointer-down.
    pub client: Point,
    /// The pointer-down input.
    pub pointer: PointerInput<E>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_indices() {
        for (i, kind) in DragEventKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(DragEventKind::DragStart.name(), "DRAGSTART");
        assert_eq!(DragEventKind::Drop.name(), "DROP");
        assert!(DragEventKind::DragOver.is_drop_event());
        assert!(!DragEventKind::DragEnd.is_drop_event());
    }
}
