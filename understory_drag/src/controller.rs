// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-draggable configuration and lifecycle callbacks.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use understory_dom::Dom;

use crate::event::{DragCandidate, DragEvent, DragEventKind};
use crate::hitbox::HitboxSpec;

/// Lifecycle callback. Runs before the matching event is dispatched.
pub type DragHandler<H, D> = Rc<dyn Fn(&mut H, &mut DragEvent<<H as Dom>::Element, D>)>;

/// Called once when a pointer-down arms a session.
pub type CandidateHandler<H> = Rc<dyn Fn(&mut H, &DragCandidate<<H as Dom>::Element>)>;

/// Builds the ghost element for a session from its source.
pub type GhostFactory<H> = Rc<dyn Fn(&mut H, &<H as Dom>::Element) -> <H as Dom>::Element>;

/// Maps the element under the pointer to a droppable.
pub type DroppableResolver<H> =
    Rc<dyn Fn(&H, &<H as Dom>::Element) -> Option<<H as Dom>::Element>>;

/// Which element follows the pointer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DragTarget {
    /// A ghost copy of the source is created and moved.
    Ghost,
    /// The source itself is moved.
    #[default]
    Source,
    /// Nothing moves; only events are produced.
    None,
}

/// Where the constraint rectangle comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum Container<E> {
    /// Nearest ancestor-or-self of the source matching a selector.
    Selector(String),
    /// A specific element.
    Element(E),
}

/// Axis locks and containment for the moved element.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraints<E> {
    /// Horizontal movement is allowed.
    pub x: bool,
    /// Vertical movement is allowed.
    pub y: bool,
    /// Bounds the moved element. Measured once when the session is armed.
    pub container: Option<Container<E>>,
    /// Which parts of the moved element must stay inside `container`.
    pub hitbox: HitboxSpec,
}

impl<E> Default for Constraints<E> {
    fn default() -> Self {
        Self {
            x: true,
            y: true,
            container: None,
            hitbox: HitboxSpec::TOP_LEFT,
        }
    }
}

/// Ghost lifecycle options.
pub struct GhostOptions<H: Dom> {
    /// Remove the ghost from the document when the session ends.
    pub delete_on_end: bool,
    /// Move the ghost with the pointer.
    pub follow_pointer: bool,
    /// Custom ghost constructor. Defaults to a sized deep clone of the source.
    pub create: Option<GhostFactory<H>>,
}

impl<H: Dom> Default for GhostOptions<H> {
    fn default() -> Self {
        Self {
            delete_on_end: true,
            follow_pointer: true,
            create: None,
        }
    }
}

impl<H: Dom> Clone for GhostOptions<H> {
    fn clone(&self) -> Self {
        Self {
            delete_on_end: self.delete_on_end,
            follow_pointer: self.follow_pointer,
            create: self.create.clone(),
        }
    }
}

impl<H: Dom> fmt::Debug for GhostOptions<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GhostOptions")
            .field("delete_on_end", &self.delete_on_end)
            .field("follow_pointer", &self.follow_pointer)
            .field("create", &self.create.is_some())
            .finish()
    }
}

/// How droppables are found under the pointer.
pub enum Droppable<H: Dom> {
    /// Droppable detection is off. No enter, over, leave or drop events.
    None,
    /// Any element under the pointer is a droppable.
    Always,
    /// Nearest ancestor-or-self of the element under the pointer matching a selector.
    Selector(String),
    /// Custom lookup.
    Resolver(DroppableResolver<H>),
}

impl<H: Dom> Droppable<H> {
    /// Builds a [`Droppable::Resolver`] from a closure.
    pub fn resolver(f: impl Fn(&H, &H::Element) -> Option<H::Element> + 'static) -> Self {
        Self::Resolver(Rc::new(f))
    }

    /// Returns `false` for [`Droppable::None`].
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub(crate) fn find(&self, dom: &H, over: Option<&H::Element>) -> Option<H::Element> {
        let over = over?;
        match self {
            Self::None => None,
            Self::Always => Some(over.clone()),
            Self::Selector(selector) => dom.closest(over, selector),
            Self::Resolver(resolve) => resolve(dom, over),
        }
    }
}

impl<H: Dom> Default for Droppable<H> {
    fn default() -> Self {
        Self::Always
    }
}

impl<H: Dom> Clone for Droppable<H> {
    fn clone(&self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Always => Self::Always,
            Self::Selector(selector) => Self::Selector(selector.clone()),
            Self::Resolver(resolve) => Self::Resolver(resolve.clone()),
        }
    }
}

impl<H: Dom> fmt::Debug for Droppable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Always => f.write_str("Always"),
            Self::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// Configuration for one draggable, shared by every session it starts.
///
/// Each session clones the controller, so `data` is copied fresh into every
/// session and mutations never leak back into the registration.
///
/// ```
/// use understory_drag::{DragController, DragTarget, HitboxSpec};
/// use understory_test_dom::TestDom;
///
/// let controller: DragController<TestDom, u32> = DragController::new(0)
///     .with_drag(DragTarget::Ghost)
///     .with_hitbox(HitboxSpec::BOX)
///     .on_drag(|_dom, ev| ev.detail.data += 1);
/// assert!(controller.constraints.x && controller.constraints.y);
/// ```
pub struct DragController<H: Dom, D> {
    /// Element that receives pointer capture and move/up/cancel listeners.
    /// Defaults to the source.
    pub pointer_capture: Option<H::Element>,
    /// Payload copied into each session and exposed on every event.
    pub data: D,
    /// Which element follows the pointer.
    pub drag: DragTarget,
    /// Axis locks and containment.
    pub constraints: Constraints<H::Element>,
    /// Droppable detection.
    pub droppable: Droppable<H>,
    /// Dispatch DRAGOVER into the document. The callback always runs.
    pub dragover: bool,
    /// Ghost lifecycle, used when `drag` is [`DragTarget::Ghost`].
    pub ghost: GhostOptions<H>,
    handlers: [Option<DragHandler<H, D>>; 7],
    candidate: Option<CandidateHandler<H>>,
}

impl<H: Dom, D> DragController<H, D> {
    /// A controller with default options and the given payload.
    pub fn new(data: D) -> Self {
        Self {
            pointer_capture: None,
            data,
            drag: DragTarget::Source,
            constraints: Constraints::default(),
            droppable: Droppable::Always,
            dragover: false,
            ghost: GhostOptions::default(),
            handlers: [const { None }; 7],
            candidate: None,
        }
    }

    /// Sets the element that captures the pointer.
    #[must_use]
    pub fn with_pointer_capture(mut self, el: H::Element) -> Self {
        self.pointer_capture = Some(el);
        self
    }

    /// Sets which element follows the pointer.
    #[must_use]
    pub fn with_drag(mut self, drag: DragTarget) -> Self {
        self.drag = drag;
        self
    }

    /// Replaces all constraints.
    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints<H::Element>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Enables or disables each axis.
    #[must_use]
    pub fn with_axes(mut self, x: bool, y: bool) -> Self {
        self.constraints.x = x;
        self.constraints.y = y;
        self
    }

    /// Sets the constraint container.
    #[must_use]
    pub fn with_container(mut self, container: Container<H::Element>) -> Self {
        self.constraints.container = Some(container);
        self
    }

    /// Sets the containment hitbox.
    #[must_use]
    pub fn with_hitbox(mut self, hitbox: HitboxSpec) -> Self {
        self.constraints.hitbox = hitbox;
        self
    }

    /// Sets droppable detection.
    #[must_use]
    pub fn with_droppable(mut self, droppable: Droppable<H>) -> Self {
        self.droppable = droppable;
        self
    }

    /// Enables DRAGOVER dispatch into the document.
    #[must_use]
    pub fn with_dragover(mut self, dragover: bool) -> Self {
        self.dragover = dragover;
        self
    }

    /// Replaces the ghost options.
    #[must_use]
    pub fn with_ghost(mut self, ghost: GhostOptions<H>) -> Self {
        self.ghost = ghost;
        self
    }

    /// Registers a callback for `kind`, replacing any previous one.
    #[must_use]
    pub fn on(
        mut self,
        kind: DragEventKind,
        f: impl Fn(&mut H, &mut DragEvent<H::Element, D>) + 'static,
    ) -> Self {
        self.handlers[kind.index()] = Some(Rc::new(f));
        self
    }

    /// Shorthand for `on(DragEventKind::DragStart, f)`.
    #[must_use]
    pub fn on_drag_start(self, f: impl Fn(&mut H, &mut DragEvent<H::Element, D>) + 'static) -> Self {
        self.on(DragEventKind::DragStart, f)
    }

    /// Shorthand for `on(DragEventKind::Drag, f)`.
    #[must_use]
    pub fn on_drag(self, f: impl Fn(&mut H, &mut DragEvent<H::Element, D>) + 'static) -> Self {
        self.on(DragEventKind::Drag, f)
    }

    /// Shorthand for `on(DragEventKind::DragEnd, f)`.
    #[must_use]
    pub fn on_drag_end(self, f: impl Fn(&mut H, &mut DragEvent<H::Element, D>) + 'static) -> Self {
        self.on(DragEventKind::DragEnd, f)
    }

    /// Shorthand for `on(DragEventKind::DragEnter, f)`.
    #[must_use]
    pub fn on_drag_enter(self, f: impl Fn(&mut H, &mut DragEvent<H::Element, D>) + 'static) -> Self {
        self.on(DragEventKind::DragEnter, f)
    }

    /// Shorthand for `on(DragEventKind::DragLeave, f)`.
    #[must_use]
    pub fn on_drag_leave(self, f: impl Fn(&mut H, &mut DragEvent<H::Element, D>) + 'static) -> Self {
        self.on(DragEventKind::DragLeave, f)
    }

    /// Shorthand for `on(DragEventKind::DragOver, f)`.
    #[must_use]
    pub fn on_drag_over(self, f: impl Fn(&mut H, &mut DragEvent<H::Element, D>) + 'static) -> Self {
        self.on(DragEventKind::DragOver, f)
    }

    /// Shorthand for `on(DragEventKind::Drop, f)`.
    #[must_use]
    pub fn on_drop(self, f: impl Fn(&mut H, &mut DragEvent<H::Element, D>) + 'static) -> Self {
        self.on(DragEventKind::Drop, f)
    }

    /// Registers the arming callback.
    #[must_use]
    pub fn on_candidate(mut self, f: impl Fn(&mut H, &DragCandidate<H::Element>) + 'static) -> Self {
        self.candidate = Some(Rc::new(f));
        self
    }

    pub(crate) fn handler(&self, kind: DragEventKind) -> Option<DragHandler<H, D>> {
        self.handlers[kind.index()].clone()
    }

    pub(crate) fn candidate_handler(&self) -> Option<CandidateHandler<H>> {
        self.candidate.clone()
    }
}

impl<H: Dom, D: Default> Default for DragController<H, D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}

impl<H: Dom, D: Clone> Clone for DragController<H, D> {
    fn clone(&self) -> Self {
        Self {
            pointer_capture: self.pointer_capture.clone(),
            data: self.data.clone(),
            drag: self.drag,
            constraints: self.constraints.clone(),
            droppable: self.droppable.clone(),
            dragover: self.dragover,
            ghost: self.ghost.clone(),
            handlers: self.handlers.clone(),
            candidate: self.candidate.clone(),
        }
    }
}

impl<H: Dom, D: fmt::Debug> fmt::Debug for DragController<H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers: smallvec::SmallVec<[&str; 7]> = DragEventKind::ALL
            .into_iter()
            .filter(|kind| self.handlers[kind.index()].is_some())
            .map(DragEventKind::name)
            .collect();
        f.debug_struct("DragController")
            .field("pointer_capture", &self.pointer_capture)
            .field("data", &self.data)
            .field("drag", &self.drag)
            .field("constraints", &self.constraints)
            .field("droppable", &self.droppable)
            .field("dragover", &self.dragover)
            .field("ghost", &self.ghost)
            .field("handlers", &handlers)
            .field("candidate", &self.candidate.is_some())
            .finish()
    }
}
