// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State of one pointer's drag, from pointer-down to release.

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Rect, Vec2};
use understory_dom::geometry::find_below;
use understory_dom::{CustomEvent, Dom, PointerId, PointerInput, PointerKind, Transform};

use crate::controller::{Container, DragController, DragTarget};
use crate::event::{DragCandidate, DragEventDetail, DragEventKind};
use crate::hitbox::HitboxSpec;
use crate::{
    CURSOR_CLASS, DRAG_THRESHOLD, GHOST_CLASS, OVER_CLASS, PointerResponse, SOURCE_CLASS,
    USER_SELECT_PROPERTY,
};

/// Whether a session has crossed the movement threshold yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// Pointer is down; no drag events have fired.
    Armed,
    /// DRAGSTART has fired; moves produce drag events.
    Active,
}

/// How the moved element is repositioned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DragMode {
    /// Inline `transform: translate(..)` on top of the original transform.
    Translate,
    /// Inline `top`/`left` relative to the offset parent.
    Absolute,
    /// Inline `top`/`left` relative to the viewport.
    Fixed,
}

impl DragMode {
    fn from_position(position: Option<&str>) -> Self {
        match position {
            Some("fixed") => Self::Fixed,
            Some("absolute") => Self::Absolute,
            _ => Self::Translate,
        }
    }
}

pub(crate) struct DragSession<H: Dom, D> {
    pointer_id: PointerId,
    namespace: String,
    source: H::Element,
    capture_target: H::Element,
    controller: DragController<H, D>,
    data: D,
    phase: DragPhase,
    down: PointerInput<H::Element>,

    origin: Point,
    source_origin_rect: Rect,
    source_origin_transform: Transform,
    ghost: Option<H::Element>,
    ghost_origin_rect: Option<Rect>,
    ghost_origin_transform: Option<Transform>,

    drag_el: Option<H::Element>,
    drag_origin_transform: Transform,
    drag_origin_rect: Option<Rect>,
    drag_origin_offset: Point,
    drag_mode: DragMode,
    scroll_origin: Vec2,
    constraint_rect: Option<Rect>,
    hitbox: HitboxSpec,

    current_droppable: Option<H::Element>,
}

impl<H, D> DragSession<H, D>
where
    H: Dom,
    H::Element: 'static,
    D: Clone + 'static,
{
    /// Records the initial state and binds the capture target.
    ///
    /// Fires `on_candidate` last, once the session is fully armed.
    pub(crate) fn arm(
        dom: &mut H,
        source: H::Element,
        input: &PointerInput<H::Element>,
        controller: DragController<H, D>,
    ) -> Self {
        let pointer_id = input.pointer_id;
        let capture_target = controller
            .pointer_capture
            .clone()
            .unwrap_or_else(|| source.clone());
        let source_origin_rect = dom.bounding_rect(&source);
        let source_origin_transform = Transform::of(dom, &source);

        let ghost = (controller.drag == DragTarget::Ghost).then(|| create_ghost(dom, &source, &controller));
        let ghost_origin_transform = ghost.as_ref().map(|g| Transform::of(dom, g));

        let constraint_rect = match &controller.constraints.container {
            Some(Container::Selector(selector)) => dom.closest(&source, selector),
            Some(Container::Element(el)) => Some(el.clone()),
            None => None,
        }
        .map(|el| dom.bounding_rect(&el));

        let (drag_el, drag_origin_transform) = match (&ghost, controller.drag) {
            (Some(ghost), _) if controller.ghost.follow_pointer => {
                (Some(ghost.clone()), ghost_origin_transform.unwrap_or_default())
            }
            (_, DragTarget::Source) => (Some(source.clone()), source_origin_transform),
            _ => (None, Transform::IDENTITY),
        };
        let drag_origin_rect = (controller.drag == DragTarget::Source).then_some(source_origin_rect);
        let drag_origin_offset = drag_el
            .as_ref()
            .map(|el| dom.offset_origin(el))
            .unwrap_or(Point::ORIGIN);
        let drag_mode = match &drag_el {
            Some(el) => {
                let position = dom
                    .inline_style(el, "position")
                    .filter(|p| !p.is_empty())
                    .or_else(|| dom.computed_style(el, "position"));
                DragMode::from_position(position.as_deref())
            }
            None => DragMode::Translate,
        };

        let namespace = format!("{}", pointer_id.0);
        dom.set_pointer_capture(&capture_target, pointer_id);
        for kind in [PointerKind::Move, PointerKind::Up, PointerKind::Cancel] {
            dom.listen(&capture_target, kind, &namespace);
        }

        tracing::debug!(
            pointer = pointer_id.0,
            ?source,
            ?drag_mode,
            "drag session armed"
        );

        let session = Self {
            pointer_id,
            namespace,
            source,
            capture_target,
            data: controller.data.clone(),
            hitbox: controller.constraints.hitbox,
            controller,
            phase: DragPhase::Armed,
            down: input.clone(),
            origin: input.client,
            source_origin_rect,
            source_origin_transform,
            ghost,
            ghost_origin_rect: None,
            ghost_origin_transform,
            drag_el,
            drag_origin_transform,
            drag_origin_rect,
            drag_origin_offset,
            drag_mode,
            scroll_origin: dom.scroll_offset(),
            constraint_rect,
            current_droppable: None,
        };

        if let Some(candidate) = session.controller.candidate_handler() {
            let info = DragCandidate {
                source: session.source.clone(),
                client: input.client,
                pointer: input.clone(),
            };
            candidate(dom, &info);
        }
        session
    }

    pub(crate) fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    pub(crate) fn capture_target(&self) -> &H::Element {
        &self.capture_target
    }

    pub(crate) fn phase(&self) -> DragPhase {
        self.phase
    }

    /// The pointer-down that armed this session.
    pub(crate) fn down(&self) -> &PointerInput<H::Element> {
        &self.down
    }

    pub(crate) fn on_move(&mut self, dom: &mut H, input: &PointerInput<H::Element>) -> PointerResponse {
        let client = input.client;

        if self.phase == DragPhase::Armed {
            let moved = client - self.origin;
            let within = |d: f64, limit: f64| -limit <= d && d <= limit;
            if within(moved.x, DRAG_THRESHOLD.x) && within(moved.y, DRAG_THRESHOLD.y) {
                return PointerResponse::Handled;
            }
            let over = find_below(dom, client, self.drag_el.as_ref());
            dom.add_class(&self.source, SOURCE_CLASS);
            if let Some(ghost) = self.ghost.clone() {
                let body = dom.body();
                dom.append_child(&body, &ghost);
                let rect = dom.bounding_rect(&ghost);
                self.ghost_origin_rect = Some(rect);
                if self.controller.drag == DragTarget::Ghost {
                    self.drag_origin_rect = Some(rect);
                    self.drag_origin_offset = dom.offset_origin(&ghost);
                }
            }
            tracing::debug!(pointer = self.pointer_id.0, "drag started");
            let source = self.source.clone();
            let detail = self.detail(input, over, None);
            self.fire(dom, DragEventKind::DragStart, &source, detail, true);
            self.phase = DragPhase::Active;
        }

        let body = dom.body();
        dom.set_style(&body, USER_SELECT_PROPERTY, "none");
        let over = find_below(dom, client, self.drag_el.as_ref());
        dom.add_class(&body, CURSOR_CLASS);
        self.move_drag_el(dom, client);

        let mut droppable = None;
        if self.controller.droppable.is_enabled() {
            droppable = self.controller.droppable.find(dom, over.as_ref());

            if let Some(current) = self.current_droppable.clone() {
                if droppable.as_ref() != Some(&current) {
                    let detail = self.detail(input, over.clone(), Some(current.clone()));
                    self.fire(dom, DragEventKind::DragLeave, &current, detail, true);
                    dom.remove_class(&current, OVER_CLASS);
                }
            }

            if let Some(target) = droppable.clone() {
                if self.current_droppable.as_ref() != Some(&target) {
                    dom.add_class(&target, OVER_CLASS);
                    let detail = self.detail(input, over.clone(), Some(target.clone()));
                    self.fire(dom, DragEventKind::DragEnter, &target, detail, true);
                } else {
                    let dispatch = self.controller.dragover;
                    let detail = self.detail(input, over.clone(), Some(target.clone()));
                    self.fire(dom, DragEventKind::DragOver, &target, detail, dispatch);
                }
            }
        }
        self.current_droppable.clone_from(&droppable);

        let source = self.source.clone();
        let detail = self.detail(input, over, droppable);
        self.fire(dom, DragEventKind::Drag, &source, detail, true);
        PointerResponse::PreventDefault
    }

    /// Handles release or cancellation, then tears the session down.
    ///
    /// A cancelled drag still ends with DRAGEND, but never drops.
    pub(crate) fn on_end(mut self, dom: &mut H, input: &PointerInput<H::Element>) -> PointerResponse {
        let canceled = input.kind == PointerKind::Cancel;
        let response = if self.phase == DragPhase::Active {
            let over = find_below(dom, input.client, self.drag_el.as_ref());
            let mut droppable = None;
            if self.controller.droppable.is_enabled() {
                droppable = self.controller.droppable.find(dom, over.as_ref());
                if let Some(target) = droppable.clone() {
                    if !canceled {
                        let detail = self.detail(input, over.clone(), Some(target.clone()));
                        self.fire(dom, DragEventKind::Drop, &target, detail, true);
                    }
                    dom.remove_class(&target, OVER_CLASS);
                }
            }
            let source = self.source.clone();
            let detail = self.detail(input, over, droppable);
            self.fire(dom, DragEventKind::DragEnd, &source, detail, true);
            tracing::debug!(pointer = self.pointer_id.0, canceled, "drag ended");
            PointerResponse::PreventDefault
        } else {
            PointerResponse::Handled
        };
        self.cleanup(dom);
        response
    }

    /// Restores the side effects owned by this session without firing events.
    ///
    /// The body markers are shared by every session and restored by the engine.
    pub(crate) fn cleanup(self, dom: &mut H) {
        if self.controller.ghost.delete_on_end {
            if let Some(ghost) = &self.ghost {
                dom.remove_element(ghost);
            }
        }
        dom.remove_class(&self.source, SOURCE_CLASS);
        if let Some(current) = &self.current_droppable {
            dom.remove_class(current, OVER_CLASS);
        }
        dom.unlisten(&self.capture_target, &self.namespace);
        dom.release_pointer_capture(&self.capture_target, self.pointer_id);
        tracing::trace!(pointer = self.pointer_id.0, "drag session cleaned up");
    }

    /// Repositions the moved element for the pointer at `client`.
    fn move_drag_el(&self, dom: &mut H, client: Point) {
        let (Some(el), Some(rect)) = (&self.drag_el, self.drag_origin_rect) else {
            return;
        };
        let constraints = &self.controller.constraints;

        let grab = self.origin - rect.origin();
        let mut delta = match self.drag_mode {
            DragMode::Translate => client - self.origin + (dom.scroll_offset() - self.scroll_origin),
            DragMode::Fixed => client - grab - rect.origin() - self.scroll_origin,
            DragMode::Absolute => client - grab - rect.origin(),
        };
        if !constraints.x {
            delta.x = 0.0;
        }
        if !constraints.y {
            delta.y = 0.0;
        }

        if let Some(container) = self.constraint_rect {
            let moved = Rect::from_origin_size(rect.origin() + delta, rect.size());
            let clamped = self.hitbox.resolve(container, moved);
            if constraints.x && clamped.x != moved.x0 {
                delta.x = clamped.x - rect.x0;
            }
            if constraints.y && clamped.y != moved.y0 {
                delta.y = clamped.y - rect.y0;
            }
        }

        match self.drag_mode {
            DragMode::Translate => {
                let t = delta + self.drag_origin_transform.translation();
                dom.set_style(el, "transform", &format!("translate({}px, {}px)", t.x, t.y));
            }
            DragMode::Absolute | DragMode::Fixed => {
                let p = self.drag_origin_offset + delta;
                dom.set_style(el, "top", &format!("{}px", p.y));
                dom.set_style(el, "left", &format!("{}px", p.x));
            }
        }
    }

    fn detail(
        &self,
        input: &PointerInput<H::Element>,
        over: Option<H::Element>,
        droppable: Option<H::Element>,
    ) -> DragEventDetail<H::Element, D> {
        DragEventDetail {
            data: self.data.clone(),
            source: self.source.clone(),
            source_origin_rect: self.source_origin_rect,
            source_origin_transform: self.source_origin_transform,
            ghost: self.ghost.clone(),
            ghost_origin_rect: self.ghost_origin_rect,
            ghost_origin_transform: self.ghost_origin_transform,
            droppable,
            over,
            origin: self.origin,
            client: input.client,
            pointer: input.clone(),
        }
    }

    /// Runs the callback for `kind`, then optionally dispatches on `target`.
    ///
    /// The callback and DOM listeners share one event, and whatever `data`
    /// they leave behind becomes the session's data.
    fn fire(
        &mut self,
        dom: &mut H,
        kind: DragEventKind,
        target: &H::Element,
        detail: DragEventDetail<H::Element, D>,
        dispatch: bool,
    ) {
        let handler = self.controller.handler(kind);
        if handler.is_none() && !dispatch {
            return;
        }
        let mut event = CustomEvent::new(kind.name(), detail);
        if let Some(handler) = handler {
            handler(dom, &mut event);
        }
        if dispatch {
            dom.dispatch_event(target, &mut event);
        }
        tracing::trace!(event = kind.name(), ?target, dispatch, "drag event fired");
        self.data = event.into_detail().data;
    }
}

/// Builds the ghost: custom factory or a sized deep clone of the source,
/// pinned over the source with fixed positioning.
fn create_ghost<H: Dom, D>(dom: &mut H, source: &H::Element, controller: &DragController<H, D>) -> H::Element {
    let source_rect = dom.bounding_rect(source);
    let ghost = match &controller.ghost.create {
        Some(create) => create(dom, source),
        None => {
            let ghost = dom.clone_element(source);
            dom.set_style(&ghost, "width", &format!("{}px", source_rect.width()));
            dom.set_style(&ghost, "height", &format!("{}px", source_rect.height()));
            ghost
        }
    };
    dom.add_class(&ghost, GHOST_CLASS);
    let scroll = dom.scroll_offset();
    dom.set_style(&ghost, "position", "fixed");
    dom.set_style(&ghost, "left", &format!("{}px", source_rect.x0 + scroll.x));
    dom.set_style(&ghost, "top", &format!("{}px", source_rect.y0 + scroll.y));
    ghost
}
