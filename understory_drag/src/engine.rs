// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable registrations and live sessions, keyed by capture target and pointer.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use understory_dom::{Dom, PointerId, PointerInput, PointerKind};

use crate::controller::DragController;
use crate::session::{DragPhase, DragSession};
use crate::{CURSOR_CLASS, DRAGGABLE_NAMESPACE, DragError, PointerResponse, USER_SELECT_PROPERTY};

struct Registration<H: Dom, D> {
    root: H::Element,
    selector: Option<String>,
    controller: DragController<H, D>,
}

/// Owns draggable registrations and the drag sessions they start.
///
/// The host forwards pointer input with [`DragEngine::handle_pointer`], once
/// for every element on the event path that holds a binding made through
/// [`Dom::listen`]. Sessions for different pointers are fully independent,
/// so several fingers can drag at once, even on the same source.
///
/// The body's cursor class and text selection are shared by all sessions:
/// they are saved when the first session arms and restored when the last
/// one ends.
pub struct DragEngine<H: Dom, D> {
    registrations: Vec<Registration<H, D>>,
    sessions: Vec<DragSession<H, D>>,
    /// Inline body user-select from before the first live session.
    saved_user_select: Option<String>,
}

impl<H: Dom, D> Default for DragEngine<H, D> {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
            sessions: Vec::new(),
            saved_user_select: None,
        }
    }
}

impl<H: Dom, D> fmt::Debug for DragEngine<H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragEngine")
            .field("registrations", &self.registrations.len())
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

impl<H, D> DragEngine<H, D>
where
    H: Dom,
    H::Element: 'static,
    D: Clone + 'static,
{
    /// Creates an engine with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `root`, or the descendants of `root` matching `selector`, draggable.
    ///
    /// Binds pointer-down on `root` under the `"draggable"` namespace. With a
    /// selector, the drag source is the nearest ancestor-or-self of the
    /// pointer-down target that matches and lies inside `root`.
    ///
    /// Registering the whole document without a selector is rejected with
    /// [`DragError::MissingSelector`].
    pub fn draggable(
        &mut self,
        dom: &mut H,
        root: &H::Element,
        selector: Option<&str>,
        controller: DragController<H, D>,
    ) -> Result<(), DragError> {
        if selector.is_none() && *root == dom.document() {
            return Err(DragError::MissingSelector);
        }
        dom.listen(root, PointerKind::Down, DRAGGABLE_NAMESPACE);
        tracing::debug!(?root, selector, "draggable registered");
        self.registrations.push(Registration {
            root: root.clone(),
            selector: selector.map(String::from),
            controller,
        });
        Ok(())
    }

    /// Removes every registration on `root` and its pointer-down binding.
    ///
    /// Sessions already in progress are left to finish. Returns the number of
    /// registrations removed.
    pub fn undraggable(&mut self, dom: &mut H, root: &H::Element) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.root != *root);
        let removed = before - self.registrations.len();
        if removed > 0 {
            dom.unlisten(root, DRAGGABLE_NAMESPACE);
        }
        removed
    }

    /// Arms a drag session on `source` for the pointer in `input`.
    ///
    /// This is what a registration does on pointer-down, exposed for hosts
    /// that decide themselves when a drag may begin. Returns `false` without
    /// side effects if `source` is detached from the document.
    ///
    /// Sessions left behind by an earlier press of the same pointer are
    /// discarded first, silently: the one for the same capture target, and
    /// any other whose pointer-down is not `input` (its release was lost).
    pub fn activate_drag(
        &mut self,
        dom: &mut H,
        source: H::Element,
        input: &PointerInput<H::Element>,
        controller: DragController<H, D>,
    ) -> bool {
        if !dom.is_connected(&source) {
            tracing::debug!(?source, "drag source is detached, not arming");
            return false;
        }
        let capture_target = controller
            .pointer_capture
            .clone()
            .unwrap_or_else(|| source.clone());
        let mut discarded = false;
        let mut index = 0;
        while index < self.sessions.len() {
            let session = &self.sessions[index];
            let stale = session.pointer_id() == input.pointer_id
                && (*session.capture_target() == capture_target || session.down() != input);
            if stale {
                tracing::debug!(pointer = input.pointer_id.0, "discarding stale drag session");
                self.sessions.remove(index).cleanup(dom);
                discarded = true;
            } else {
                index += 1;
            }
        }
        if discarded {
            self.release_body(dom);
        }
        if self.sessions.is_empty() {
            let body = dom.body();
            self.saved_user_select = dom.inline_style(&body, USER_SELECT_PROPERTY);
        }
        let session = DragSession::arm(dom, source, input, controller);
        self.sessions.push(session);
        true
    }

    /// Routes one pointer event delivered to `current_target`.
    ///
    /// Pointer-down is matched against registrations rooted at
    /// `current_target`. Move, up and cancel are matched against the session
    /// whose capture target is `current_target` and whose pointer id matches.
    /// Input for other pointers is [`PointerResponse::Ignored`].
    pub fn handle_pointer(
        &mut self,
        dom: &mut H,
        current_target: &H::Element,
        input: &PointerInput<H::Element>,
    ) -> PointerResponse {
        tracing::trace!(
            kind = input.kind.name(),
            pointer = input.pointer_id.0,
            ?current_target,
            "pointer input"
        );
        match input.kind {
            PointerKind::Down => {
                let host: &H = dom;
                let starts: Vec<(H::Element, DragController<H, D>)> = self
                    .registrations
                    .iter()
                    .filter(|r| r.root == *current_target)
                    .filter_map(|r| {
                        let source = match &r.selector {
                            Some(selector) => host
                                .closest(&input.target, selector)
                                .filter(|el| host.contains(&r.root, el))?,
                            None => r.root.clone(),
                        };
                        Some((source, r.controller.clone()))
                    })
                    .collect();
                if starts.is_empty() {
                    return PointerResponse::Ignored;
                }
                for (source, controller) in starts {
                    self.activate_drag(dom, source, input, controller);
                }
                PointerResponse::Handled
            }
            PointerKind::Move => match self.session_index(current_target, input.pointer_id) {
                Some(index) => self.sessions[index].on_move(dom, input),
                None => PointerResponse::Ignored,
            },
            PointerKind::Up | PointerKind::Cancel => {
                match self.session_index(current_target, input.pointer_id) {
                    Some(index) => {
                        let response = self.sessions.remove(index).on_end(dom, input);
                        self.release_body(dom);
                        response
                    }
                    None => PointerResponse::Ignored,
                }
            }
        }
    }

    /// Number of live sessions, armed or active.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Phase of the session bound to `capture_target` for `pointer_id`.
    pub fn phase(&self, capture_target: &H::Element, pointer_id: PointerId) -> Option<DragPhase> {
        self.session_index(capture_target, pointer_id)
            .map(|index| self.sessions[index].phase())
    }

    /// Restores the body markers once no session is left.
    fn release_body(&mut self, dom: &mut H) {
        if !self.sessions.is_empty() {
            return;
        }
        let body = dom.body();
        match self.saved_user_select.take() {
            Some(value) if !value.is_empty() => dom.set_style(&body, USER_SELECT_PROPERTY, &value),
            _ => dom.remove_style(&body, USER_SELECT_PROPERTY),
        }
        dom.remove_class(&body, CURSOR_CLASS);
    }

    fn session_index(&self, capture_target: &H::Element, pointer_id: PointerId) -> Option<usize> {
        self.sessions
            .iter()
            .position(|s| s.pointer_id() == pointer_id && s.capture_target() == capture_target)
    }
}
