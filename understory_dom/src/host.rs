// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt::Debug;

use kurbo::{Point, Rect, Size, Vec2};

use crate::event::CustomEvent;
use crate::pointer::{PointerId, PointerKind};

/// The capability set a host UI toolkit exposes to interaction code.
///
/// Coordinates are CSS pixels. Rectangles returned by [`Dom::bounding_rect`]
/// are in viewport ("client") space with the element's transform applied, the
/// same space pointer coordinates are reported in.
///
/// ## Listener bindings
///
/// Interaction code never owns closures registered with the host. Instead it
/// calls [`Dom::listen`] to ask the host to route a kind of pointer event that
/// reaches an element back to it, tagged with a namespace. The host delivers
/// the event once per bound element (not once per binding), and
/// [`Dom::unlisten`] drops every binding of a namespace on that element.
pub trait Dom {
    /// A cheap handle to an element.
    type Element: Clone + PartialEq + Debug;

    /// The whole-document scope.
    fn document(&self) -> Self::Element;

    /// The document body, where ghosts are attached and cursor markers are set.
    fn body(&self) -> Self::Element;

    /// Bounding rectangle in viewport coordinates, transform included.
    fn bounding_rect(&self, el: &Self::Element) -> Rect;

    /// Layout offset of the element relative to its offset parent (`offsetLeft`, `offsetTop`).
    fn offset_origin(&self, el: &Self::Element) -> Point;

    /// Current window scroll offset.
    fn scroll_offset(&self) -> Vec2;

    /// Size of the layout viewport (`innerWidth`, `innerHeight`).
    fn viewport_size(&self) -> Size;

    /// Resolved value of a style property, if the host knows it.
    fn computed_style(&self, el: &Self::Element, property: &str) -> Option<String>;

    /// Inline value of a style property, if one is set.
    fn inline_style(&self, el: &Self::Element, property: &str) -> Option<String>;

    /// Sets an inline style property.
    fn set_style(&mut self, el: &Self::Element, property: &str, value: &str);

    /// Clears an inline style property.
    fn remove_style(&mut self, el: &Self::Element, property: &str);

    /// Adds a class to the element's class list.
    fn add_class(&mut self, el: &Self::Element, class: &str);

    /// Removes a class from the element's class list.
    fn remove_class(&mut self, el: &Self::Element, class: &str);

    /// Returns `true` if the element carries `class`.
    fn has_class(&self, el: &Self::Element, class: &str) -> bool;

    /// Nearest ancestor-or-self matching `selector`.
    fn closest(&self, el: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// Returns `true` if `el` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, el: &Self::Element) -> bool;

    /// Returns `true` if the element is attached to the document.
    fn is_connected(&self, el: &Self::Element) -> bool;

    /// Topmost visible element under a viewport point.
    fn element_from_point(&self, point: Point) -> Option<Self::Element>;

    /// Deep-clones an element. The clone is detached.
    fn clone_element(&mut self, el: &Self::Element) -> Self::Element;

    /// Appends `child` to `parent`, detaching it from any previous parent.
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Detaches an element from its parent. Detached elements are ignored.
    fn remove_element(&mut self, el: &Self::Element);

    /// Routes all further events of `pointer_id` to `el` until released.
    fn set_pointer_capture(&mut self, el: &Self::Element, pointer_id: PointerId);

    /// Releases a capture set with [`Dom::set_pointer_capture`].
    fn release_pointer_capture(&mut self, el: &Self::Element, pointer_id: PointerId);

    /// Binds `kind` pointer events reaching `el` under `namespace`.
    fn listen(&mut self, el: &Self::Element, kind: PointerKind, namespace: &str);

    /// Removes every binding on `el` registered under `namespace`.
    fn unlisten(&mut self, el: &Self::Element, namespace: &str);

    /// Dispatches a custom event on `el`.
    ///
    /// Listeners run synchronously and may mutate `event.detail` or call
    /// [`CustomEvent::prevent_default`]; the caller reads both back afterwards.
    fn dispatch_event<T: 'static>(&mut self, el: &Self::Element, event: &mut CustomEvent<T>);
}
