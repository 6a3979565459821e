// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Test DOM: an in-memory host for exercising interaction crates.
//!
//! [`TestDom`] implements [`Dom`] and [`FrameScheduler`] over a small element
//! tree. It is deliberately simple:
//!
//! - Each element has a layout rectangle in document coordinates. Inline
//!   `position: fixed|absolute` with `left`/`top`, inline `width`/`height`,
//!   and a `matrix(...)`/`translate(...)` transform all feed into
//!   [`Dom::bounding_rect`], so moving an element through styles moves it for
//!   hit testing too.
//! - Hit testing picks the last visible element in document order (later
//!   siblings paint on top). `visibility` is inherited.
//! - Selectors are compound only: `tag`, `.class`, `#id` and concatenations.
//! - Pointer routing ([`TestDom::route`]) honours pointer capture and returns
//!   the bound elements along the bubbling path, once each.
//! - Every inline style write is recorded in [`TestDom::style_log`] along with
//!   the number of animation frames elapsed so far.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_dom::Dom;
//! use understory_test_dom::TestDom;
//!
//! let mut dom = TestDom::new(Size::new(800.0, 600.0));
//! let body = dom.body();
//! let item = dom.add(&body, "div", Rect::new(10.0, 10.0, 60.0, 40.0));
//! dom.add_class(&item, "item");
//!
//! assert_eq!(dom.element_from_point(Point::new(20.0, 20.0)), Some(item));
//! assert_eq!(dom.closest(&item, ".item"), Some(item));
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::future::{Future, ready};
use std::time::Duration;

use kurbo::{Affine, Point, Rect, Size, Vec2};
use understory_dom::{CustomEvent, Dom, FrameScheduler, PointerId, PointerKind, Transform};

mod selector;

use selector::Compound;

/// Handle to an element of a [`TestDom`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    inline: BTreeMap<String, String>,
    computed: BTreeMap<String, String>,
    layout: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str, layout: Rect) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            inline: BTreeMap::new(),
            computed: BTreeMap::new(),
            layout,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// One recorded inline style mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleWrite {
    /// Element written to.
    pub el: NodeId,
    /// Property name.
    pub property: String,
    /// New value, `None` when the property was removed.
    pub value: Option<String>,
    /// Animation frames elapsed when the write happened.
    pub frame: usize,
}

type Listener = Box<dyn FnMut(&mut dyn Any)>;

/// An in-memory element tree implementing [`Dom`] and [`FrameScheduler`].
pub struct TestDom {
    nodes: Vec<Node>,
    document: NodeId,
    body: NodeId,
    viewport: Size,
    scroll: Vec2,
    captures: BTreeMap<PointerId, NodeId>,
    bindings: Vec<(NodeId, PointerKind, String)>,
    listeners: Vec<(NodeId, &'static str, Listener)>,
    dispatched: Vec<(NodeId, &'static str)>,
    style_log: Vec<StyleWrite>,
    frames: Cell<usize>,
    sleeps: RefCell<Vec<Duration>>,
}

impl fmt::Debug for TestDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDom")
            .field("nodes", &self.nodes.len())
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .field("captures", &self.captures)
            .field("bindings", &self.bindings)
            .field("listeners", &self.listeners.len())
            .field("dispatched", &self.dispatched)
            .field("style_log", &self.style_log.len())
            .field("frames", &self.frames.get())
            .finish_non_exhaustive()
    }
}

impl TestDom {
    /// Creates a document whose body covers the viewport.
    pub fn new(viewport: Size) -> Self {
        let document = Node::new("#document", Rect::ZERO);
        let mut body = Node::new("body", Rect::from_origin_size(Point::ORIGIN, viewport));
        body.parent = Some(NodeId(0));
        let mut nodes = vec![document, body];
        nodes[0].children.push(NodeId(1));
        Self {
            nodes,
            document: NodeId(0),
            body: NodeId(1),
            viewport,
            scroll: Vec2::ZERO,
            captures: BTreeMap::new(),
            bindings: Vec::new(),
            listeners: Vec::new(),
            dispatched: Vec::new(),
            style_log: Vec::new(),
            frames: Cell::new(0),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    /// Creates a detached element.
    pub fn create(&mut self, tag: &str, layout: Rect) -> NodeId {
        self.nodes.push(Node::new(tag, layout));
        NodeId(self.nodes.len() - 1)
    }

    /// Creates an element and appends it to `parent`.
    pub fn add(&mut self, parent: &NodeId, tag: &str, layout: Rect) -> NodeId {
        let el = self.create(tag, layout);
        self.append_child(parent, &el);
        el
    }

    /// Sets the `id` attribute.
    pub fn set_element_id(&mut self, el: &NodeId, id: &str) {
        self.nodes[el.0].id = Some(id.to_string());
    }

    /// Untransformed layout rectangle in document coordinates.
    pub fn layout(&self, el: &NodeId) -> Rect {
        self.nodes[el.0].layout
    }

    /// Moves an element in layout, as a reflow would.
    pub fn set_layout(&mut self, el: &NodeId, layout: Rect) {
        self.nodes[el.0].layout = layout;
    }

    /// Sets a value returned by [`Dom::computed_style`] when no inline value exists.
    pub fn set_computed(&mut self, el: &NodeId, property: &str, value: &str) {
        self.nodes[el.0]
            .computed
            .insert(property.to_string(), value.to_string());
    }

    /// Scrolls the window.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// Resizes the viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Inline style value, if set.
    pub fn style(&self, el: &NodeId, property: &str) -> Option<&str> {
        self.nodes[el.0].inline.get(property).map(String::as_str)
    }

    /// Current class list.
    pub fn classes(&self, el: &NodeId) -> &[String] {
        &self.nodes[el.0].classes
    }

    /// Parent element, if attached to one.
    pub fn parent(&self, el: &NodeId) -> Option<NodeId> {
        self.nodes[el.0].parent
    }

    /// Children in document order.
    pub fn children(&self, el: &NodeId) -> &[NodeId] {
        &self.nodes[el.0].children
    }

    /// Pointer bindings currently registered on `el`.
    pub fn bindings(&self, el: &NodeId) -> Vec<(PointerKind, String)> {
        self.bindings
            .iter()
            .filter(|(node, _, _)| node == el)
            .map(|(_, kind, ns)| (*kind, ns.clone()))
            .collect()
    }

    /// Total number of pointer bindings in the document.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Element currently capturing `pointer_id`.
    pub fn captured(&self, pointer_id: PointerId) -> Option<NodeId> {
        self.captures.get(&pointer_id).copied()
    }

    /// The element a pointer event at `point` is targeted at: the capturing
    /// element if any, otherwise the topmost element under the point.
    pub fn hit_target(&self, pointer_id: PointerId, point: Point) -> Option<NodeId> {
        self.captured(pointer_id)
            .or_else(|| self.element_from_point(point))
    }

    /// Bound elements a `kind` event from `pointer_id` at `point` reaches, in
    /// bubbling order.
    pub fn route(&self, kind: PointerKind, pointer_id: PointerId, point: Point) -> Vec<NodeId> {
        let Some(target) = self.hit_target(pointer_id, point) else {
            return Vec::new();
        };
        self.path(target)
            .into_iter()
            .filter(|el| {
                self.bindings
                    .iter()
                    .any(|(node, k, _)| *node == *el && *k == kind)
            })
            .collect()
    }

    /// Registers a typed listener for custom events named `name` reaching `el`.
    ///
    /// Events whose detail is not a `T` are skipped by this listener.
    pub fn add_event_listener<T: 'static>(
        &mut self,
        el: &NodeId,
        name: &'static str,
        mut f: impl FnMut(&mut CustomEvent<T>) + 'static,
    ) {
        let listener: Listener = Box::new(move |ev: &mut dyn Any| {
            if let Some(ev) = ev.downcast_mut::<CustomEvent<T>>() {
                f(ev);
            }
        });
        self.listeners.push((*el, name, listener));
    }

    /// Every custom event dispatched so far, as `(target, name)`.
    pub fn dispatched(&self) -> &[(NodeId, &'static str)] {
        &self.dispatched
    }

    /// Names of dispatched events, in order.
    pub fn dispatched_names(&self) -> Vec<&'static str> {
        self.dispatched.iter().map(|(_, name)| *name).collect()
    }

    /// Forgets recorded dispatches.
    pub fn clear_dispatched(&mut self) {
        self.dispatched.clear();
    }

    /// Every inline style write so far.
    pub fn style_log(&self) -> &[StyleWrite] {
        &self.style_log
    }

    /// Animation frames awaited so far.
    pub fn frames(&self) -> usize {
        self.frames.get()
    }

    /// Durations passed to [`FrameScheduler::sleep`] so far.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    /// `el` followed by its ancestors.
    fn path(&self, el: NodeId) -> Vec<NodeId> {
        let mut out = vec![el];
        let mut cur = self.nodes[el.0].parent;
        while let Some(p) = cur {
            out.push(p);
            cur = self.nodes[p.0].parent;
        }
        out
    }

    fn px(&self, el: &NodeId, property: &str) -> Option<f64> {
        let value = self.nodes[el.0].inline.get(property)?;
        value.trim().trim_end_matches("px").trim().parse().ok()
    }

    fn style_value(&self, el: &NodeId, property: &str) -> Option<&str> {
        let node = &self.nodes[el.0];
        node.inline
            .get(property)
            .or_else(|| node.computed.get(property))
            .map(String::as_str)
    }

    fn detach(&mut self, el: &NodeId) {
        if let Some(parent) = self.nodes[el.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| c != el);
        }
    }

    fn deep_clone(&mut self, el: NodeId) -> NodeId {
        let mut node = self.nodes[el.0].clone();
        node.parent = None;
        let children = std::mem::take(&mut node.children);
        self.nodes.push(node);
        let copy = NodeId(self.nodes.len() - 1);
        for child in children {
            let child_copy = self.deep_clone(child);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }

    fn hit(&self, el: NodeId, point: Point, inherited_visible: bool, best: &mut Option<NodeId>) {
        let visible = match self.nodes[el.0].inline.get("visibility").map(String::as_str) {
            Some("hidden") => false,
            Some("visible") => true,
            _ => inherited_visible,
        };
        let pickable = self.style_value(&el, "pointer-events") != Some("none");
        if visible && pickable && self.bounding_rect(&el).contains(point) {
            *best = Some(el);
        }
        for child in &self.nodes[el.0].children {
            self.hit(*child, point, visible, best);
        }
    }

    fn log_style(&mut self, el: &NodeId, property: &str, value: Option<&str>) {
        self.style_log.push(StyleWrite {
            el: *el,
            property: property.to_string(),
            value: value.map(str::to_string),
            frame: self.frames.get(),
        });
    }
}

impl Dom for TestDom {
    type Element = NodeId;

    fn document(&self) -> NodeId {
        self.document
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn bounding_rect(&self, el: &NodeId) -> Rect {
        let node = &self.nodes[el.0];
        let size = Size::new(
            self.px(el, "width").unwrap_or(node.layout.width()),
            self.px(el, "height").unwrap_or(node.layout.height()),
        );
        let origin = match self.style_value(el, "position") {
            Some("fixed") => Point::new(
                self.px(el, "left").unwrap_or(node.layout.x0),
                self.px(el, "top").unwrap_or(node.layout.y0),
            ),
            Some("absolute") => {
                Point::new(
                    self.px(el, "left").unwrap_or(node.layout.x0),
                    self.px(el, "top").unwrap_or(node.layout.y0),
                ) - self.scroll
            }
            _ => node.layout.origin() - self.scroll,
        };
        let rect = Rect::from_origin_size(origin, size);
        match self.style_value(el, "transform") {
            // Transforms apply around the box center, the CSS default origin.
            Some(t) => {
                let center = rect.center().to_vec2();
                let affine = Affine::translate(center)
                    * Transform::parse(t).to_affine()
                    * Affine::translate(-center);
                affine.transform_rect_bbox(rect)
            }
            None => rect,
        }
    }

    fn offset_origin(&self, el: &NodeId) -> Point {
        let layout = self.nodes[el.0].layout;
        Point::new(
            self.px(el, "left").unwrap_or(layout.x0),
            self.px(el, "top").unwrap_or(layout.y0),
        )
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn computed_style(&self, el: &NodeId, property: &str) -> Option<String> {
        if let Some(value) = self.style_value(el, property) {
            return Some(value.to_string());
        }
        match property {
            "position" => Some("static".to_string()),
            "transform" => Some("none".to_string()),
            "visibility" => Some("visible".to_string()),
            _ => None,
        }
    }

    fn inline_style(&self, el: &NodeId, property: &str) -> Option<String> {
        self.nodes[el.0].inline.get(property).cloned()
    }

    fn set_style(&mut self, el: &NodeId, property: &str, value: &str) {
        self.log_style(el, property, Some(value));
        if value.is_empty() {
            self.nodes[el.0].inline.remove(property);
        } else {
            self.nodes[el.0]
                .inline
                .insert(property.to_string(), value.to_string());
        }
    }

    fn remove_style(&mut self, el: &NodeId, property: &str) {
        self.log_style(el, property, None);
        self.nodes[el.0].inline.remove(property);
    }

    fn add_class(&mut self, el: &NodeId, class: &str) {
        if !self.has_class(el, class) {
            self.nodes[el.0].classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, el: &NodeId, class: &str) {
        self.nodes[el.0].classes.retain(|c| c != class);
    }

    fn has_class(&self, el: &NodeId, class: &str) -> bool {
        self.nodes[el.0].classes.iter().any(|c| c == class)
    }

    fn closest(&self, el: &NodeId, selector: &str) -> Option<NodeId> {
        let compound = Compound::parse(selector)?;
        self.path(*el).into_iter().find(|candidate| {
            let node = &self.nodes[candidate.0];
            *candidate != self.document
                && compound.matches(&node.tag, node.id.as_deref(), &node.classes)
        })
    }

    fn contains(&self, ancestor: &NodeId, el: &NodeId) -> bool {
        self.path(*el).contains(ancestor)
    }

    fn is_connected(&self, el: &NodeId) -> bool {
        self.contains(&self.document, el)
    }

    fn element_from_point(&self, point: Point) -> Option<NodeId> {
        let mut best = None;
        self.hit(self.body, point, true, &mut best);
        best
    }

    fn clone_element(&mut self, el: &NodeId) -> NodeId {
        self.deep_clone(*el)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.push(*child);
    }

    fn remove_element(&mut self, el: &NodeId) {
        self.detach(el);
    }

    fn set_pointer_capture(&mut self, el: &NodeId, pointer_id: PointerId) {
        self.captures.insert(pointer_id, *el);
    }

    fn release_pointer_capture(&mut self, el: &NodeId, pointer_id: PointerId) {
        if self.captures.get(&pointer_id) == Some(el) {
            self.captures.remove(&pointer_id);
        }
    }

    fn listen(&mut self, el: &NodeId, kind: PointerKind, namespace: &str) {
        let exists = self
            .bindings
            .iter()
            .any(|(node, k, ns)| node == el && *k == kind && ns == namespace);
        if !exists {
            self.bindings.push((*el, kind, namespace.to_string()));
        }
    }

    fn unlisten(&mut self, el: &NodeId, namespace: &str) {
        self.bindings
            .retain(|(node, _, ns)| !(node == el && ns == namespace));
    }

    fn dispatch_event<T: 'static>(&mut self, el: &NodeId, event: &mut CustomEvent<T>) {
        self.dispatched.push((*el, event.name()));
        let path = if event.bubbles() {
            self.path(*el)
        } else {
            vec![*el]
        };
        for node in path {
            for (target, name, listener) in &mut self.listeners {
                if *target == node && *name == event.name() {
                    listener(&mut *event);
                }
            }
        }
    }
}

impl FrameScheduler for TestDom {
    fn next_frame(&self) -> impl Future<Output = ()> {
        self.frames.set(self.frames.get() + 1);
        ready(())
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.sleeps.borrow_mut().push(duration);
        ready(())
    }
}
