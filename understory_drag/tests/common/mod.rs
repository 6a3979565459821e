// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pointer-routing harness for drag integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    reason = "Each test binary uses a different subset of the helpers."
)]

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use understory_dom::{Dom, PointerId, PointerInput, PointerKind};
use understory_drag::{DragController, DragEngine, DragEventKind, PointerResponse};
use understory_test_dom::{NodeId, TestDom};

pub(crate) const MOUSE: PointerId = PointerId(1);
pub(crate) const FINGER: PointerId = PointerId(2);

/// A test document plus an engine, with pointer input routed the way a
/// browser would: to the capturing element if any, else the hit element,
/// then up through every ancestor holding a binding for that event type.
pub(crate) struct Harness<D> {
    pub(crate) dom: TestDom,
    pub(crate) engine: DragEngine<TestDom, D>,
}

impl<D: Clone + 'static> Harness<D> {
    pub(crate) fn new() -> Self {
        Self {
            dom: TestDom::new(Size::new(800.0, 600.0)),
            engine: DragEngine::new(),
        }
    }

    pub(crate) fn body(&self) -> NodeId {
        self.dom.body()
    }

    pub(crate) fn add(&mut self, parent: &NodeId, rect: Rect, class: &str) -> NodeId {
        let el = self.dom.add(parent, "div", rect);
        if !class.is_empty() {
            self.dom.add_class(&el, class);
        }
        el
    }

    pub(crate) fn register(&mut self, el: &NodeId, controller: DragController<TestDom, D>) {
        self.engine
            .draggable(&mut self.dom, el, None, controller)
            .expect("element roots never need a selector");
    }

    pub(crate) fn send(&mut self, kind: PointerKind, pointer: PointerId, x: f64, y: f64) -> PointerResponse {
        let point = Point::new(x, y);
        let Some(target) = self.dom.hit_target(pointer, point) else {
            return PointerResponse::Ignored;
        };
        let input = PointerInput::new(pointer, kind, point, target);
        let mut response = PointerResponse::Ignored;
        for current in self.dom.route(kind, pointer, point) {
            match self.engine.handle_pointer(&mut self.dom, &current, &input) {
                PointerResponse::Ignored => {}
                PointerResponse::Handled => response = PointerResponse::Handled,
                PointerResponse::PreventDefault => return PointerResponse::PreventDefault,
            }
        }
        response
    }

    pub(crate) fn down(&mut self, pointer: PointerId, x: f64, y: f64) -> PointerResponse {
        self.send(PointerKind::Down, pointer, x, y)
    }

    pub(crate) fn move_to(&mut self, pointer: PointerId, x: f64, y: f64) -> PointerResponse {
        self.send(PointerKind::Move, pointer, x, y)
    }

    pub(crate) fn up(&mut self, pointer: PointerId, x: f64, y: f64) -> PointerResponse {
        self.send(PointerKind::Up, pointer, x, y)
    }

    pub(crate) fn cancel(&mut self, pointer: PointerId, x: f64, y: f64) -> PointerResponse {
        self.send(PointerKind::Cancel, pointer, x, y)
    }
}

/// Callback log shared between a controller and the test body.
pub(crate) type Log = Rc<RefCell<Vec<(DragEventKind, Option<NodeId>)>>>;

/// Records every lifecycle callback with the droppable it carried.
pub(crate) fn logging<D: 'static>(controller: DragController<TestDom, D>) -> (DragController<TestDom, D>, Log) {
    let log: Log = Rc::default();
    let mut controller = controller;
    for kind in DragEventKind::ALL {
        let log = log.clone();
        controller = controller.on(kind, move |_dom, ev| {
            log.borrow_mut().push((kind, ev.detail.droppable().copied()));
        });
    }
    (controller, log)
}

pub(crate) fn kinds(log: &Log) -> Vec<DragEventKind> {
    log.borrow().iter().map(|(kind, _)| *kind).collect()
}
