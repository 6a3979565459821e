// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arming, threshold, data flow and cleanup of a single drag session.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_dom::{Dom, PointerInput, PointerKind};
use understory_drag::{
    CURSOR_CLASS, DragController, DragError, DragEventDetail, DragEventKind, DragPhase,
    Droppable, PointerResponse, SOURCE_CLASS,
};
use understory_test_dom::{NodeId, TestDom};

use common::{Harness, MOUSE, kinds, logging};

fn card(h: &mut Harness<u32>) -> NodeId {
    let body = h.body();
    h.add(&body, Rect::new(10.0, 10.0, 60.0, 40.0), "card")
}

#[test]
fn drag_starts_only_past_the_threshold_and_only_once() {
    let mut h = Harness::new();
    let card = card(&mut h);
    let (controller, log) = logging(DragController::new(0).with_droppable(Droppable::None));
    h.register(&card, controller);

    assert_eq!(h.down(MOUSE, 20.0, 20.0), PointerResponse::Handled);
    assert_eq!(h.engine.phase(&card, MOUSE), Some(DragPhase::Armed));

    // Exactly the threshold on both axes is not enough.
    assert_eq!(h.move_to(MOUSE, 25.0, 15.0), PointerResponse::Handled);
    assert!(log.borrow().is_empty());
    assert!(h.dom.dispatched().is_empty());

    assert_eq!(h.move_to(MOUSE, 25.5, 20.0), PointerResponse::PreventDefault);
    assert_eq!(h.engine.phase(&card, MOUSE), Some(DragPhase::Active));
    assert_eq!(kinds(&log), [DragEventKind::DragStart, DragEventKind::Drag]);

    h.move_to(MOUSE, 40.0, 30.0);
    // Coming back inside the threshold keeps dragging.
    h.move_to(MOUSE, 20.0, 20.0);
    assert_eq!(
        kinds(&log),
        [
            DragEventKind::DragStart,
            DragEventKind::Drag,
            DragEventKind::Drag,
            DragEventKind::Drag,
        ]
    );
    assert_eq!(h.dom.dispatched_names(), ["DRAGSTART", "DRAG", "DRAG", "DRAG"]);
    assert!(h.dom.dispatched().iter().all(|(target, _)| *target == card));
}

#[test]
fn release_before_the_threshold_fires_nothing() {
    let mut h = Harness::new();
    let card = card(&mut h);
    let (controller, log) = logging(DragController::new(0));
    h.register(&card, controller);

    h.down(MOUSE, 20.0, 20.0);
    h.move_to(MOUSE, 22.0, 21.0);
    assert_eq!(h.up(MOUSE, 22.0, 21.0), PointerResponse::Handled);

    assert!(log.borrow().is_empty());
    assert_eq!(h.engine.session_count(), 0);
    assert_eq!(h.dom.captured(MOUSE), None);
    assert_eq!(
        h.dom.bindings(&card),
        [(PointerKind::Down, "draggable".to_string())]
    );
}

#[test]
fn active_drag_marks_the_document_and_cleanup_restores_it() {
    let mut h = Harness::new();
    let card = card(&mut h);
    let body = h.body();
    h.dom.set_style(&body, "-webkit-user-select", "text");
    let (controller, log) = logging(DragController::new(0).with_droppable(Droppable::None));
    h.register(&card, controller);

    h.down(MOUSE, 20.0, 20.0);
    assert_eq!(h.dom.captured(MOUSE), Some(card));
    assert_eq!(h.dom.bindings(&card).len(), 4);

    h.move_to(MOUSE, 100.0, 20.0);
    assert!(h.dom.has_class(&card, SOURCE_CLASS));
    assert!(h.dom.has_class(&body, CURSOR_CLASS));
    assert_eq!(h.dom.style(&body, "-webkit-user-select"), Some("none"));
    assert_eq!(h.dom.style(&card, "transform"), Some("translate(80px, 0px)"));

    assert_eq!(h.up(MOUSE, 100.0, 20.0), PointerResponse::PreventDefault);
    assert_eq!(kinds(&log).last(), Some(&DragEventKind::DragEnd));
    assert_eq!(h.dom.dispatched().last(), Some(&(card, "DRAGEND")));

    assert!(!h.dom.has_class(&card, SOURCE_CLASS));
    assert!(!h.dom.has_class(&body, CURSOR_CLASS));
    assert_eq!(h.dom.style(&body, "-webkit-user-select"), Some("text"));
    assert_eq!(h.dom.captured(MOUSE), None);
    assert_eq!(
        h.dom.bindings(&card),
        [(PointerKind::Down, "draggable".to_string())]
    );
    assert_eq!(h.engine.session_count(), 0);
    // The moved element stays where it was dropped.
    assert_eq!(h.dom.style(&card, "transform"), Some("translate(80px, 0px)"));
}

#[test]
fn data_changes_from_callbacks_and_listeners_carry_forward() {
    let mut h = Harness::new();
    let card = card(&mut h);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let controller: DragController<TestDom, u32> = DragController::new(0)
        .with_droppable(Droppable::None)
        .on_drag_start(|_dom, ev| ev.detail.data += 1)
        .on_drag_end({
            let seen = seen.clone();
            move |_dom, ev| seen.borrow_mut().push(ev.detail.data)
        });
    h.register(&card, controller);
    h.dom
        .add_event_listener::<DragEventDetail<NodeId, u32>>(&card, "DRAG", |ev| {
            ev.detail.data += 10;
        });

    h.down(MOUSE, 20.0, 20.0);
    h.move_to(MOUSE, 40.0, 20.0);
    h.move_to(MOUSE, 60.0, 20.0);
    h.up(MOUSE, 60.0, 20.0);

    // The card now sits 40 to the right; every session starts from fresh data.
    h.down(MOUSE, 70.0, 20.0);
    h.move_to(MOUSE, 90.0, 20.0);
    h.move_to(MOUSE, 110.0, 20.0);
    h.up(MOUSE, 110.0, 20.0);

    assert_eq!(*seen.borrow(), [21, 21]);
}

#[test]
fn candidate_callback_fires_on_arming_but_not_for_detached_sources() {
    let mut h = Harness::new();
    let card = card(&mut h);
    let armed = Rc::new(RefCell::new(Vec::new()));
    let controller: DragController<TestDom, u32> = DragController::new(0).on_candidate({
        let armed = armed.clone();
        move |_dom, candidate| armed.borrow_mut().push((candidate.source, candidate.client))
    });
    h.register(&card, controller.clone());

    h.down(MOUSE, 20.0, 20.0);
    assert_eq!(*armed.borrow(), [(card, Point::new(20.0, 20.0))]);
    h.up(MOUSE, 20.0, 20.0);

    let loose = h.dom.create("div", Rect::new(0.0, 0.0, 10.0, 10.0));
    let bindings = h.dom.binding_count();
    let input = PointerInput::new(MOUSE, PointerKind::Down, Point::new(5.0, 5.0), loose);
    assert!(!h.engine.activate_drag(&mut h.dom, loose, &input, controller));
    assert_eq!(armed.borrow().len(), 1);
    assert_eq!(h.dom.binding_count(), bindings);
    assert_eq!(h.engine.session_count(), 0);
}

#[test]
fn rearming_the_same_pointer_replaces_the_stale_session_silently() {
    let mut h = Harness::new();
    let card = card(&mut h);
    let (controller, log) = logging(DragController::new(0));
    let input = PointerInput::new(MOUSE, PointerKind::Down, Point::new(20.0, 20.0), card);

    assert!(h.engine.activate_drag(&mut h.dom, card, &input, controller.clone()));
    assert!(h.engine.activate_drag(&mut h.dom, card, &input, controller));

    assert_eq!(h.engine.session_count(), 1);
    assert_eq!(h.dom.bindings(&card).len(), 3);
    assert!(log.borrow().is_empty());
    assert!(h.dom.dispatched().is_empty());
}

#[test]
fn document_registration_needs_a_selector_and_delegates_to_matches() {
    let mut h = Harness::<u32>::new();
    let doc = h.dom.document();
    assert_eq!(
        h.engine
            .draggable(&mut h.dom, &doc, None, DragController::new(0)),
        Err(DragError::MissingSelector)
    );
    assert_eq!(h.dom.binding_count(), 0);

    h.engine
        .draggable(&mut h.dom, &doc, Some(".card"), DragController::new(0))
        .unwrap();
    let card = card(&mut h);
    let label = h.dom.add(&card, "span", Rect::new(15.0, 15.0, 40.0, 30.0));

    // Pointer-down on a descendant drags the matching ancestor.
    assert_eq!(h.down(MOUSE, 20.0, 20.0), PointerResponse::Handled);
    h.move_to(MOUSE, 60.0, 20.0);
    assert!(h.dom.has_class(&card, SOURCE_CLASS));
    assert!(!h.dom.has_class(&label, SOURCE_CLASS));
    h.up(MOUSE, 60.0, 20.0);

    // Nothing under the pointer matches.
    assert_eq!(h.down(MOUSE, 500.0, 500.0), PointerResponse::Ignored);
    assert_eq!(h.engine.session_count(), 0);

    assert_eq!(h.engine.undraggable(&mut h.dom, &doc), 1);
    assert_eq!(h.dom.binding_count(), 0);
    assert_eq!(h.down(MOUSE, 60.0, 20.0), PointerResponse::Ignored);
}
