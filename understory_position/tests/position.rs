// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement tests for `understory_position` against the in-memory DOM.

use kurbo::{Point, Rect, Size, Vec2};
use understory_dom::Dom;
use understory_position::{Align, Location, PositionError, PositionOptions, position};
use understory_test_dom::{NodeId, TestDom};

/// A 400x300 viewport with a 50x20 reference at `reference` and a 80x40 target.
fn setup(reference: Rect) -> (TestDom, NodeId, NodeId) {
    let mut dom = TestDom::new(Size::new(400.0, 300.0));
    let body = dom.body();
    let reference = dom.add(&body, "button", reference);
    let target = dom.add(&body, "div", Rect::new(0.0, 0.0, 80.0, 40.0));
    dom.set_style(&target, "position", "absolute");
    (dom, target, reference)
}

#[test]
fn right_of_reference_with_default_gap_and_top_alignment() {
    let (mut dom, target, reference) = setup(Rect::new(100.0, 100.0, 150.0, 120.0));
    let opts: PositionOptions = "right".parse().unwrap();
    let p = position(&mut dom, &target, &reference, &opts).unwrap();
    assert_eq!(p, Point::new(158.0, 100.0));
    assert_eq!(dom.style(&target, "left"), Some("158px"));
    assert_eq!(dom.style(&target, "top"), Some("100px"));
    assert_eq!(dom.bounding_rect(&target).origin(), Point::new(158.0, 100.0));
}

#[test]
fn right_falls_back_to_left_near_the_viewport_edge() {
    let (mut dom, target, reference) = setup(Rect::new(330.0, 100.0, 380.0, 120.0));
    let opts: PositionOptions = "right".parse().unwrap();
    let p = position(&mut dom, &target, &reference, &opts).unwrap();
    // 330 - 8 - 80
    assert_eq!(p.x, 242.0);
}

#[test]
fn left_falls_back_to_right_when_it_would_leave_the_viewport() {
    let (mut dom, target, reference) = setup(Rect::new(20.0, 100.0, 70.0, 120.0));
    let p = position(&mut dom, &target, &reference, &PositionOptions::at(Location::Left)).unwrap();
    assert_eq!(p.x, 78.0);
}

#[test]
fn left_is_kept_when_it_fits() {
    let (mut dom, target, reference) = setup(Rect::new(200.0, 100.0, 250.0, 120.0));
    let p = position(&mut dom, &target, &reference, &PositionOptions::at(Location::Left)).unwrap();
    assert_eq!(p.x, 112.0);
}

#[test]
fn bottom_center_lines_up_midpoints() {
    let (mut dom, target, reference) = setup(Rect::new(100.0, 50.0, 150.0, 70.0));
    let opts = PositionOptions::at(Location::Bottom).with_align(Align::Center);
    let p = position(&mut dom, &target, &reference, &opts).unwrap();
    let placed = dom.bounding_rect(&target);
    assert_eq!(placed.center().x, dom.bounding_rect(&reference).center().x);
    assert_eq!(p.y, 78.0);
}

#[test]
fn top_right_alignment_and_custom_gap() {
    let (mut dom, target, reference) = setup(Rect::new(100.0, 150.0, 200.0, 170.0));
    let opts = PositionOptions::at(Location::Top)
        .with_align(Align::Right)
        .with_gap(2.0);
    let p = position(&mut dom, &target, &reference, &opts).unwrap();
    assert_eq!(p, Point::new(120.0, 108.0));
}

#[test]
fn side_placements_align_on_the_vertical_axis() {
    let (mut dom, target, reference) = setup(Rect::new(100.0, 100.0, 150.0, 200.0));
    let center = PositionOptions::at(Location::Right).with_align(Align::Center);
    let p = position(&mut dom, &target, &reference, &center).unwrap();
    assert_eq!(p.y, 130.0);

    let bottom = PositionOptions::at(Location::Right).with_align(Align::Bottom);
    let p = position(&mut dom, &target, &reference, &bottom).unwrap();
    // The target hangs from the reference's bottom edge.
    assert_eq!(p.y, 200.0);
    assert_eq!(dom.style(&target, "top"), Some("200px"));
}

#[test]
fn bottom_overflow_nudges_up_without_changing_side() {
    let (mut dom, target, reference) = setup(Rect::new(100.0, 250.0, 150.0, 270.0));
    let p = position(&mut dom, &target, &reference, &PositionOptions::at(Location::Bottom)).unwrap();
    // 278 + 40 + 8 - 300 = 26 of overflow.
    assert_eq!(p.y, 252.0);
    assert_eq!(p.x, 100.0);
}

#[test]
fn scroll_is_added_to_written_styles() {
    let (mut dom, target, reference) = setup(Rect::new(100.0, 100.0, 150.0, 120.0));
    dom.set_scroll(Vec2::new(0.0, 30.0));
    let p = position(&mut dom, &target, &reference, &PositionOptions::at(Location::Right)).unwrap();
    assert_eq!(p, Point::new(158.0, 70.0));
    assert_eq!(dom.style(&target, "top"), Some("100px"));
}

#[test]
fn invalid_options_are_rejected_before_any_write() {
    let (mut dom, target, reference) = setup(Rect::new(100.0, 100.0, 150.0, 120.0));
    let opts = PositionOptions::at(Location::Bottom).with_align(Align::Top);
    assert_eq!(
        position(&mut dom, &target, &reference, &opts),
        Err(PositionError::MismatchedAlign {
            at: Location::Bottom,
            align: Align::Top,
        })
    );
    assert_eq!(dom.style(&target, "top"), None);
    assert!(matches!(
        "diagonal".parse::<PositionOptions>(),
        Err(PositionError::UnknownLocation(_))
    ));
}
