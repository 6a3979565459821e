// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which parts of a dragged box are kept inside a constraint container.

use core::convert::Infallible;
use core::str::FromStr;

use kurbo::{Point, Rect};
use understory_dom::geometry::clamp;

bitflags::bitflags! {
    /// Edges and midpoints of the dragged element that are clamped into the
    /// constraint container.
    ///
    /// Each flag clamps one coordinate into the container's span on that axis.
    /// Flags combine; see [`HitboxSpec::resolve`] for the order they apply in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HitboxSpec: u8 {
        /// Top edge.
        const TOP    = 0b0000_0001;
        /// Right edge.
        const RIGHT  = 0b0000_0010;
        /// Bottom edge.
        const BOTTOM = 0b0000_0100;
        /// Left edge.
        const LEFT   = 0b0000_1000;
        /// Horizontal midpoint.
        const CENTER = 0b0001_0000;
        /// Vertical midpoint.
        const MIDDLE = 0b0010_0000;
    }
}

impl HitboxSpec {
    /// The top-left corner stays inside. This is the default.
    pub const TOP_LEFT: Self = Self::TOP.union(Self::LEFT);
    /// The center point stays inside.
    pub const CENTERED: Self = Self::CENTER.union(Self::MIDDLE);
    /// The whole box stays inside.
    pub const BOX: Self = Self::TOP
        .union(Self::RIGHT)
        .union(Self::BOTTOM)
        .union(Self::LEFT);

    /// Parses a hitbox keyword.
    ///
    /// `"center"` and `"box"` are shorthands; anything else is scanned for the
    /// words `top`, `left`, `bottom`, `right`, `center` and `middle`, so
    /// `"top-left"` or `"bottom-center"` work. Unrecognized input yields an
    /// empty spec, which clamps nothing.
    pub fn parse(keyword: &str) -> Self {
        match keyword.trim() {
            "center" => Self::CENTERED,
            "box" => Self::BOX,
            other => {
                let mut spec = Self::empty();
                for (word, flag) in [
                    ("top", Self::TOP),
                    ("left", Self::LEFT),
                    ("bottom", Self::BOTTOM),
                    ("right", Self::RIGHT),
                    ("center", Self::CENTER),
                    ("middle", Self::MIDDLE),
                ] {
                    if other.contains(word) {
                        spec |= flag;
                    }
                }
                spec
            }
        }
    }

    /// Clamps the top-left corner of `dragged` against `container`.
    ///
    /// Horizontal flags apply in the order left, center, right; vertical ones
    /// top, middle, bottom. Each step starts from the previous step's result
    /// and overwrites it, so with conflicting flags the last one applied is
    /// the one guaranteed to hold.
    pub fn resolve(self, container: Rect, dragged: Rect) -> Point {
        let width = dragged.width();
        let height = dragged.height();
        let mut x = dragged.x0;
        let mut y = dragged.y0;

        if self.contains(Self::LEFT) {
            x = clamp(x, container.x0, container.x1);
        }
        if self.contains(Self::CENTER) {
            x = clamp(x + width / 2.0, container.x0, container.x1) - width / 2.0;
        }
        if self.contains(Self::RIGHT) {
            x = clamp(x + width, container.x0, container.x1) - width;
        }

        if self.contains(Self::TOP) {
            y = clamp(y, container.y0, container.y1);
        }
        if self.contains(Self::MIDDLE) {
            y = clamp(y + height / 2.0, container.y0, container.y1) - height / 2.0;
        }
        if self.contains(Self::BOTTOM) {
            y = clamp(y + height, container.y0, container.y1) - height;
        }

        Point::new(x, y)
    }
}

impl Default for HitboxSpec {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

impl FromStr for HitboxSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Rect = Rect::new(100.0, 100.0, 300.0, 200.0);

    fn at(x: f64, y: f64) -> Rect {
        Rect::new(x, y, x + 40.0, y + 20.0)
    }

    #[test]
    fn keywords() {
        assert_eq!(HitboxSpec::parse("top-left"), HitboxSpec::TOP_LEFT);
        assert_eq!(HitboxSpec::parse("center"), HitboxSpec::CENTERED);
        assert_eq!(HitboxSpec::parse("box"), HitboxSpec::BOX);
        assert_eq!(
            HitboxSpec::parse("bottom-center"),
            HitboxSpec::BOTTOM | HitboxSpec::CENTER
        );
        assert_eq!(HitboxSpec::parse("nowhere"), HitboxSpec::empty());
        assert_eq!(HitboxSpec::default(), HitboxSpec::TOP_LEFT);
    }

    #[test]
    fn top_left_lets_the_box_overhang_right_and_bottom() {
        let p = HitboxSpec::TOP_LEFT.resolve(CONTAINER, at(290.0, 195.0));
        assert_eq!(p, Point::new(290.0, 195.0));
        let p = HitboxSpec::TOP_LEFT.resolve(CONTAINER, at(500.0, 0.0));
        assert_eq!(p, Point::new(300.0, 100.0));
    }

    #[test]
    fn center_clamps_the_midpoint() {
        let p = HitboxSpec::CENTERED.resolve(CONTAINER, at(0.0, 0.0));
        assert_eq!(p, Point::new(80.0, 90.0));
    }

    #[test]
    fn box_keeps_the_whole_rect_inside_from_any_start() {
        let mut x = -200.0;
        while x <= 600.0 {
            let mut y = -200.0;
            while y <= 500.0 {
                let p = HitboxSpec::BOX.resolve(CONTAINER, at(x, y));
                let placed = Rect::new(p.x, p.y, p.x + 40.0, p.y + 20.0);
                assert!(
                    placed.x0 >= CONTAINER.x0
                        && placed.y0 >= CONTAINER.y0
                        && placed.x1 <= CONTAINER.x1
                        && placed.y1 <= CONTAINER.y1,
                    "{placed:?} escapes {CONTAINER:?} when starting at ({x}, {y})"
                );
                y += 37.5;
            }
            x += 43.0;
        }
    }

    #[test]
    fn axes_are_independent() {
        let p = HitboxSpec::LEFT.resolve(CONTAINER, at(0.0, 1000.0));
        assert_eq!(p, Point::new(100.0, 1000.0));
        let p = HitboxSpec::BOTTOM.resolve(CONTAINER, at(1000.0, 1000.0));
        assert_eq!(p, Point::new(1000.0, 180.0));
    }

    #[test]
    fn later_flags_overwrite_earlier_ones() {
        // Wider than the container: LEFT pulls to x0, RIGHT then pushes back.
        let wide = Rect::new(0.0, 150.0, 260.0, 170.0);
        let p = (HitboxSpec::LEFT | HitboxSpec::RIGHT).resolve(CONTAINER, wide);
        assert_eq!(p.x, 40.0);
    }
}
