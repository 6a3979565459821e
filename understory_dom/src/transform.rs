// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Vec2};
use smallvec::SmallVec;

use crate::Dom;

/// A 2D CSS transform decomposed into its matrix components.
///
/// Field order follows `matrix(scaleX, skewY, skewX, scaleY, translateX, translateY)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// `a`
    pub scale_x: f64,
    /// `b`
    pub skew_y: f64,
    /// `c`
    pub skew_x: f64,
    /// `d`
    pub scale_y: f64,
    /// `e`
    pub translate_x: f64,
    /// `f`
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform (`none`).
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        skew_y: 0.0,
        skew_x: 0.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Reads and decomposes the computed `transform` of `el`.
    pub fn of<H: Dom>(dom: &H, el: &H::Element) -> Self {
        dom.computed_style(el, "transform")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Parses a CSS transform value.
    ///
    /// Accepts `none`, `matrix(...)`, `matrix3d(...)` (its 2D part) and
    /// `translate(x[, y])`. Anything else decomposes to the identity, which is
    /// how a missing or unsupported value is treated by drag code.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        let Some((func, args)) = value.split_once('(') else {
            return Self::IDENTITY;
        };
        let Some(args) = args.strip_suffix(')') else {
            return Self::IDENTITY;
        };
        let nums = parse_args(args);
        let arg = |i: usize| nums.get(i).copied().unwrap_or(0.0);
        match func.trim() {
            "matrix" if nums.len() == 6 => Self {
                scale_x: arg(0),
                skew_y: arg(1),
                skew_x: arg(2),
                scale_y: arg(3),
                translate_x: arg(4),
                translate_y: arg(5),
            },
            "matrix3d" if nums.len() == 16 => Self {
                scale_x: arg(0),
                skew_y: arg(1),
                skew_x: arg(4),
                scale_y: arg(5),
                translate_x: arg(12),
                translate_y: arg(13),
            },
            "translate" if (1..=2).contains(&nums.len()) => Self {
                translate_x: arg(0),
                translate_y: arg(1),
                ..Self::IDENTITY
            },
            _ => Self::IDENTITY,
        }
    }

    /// Translation part of the transform.
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }

    /// Converts to a kurbo affine.
    pub fn to_affine(&self) -> Affine {
        Affine::new([
            self.scale_x,
            self.skew_y,
            self.skew_x,
            self.scale_y,
            self.translate_x,
            self.translate_y,
        ])
    }
}

/// Parses the comma separated arguments of a transform function, ignoring `px` units.
///
/// Returns an empty list when any argument fails to parse.
fn parse_args(args: &str) -> SmallVec<[f64; 16]> {
    let mut out = SmallVec::new();
    for arg in args.split(',') {
        let arg = arg.trim();
        let arg = arg.strip_suffix("px").unwrap_or(arg);
        match arg.trim().parse::<f64>() {
            Ok(v) => out.push(v),
            Err(_) => return SmallVec::new(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_identity() {
        assert_eq!(Transform::parse("none"), Transform::IDENTITY);
        assert_eq!(Transform::parse(""), Transform::IDENTITY);
    }

    #[test]
    fn matrix_components_in_css_order() {
        let t = Transform::parse("matrix(2, 0.5, -0.5, 3, 10.5, -20)");
        assert_eq!(t.scale_x, 2.0);
        assert_eq!(t.skew_y, 0.5);
        assert_eq!(t.skew_x, -0.5);
        assert_eq!(t.scale_y, 3.0);
        assert_eq!(t.translation(), Vec2::new(10.5, -20.0));
    }

    #[test]
    fn matrix3d_keeps_the_2d_part() {
        let t = Transform::parse("matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 7, 9, 0, 1)");
        assert_eq!(t.translation(), Vec2::new(7.0, 9.0));
        assert_eq!(t.scale_x, 1.0);
        assert_eq!(t.scale_y, 1.0);
    }

    #[test]
    fn translate_with_units() {
        let t = Transform::parse("translate(12px, -4.5px)");
        assert_eq!(t.translation(), Vec2::new(12.0, -4.5));
        let t = Transform::parse("translate(3px)");
        assert_eq!(t.translation(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn malformed_values_fall_back_to_identity() {
        assert_eq!(Transform::parse("matrix(1, 0, 0)"), Transform::IDENTITY);
        assert_eq!(Transform::parse("rotate(45deg)"), Transform::IDENTITY);
        assert_eq!(Transform::parse("matrix(a, b, c, d, e, f)"), Transform::IDENTITY);
    }

    #[test]
    fn affine_round_trip_of_translation() {
        let t = Transform::parse("matrix(1, 0, 0, 1, 5, 6)");
        assert_eq!(t.to_affine().translation(), Vec2::new(5.0, 6.0));
    }
}
