// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::PositionError;

/// Default distance between the reference box and the placed element.
pub const DEFAULT_GAP: f64 = 8.0;

/// Which side of the reference element the target is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// To the left; falls back to the right when it does not fit.
    Left,
    /// To the right; falls back to the left when it overflows the viewport.
    Right,
    /// Above.
    Top,
    /// Below.
    Bottom,
}

impl Location {
    /// `true` for [`Location::Left`] and [`Location::Right`].
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Alignment used when none is given: top for side placements, left otherwise.
    pub const fn default_align(self) -> Align {
        if self.is_horizontal() {
            Align::Top
        } else {
            Align::Left
        }
    }
}

impl FromStr for Location {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(PositionError::UnknownLocation(other.to_string())),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

/// How the target lines up with the reference along the perpendicular axis.
///
/// Side placements accept `Top`, `Bottom` and `Center`; top/bottom placements
/// accept `Left`, `Right` and `Center`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// Top edges line up.
    Top,
    /// The target's top meets the reference's bottom edge.
    Bottom,
    /// Left edges line up.
    Left,
    /// Right edges line up.
    Right,
    /// Midpoints line up.
    Center,
}

impl Align {
    /// Whether this alignment is meaningful for `at`.
    pub const fn fits(self, at: Location) -> bool {
        match self {
            Self::Center => true,
            Self::Top | Self::Bottom => at.is_horizontal(),
            Self::Left | Self::Right => !at.is_horizontal(),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        })
    }
}

/// Placement request for [`position`](crate::position).
///
/// Build one from a bare keyword (`"right".parse()`), from a [`Location`], or
/// field by field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionOptions {
    /// Side of the reference to place on.
    pub at: Location,
    /// Perpendicular alignment; `None` means [`Location::default_align`].
    pub align: Option<Align>,
    /// Distance from the reference box.
    pub gap: f64,
}

impl PositionOptions {
    /// Placement at `at` with default alignment and gap.
    pub const fn at(at: Location) -> Self {
        Self {
            at,
            align: None,
            gap: DEFAULT_GAP,
        }
    }

    /// Sets the alignment.
    #[must_use]
    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Sets the gap.
    #[must_use]
    pub const fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// The effective alignment, validated against the location.
    pub fn resolved_align(&self) -> Result<Align, PositionError> {
        let align = self.align.unwrap_or(self.at.default_align());
        if align.fits(self.at) {
            Ok(align)
        } else {
            Err(PositionError::MismatchedAlign {
                at: self.at,
                align,
            })
        }
    }
}

impl From<Location> for PositionOptions {
    fn from(at: Location) -> Self {
        Self::at(at)
    }
}

impl FromStr for PositionOptions {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Location>().map(Self::at)
    }
}
