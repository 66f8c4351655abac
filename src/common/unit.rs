//! Unit-tagged lengths and rectangles.
//!
//! Templates are authored in CSS pixel (or point) space while the presentation
//! format measures everything in inches and, on the wire, in EMUs. Every value
//! that crosses a component boundary carries its unit in its type, so a pixel
//! rectangle cannot be handed to code expecting inches without an explicit
//! conversion.
//!
//! # Examples
//!
//! ```
//! use slidesmith::common::unit::{Emu, Inches, Px, Rect};
//!
//! let px = Rect::new(Px(96.0), Px(48.0), Px(192.0), Px(96.0));
//! let inches: Rect<Inches> = px.convert();
//! assert_eq!(inches.x, Inches(1.0));
//! assert_eq!(inches.h, Inches(1.0));
//!
//! let emu: Rect<Emu> = inches.convert();
//! assert_eq!(emu.w, Emu(1_828_800));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;
/// CSS reference pixel density.
pub const PX_PER_INCH: f64 = 96.0;
pub const PT_PER_INCH: f64 = 72.0;

#[inline]
pub fn pt_to_emu_f64(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64).round() as i64
}

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

/// CSS pixels (1/96 inch).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Px(pub f64);

/// Typographic points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pt(pub f64);

/// Document units.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// English Metric Units, the integer unit of DrawingML (914 400 per inch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Emu(pub i64);

macro_rules! float_length {
    ($ty:ident, $suffix:literal) => {
        impl $ty {
            #[inline]
            pub fn value(self) -> f64 {
                self.0
            }
        }

        impl Add for $ty {
            type Output = $ty;
            #[inline]
            fn add(self, rhs: $ty) -> $ty {
                $ty(self.0 + rhs.0)
            }
        }

        impl AddAssign for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: $ty) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $ty {
            type Output = $ty;
            #[inline]
            fn sub(self, rhs: $ty) -> $ty {
                $ty(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $ty {
            type Output = $ty;
            #[inline]
            fn mul(self, rhs: f64) -> $ty {
                $ty(self.0 * rhs)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", self.0, $suffix)
            }
        }
    };
}

float_length!(Px, "px");
float_length!(Pt, "pt");
float_length!(Inches, "in");

impl Emu {
    #[inline]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl Add for Emu {
    type Output = Emu;
    #[inline]
    fn add(self, rhs: Emu) -> Emu {
        Emu(self.0 + rhs.0)
    }
}

impl fmt::Display for Emu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}emu", self.0)
    }
}

impl From<Px> for Inches {
    #[inline]
    fn from(px: Px) -> Self {
        Inches(px.0 / PX_PER_INCH)
    }
}

impl From<Pt> for Inches {
    #[inline]
    fn from(pt: Pt) -> Self {
        Inches(pt.0 / PT_PER_INCH)
    }
}

impl From<Inches> for Px {
    #[inline]
    fn from(inches: Inches) -> Self {
        Px(inches.0 * PX_PER_INCH)
    }
}

impl From<Inches> for Pt {
    #[inline]
    fn from(inches: Inches) -> Self {
        Pt(inches.0 * PT_PER_INCH)
    }
}

impl From<Inches> for Emu {
    #[inline]
    fn from(inches: Inches) -> Self {
        Emu((inches.0 * EMUS_PER_INCH as f64).round() as i64)
    }
}

impl From<Emu> for Inches {
    #[inline]
    fn from(emu: Emu) -> Self {
        Inches(emu.0 as f64 / EMUS_PER_INCH as f64)
    }
}

impl From<Px> for Emu {
    #[inline]
    fn from(px: Px) -> Self {
        Emu::from(Inches::from(px))
    }
}

impl From<Pt> for Emu {
    #[inline]
    fn from(pt: Pt) -> Self {
        Emu(pt_to_emu_f64(pt.0))
    }
}

/// An axis-aligned rectangle whose four components share one unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect<L> {
    pub x: L,
    pub y: L,
    pub w: L,
    pub h: L,
}

impl<L: Copy> Rect<L> {
    #[inline]
    pub fn new(x: L, y: L, w: L, h: L) -> Self {
        Self { x, y, w, h }
    }

    /// Convert every component into another unit.
    #[inline]
    pub fn convert<M: From<L>>(self) -> Rect<M> {
        Rect {
            x: M::from(self.x),
            y: M::from(self.y),
            w: M::from(self.w),
            h: M::from(self.h),
        }
    }
}

impl Rect<Inches> {
    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> Inches {
        self.y + self.h
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> Inches {
        self.x + self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_inches() {
        assert_eq!(Inches::from(Px(960.0)), Inches(10.0));
        assert_eq!(Inches::from(Px(540.0)), Inches(5.625));
    }

    #[test]
    fn test_pt_to_inches() {
        assert_eq!(Inches::from(Pt(720.0)), Inches(10.0));
        assert_eq!(Inches::from(Pt(405.0)), Inches(5.625));
    }

    #[test]
    fn test_inches_to_emu_rounds() {
        assert_eq!(Emu::from(Inches(1.0)), Emu(EMUS_PER_INCH));
        assert_eq!(Emu::from(Inches(3.15)), Emu(2_880_360));
        assert_eq!(Emu::from(Inches(0.05)), Emu(45_720));
    }

    #[test]
    fn test_pt_emu_roundtrip() {
        assert_eq!(pt_to_emu_f64(1.0), EMUS_PER_PT);
        assert!((emu_to_pt_f64(pt_to_emu_f64(13.5)) - 13.5).abs() < 1e-9);
    }

    #[test]
    fn test_rect_convert_and_edges() {
        let rect = Rect::new(Px(48.0), Px(96.0), Px(864.0), Px(288.0)).convert::<Inches>();
        assert_eq!(rect.x, Inches(0.5));
        assert_eq!(rect.right(), Inches(9.5));
        assert_eq!(rect.bottom(), Inches(4.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Inches(2.25).to_string(), "2.25in");
        assert_eq!(Px(30.0).to_string(), "30px");
        assert_eq!(Emu(12).to_string(), "12emu");
    }
}
