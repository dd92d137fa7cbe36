//! Unit conversion utilities.
//!
//! OOXML geometry is expressed in English Metric Units (EMU); text sizes in
//! points. This module provides the conversions the package writers need.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_PT: i64 = 12_700;
pub const EMUS_PER_TWIP: i64 = 635;

#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64) as i64
}

#[inline]
pub fn pt_to_emu(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64) as i64
}

#[inline]
pub fn emu_to_pt(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

/// Font size in hundredths of a point, the unit DrawingML run properties use.
#[inline]
pub fn pt_to_centipoints(pt: u32) -> u32 {
    pt.saturating_mul(100)
}

/// Font size in half-points, the unit WordprocessingML run properties use.
#[inline]
pub fn pt_to_halfpoints(pt: u32) -> u32 {
    pt.saturating_mul(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_conversions() {
        assert_eq!(inches_to_emu(1.0), EMUS_PER_INCH);
        assert_eq!(inches_to_emu(0.5), 457_200);
    }

    #[test]
    fn test_point_conversions() {
        assert_eq!(pt_to_emu(1.0), EMUS_PER_PT);
        assert_eq!(emu_to_pt(EMUS_PER_PT), 1.0);
        assert_eq!(pt_to_centipoints(18), 1800);
        assert_eq!(pt_to_halfpoints(12), 24);
    }
}
