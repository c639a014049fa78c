#![warn(missing_docs)]
//! Mappings from physical beam coordinates to display coordinates
use uom::si::{f64::Length, length::millimeter};

/// Mapping from physical beam coordinates to display coordinates.
///
/// Implementors convert axial positions along the optical axis and radial extents
/// perpendicular to it into dimensionless display coordinates such as canvas pixels.
/// Axial and radial directions are mapped independently since beam envelopes are usually
/// drawn with strongly different scales on both axes.
pub trait GridMapping {
    /// Map an axial position along the optical axis to a display coordinate.
    fn map_axial(&self, position: Length) -> f64;
    /// Map a radial extent perpendicular to the optical axis to a display coordinate.
    fn map_radial(&self, radius: Length) -> f64;
}

/// A mapping which returns plain millimeter values unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityGrid;
impl GridMapping for IdentityGrid {
    fn map_axial(&self, position: Length) -> f64 {
        position.get::<millimeter>()
    }
    fn map_radial(&self, radius: Length) -> f64 {
        radius.get::<millimeter>()
    }
}

/// A linear mapping with independent axial and radial scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGrid {
    /// Scale factor applied to axial positions (display units per millimeter).
    pub axial_scale: f64,
    /// Offset added to scaled axial positions.
    pub axial_offset: f64,
    /// Scale factor applied to radial extents (display units per millimeter).
    pub radial_scale: f64,
}
impl Default for LinearGrid {
    fn default() -> Self {
        Self {
            axial_scale: 1.0,
            axial_offset: 0.0,
            radial_scale: 1.0,
        }
    }
}
impl GridMapping for LinearGrid {
    fn map_axial(&self, position: Length) -> f64 {
        self.axial_scale
            .mul_add(position.get::<millimeter>(), self.axial_offset)
    }
    fn map_radial(&self, radius: Length) -> f64 {
        self.radial_scale * radius.get::<millimeter>()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::millimeter;
    #[test]
    fn identity() {
        let grid = IdentityGrid;
        assert_eq!(grid.map_axial(millimeter!(123.4)), 123.4);
        assert_eq!(grid.map_radial(millimeter!(-1.5)), -1.5);
    }
    #[test]
    fn linear_default() {
        let grid = LinearGrid::default();
        assert_eq!(grid.map_axial(millimeter!(123.4)), 123.4);
        assert_eq!(grid.map_radial(millimeter!(2.0)), 2.0);
    }
    #[test]
    fn linear_scaled() {
        let grid = LinearGrid {
            axial_scale: 0.5,
            axial_offset: 10.0,
            radial_scale: 100.0,
        };
        assert_eq!(grid.map_axial(millimeter!(100.0)), 60.0);
        assert_eq!(grid.map_radial(millimeter!(1.5)), 150.0);
    }
}
