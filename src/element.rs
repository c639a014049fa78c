#![warn(missing_docs)]
//! Optical elements a Gaussian beam propagates through
use std::fmt::Display;

use num::Zero;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use uom::si::{f64::Length, length::millimeter};

use crate::{
    error::{GooseError, GooseResult},
    matrix::RayTransferMatrix,
};

/// Default tag assigned to a newly created [`Gap`].
pub const DEFAULT_DISTANCE_TAG: &str = "lightgray";
/// Default tag assigned to a newly created [`ThinLens`].
pub const DEFAULT_LENS_TAG: &str = "palegreen";

/// The kind of an [`OpticalElement`].
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// A homogeneous gap of a given length.
    Distance,
    /// An ideal thin lens of a given focal length.
    Lens,
}
impl Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::Distance => "distance",
            Self::Lens => "lens",
        };
        write!(f, "{msg}")
    }
}

/// A homogeneous gap of a given (positive) length.
///
/// Besides its length, a gap carries a free-form tag (e.g. a display color) and the
/// refractive index of its medium. The medium index is stored and preserved by all
/// structural edits but does not enter the propagation itself, which uses the ambient
/// index of the [`Source`](crate::source::Source) throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    length: Length,
    medium_index: f64,
    tag: String,
}
impl Gap {
    /// Create a new [`Gap`] of the given length with a default tag and a medium index of 1.0.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given length is not positive and finite.
    pub fn new(length: Length) -> GooseResult<Self> {
        if length.is_sign_negative() || length.is_zero() || !length.is_finite() {
            return Err(GooseError::Element(
                "gap length must be positive and finite".into(),
            ));
        }
        Ok(Self {
            length,
            medium_index: 1.0,
            tag: DEFAULT_DISTANCE_TAG.to_string(),
        })
    }
    /// Replace the tag of this gap.
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }
    /// Replace the medium index of this gap.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given index is not positive and finite.
    pub fn with_medium_index(mut self, medium_index: f64) -> GooseResult<Self> {
        if medium_index <= 0.0 || !medium_index.is_finite() {
            return Err(GooseError::Element(
                "medium index must be positive and finite".into(),
            ));
        }
        self.medium_index = medium_index;
        Ok(self)
    }
    /// Returns the length of this gap.
    #[must_use]
    pub const fn length(&self) -> Length {
        self.length
    }
    /// Returns the medium index of this gap.
    #[must_use]
    pub const fn medium_index(&self) -> f64 {
        self.medium_index
    }
    /// Returns the tag of this gap.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
    /// Returns the ray-transfer matrix of this gap.
    #[must_use]
    pub fn transfer_matrix(&self) -> RayTransferMatrix {
        RayTransferMatrix::new(1.0, self.length.get::<millimeter>(), 0.0, 1.0)
    }
    /// Create a gap covering this gap followed by another one.
    ///
    /// The combined gap has the summed length and keeps the tag and medium index of `self`.
    #[must_use]
    pub fn extended_by(&self, other: &Self) -> Self {
        Self {
            length: self.length + other.length,
            medium_index: self.medium_index,
            tag: self.tag.clone(),
        }
    }
    /// Split this gap in two parts at a given offset from its entrance.
    ///
    /// Both parts keep the tag and medium index of this gap.
    ///
    /// # Errors
    ///
    /// This function will return an error if the offset does not lie strictly inside the gap.
    pub fn split_at(&self, offset: Length) -> GooseResult<(Self, Self)> {
        if offset.is_sign_negative() || offset.is_zero() || !offset.is_finite() {
            return Err(GooseError::Element(
                "split offset must be positive and finite".into(),
            ));
        }
        if offset >= self.length {
            return Err(GooseError::Element(
                "split offset must lie strictly inside the gap".into(),
            ));
        }
        let left = Self {
            length: offset,
            medium_index: self.medium_index,
            tag: self.tag.clone(),
        };
        let right = Self {
            length: self.length - offset,
            medium_index: self.medium_index,
            tag: self.tag.clone(),
        };
        Ok((left, right))
    }
}
impl Display for Gap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "distance: {:.1} mm ({})",
            self.length.get::<millimeter>(),
            self.tag
        )
    }
}

/// An ideal thin lens of a given focal length.
///
/// A positive focal length corresponds to a focussing lens, a negative one to a defocussing
/// lens. The lens has zero thickness along the optical axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThinLens {
    focal_length: Length,
    medium_index: f64,
    tag: String,
}
impl ThinLens {
    /// Create a new [`ThinLens`] with a default tag and a medium index of 1.0.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given focal length is zero or not finite.
    pub fn new(focal_length: Length) -> GooseResult<Self> {
        if focal_length.is_zero() || !focal_length.is_finite() {
            return Err(GooseError::Element(
                "focal length must be != 0.0 and finite".into(),
            ));
        }
        Ok(Self {
            focal_length,
            medium_index: 1.0,
            tag: DEFAULT_LENS_TAG.to_string(),
        })
    }
    /// Replace the tag of this lens.
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }
    /// Replace the medium index of this lens.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given index is not positive and finite.
    pub fn with_medium_index(mut self, medium_index: f64) -> GooseResult<Self> {
        if medium_index <= 0.0 || !medium_index.is_finite() {
            return Err(GooseError::Element(
                "medium index must be positive and finite".into(),
            ));
        }
        self.medium_index = medium_index;
        Ok(self)
    }
    /// Returns the focal length of this lens.
    #[must_use]
    pub const fn focal_length(&self) -> Length {
        self.focal_length
    }
    /// Returns the medium index of this lens.
    #[must_use]
    pub const fn medium_index(&self) -> f64 {
        self.medium_index
    }
    /// Returns the tag of this lens.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
    /// Returns the ray-transfer matrix of this lens.
    #[must_use]
    pub fn transfer_matrix(&self) -> RayTransferMatrix {
        RayTransferMatrix::new(1.0, 0.0, -1.0 / self.focal_length.get::<millimeter>(), 1.0)
    }
}
impl Display for ThinLens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lens: f = {:.1} mm ({})",
            self.focal_length.get::<millimeter>(),
            self.tag
        )
    }
}

/// An element of an [`OpticalSystem`](crate::system::OpticalSystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpticalElement {
    /// A homogeneous gap of a given length.
    Distance(Gap),
    /// An ideal thin lens of a given focal length.
    Lens(ThinLens),
}
impl OpticalElement {
    /// Create a distance element of the given length with default tag and medium index.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given length is not positive and finite.
    pub fn distance(length: Length) -> GooseResult<Self> {
        Ok(Self::Distance(Gap::new(length)?))
    }
    /// Create a thin lens element of the given focal length with default tag and medium index.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given focal length is zero or not finite.
    pub fn lens(focal_length: Length) -> GooseResult<Self> {
        Ok(Self::Lens(ThinLens::new(focal_length)?))
    }
    /// Returns the kind of this element.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Distance(_) => ElementKind::Distance,
            Self::Lens(_) => ElementKind::Lens,
        }
    }
    /// Returns the tag of this element.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Distance(gap) => gap.tag(),
            Self::Lens(lens) => lens.tag(),
        }
    }
    /// Returns the medium index of this element.
    #[must_use]
    pub const fn medium_index(&self) -> f64 {
        match self {
            Self::Distance(gap) => gap.medium_index(),
            Self::Lens(lens) => lens.medium_index(),
        }
    }
    /// Returns the geometric length this element occupies along the optical axis.
    ///
    /// Thin lenses have zero length.
    #[must_use]
    pub fn length(&self) -> Length {
        match self {
            Self::Distance(gap) => gap.length(),
            Self::Lens(_) => Length::zero(),
        }
    }
    /// Returns the ray-transfer matrix of this element.
    #[must_use]
    pub fn transfer_matrix(&self) -> RayTransferMatrix {
        match self {
            Self::Distance(gap) => gap.transfer_matrix(),
            Self::Lens(lens) => lens.transfer_matrix(),
        }
    }
    /// Returns a reference to the underlying [`Gap`] if this element is a distance.
    #[must_use]
    pub const fn as_gap(&self) -> Option<&Gap> {
        match self {
            Self::Distance(gap) => Some(gap),
            Self::Lens(_) => None,
        }
    }
    /// Returns a reference to the underlying [`ThinLens`] if this element is a lens.
    #[must_use]
    pub const fn as_lens(&self) -> Option<&ThinLens> {
        match self {
            Self::Lens(lens) => Some(lens),
            Self::Distance(_) => None,
        }
    }
}
impl Display for OpticalElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Distance(gap) => gap.fmt(f),
            Self::Lens(lens) => lens.fmt(f),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::millimeter;
    use approx::assert_relative_eq;
    #[test]
    fn gap_new() {
        let gap = Gap::new(millimeter!(100.0)).unwrap();
        assert_eq!(gap.length(), millimeter!(100.0));
        assert_eq!(gap.medium_index(), 1.0);
        assert_eq!(gap.tag(), DEFAULT_DISTANCE_TAG);
    }
    #[test]
    fn gap_new_invalid() {
        assert!(Gap::new(millimeter!(0.0)).is_err());
        assert!(Gap::new(millimeter!(-10.0)).is_err());
        assert!(Gap::new(millimeter!(f64::NAN)).is_err());
        assert!(Gap::new(millimeter!(f64::INFINITY)).is_err());
    }
    #[test]
    fn gap_builders() {
        let gap = Gap::new(millimeter!(100.0))
            .unwrap()
            .with_tag("entrance")
            .with_medium_index(1.5)
            .unwrap();
        assert_eq!(gap.tag(), "entrance");
        assert_eq!(gap.medium_index(), 1.5);
        assert!(Gap::new(millimeter!(100.0))
            .unwrap()
            .with_medium_index(0.0)
            .is_err());
        assert!(Gap::new(millimeter!(100.0))
            .unwrap()
            .with_medium_index(f64::NAN)
            .is_err());
    }
    #[test]
    fn gap_transfer_matrix() {
        let matrix = Gap::new(millimeter!(250.0)).unwrap().transfer_matrix();
        assert_eq!(matrix, RayTransferMatrix::new(1.0, 250.0, 0.0, 1.0));
    }
    #[test]
    fn gap_extended_by() {
        let first = Gap::new(millimeter!(100.0))
            .unwrap()
            .with_tag("first")
            .with_medium_index(1.5)
            .unwrap();
        let second = Gap::new(millimeter!(50.0)).unwrap().with_tag("second");
        let combined = first.extended_by(&second);
        assert_relative_eq!(combined.length().get::<millimeter>(), 150.0);
        assert_eq!(combined.tag(), "first");
        assert_eq!(combined.medium_index(), 1.5);
    }
    #[test]
    fn gap_split_at() {
        let gap = Gap::new(millimeter!(100.0)).unwrap().with_tag("split me");
        let (left, right) = gap.split_at(millimeter!(30.0)).unwrap();
        assert_eq!(left.length(), millimeter!(30.0));
        assert_eq!(right.length(), millimeter!(70.0));
        assert_eq!(left.tag(), "split me");
        assert_eq!(right.tag(), "split me");
    }
    #[test]
    fn gap_split_at_invalid() {
        let gap = Gap::new(millimeter!(100.0)).unwrap();
        assert!(gap.split_at(millimeter!(0.0)).is_err());
        assert!(gap.split_at(millimeter!(-10.0)).is_err());
        assert!(gap.split_at(millimeter!(100.0)).is_err());
        assert!(gap.split_at(millimeter!(150.0)).is_err());
        assert!(gap.split_at(millimeter!(f64::NAN)).is_err());
    }
    #[test]
    fn lens_new() {
        let lens = ThinLens::new(millimeter!(200.0)).unwrap();
        assert_eq!(lens.focal_length(), millimeter!(200.0));
        assert_eq!(lens.medium_index(), 1.0);
        assert_eq!(lens.tag(), DEFAULT_LENS_TAG);
        assert!(ThinLens::new(millimeter!(-50.0)).is_ok());
    }
    #[test]
    fn lens_new_invalid() {
        assert!(ThinLens::new(millimeter!(0.0)).is_err());
        assert!(ThinLens::new(millimeter!(f64::NAN)).is_err());
        assert!(ThinLens::new(millimeter!(f64::NEG_INFINITY)).is_err());
    }
    #[test]
    fn lens_transfer_matrix() {
        let matrix = ThinLens::new(millimeter!(200.0)).unwrap().transfer_matrix();
        assert_eq!(matrix.a(), 1.0);
        assert_eq!(matrix.b(), 0.0);
        assert_relative_eq!(matrix.c(), -0.005);
        assert_eq!(matrix.d(), 1.0);
    }
    #[test]
    fn element_kind() {
        let distance = OpticalElement::distance(millimeter!(100.0)).unwrap();
        let lens = OpticalElement::lens(millimeter!(200.0)).unwrap();
        assert_eq!(distance.kind(), ElementKind::Distance);
        assert_eq!(lens.kind(), ElementKind::Lens);
    }
    #[test]
    fn kind_iter() {
        use strum::IntoEnumIterator;
        let kinds: Vec<ElementKind> = ElementKind::iter().collect();
        assert_eq!(kinds, vec![ElementKind::Distance, ElementKind::Lens]);
    }
    #[test]
    fn element_length() {
        let distance = OpticalElement::distance(millimeter!(100.0)).unwrap();
        let lens = OpticalElement::lens(millimeter!(200.0)).unwrap();
        assert_eq!(distance.length(), millimeter!(100.0));
        assert_eq!(lens.length(), Length::zero());
    }
    #[test]
    fn element_accessors() {
        let distance = OpticalElement::distance(millimeter!(100.0)).unwrap();
        let lens = OpticalElement::lens(millimeter!(200.0)).unwrap();
        assert_eq!(distance.tag(), DEFAULT_DISTANCE_TAG);
        assert_eq!(lens.tag(), DEFAULT_LENS_TAG);
        assert_eq!(distance.medium_index(), 1.0);
        assert!(distance.as_gap().is_some());
        assert!(distance.as_lens().is_none());
        assert!(lens.as_lens().is_some());
        assert!(lens.as_gap().is_none());
    }
    #[test]
    fn display() {
        assert_eq!(format!("{}", ElementKind::Distance), "distance");
        assert_eq!(format!("{}", ElementKind::Lens), "lens");
        assert_eq!(
            format!("{}", OpticalElement::distance(millimeter!(100.0)).unwrap()),
            "distance: 100.0 mm (lightgray)"
        );
        assert_eq!(
            format!("{}", OpticalElement::lens(millimeter!(-50.0)).unwrap()),
            "lens: f = -50.0 mm (palegreen)"
        );
    }
    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", ElementKind::Lens), "Lens");
    }
}
