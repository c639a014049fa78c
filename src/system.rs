#![warn(missing_docs)]
//! An ordered sequence of optical elements along a common optical axis
//!
//! An [`OpticalSystem`] holds the elements a beam traverses in order. The axial world
//! position of an element follows from the summed lengths of all elements before it, with
//! position zero at the entrance of the first element.
use itertools::Itertools;
use kahan::KahanSum;
use num::Zero;
use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::millimeter};

use crate::{
    element::{ElementKind, OpticalElement, ThinLens},
    error::{GooseError, GooseResult},
    millimeter,
};

/// Configuration for inserting a lens into an [`OpticalSystem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertLensConfig {
    focal_length: Length,
    tag: String,
}
impl Default for InsertLensConfig {
    /// Create a config for inserting a lens with a focal length of 3000 mm and the tag `orange`.
    fn default() -> Self {
        Self {
            focal_length: millimeter!(3000.0),
            tag: "orange".to_string(),
        }
    }
}
impl InsertLensConfig {
    /// Returns the focal length of the lens to be inserted.
    #[must_use]
    pub const fn focal_length(&self) -> Length {
        self.focal_length
    }
    /// Returns the tag of the lens to be inserted.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
    /// Set the focal length of the lens to be inserted.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given focal length is zero or not finite.
    pub fn set_focal_length(&mut self, focal_length: Length) -> GooseResult<()> {
        if focal_length.is_zero() || !focal_length.is_finite() {
            return Err(GooseError::SystemEdit(
                "focal length must be != 0.0 and finite".into(),
            ));
        }
        self.focal_length = focal_length;
        Ok(())
    }
    /// Set the tag of the lens to be inserted.
    pub fn set_tag(&mut self, tag: &str) {
        self.tag = tag.to_string();
    }
}

/// An ordered sequence of [`OpticalElement`]s.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpticalSystem {
    elements: Vec<OpticalElement>,
}
impl OpticalSystem {
    /// Create a new, empty [`OpticalSystem`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Returns all elements of this system in traversal order.
    #[must_use]
    pub fn elements(&self) -> &[OpticalElement] {
        &self.elements
    }
    /// Returns the number of elements in this system.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }
    /// Returns `true` if this system does not contain any elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    /// Returns the element at the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&OpticalElement> {
        self.elements.get(index)
    }
    /// Returns an iterator over the elements of this system.
    pub fn iter(&self) -> std::slice::Iter<'_, OpticalElement> {
        self.elements.iter()
    }
    /// Append an element to the end of this system.
    pub fn push(&mut self, element: OpticalElement) {
        self.elements.push(element);
    }
    /// Returns the summed length of all elements before the element with the given index.
    ///
    /// Lenses do not contribute since they have zero thickness. An index beyond the last
    /// element returns the total system length.
    #[must_use]
    pub fn distance_before(&self, index: usize) -> Length {
        let mut total = KahanSum::new_with_value(0.0);
        for element in self.elements.iter().take(index) {
            total += element.length().get::<millimeter>();
        }
        millimeter!(total.sum())
    }
    /// Returns the total geometric length of this system along the optical axis.
    #[must_use]
    pub fn total_length(&self) -> Length {
        self.distance_before(self.elements.len())
    }
    /// Find the distance element which contains the given axial world position.
    ///
    /// The interval covered by a distance element is open: a position exactly on the
    /// boundary between two elements (or at the entrance or exit of the system) does not
    /// belong to any element and returns `None`.
    #[must_use]
    pub fn locate(&self, position: Length) -> Option<usize> {
        self.locate_with_offset(position).map(|(index, _)| index)
    }
    /// Find the distance element containing the given position together with the offset
    /// from the element entrance.
    fn locate_with_offset(&self, position: Length) -> Option<(usize, Length)> {
        let z = position.get::<millimeter>();
        if !z.is_finite() {
            return None;
        }
        let mut lower = KahanSum::new_with_value(0.0);
        for (index, element) in self.elements.iter().enumerate() {
            if let OpticalElement::Distance(gap) = element {
                let length = gap.length().get::<millimeter>();
                if z > lower.sum() && z < lower.sum() + length {
                    return Some((index, millimeter!(z - lower.sum())));
                }
                lower += length;
            }
        }
        None
    }
    /// Merge all runs of directly adjacent distance elements into single elements.
    ///
    /// Each merged element has the summed length of its run and keeps the tag and medium
    /// index of the first element of the run. Calling this function on a system without
    /// adjacent distance elements has no effect.
    pub fn merge_adjacent_distances(&mut self) {
        let elements = std::mem::take(&mut self.elements);
        self.elements = elements
            .into_iter()
            .coalesce(|left, right| match (left, right) {
                (OpticalElement::Distance(first), OpticalElement::Distance(second)) => {
                    Ok(OpticalElement::Distance(first.extended_by(&second)))
                }
                (left, right) => Err((left, right)),
            })
            .collect();
    }
    /// Insert a thin lens at the given axial world position.
    ///
    /// The distance element containing the position is split in two parts and the lens is
    /// placed between them. On success, the index of the inserted lens is returned.
    ///
    /// # Errors
    ///
    /// This function will return an error if the position does not fall strictly inside a
    /// distance element. The system is left unchanged in this case.
    pub fn insert_lens_at(
        &mut self,
        position: Length,
        config: &InsertLensConfig,
    ) -> GooseResult<usize> {
        let lens = ThinLens::new(config.focal_length())?.with_tag(config.tag());
        let Some((index, offset)) = self.locate_with_offset(position) else {
            return Err(GooseError::SystemEdit(format!(
                "position of {:.1} mm does not fall inside a distance element",
                position.get::<millimeter>()
            )));
        };
        let Some(OpticalElement::Distance(gap)) = self.elements.get(index) else {
            return Err(GooseError::SystemEdit(
                "located element is not a distance".into(),
            ));
        };
        let (left, right) = gap.split_at(offset)?;
        self.elements.splice(
            index..=index,
            [
                OpticalElement::Distance(left),
                OpticalElement::Lens(lens),
                OpticalElement::Distance(right),
            ],
        );
        Ok(index + 1)
    }
    /// Returns the indices of all elements of the given kind in traversal order.
    #[must_use]
    pub fn indices_of(&self, kind: ElementKind) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(index, element)| (element.kind() == kind).then_some(index))
            .collect()
    }
}
impl From<Vec<OpticalElement>> for OpticalSystem {
    fn from(elements: Vec<OpticalElement>) -> Self {
        Self { elements }
    }
}
impl<'a> IntoIterator for &'a OpticalSystem {
    type Item = &'a OpticalElement;
    type IntoIter = std::slice::Iter<'a, OpticalElement>;
    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
