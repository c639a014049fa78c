#![warn(missing_docs)]
//! Module for handling the light source of a beam trace
use std::f64::consts::PI;
use std::fmt::Display;

use num::{complex::Complex64, Zero};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::Length,
    length::{millimeter, nanometer},
};

use crate::{
    beam::{beam_radius_mm, BeamProperties},
    error::{GooseError, GooseResult},
    millimeter, nanometer,
};

/// A light source emitting a stigmatic Gaussian beam.
///
/// The source defines the wavelength, beam quality factor M², the refractive index of the
/// ambient medium and the 1/e² beam radius at the waist. The beam waist is located at the
/// entrance of the optical system (axial position zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    wavelength: Length,
    beam_quality: f64,
    ambient_index: f64,
    waist_radius: Length,
}
impl Default for Source {
    /// Create a source with a wavelength of 1064 nm, M² of 1.0, an ambient refractive
    /// index of 1.0 and a waist radius of 1 mm.
    fn default() -> Self {
        Self {
            wavelength: nanometer!(1064.0),
            beam_quality: 1.0,
            ambient_index: 1.0,
            waist_radius: millimeter!(1.0),
        }
    }
}
impl Source {
    /// Create a new [`Source`].
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the wavelength or waist radius are not positive and finite.
    ///   - the beam quality factor is < 1.0 or not finite.
    ///   - the ambient refractive index is not positive and finite.
    pub fn new(
        wavelength: Length,
        beam_quality: f64,
        ambient_index: f64,
        waist_radius: Length,
    ) -> GooseResult<Self> {
        let mut source = Self::default();
        source.set_wavelength(wavelength)?;
        source.set_beam_quality(beam_quality)?;
        source.set_ambient_index(ambient_index)?;
        source.set_waist_radius(waist_radius)?;
        Ok(source)
    }
    /// Returns the wavelength of this source.
    #[must_use]
    pub const fn wavelength(&self) -> Length {
        self.wavelength
    }
    /// Returns the beam quality factor M² of this source.
    #[must_use]
    pub const fn beam_quality(&self) -> f64 {
        self.beam_quality
    }
    /// Returns the refractive index of the ambient medium.
    #[must_use]
    pub const fn ambient_index(&self) -> f64 {
        self.ambient_index
    }
    /// Returns the 1/e² beam radius at the waist of this source.
    #[must_use]
    pub const fn waist_radius(&self) -> Length {
        self.waist_radius
    }
    /// Set the wavelength of this source.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given wavelength is not positive and finite.
    pub fn set_wavelength(&mut self, wavelength: Length) -> GooseResult<()> {
        if wavelength.is_sign_negative() || wavelength.is_zero() || !wavelength.is_finite() {
            return Err(GooseError::Source(
                "wavelength must be positive and finite".into(),
            ));
        }
        self.wavelength = wavelength;
        Ok(())
    }
    /// Set the beam quality factor M² of this source.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given factor is < 1.0 or not finite.
    pub fn set_beam_quality(&mut self, beam_quality: f64) -> GooseResult<()> {
        if beam_quality < 1.0 || !beam_quality.is_finite() {
            return Err(GooseError::Source(
                "beam quality factor must be >= 1.0 and finite".into(),
            ));
        }
        self.beam_quality = beam_quality;
        Ok(())
    }
    /// Set the refractive index of the ambient medium.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given index is not positive and finite.
    pub fn set_ambient_index(&mut self, ambient_index: f64) -> GooseResult<()> {
        if ambient_index <= 0.0 || !ambient_index.is_finite() {
            return Err(GooseError::Source(
                "ambient refractive index must be positive and finite".into(),
            ));
        }
        self.ambient_index = ambient_index;
        Ok(())
    }
    /// Set the 1/e² beam radius at the waist of this source.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given radius is not positive and finite.
    pub fn set_waist_radius(&mut self, waist_radius: Length) -> GooseResult<()> {
        if waist_radius.is_sign_negative() || waist_radius.is_zero() || !waist_radius.is_finite() {
            return Err(GooseError::Source(
                "waist radius must be positive and finite".into(),
            ));
        }
        self.waist_radius = waist_radius;
        Ok(())
    }
    /// Returns the Rayleigh distance of the emitted beam.
    ///
    /// The Rayleigh distance `z_R = π * w₀² * n / (λ * M²)` is the distance from the waist
    /// at which the beam radius has grown by a factor of √2.
    #[must_use]
    pub fn rayleigh_distance(&self) -> Length {
        let waist_mm = self.waist_radius.get::<millimeter>();
        millimeter!(PI * waist_mm * waist_mm * self.ambient_index / self.lambda_msq_mm())
    }
    /// Returns the complex beam parameter at the waist of this source.
    ///
    /// The real part (the distance from the waist) is zero, the imaginary part is the
    /// Rayleigh distance in millimeters.
    #[must_use]
    pub fn initial_q(&self) -> Complex64 {
        Complex64::new(0.0, self.rayleigh_distance().get::<millimeter>())
    }
    /// Derive the beam properties for a complex beam parameter of a beam from this source.
    #[must_use]
    pub fn beam_properties(&self, q: Complex64) -> BeamProperties {
        BeamProperties::from_q(q, self.lambda_msq_mm(), self.ambient_index)
    }
    /// Returns the 1/e² beam radius for a complex beam parameter of a beam from this source.
    #[must_use]
    pub fn beam_radius(&self, q: Complex64) -> Length {
        millimeter!(beam_radius_mm(q, self.lambda_msq_mm(), self.ambient_index))
    }
    /// The wavelength in millimeters scaled by the beam quality factor.
    pub(crate) fn lambda_msq_mm(&self) -> f64 {
        self.wavelength.get::<millimeter>() * self.beam_quality
    }
}
impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "wavelength: {:.1} nm, M²: {:.2}, ambient index: {:.3}, waist radius: {:.4} mm",
            self.wavelength.get::<nanometer>(),
            self.beam_quality,
            self.ambient_index,
            self.waist_radius.get::<millimeter>()
        )
    }
}
