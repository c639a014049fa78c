#![warn(missing_docs)]
//! Gaussian beam properties derived from the complex beam parameter
//!
//! The complex beam parameter `q = (z - z_waist) + i * z_R` fully describes a stigmatic
//! Gaussian beam at an axial position `z`. Its real part is the distance from the beam
//! waist, its imaginary part the Rayleigh distance. All lengths are handled in
//! millimeters.
use crate::error::{GooseError, GooseResult};
use crate::millimeter;
use num::{complex::Complex64, Zero};
use std::f64::consts::PI;
use uom::si::{f64::Length, length::millimeter};

/// Calculate the 1/e² beam radius in millimeters from a complex beam parameter.
///
/// `lambda_msq_mm` is the wavelength in millimeters multiplied by the beam quality
/// factor M².
pub(crate) fn beam_radius_mm(q: Complex64, lambda_msq_mm: f64, ambient_index: f64) -> f64 {
    (-lambda_msq_mm / (ambient_index * PI * q.inv().im)).sqrt()
}

/// Snapshot of the measurable properties of a Gaussian beam at a given axial position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamProperties {
    waist_offset: Length,
    waist_radius: Length,
    radius_of_curvature: Length,
    beam_radius: Length,
}
impl BeamProperties {
    /// Derive all beam properties from a complex beam parameter.
    pub(crate) fn from_q(q: Complex64, lambda_msq_mm: f64, ambient_index: f64) -> Self {
        let inv_q = q.inv();
        Self {
            waist_offset: millimeter!(q.re),
            waist_radius: millimeter!((lambda_msq_mm * q.im / (PI * ambient_index)).sqrt()),
            radius_of_curvature: millimeter!(1.0 / inv_q.re),
            beam_radius: millimeter!(beam_radius_mm(q, lambda_msq_mm, ambient_index)),
        }
    }
    /// Returns the signed distance from the nearest beam waist to this position.
    ///
    /// A positive offset means the waist lies upstream of this position.
    #[must_use]
    pub const fn waist_offset(&self) -> Length {
        self.waist_offset
    }
    /// Returns the 1/e² beam radius at the waist belonging to this beam segment.
    #[must_use]
    pub const fn waist_radius(&self) -> Length {
        self.waist_radius
    }
    /// Returns the radius of curvature of the wavefront.
    ///
    /// The radius is infinite for a flat wavefront (exactly at a waist).
    #[must_use]
    pub const fn radius_of_curvature(&self) -> Length {
        self.radius_of_curvature
    }
    /// Returns the 1/e² beam radius at this position.
    #[must_use]
    pub const fn beam_radius(&self) -> Length {
        self.beam_radius
    }
}

/// Generate a transverse intensity profile of a Gaussian beam with the given waist radius.
///
/// The profile is sampled on the interval `[-half_span_factor * w, +half_span_factor * w]`
/// with the given step size. Each returned tuple holds the radial position in millimeters
/// and the intensity `peak_intensity * exp(-2 r² / w²)`.
///
/// # Errors
///
/// This function will return an error if the waist radius or step size are not positive
/// and finite or if `half_span_factor` or `peak_intensity` are out of range.
pub fn transverse_profile(
    waist_radius: Length,
    peak_intensity: f64,
    half_span_factor: f64,
    step: Length,
) -> GooseResult<Vec<(f64, f64)>> {
    if waist_radius.is_sign_negative() || waist_radius.is_zero() || !waist_radius.is_finite() {
        return Err(GooseError::Other(
            "waist radius must be positive and finite".into(),
        ));
    }
    if step.is_sign_negative() || step.is_zero() || !step.is_finite() {
        return Err(GooseError::Other(
            "step size must be positive and finite".into(),
        ));
    }
    if half_span_factor <= 0.0 || !half_span_factor.is_finite() {
        return Err(GooseError::Other(
            "half span factor must be positive and finite".into(),
        ));
    }
    if !peak_intensity.is_finite() {
        return Err(GooseError::Other("peak intensity must be finite".into()));
    }
    let waist_mm = waist_radius.get::<millimeter>();
    let step_mm = step.get::<millimeter>();
    let half_span = half_span_factor * waist_mm;
    let mut profile = Vec::new();
    let mut r = -half_span;
    while r <= half_span {
        let intensity = peak_intensity * (-2.0 * r * r / (waist_mm * waist_mm)).exp();
        profile.push((r, intensity));
        r += step_mm;
    }
    Ok(profile)
}
