#![warn(missing_docs)]
//! Propagation of a Gaussian beam through an optical system
//!
//! The [`BeamTracer`] walks a beam emitted by a [`Source`] through the elements of an
//! [`OpticalSystem`] in order. Inside distance elements the complex beam parameter is
//! advanced along the real axis, at thin lenses it is transformed by the lens matrix.
//! Several products can be derived from such a walk: sampled beam envelopes, the beam
//! radii at all element boundaries, per-lens data and the positions of beam waists formed
//! behind lenses.
use log::{debug, warn};
use num::{complex::Complex64, Zero};
use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::millimeter};

use crate::{
    beam::beam_radius_mm,
    element::{Gap, OpticalElement, ThinLens},
    error::{GooseError, GooseResult},
    grid::GridMapping,
    matrix::RayTransferMatrix,
    millimeter,
    source::Source,
    system::OpticalSystem,
};

/// Acceptance window for waist marks produced by [`BeamTracer::waist_marks`].
///
/// A waist formed behind a lens is only reported if the wavefront curvature directly
/// behind the lens is strong enough and the waist position falls into a given axial
/// interval. This suppresses quasi-collimated sections (near-infinite curvature radius)
/// and virtual waists outside the region of interest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaistSearchWindow {
    max_roc: Length,
    after: Length,
    before: Length,
}
impl Default for WaistSearchWindow {
    /// Create a window accepting curvature radii below 500 mm and waist positions between
    /// 0 mm and 2020 mm.
    fn default() -> Self {
        Self {
            max_roc: millimeter!(500.0),
            after: millimeter!(0.0),
            before: millimeter!(2020.0),
        }
    }
}
impl WaistSearchWindow {
    /// Create a new [`WaistSearchWindow`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the maximum curvature radius is not positive
    /// and finite or if the position interval is not finite and ascending.
    pub fn new(max_roc: Length, after: Length, before: Length) -> GooseResult<Self> {
        if max_roc.is_sign_negative() || max_roc.is_zero() || !max_roc.is_finite() {
            return Err(GooseError::Trace(
                "maximum curvature radius must be positive and finite".into(),
            ));
        }
        if !after.is_finite() || !before.is_finite() || after >= before {
            return Err(GooseError::Trace(
                "waist position interval must be finite and ascending".into(),
            ));
        }
        Ok(Self {
            max_roc,
            after,
            before,
        })
    }
    /// Returns the maximum accepted absolute radius of curvature behind a lens.
    #[must_use]
    pub const fn max_roc(&self) -> Length {
        self.max_roc
    }
    /// Returns the lower bound (exclusive) of accepted waist positions.
    #[must_use]
    pub const fn after(&self) -> Length {
        self.after
    }
    /// Returns the upper bound (exclusive) of accepted waist positions.
    #[must_use]
    pub const fn before(&self) -> Length {
        self.before
    }
    /// Check whether a waist with the given wavefront curvature behind the lens and waist
    /// position is accepted by this window.
    #[must_use]
    pub fn accepts(&self, radius_of_curvature: Length, position: Length) -> bool {
        radius_of_curvature.abs() < self.max_roc
            && position > self.after
            && position < self.before
    }
}

/// Configuration of a [`BeamTracer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    step: Length,
    waist_search: WaistSearchWindow,
}
impl Default for TraceConfig {
    /// Create a config with a sampling step of 10 mm and the default [`WaistSearchWindow`].
    fn default() -> Self {
        Self {
            step: millimeter!(10.0),
            waist_search: WaistSearchWindow::default(),
        }
    }
}
impl TraceConfig {
    /// Returns the sampling step used inside distance elements.
    #[must_use]
    pub const fn step(&self) -> Length {
        self.step
    }
    /// Returns the waist search window of this config.
    #[must_use]
    pub const fn waist_search(&self) -> &WaistSearchWindow {
        &self.waist_search
    }
    /// Set the sampling step used inside distance elements.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given step is not positive and finite.
    pub fn set_step(&mut self, step: Length) -> GooseResult<()> {
        if step.is_sign_negative() || step.is_zero() || !step.is_finite() {
            return Err(GooseError::Trace(
                "sampling step must be positive and finite".into(),
            ));
        }
        self.step = step;
        Ok(())
    }
    /// Set the waist search window of this config.
    pub fn set_waist_search(&mut self, window: WaistSearchWindow) {
        self.waist_search = window;
    }
}

/// A single sample of the beam envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSample {
    position: Length,
    radius: Length,
}
impl BeamSample {
    /// Returns the axial world position of this sample.
    #[must_use]
    pub const fn position(&self) -> Length {
        self.position
    }
    /// Returns the 1/e² beam radius at this sample.
    #[must_use]
    pub const fn radius(&self) -> Length {
        self.radius
    }
}

/// The upper and lower beam envelope in display coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamEnvelope {
    /// Envelope points above the optical axis.
    pub upper: Vec<(f64, f64)>,
    /// Envelope points below the optical axis.
    pub lower: Vec<(f64, f64)>,
}

/// A sampled beam radius profile along the optical axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamProfile {
    samples: Vec<BeamSample>,
}
impl BeamProfile {
    /// Returns all samples of this profile in axial order.
    #[must_use]
    pub fn samples(&self) -> &[BeamSample] {
        &self.samples
    }
    /// Returns the number of samples in this profile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    /// Returns `true` if this profile does not contain any samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    /// Convert this profile into an upper and lower envelope in display coordinates.
    pub fn envelope<M: GridMapping>(&self, mapping: &M) -> BeamEnvelope {
        let upper = self
            .samples
            .iter()
            .map(|sample| {
                (
                    mapping.map_axial(sample.position),
                    mapping.map_radial(sample.radius),
                )
            })
            .collect();
        let lower = self
            .samples
            .iter()
            .map(|sample| {
                (
                    mapping.map_axial(sample.position),
                    mapping.map_radial(-sample.radius),
                )
            })
            .collect();
        BeamEnvelope { upper, lower }
    }
}

/// A beam waist formed behind a lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaistMark {
    position: Length,
    waist_radius: Length,
}
impl WaistMark {
    /// Returns the axial world position of the waist.
    #[must_use]
    pub const fn position(&self) -> Length {
        self.position
    }
    /// Returns the 1/e² beam radius at the waist.
    #[must_use]
    pub const fn waist_radius(&self) -> Length {
        self.waist_radius
    }
    /// Convert this mark to display coordinates.
    pub fn scaled<M: GridMapping>(&self, mapping: &M) -> (f64, f64) {
        (
            mapping.map_axial(self.position),
            mapping.map_radial(self.waist_radius),
        )
    }
}

/// Data collected for a single lens during a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensRecord {
    index: usize,
    position: Length,
    beam_radius: Length,
    lens: ThinLens,
}
impl LensRecord {
    /// Returns the element index of the lens within the optical system.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
    /// Returns the axial world position of the lens.
    #[must_use]
    pub const fn position(&self) -> Length {
        self.position
    }
    /// Returns the 1/e² beam radius at the lens.
    #[must_use]
    pub const fn beam_radius(&self) -> Length {
        self.beam_radius
    }
    /// Returns the lens this record belongs to.
    #[must_use]
    pub const fn lens(&self) -> &ThinLens {
        &self.lens
    }
}

/// Walk state of a beam inside an optical system.
///
/// The real part of `q` is the offset from the current beam waist while `zbase` is the
/// world position along the optical axis. Both advance together inside gaps, while a lens
/// replaces `q` (and thereby the waist the offset refers to) without moving `zbase`.
struct Walk {
    q: Complex64,
    zbase: f64,
}
impl Walk {
    fn advance(&mut self, length_mm: f64) {
        self.q.re += length_mm;
        self.zbase += length_mm;
    }
    fn cross(&mut self, matrix: &RayTransferMatrix) {
        self.q = matrix.apply(self.q);
    }
}

/// Walks a Gaussian beam through an [`OpticalSystem`] and derives trace products.
pub struct BeamTracer<'a> {
    source: Source,
    system: &'a OpticalSystem,
    config: TraceConfig,
}
impl<'a> BeamTracer<'a> {
    /// Create a new [`BeamTracer`] for the given source and system with a default config.
    #[must_use]
    pub fn new(source: &Source, system: &'a OpticalSystem) -> Self {
        Self {
            source: source.clone(),
            system,
            config: TraceConfig::default(),
        }
    }
    /// Replace the config of this tracer.
    #[must_use]
    pub fn with_config(mut self, config: TraceConfig) -> Self {
        self.config = config;
        self
    }
    /// Returns the config of this tracer.
    #[must_use]
    pub const fn config(&self) -> &TraceConfig {
        &self.config
    }
    /// Returns the source of this tracer.
    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }
    fn walk(&self) -> Walk {
        if self.system.is_empty() {
            warn!("tracing an empty optical system");
        }
        Walk {
            q: self.source.initial_q(),
            zbase: 0.0,
        }
    }
    /// Sample the beam radius inside a gap, starting at the gap entrance.
    ///
    /// Samples are taken every `step` until the gap length is exceeded. The gap exit is
    /// therefore only sampled if the step divides the gap length. The walk always advances
    /// by the full gap length afterwards, independent of the last sample position.
    fn sample_gap<F: FnMut(f64, f64)>(&self, walk: &mut Walk, gap: &Gap, mut record: F) {
        let length = gap.length().get::<millimeter>();
        let step = self.config.step.get::<millimeter>();
        let lambda_msq = self.source.lambda_msq_mm();
        let ambient_index = self.source.ambient_index();
        let mut s = 0.0;
        while s <= length {
            let q = Complex64::new(walk.q.re + s, walk.q.im);
            record(walk.zbase + s, beam_radius_mm(q, lambda_msq, ambient_index));
            s += step;
        }
        walk.advance(length);
    }
    /// Trace the beam through the whole system and sample its envelope.
    ///
    /// Each distance element is sampled from its entrance on, so the shared boundary of
    /// two directly adjacent distance elements appears twice in the profile.
    #[must_use]
    pub fn trace_profile(&self) -> BeamProfile {
        debug!(
            "tracing beam through {} elements with a step size of {:.1} mm",
            self.system.len(),
            self.config.step.get::<millimeter>()
        );
        let mut samples = Vec::new();
        let mut walk = self.walk();
        for element in self.system.iter() {
            match element {
                OpticalElement::Distance(gap) => {
                    self.sample_gap(&mut walk, gap, |position, radius| {
                        samples.push(BeamSample {
                            position: millimeter!(position),
                            radius: millimeter!(radius),
                        });
                    });
                }
                OpticalElement::Lens(lens) => walk.cross(&lens.transfer_matrix()),
            }
        }
        BeamProfile { samples }
    }
    /// Trace the beam and sample its envelope separately for every distance element.
    ///
    /// The returned profiles are in traversal order, one per distance element. Lenses do
    /// not produce a profile of their own.
    #[must_use]
    pub fn trace_profile_segments(&self) -> Vec<BeamProfile> {
        let mut segments = Vec::new();
        let mut walk = self.walk();
        for element in self.system.iter() {
            match element {
                OpticalElement::Distance(gap) => {
                    let mut samples = Vec::new();
                    self.sample_gap(&mut walk, gap, |position, radius| {
                        samples.push(BeamSample {
                            position: millimeter!(position),
                            radius: millimeter!(radius),
                        });
                    });
                    segments.push(BeamProfile { samples });
                }
                OpticalElement::Lens(lens) => walk.cross(&lens.transfer_matrix()),
            }
        }
        segments
    }
    /// Find the beam waists formed behind the lenses of the system.
    ///
    /// After crossing each lens, the position of the waist belonging to the transformed
    /// beam is derived from the new complex beam parameter. A mark is only reported if it
    /// passes the [`WaistSearchWindow`] of the config. A diverging lens usually produces a
    /// virtual waist upstream of the system entrance which is rejected by the window.
    #[must_use]
    pub fn waist_marks(&self) -> Vec<WaistMark> {
        let mut marks = Vec::new();
        let mut walk = self.walk();
        for element in self.system.iter() {
            match element {
                OpticalElement::Distance(gap) => {
                    walk.advance(gap.length().get::<millimeter>());
                }
                OpticalElement::Lens(lens) => {
                    walk.cross(&lens.transfer_matrix());
                    let props = self.source.beam_properties(walk.q);
                    let position =
                        millimeter!(walk.zbase - props.waist_offset().get::<millimeter>());
                    if self
                        .config
                        .waist_search
                        .accepts(props.radius_of_curvature(), position)
                    {
                        marks.push(WaistMark {
                            position,
                            waist_radius: props.waist_radius(),
                        });
                    }
                }
            }
        }
        marks
    }
    /// Returns the beam radii at the system entrance and behind every element.
    ///
    /// The returned vector holds one radius more than the system has elements. Since a
    /// thin lens does not change the beam radius, the radii before and behind a lens are
    /// identical.
    #[must_use]
    pub fn element_radii(&self) -> Vec<Length> {
        let mut walk = self.walk();
        let mut radii = vec![self.source.beam_radius(walk.q)];
        for element in self.system.iter() {
            match element {
                OpticalElement::Distance(gap) => {
                    walk.advance(gap.length().get::<millimeter>());
                }
                OpticalElement::Lens(lens) => walk.cross(&lens.transfer_matrix()),
            }
            radii.push(self.source.beam_radius(walk.q));
        }
        radii
    }
    /// Collect the position and beam radius at every lens of the system.
    #[must_use]
    pub fn lens_records(&self) -> Vec<LensRecord> {
        let mut records = Vec::new();
        let mut walk = self.walk();
        for (index, element) in self.system.iter().enumerate() {
            match element {
                OpticalElement::Distance(gap) => {
                    walk.advance(gap.length().get::<millimeter>());
                }
                OpticalElement::Lens(lens) => {
                    records.push(LensRecord {
                        index,
                        position: millimeter!(walk.zbase),
                        beam_radius: self.source.beam_radius(walk.q),
                        lens: lens.clone(),
                    });
                    walk.cross(&lens.transfer_matrix());
                }
            }
        }
        records
    }
}
