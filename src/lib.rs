//! This is the documentation for the **GOOSE** software package. **GOOSE** stands for
//! **G**aussian **O**ptics **O**pen-**S**ource **E**ngine.
//!
//! GOOSE propagates a stigmatic Gaussian laser beam through an ordered sequence of
//! homogeneous gaps and ideal thin lenses using the complex beam parameter and the
//! paraxial ABCD-matrix formalism. Tracing a beam through an [`OpticalSystem`] yields
//! sampled beam envelopes, the beam radii at all element boundaries, per-lens data and
//! the positions of beam waists formed behind lenses.
//!
//! All lengths are handled as [`uom`] quantities, the propagation itself works on
//! millimeter scales internally.
#![allow(clippy::module_name_repetitions)]

pub mod beam;
pub mod console;
pub mod element;
pub mod error;
pub mod grid;
pub mod matrix;
pub mod source;
pub mod system;
pub mod test_helper;
pub mod tracer;
pub mod uom_macros;

pub use beam::BeamProperties;
pub use element::{ElementKind, Gap, OpticalElement, ThinLens};
pub use matrix::RayTransferMatrix;
pub use source::Source;
pub use system::{InsertLensConfig, OpticalSystem};
pub use tracer::{BeamProfile, BeamTracer, TraceConfig, WaistSearchWindow};
