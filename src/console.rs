#![warn(missing_docs)]
//! Handling the GOOSE CLI
//!
//! This module handles the parsing of optical elements given on the command line as well
//! as the export of trace results.
use std::path::Path;

use csv::Writer;
use uom::si::length::millimeter;

use crate::{
    element::OpticalElement,
    error::{GooseError, GooseResult},
    millimeter,
    system::OpticalSystem,
    tracer::BeamProfile,
};

/// Parse a single element spec of the form `d:<length>` or `l:<focal length>`.
///
/// The prefix `d` creates a distance element, the prefix `l` a thin lens. The numeric part
/// is interpreted in millimeters.
///
/// # Errors
///
/// This function will return an error if the spec does not follow the `<kind>:<number>`
/// form or if the numeric value is not valid for the given element kind.
pub fn parse_element_spec(spec: &str) -> GooseResult<OpticalElement> {
    let Some((kind, value)) = spec.split_once(':') else {
        return Err(GooseError::Console(format!(
            "invalid element spec '{spec}': expected 'd:<mm>' or 'l:<mm>'"
        )));
    };
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| GooseError::Console(format!("invalid element spec '{spec}': {e}")))?;
    match kind.trim() {
        "d" => OpticalElement::distance(millimeter!(value)),
        "l" => OpticalElement::lens(millimeter!(value)),
        _ => Err(GooseError::Console(format!(
            "invalid element spec '{spec}': unknown element kind '{kind}'"
        ))),
    }
}

/// Build an [`OpticalSystem`] from a list of element specs.
///
/// # Errors
///
/// This function will return an error if any of the given specs is invalid.
pub fn build_system(specs: &[String]) -> GooseResult<OpticalSystem> {
    let elements = specs
        .iter()
        .map(|spec| parse_element_spec(spec))
        .collect::<GooseResult<Vec<_>>>()?;
    Ok(OpticalSystem::from(elements))
}

/// Format the elements of a system as a simple indexed table.
#[must_use]
pub fn format_element_table(system: &OpticalSystem) -> String {
    let mut table = String::new();
    for (index, element) in system.iter().enumerate() {
        table.push_str(&format!("{index:>3}  {element}\n"));
    }
    table
}

/// Write a sampled beam profile to a CSV file with a `position_mm,radius_mm` header.
///
/// # Errors
///
/// This function will return an error if the file cannot be created or written.
pub fn export_profile_csv(profile: &BeamProfile, path: &Path) -> GooseResult<()> {
    let mut writer = Writer::from_path(path).map_err(|e| GooseError::Console(e.to_string()))?;
    writer
        .write_record(["position_mm", "radius_mm"])
        .map_err(|e| GooseError::Console(e.to_string()))?;
    for sample in profile.samples() {
        writer
            .write_record([
                sample.position().get::<millimeter>().to_string(),
                sample.radius().get::<millimeter>().to_string(),
            ])
            .map_err(|e| GooseError::Console(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| GooseError::Console(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{element::ElementKind, source::Source, tracer::BeamTracer};
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use tempfile::NamedTempFile;
    #[test]
    fn parse_distance() {
        let element = parse_element_spec("d:100").unwrap();
        assert_eq!(element.kind(), ElementKind::Distance);
        assert_eq!(
            element.as_gap().unwrap().length(),
            millimeter!(100.0)
        );
        let element = parse_element_spec("d: 2.5 ").unwrap();
        assert_eq!(element.as_gap().unwrap().length(), millimeter!(2.5));
    }
    #[test]
    fn parse_lens() {
        let element = parse_element_spec("l:200").unwrap();
        assert_eq!(element.kind(), ElementKind::Lens);
        assert_eq!(
            element.as_lens().unwrap().focal_length(),
            millimeter!(200.0)
        );
        let element = parse_element_spec("l:-50").unwrap();
        assert_eq!(element.as_lens().unwrap().focal_length(), millimeter!(-50.0));
    }
    #[test]
    fn parse_invalid() {
        assert_matches!(parse_element_spec("100"), Err(GooseError::Console(_)));
        assert_matches!(parse_element_spec("x:100"), Err(GooseError::Console(_)));
        assert_matches!(parse_element_spec("d:abc"), Err(GooseError::Console(_)));
        assert_matches!(parse_element_spec("d:"), Err(GooseError::Console(_)));
        assert_matches!(parse_element_spec("d:-5"), Err(GooseError::Element(_)));
        assert_matches!(parse_element_spec("l:0"), Err(GooseError::Element(_)));
    }
    #[test]
    fn build_system_from_specs() {
        let specs = vec!["d:100".to_string(), "l:200".to_string(), "d:400".to_string()];
        let system = build_system(&specs).unwrap();
        assert_eq!(system.len(), 3);
        assert_eq!(system.total_length(), millimeter!(500.0));
        assert!(build_system(&["d:100".to_string(), "oops".to_string()]).is_err());
        assert!(build_system(&[]).unwrap().is_empty());
    }
    #[test]
    fn element_table() {
        let system = build_system(&["d:100".to_string(), "l:200".to_string()]).unwrap();
        assert_eq!(
            format_element_table(&system),
            "  0  distance: 100.0 mm (lightgray)\n  1  lens: f = 200.0 mm (palegreen)\n"
        );
    }
    #[test]
    fn export_csv() {
        let source = Source::default();
        let system = build_system(&["d:100".to_string()]).unwrap();
        let profile = BeamTracer::new(&source, &system).trace_profile();
        let file = NamedTempFile::new().unwrap();
        export_profile_csv(&profile, file.path()).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "position_mm,radius_mm");
        assert!(lines[1].starts_with("0,"));
        let radius: f64 = lines[1].split(',').nth(1).unwrap().parse().unwrap();
        assert_relative_eq!(radius, 1.0, max_relative = 1e-12);
    }
}
