use clap::Parser;
use env_logger::Env;
use goose::console::{build_system, export_profile_csv, format_element_table};
use goose::error::GooseResult;
use goose::{millimeter, nanometer, BeamTracer, Source, TraceConfig};
use std::path::PathBuf;
use uom::si::length::millimeter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// wavelength of the source in nanometers
    #[arg(short, long, default_value_t = 1064.0)]
    wavelength: f64,

    /// beam quality factor M² of the source
    #[arg(short = 'q', long, default_value_t = 1.0)]
    beam_quality: f64,

    /// refractive index of the ambient medium
    #[arg(short = 'n', long, default_value_t = 1.0)]
    ambient_index: f64,

    /// 1/e² beam radius at the source waist in millimeters
    #[arg(short = 'r', long, default_value_t = 1.0)]
    waist_radius: f64,

    /// sampling step inside distance elements in millimeters
    #[arg(short, long, default_value_t = 10.0)]
    step: f64,

    /// merge adjacent distance elements before tracing
    #[arg(short, long)]
    merge: bool,

    /// write the sampled beam profile to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// optical elements in traversal order, e.g. d:100 l:200 d:400
    elements: Vec<String>,
}

fn main() -> GooseResult<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    let source = Source::new(
        nanometer!(args.wavelength),
        args.beam_quality,
        args.ambient_index,
        millimeter!(args.waist_radius),
    )?;
    let mut system = build_system(&args.elements)?;
    if args.merge {
        system.merge_adjacent_distances();
    }
    let mut config = TraceConfig::default();
    config.set_step(millimeter!(args.step))?;
    let tracer = BeamTracer::new(&source, &system).with_config(config);

    println!("Source: {source}");
    println!(
        "Rayleigh distance: {:.1} mm",
        source.rayleigh_distance().get::<millimeter>()
    );
    println!("\nElements:");
    print!("{}", format_element_table(&system));
    println!(
        "Total length: {:.1} mm",
        system.total_length().get::<millimeter>()
    );

    println!("\nBeam radii at element boundaries:");
    for (index, radius) in tracer.element_radii().iter().enumerate() {
        println!("{index:>3}  {:.4} mm", radius.get::<millimeter>());
    }

    let records = tracer.lens_records();
    if !records.is_empty() {
        println!("\nLenses:");
        for record in &records {
            println!(
                "{:>3}  z = {:.1} mm, f = {:.1} mm, beam radius {:.4} mm",
                record.index(),
                record.position().get::<millimeter>(),
                record.lens().focal_length().get::<millimeter>(),
                record.beam_radius().get::<millimeter>()
            );
        }
    }

    let marks = tracer.waist_marks();
    if !marks.is_empty() {
        println!("\nWaists:");
        for mark in &marks {
            println!(
                "z = {:.1} mm, waist radius {:.4} mm",
                mark.position().get::<millimeter>(),
                mark.waist_radius().get::<millimeter>()
            );
        }
    }

    if let Some(path) = &args.csv {
        let profile = tracer.trace_profile();
        export_profile_csv(&profile, path)?;
        println!("\nBeam profile written to {}", path.display());
    }
    Ok(())
}
