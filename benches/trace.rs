use criterion::{criterion_group, criterion_main, Criterion};
use goose::{millimeter, BeamTracer, OpticalElement, OpticalSystem, Source};

fn telescope_system() -> OpticalSystem {
    let mut system = OpticalSystem::new();
    let mut z = 0.0;
    while z < 10000.0 {
        system.push(OpticalElement::distance(millimeter!(500.0)).unwrap());
        system.push(OpticalElement::lens(millimeter!(750.0)).unwrap());
        z += 500.0;
    }
    system.push(OpticalElement::distance(millimeter!(500.0)).unwrap());
    system
}

fn criterion_trace(c: &mut Criterion) {
    let source = Source::default();
    let system = telescope_system();
    let tracer = BeamTracer::new(&source, &system);
    c.bench_function("trace_profile", |b| b.iter(|| tracer.trace_profile()));
    c.bench_function("waist_marks", |b| b.iter(|| tracer.waist_marks()));
}

criterion_group!(benches, criterion_trace);
criterion_main!(benches);
