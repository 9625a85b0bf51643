//! Superposition and execution-mode agreement.
//!
//! The field of a collection of sources equals the element-wise sum of the
//! fields of the individual sources, for every quantity; scalar and
//! parallel execution agree up to floating-point reordering.

use geo_forward_engine::kernels::{Position, Prism, Tesseroid};
use geo_forward_engine::{
    evaluate, evaluate_field, EngineConfig, ExecutionMode, FieldComponent, FieldQuantity,
    FieldRequest, PhysicsDomain, Source, TensorComponent,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_gravity_sources(rng: &mut StdRng) -> Vec<Source> {
    let mut sources = Vec::new();
    for _ in 0..5 {
        let position = Position::new(
            rng.gen_range(-500.0..500.0),
            rng.gen_range(-500.0..500.0),
            rng.gen_range(-800.0..-200.0),
        );
        sources.push(Source::point_mass(position, rng.gen_range(1.0e6..1.0e9)));
    }
    for _ in 0..3 {
        let west = rng.gen_range(-400.0..300.0);
        let south = rng.gen_range(-400.0..300.0);
        let bottom = rng.gen_range(-700.0..-400.0);
        let prism = Prism::new(
            west,
            west + rng.gen_range(10.0..100.0),
            south,
            south + rng.gen_range(10.0..100.0),
            bottom,
            bottom + rng.gen_range(10.0..100.0),
        );
        sources.push(Source::prism(prism, rng.gen_range(-500.0..3000.0)));
    }
    for _ in 0..2 {
        let west = rng.gen_range(0.0..30.0);
        let south = rng.gen_range(-30.0..20.0);
        let inner = rng.gen_range(6.0e6..6.2e6);
        let tesseroid = Tesseroid::new(
            west,
            west + rng.gen_range(1.0..5.0),
            south,
            south + rng.gen_range(1.0..5.0),
            inner,
            inner + rng.gen_range(1.0e3..1.0e5),
        );
        sources.push(Source::tesseroid(tesseroid, rng.gen_range(2000.0..3500.0)));
    }
    sources
}

fn random_observers(rng: &mut StdRng, count: usize) -> Vec<Position> {
    (0..count)
        .map(|_| {
            Position::new(
                rng.gen_range(-600.0..600.0),
                rng.gen_range(-600.0..600.0),
                rng.gen_range(10.0..300.0),
            )
        })
        .collect()
}

#[test]
fn test_gravity_superposition() {
    let mut rng = StdRng::seed_from_u64(42);
    let sources = random_gravity_sources(&mut rng);
    let observers = random_observers(&mut rng, 20);
    let config = EngineConfig::default();

    for quantity in [
        FieldQuantity::Potential,
        FieldQuantity::Component(FieldComponent::Upward),
        FieldQuantity::Tensor(TensorComponent::Ee),
        FieldQuantity::Tensor(TensorComponent::Nu),
    ] {
        let request = FieldRequest::gravity(quantity);
        let whole = evaluate(&sources, &observers, request, &config).unwrap();
        let mut parts = vec![0.0; observers.len()];
        for source in &sources {
            let single = evaluate(&[*source], &observers, request, &config).unwrap();
            for (accumulated, value) in parts.iter_mut().zip(single.iter()) {
                *accumulated += value;
            }
        }
        for (w, p) in whole.iter().zip(parts.iter()) {
            let scale = w.abs().max(p.abs()).max(1e-25);
            assert!(
                (w - p).abs() <= 1e-10 * scale,
                "superposition violated for {quantity:?}: {w} vs {p}"
            );
        }
    }
}

#[test]
fn test_magnetic_superposition() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut sources = Vec::new();
    for _ in 0..4 {
        let position = Position::new(
            rng.gen_range(-300.0..300.0),
            rng.gen_range(-300.0..300.0),
            rng.gen_range(-400.0..-100.0),
        );
        let moment = [
            rng.gen_range(-1.0e4..1.0e4),
            rng.gen_range(-1.0e4..1.0e4),
            rng.gen_range(-1.0e4..1.0e4),
        ];
        sources.push(Source::dipole(position, moment));
    }
    for _ in 0..3 {
        let west = rng.gen_range(-200.0..100.0);
        let south = rng.gen_range(-200.0..100.0);
        let bottom = rng.gen_range(-500.0..-300.0);
        let prism = Prism::new(west, west + 60.0, south, south + 40.0, bottom, bottom + 80.0);
        let magnetization = [
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        ];
        sources.push(Source::magnetized_prism(prism, magnetization));
    }
    let observers = random_observers(&mut rng, 15);
    let config = EngineConfig::default();

    for quantity in [
        FieldQuantity::Potential,
        FieldQuantity::Component(FieldComponent::Easting),
        FieldQuantity::Component(FieldComponent::Upward),
    ] {
        let request = FieldRequest::magnetic(quantity);
        let whole = evaluate(&sources, &observers, request, &config).unwrap();
        let mut parts = vec![0.0; observers.len()];
        for source in &sources {
            let single = evaluate(&[*source], &observers, request, &config).unwrap();
            for (accumulated, value) in parts.iter_mut().zip(single.iter()) {
                *accumulated += value;
            }
        }
        for (w, p) in whole.iter().zip(parts.iter()) {
            let scale = w.abs().max(p.abs()).max(1e-30);
            assert!(
                (w - p).abs() <= 1e-10 * scale,
                "superposition violated for {quantity:?}: {w} vs {p}"
            );
        }
    }
}

#[test]
fn test_scalar_and_parallel_paths_agree() {
    let mut rng = StdRng::seed_from_u64(1234);
    let sources = random_gravity_sources(&mut rng);
    let observers = random_observers(&mut rng, 64);

    let scalar_config = EngineConfig {
        mode: ExecutionMode::Scalar,
        ..EngineConfig::default()
    };
    let parallel_config = EngineConfig {
        mode: ExecutionMode::Parallel,
        ..EngineConfig::default()
    };

    for quantity in [
        FieldQuantity::Potential,
        FieldQuantity::Component(FieldComponent::Northing),
        FieldQuantity::Tensor(TensorComponent::Uu),
    ] {
        let request = FieldRequest::gravity(quantity);
        let scalar = evaluate(&sources, &observers, request, &scalar_config).unwrap();
        let parallel = evaluate(&sources, &observers, request, &parallel_config).unwrap();
        for (s, p) in scalar.iter().zip(parallel.iter()) {
            let scale = s.abs().max(p.abs()).max(1e-25);
            assert!(
                (s - p).abs() <= 1e-12 * scale,
                "execution modes disagree for {quantity:?}: {s} vs {p}"
            );
        }
    }
}

#[test]
fn test_fused_magnetic_field_matches_per_component_requests() {
    let mut rng = StdRng::seed_from_u64(99);
    let prism = Prism::new(-50.0, 50.0, -80.0, 80.0, -300.0, -150.0);
    let sources = vec![
        Source::magnetized_prism(prism, [1.2, -0.7, 3.1]),
        Source::dipole(Position::new(10.0, 20.0, -120.0), [5.0e3, 0.0, -2.0e3]),
    ];
    let observers = random_observers(&mut rng, 10);
    let config = EngineConfig::default();

    let fused = evaluate_field(&sources, &observers, PhysicsDomain::Magnetic, &config).unwrap();
    for (column, component) in [
        FieldComponent::Easting,
        FieldComponent::Northing,
        FieldComponent::Upward,
    ]
    .into_iter()
    .enumerate()
    {
        let request = FieldRequest::magnetic(FieldQuantity::Component(component));
        let single = evaluate(&sources, &observers, request, &config).unwrap();
        for (row, value) in single.iter().enumerate() {
            let scale = value.abs().max(1e-30);
            assert!(
                (fused[[row, column]] - value).abs() <= 1e-12 * scale,
                "fused field disagrees with {component:?} request"
            );
        }
    }
}
