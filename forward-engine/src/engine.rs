//! Batch accumulation engine.
//!
//! Sums the kernel contribution of every source onto every observation
//! point. The source list is grouped into monomorphic batches during
//! planning and the kernel function for each batch is selected exactly
//! once, so the hot loop contains no per-pair dispatch. Each observation
//! point owns its output slot exclusively, which makes the parallel path a
//! plain partition over observers with no shared mutable state; summation
//! order across sources is unspecified and results agree between execution
//! modes only up to floating-point reordering.

use geo_forward_kernels::{dipole, point, prism, Position, Prism};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{ForwardError, Result};
use crate::request::{FieldComponent, FieldQuantity, FieldRequest, PhysicsDomain, TensorComponent};
use crate::source::{Source, SourceGeometry, SourceProperty};

/// How the accumulation loop is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Sequential reference path
    Scalar,
    /// Partition the observers over a thread pool
    Parallel,
    /// Pick by problem size
    #[default]
    Auto,
}

/// Engine configuration for one forward call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Execution mode
    pub mode: ExecutionMode,
    /// Minimum number of (source, observer) pairs before [`ExecutionMode::Auto`]
    /// switches to the parallel path
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Auto,
            parallel_threshold: 16_384,
        }
    }
}

/// Whether the parallel execution path was compiled in.
pub fn parallel_available() -> bool {
    cfg!(feature = "parallel")
}

type PointKernel = fn(&Position, &Position, f64) -> f64;
type DipoleKernel = fn(&Position, &Position, &[f64; 3]) -> f64;
type PrismGravityKernel = fn(&Position, &Prism, f64) -> f64;
type PrismMagneticKernel = fn(&Position, &Prism, &[f64; 3]) -> f64;

fn point_gravity_kernel(quantity: FieldQuantity) -> PointKernel {
    match quantity {
        FieldQuantity::Potential => point::gravity_pot,
        FieldQuantity::Component(FieldComponent::Easting) => point::gravity_e,
        FieldQuantity::Component(FieldComponent::Northing) => point::gravity_n,
        FieldQuantity::Component(FieldComponent::Upward) => point::gravity_u,
        FieldQuantity::Tensor(TensorComponent::Ee) => point::gravity_ee,
        FieldQuantity::Tensor(TensorComponent::Nn) => point::gravity_nn,
        FieldQuantity::Tensor(TensorComponent::Uu) => point::gravity_uu,
        FieldQuantity::Tensor(TensorComponent::En) => point::gravity_en,
        FieldQuantity::Tensor(TensorComponent::Eu) => point::gravity_eu,
        FieldQuantity::Tensor(TensorComponent::Nu) => point::gravity_nu,
    }
}

fn dipole_kernel(quantity: FieldQuantity) -> DipoleKernel {
    match quantity {
        FieldQuantity::Potential => dipole::magnetic_pot,
        FieldQuantity::Component(FieldComponent::Easting) => dipole::magnetic_e,
        FieldQuantity::Component(FieldComponent::Northing) => dipole::magnetic_n,
        FieldQuantity::Component(FieldComponent::Upward) => dipole::magnetic_u,
        FieldQuantity::Tensor(TensorComponent::Ee) => dipole::magnetic_ee,
        FieldQuantity::Tensor(TensorComponent::Nn) => dipole::magnetic_nn,
        FieldQuantity::Tensor(TensorComponent::Uu) => dipole::magnetic_uu,
        FieldQuantity::Tensor(TensorComponent::En) => dipole::magnetic_en,
        FieldQuantity::Tensor(TensorComponent::Eu) => dipole::magnetic_eu,
        FieldQuantity::Tensor(TensorComponent::Nu) => dipole::magnetic_nu,
    }
}

fn prism_gravity_kernel(quantity: FieldQuantity) -> PrismGravityKernel {
    match quantity {
        FieldQuantity::Potential => prism::gravity::gravity_pot,
        FieldQuantity::Component(FieldComponent::Easting) => prism::gravity::gravity_e,
        FieldQuantity::Component(FieldComponent::Northing) => prism::gravity::gravity_n,
        FieldQuantity::Component(FieldComponent::Upward) => prism::gravity::gravity_u,
        FieldQuantity::Tensor(TensorComponent::Ee) => prism::gravity::gravity_ee,
        FieldQuantity::Tensor(TensorComponent::Nn) => prism::gravity::gravity_nn,
        FieldQuantity::Tensor(TensorComponent::Uu) => prism::gravity::gravity_uu,
        FieldQuantity::Tensor(TensorComponent::En) => prism::gravity::gravity_en,
        FieldQuantity::Tensor(TensorComponent::Eu) => prism::gravity::gravity_eu,
        FieldQuantity::Tensor(TensorComponent::Nu) => prism::gravity::gravity_nu,
    }
}

fn prism_magnetic_kernel(quantity: FieldQuantity) -> Option<PrismMagneticKernel> {
    match quantity {
        FieldQuantity::Potential => Some(prism::magnetic::magnetic_pot),
        FieldQuantity::Component(FieldComponent::Easting) => Some(prism::magnetic::magnetic_e),
        FieldQuantity::Component(FieldComponent::Northing) => Some(prism::magnetic::magnetic_n),
        FieldQuantity::Component(FieldComponent::Upward) => Some(prism::magnetic::magnetic_u),
        // The closed-form prism family stops at field components; gradient
        // tensors of magnetized prisms have no kernel here.
        FieldQuantity::Tensor(_) => None,
    }
}

struct PlannedPoint {
    index: usize,
    position: Position,
    mass: f64,
}

struct PlannedDipole {
    index: usize,
    position: Position,
    moment: [f64; 3],
}

struct PlannedPrism {
    prism: Prism,
    density: f64,
}

struct PlannedMagnetizedPrism {
    prism: Prism,
    magnetization: [f64; 3],
}

/// One validated, batch-grouped forward computation.
///
/// Tesseroids are reduced to planned points/dipoles at their mass centroid
/// during planning and keep their original source index for diagnostics;
/// degenerate (zero-volume) segments contribute nothing and are dropped.
struct Plan {
    points: Vec<PlannedPoint>,
    dipoles: Vec<PlannedDipole>,
    prisms: Vec<PlannedPrism>,
    magnetized_prisms: Vec<PlannedMagnetizedPrism>,
    point_kernel: Option<PointKernel>,
    dipole_kernel: Option<DipoleKernel>,
    prism_kernel: Option<PrismGravityKernel>,
    prism_magnetic_kernel: Option<PrismMagneticKernel>,
}

impl Plan {
    fn build(sources: &[Source], request: &FieldRequest) -> Result<Self> {
        let mut plan = Plan {
            points: Vec::new(),
            dipoles: Vec::new(),
            prisms: Vec::new(),
            magnetized_prisms: Vec::new(),
            point_kernel: None,
            dipole_kernel: None,
            prism_kernel: None,
            prism_magnetic_kernel: None,
        };

        let unsupported = |index: usize, source: &Source| ForwardError::UnsupportedCombination {
            index,
            shape: source.shape_name(),
            property: source.property_name(),
            domain: request.domain,
            quantity: request.quantity,
        };
        let incompatible = |index: usize, source: &Source| ForwardError::IncompatibleProperty {
            index,
            shape: source.shape_name(),
            property: source.property_name(),
        };

        for (index, source) in sources.iter().enumerate() {
            source
                .validate()
                .map_err(|cause| ForwardError::InvalidGeometry {
                    index,
                    source: cause,
                })?;
            match (source.geometry, source.property, request.domain) {
                (SourceGeometry::Point(position), SourceProperty::Mass(mass), PhysicsDomain::Gravity) => {
                    plan.points.push(PlannedPoint {
                        index,
                        position,
                        mass,
                    });
                }
                (SourceGeometry::Point(position), SourceProperty::Moment(moment), PhysicsDomain::Magnetic) => {
                    plan.dipoles.push(PlannedDipole {
                        index,
                        position,
                        moment,
                    });
                }
                (SourceGeometry::Prism(prism), SourceProperty::Density(density), PhysicsDomain::Gravity) => {
                    plan.prisms.push(PlannedPrism { prism, density });
                }
                (SourceGeometry::Prism(prism), SourceProperty::Magnetization(magnetization), PhysicsDomain::Magnetic) => {
                    // Fail fast before any computation: the magnetized-prism
                    // family does not cover every quantity.
                    if plan.prism_magnetic_kernel.is_none() {
                        let kernel = prism_magnetic_kernel(request.quantity)
                            .ok_or_else(|| unsupported(index, source))?;
                        plan.prism_magnetic_kernel = Some(kernel);
                    }
                    plan.magnetized_prisms.push(PlannedMagnetizedPrism {
                        prism,
                        magnetization,
                    });
                }
                (SourceGeometry::Tesseroid(tesseroid), SourceProperty::Density(density), PhysicsDomain::Gravity) => {
                    let volume = tesseroid.volume();
                    if volume != 0.0 {
                        plan.points.push(PlannedPoint {
                            index,
                            position: tesseroid.equivalent_point(),
                            mass: density * volume,
                        });
                    }
                }
                (SourceGeometry::Tesseroid(tesseroid), SourceProperty::Magnetization(magnetization), PhysicsDomain::Magnetic) => {
                    let volume = tesseroid.volume();
                    if volume != 0.0 {
                        plan.dipoles.push(PlannedDipole {
                            index,
                            position: tesseroid.equivalent_point(),
                            moment: [
                                magnetization[0] * volume,
                                magnetization[1] * volume,
                                magnetization[2] * volume,
                            ],
                        });
                    }
                }
                // Property fits the geometry but not the requested domain.
                (SourceGeometry::Point(_), SourceProperty::Mass(_) | SourceProperty::Moment(_), _)
                | (
                    SourceGeometry::Prism(_) | SourceGeometry::Tesseroid(_),
                    SourceProperty::Density(_) | SourceProperty::Magnetization(_),
                    _,
                ) => return Err(unsupported(index, source)),
                // Property does not fit the geometry at all.
                (SourceGeometry::Point(_), SourceProperty::Density(_) | SourceProperty::Magnetization(_), _)
                | (
                    SourceGeometry::Prism(_) | SourceGeometry::Tesseroid(_),
                    SourceProperty::Mass(_) | SourceProperty::Moment(_),
                    _,
                ) => return Err(incompatible(index, source)),
            }
        }

        if !plan.points.is_empty() {
            plan.point_kernel = Some(point_gravity_kernel(request.quantity));
        }
        if !plan.dipoles.is_empty() {
            plan.dipole_kernel = Some(dipole_kernel(request.quantity));
        }
        if !plan.prisms.is_empty() {
            plan.prism_kernel = Some(prism_gravity_kernel(request.quantity));
        }
        Ok(plan)
    }

    /// Total contribution of every planned source at one observation point.
    fn accumulate(&self, observer_index: usize, observer: &Position) -> Result<f64> {
        let mut total = 0.0;
        if let Some(kernel) = self.point_kernel {
            for planned in &self.points {
                if observer.distance_sq(&planned.position) == 0.0 {
                    return Err(ForwardError::ObserverOnSource {
                        source_index: planned.index,
                        observer_index,
                    });
                }
                total += kernel(observer, &planned.position, planned.mass);
            }
        }
        if let Some(kernel) = self.dipole_kernel {
            for planned in &self.dipoles {
                if observer.distance_sq(&planned.position) == 0.0 {
                    return Err(ForwardError::ObserverOnSource {
                        source_index: planned.index,
                        observer_index,
                    });
                }
                total += kernel(observer, &planned.position, &planned.moment);
            }
        }
        if let Some(kernel) = self.prism_kernel {
            for planned in &self.prisms {
                total += kernel(observer, &planned.prism, planned.density);
            }
        }
        if let Some(kernel) = self.prism_magnetic_kernel {
            for planned in &self.magnetized_prisms {
                total += kernel(observer, &planned.prism, &planned.magnetization);
            }
        }
        Ok(total)
    }

    /// All three magnetic field components at one observation point, using
    /// the fused per-source kernels.
    fn accumulate_magnetic_field(
        &self,
        observer_index: usize,
        observer: &Position,
    ) -> Result<[f64; 3]> {
        let mut total = [0.0; 3];
        for planned in &self.dipoles {
            if observer.distance_sq(&planned.position) == 0.0 {
                return Err(ForwardError::ObserverOnSource {
                    source_index: planned.index,
                    observer_index,
                });
            }
            let (b_e, b_n, b_u) = dipole::magnetic_field(observer, &planned.position, &planned.moment);
            total[0] += b_e;
            total[1] += b_n;
            total[2] += b_u;
        }
        for planned in &self.magnetized_prisms {
            let (b_e, b_n, b_u) =
                prism::magnetic::magnetic_field(observer, &planned.prism, &planned.magnetization);
            total[0] += b_e;
            total[1] += b_n;
            total[2] += b_u;
        }
        Ok(total)
    }

    fn num_planned(&self) -> usize {
        self.points.len() + self.dipoles.len() + self.prisms.len() + self.magnetized_prisms.len()
    }
}

fn should_parallelize(config: &EngineConfig, pairs: usize) -> bool {
    match config.mode {
        ExecutionMode::Scalar => false,
        ExecutionMode::Parallel => {
            if !parallel_available() {
                log::warn!(
                    "parallel execution requested but the `parallel` feature is disabled; \
                     falling back to the scalar path"
                );
            }
            parallel_available()
        }
        ExecutionMode::Auto => parallel_available() && pairs >= config.parallel_threshold,
    }
}

fn run<T, F>(observers: &[Position], parallel: bool, eval: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize, &Position) -> Result<T> + Sync,
{
    if parallel {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            return observers
                .par_iter()
                .enumerate()
                .map(|(index, observer)| eval(index, observer))
                .collect();
        }
    }
    observers
        .iter()
        .enumerate()
        .map(|(index, observer)| eval(index, observer))
        .collect()
}

/// Evaluate one field quantity of many sources on many observation points.
///
/// Returns one value per observation point, in the same order as
/// `observers`. Planning validates every source and fails fast on invalid
/// geometry and unsupported combinations before any kernel runs; the only
/// mid-batch failure is an observation point coinciding with a point-like
/// source.
pub fn evaluate(
    sources: &[Source],
    observers: &[Position],
    request: FieldRequest,
    config: &EngineConfig,
) -> Result<Array1<f64>> {
    let plan = Plan::build(sources, &request)?;
    let parallel = should_parallelize(config, plan.num_planned() * observers.len());
    log::debug!(
        "forward evaluation: {} planned sources ({} points, {} dipoles, {} prisms, {} magnetized prisms), {} observers, parallel: {}",
        plan.num_planned(),
        plan.points.len(),
        plan.dipoles.len(),
        plan.prisms.len(),
        plan.magnetized_prisms.len(),
        observers.len(),
        parallel
    );
    let values = run(observers, parallel, |index, observer| {
        plan.accumulate(index, observer)
    })?;
    Ok(Array1::from_vec(values))
}

/// Evaluate all three vector field components, returned as an
/// `|observers| × 3` array with columns (easting, northing, upward).
///
/// For the magnetic domain this uses the fused per-source field kernels,
/// which share the corner sums and distance powers between components; for
/// gravity it runs the three component requests back to back.
pub fn evaluate_field(
    sources: &[Source],
    observers: &[Position],
    domain: PhysicsDomain,
    config: &EngineConfig,
) -> Result<Array2<f64>> {
    let mut output = Array2::zeros((observers.len(), 3));
    match domain {
        PhysicsDomain::Gravity => {
            for (column, component) in [
                FieldComponent::Easting,
                FieldComponent::Northing,
                FieldComponent::Upward,
            ]
            .into_iter()
            .enumerate()
            {
                let values = evaluate(
                    sources,
                    observers,
                    FieldRequest::gravity(FieldQuantity::Component(component)),
                    config,
                )?;
                for (row, value) in values.iter().enumerate() {
                    output[[row, column]] = *value;
                }
            }
        }
        PhysicsDomain::Magnetic => {
            let request = FieldRequest::magnetic(FieldQuantity::Component(FieldComponent::Easting));
            let plan = Plan::build(sources, &request)?;
            let parallel = should_parallelize(config, plan.num_planned() * observers.len());
            let rows = run(observers, parallel, |index, observer| {
                plan.accumulate_magnetic_field(index, observer)
            })?;
            for (row, components) in rows.into_iter().enumerate() {
                output[[row, 0]] = components[0];
                output[[row, 1]] = components[1];
                output[[row, 2]] = components[2];
            }
        }
    }
    Ok(output)
}

/// Evaluate all six independent tensor components, returned as an
/// `|observers| × 6` array with columns (ee, nn, uu, en, eu, nu).
pub fn evaluate_tensor(
    sources: &[Source],
    observers: &[Position],
    domain: PhysicsDomain,
    config: &EngineConfig,
) -> Result<Array2<f64>> {
    let mut output = Array2::zeros((observers.len(), 6));
    let components = [
        TensorComponent::Ee,
        TensorComponent::Nn,
        TensorComponent::Uu,
        TensorComponent::En,
        TensorComponent::Eu,
        TensorComponent::Nu,
    ];
    for (column, component) in components.into_iter().enumerate() {
        let request = FieldRequest {
            domain,
            quantity: FieldQuantity::Tensor(component),
        };
        let values = evaluate(sources, observers, request, config)?;
        for (row, value) in values.iter().enumerate() {
            output[[row, column]] = *value;
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        let scalar = EngineConfig {
            mode: ExecutionMode::Scalar,
            ..EngineConfig::default()
        };
        assert!(!should_parallelize(&scalar, usize::MAX));

        let auto = EngineConfig::default();
        assert!(!should_parallelize(&auto, 10));
        assert_eq!(
            should_parallelize(&auto, usize::MAX),
            parallel_available()
        );
    }

    #[test]
    fn test_empty_inputs() {
        let config = EngineConfig::default();
        let request = FieldRequest::gravity(FieldQuantity::Potential);
        let no_sources = evaluate(&[], &[Position::origin()], request, &config).unwrap();
        assert_eq!(no_sources.len(), 1);
        assert_eq!(no_sources[0], 0.0);

        let no_observers = evaluate(
            &[Source::point_mass(Position::origin(), 1.0)],
            &[],
            request,
            &config,
        )
        .unwrap();
        assert_eq!(no_observers.len(), 0);
    }

    #[test]
    fn test_degenerate_tesseroid_is_dropped() {
        use geo_forward_kernels::Tesseroid;
        let config = EngineConfig::default();
        let flat = Source::tesseroid(Tesseroid::new(0.0, 10.0, 0.0, 10.0, 500.0, 500.0), 1000.0);
        // The degenerate segment contributes nothing, even with the
        // observer sitting exactly on its would-be centroid.
        let observer = Tesseroid::new(0.0, 10.0, 0.0, 10.0, 500.0, 500.0).equivalent_point();
        let values = evaluate(
            &[flat],
            &[observer],
            FieldRequest::gravity(FieldQuantity::Potential),
            &config,
        )
        .unwrap();
        assert_eq!(values[0], 0.0);
    }
}
