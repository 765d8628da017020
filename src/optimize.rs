use argmin::core::{CostFunction, Executor, State, TerminationReason};
use argmin::solver::brent::BrentOpt;
use serde::{Deserialize, Serialize};

use crate::error::{GeolocationError, Result};

const RELATIVE_TOLERANCE: f64 = 1.490_116_119_384_765_6e-8; // sqrt(f64::EPSILON)

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Minimum {
    pub x: f64,
    pub value: f64,
    pub iterations: u64,
    pub converged: bool,
}

fn evaluate<C>(problem: &C, x: f64) -> Result<f64>
where
    C: CostFunction<Param = f64, Output = f64>,
{
    problem
        .cost(&x)
        .map_err(|err| GeolocationError::Optimization(err.to_string()))
}

pub fn grid_scan<C>(problem: &C, lower: f64, upper: f64, step: f64) -> Result<(f64, f64)>
where
    C: CostFunction<Param = f64, Output = f64>,
{
    let span = (upper - lower).abs();
    let steps = if step > 0.0 && span > 0.0 {
        (span / step).ceil() as usize
    } else {
        0
    };
    let lo = lower.min(upper);

    let mut best = (lo, evaluate(problem, lo)?);
    for i in 1..=steps {
        let x = (lo + i as f64 * span / steps as f64).min(lo + span);
        let value = evaluate(problem, x)?;
        if value < best.1 {
            best = (x, value);
        }
    }
    Ok(best)
}

/// Grid scan for the basin, then argmin's Brent solver inside the two grid
/// cells around the best grid point. The grid point wins if Brent does not
/// improve on it.
pub fn bounded_minimize<C>(
    problem: C,
    lower: f64,
    upper: f64,
    scan_step: f64,
    tolerance: f64,
    max_iterations: u64,
) -> Result<Minimum>
where
    C: CostFunction<Param = f64, Output = f64>,
{
    let lo = lower.min(upper);
    let hi = lower.max(upper);
    let (grid_x, grid_value) = grid_scan(&problem, lo, hi, scan_step)?;
    let grid_minimum = Minimum {
        x: grid_x,
        value: grid_value,
        iterations: 0,
        converged: false,
    };

    let cell_lo = (grid_x - scan_step).max(lo);
    let cell_hi = (grid_x + scan_step).min(hi);
    if cell_hi - cell_lo <= tolerance || max_iterations == 0 {
        return Ok(grid_minimum);
    }

    let solver = BrentOpt::new(cell_lo, cell_hi).set_tolerance(RELATIVE_TOLERANCE, tolerance);
    let result = Executor::new(problem, solver)
        .configure(|state| state.max_iters(max_iterations))
        .run()
        .map_err(|err| GeolocationError::Optimization(err.to_string()))?;
    let state = result.state();
    let iterations = state.get_iter();
    let converged = matches!(
        state.get_termination_reason(),
        Some(TerminationReason::SolverConverged)
    );

    match state.get_best_param() {
        Some(&x) if state.get_best_cost() <= grid_value => Ok(Minimum {
            x,
            value: state.get_best_cost(),
            iterations,
            converged,
        }),
        _ => Ok(Minimum {
            iterations,
            converged,
            ..grid_minimum
        }),
    }
}
