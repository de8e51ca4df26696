use crate::jacobian::forward_difference;
use crate::Evaluable;
use core::fmt;
use log::{debug, trace, warn};
use nalgebra::{
    allocator::Allocator, convert, DefaultAllocator, Dim, DimMin, OMatrix, OVector, RealField,
};
use num_traits::Float;

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod test_step;

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
/// Reasons for failure of a Newton step or solve.
pub enum Failure {
    /// The Jacobian at the current iterate is not invertible.
    #[error("Jacobian is singular")]
    SingularJacobian,
    /// The residual or the Jacobian does not have the dimension of `$\vec{x}$`.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// The iteration budget was exhausted with `$\|\vec{f}(\vec{x})\|$` still above the tolerance.
    #[error("no convergence after {iterations} iterations")]
    NonConvergence { iterations: usize },
    /// An iterate left the trust radius around the initial guess.
    #[error("iterate left the trust radius at iteration {iteration}")]
    RadiusExceeded { iteration: usize },
}

#[derive(Debug, Clone, PartialEq)]
/// Information about the solve.
///
/// Use this to inspect the iteration. Most importantly
/// you may want to check if there was a failure.
pub struct SolveReport<F: RealField> {
    pub failure: Option<Failure>,
    /// Number of Newton steps taken.
    pub iterations: usize,
    /// Contains `$\|\vec{f}(\vec{x})\|$` for the returned `$\vec{x}$`,
    /// or `NaN` if it was not evaluated.
    pub residual_norm: F,
}

/// A failed [`Newton::solve`](struct.Newton.html#method.solve) together with the
/// last iterate, which callers may still use as a best-effort result.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveError<F, D>
where
    F: RealField,
    D: Dim,
    DefaultAllocator: Allocator<D>,
{
    pub failure: Failure,
    pub x: OVector<F, D>,
}

impl<F, D> SolveError<F, D>
where
    F: RealField,
    D: Dim,
    DefaultAllocator: Allocator<D>,
{
    /// Take the last iterate.
    pub fn into_last_iterate(self) -> OVector<F, D> {
        self.x
    }
}

impl<F, D> fmt::Display for SolveError<F, D>
where
    F: RealField,
    D: Dim,
    DefaultAllocator: Allocator<D>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Newton solve failed: {}", self.failure)
    }
}

impl<F, D> core::error::Error for SolveError<F, D>
where
    F: RealField,
    D: Dim,
    DefaultAllocator: Allocator<D>,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.failure)
    }
}

/// Source of the Jacobian used in a Newton step.
///
/// Implemented by [`FiniteDifference`](struct.FiniteDifference.html) and
/// [`Analytical`](struct.Analytical.html); you normally do not implement it yourself.
pub trait JacobianSource<F, D>
where
    F: RealField,
    D: Dim,
    DefaultAllocator: Allocator<D> + Allocator<D, D>,
{
    /// The analytical Jacobian at `x`, or `None` to approximate it.
    fn analytical(&self, x: &OVector<F, D>) -> Option<OMatrix<F, D, D>>;
}

/// Approximate the Jacobian by forward differences. This is the default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FiniteDifference;

impl<F, D> JacobianSource<F, D> for FiniteDifference
where
    F: RealField,
    D: Dim,
    DefaultAllocator: Allocator<D> + Allocator<D, D>,
{
    fn analytical(&self, _x: &OVector<F, D>) -> Option<OMatrix<F, D, D>> {
        None
    }
}

/// Use a user supplied Jacobian `$\mathbf{J}(\vec{x})$`.
#[derive(Copy, Clone, Debug)]
pub struct Analytical<J>(pub J);

impl<F, D, J> JacobianSource<F, D> for Analytical<J>
where
    F: RealField,
    D: Dim,
    J: Evaluable<OVector<F, D>, Output = OMatrix<F, D, D>>,
    DefaultAllocator: Allocator<D> + Allocator<D, D>,
{
    fn analytical(&self, x: &OVector<F, D>) -> Option<OMatrix<F, D, D>> {
        Some(self.0.evaluate(x))
    }
}

/// Newton-Raphson root finder.
///
/// See the [module documentation](index.html) for a usage example.
///
/// The solver owns the function `$\vec{f}$` and the iteration policy. The policy
/// is fixed at construction with the `with_*` methods; solving only borrows
/// the solver, so the configuration cannot change during a solve.
///
/// Defaults are a tolerance of `$10^{-6}$`, at most 20 iterations, a finite
/// difference step of `$10^{-6}$`, no trust radius and a finite difference Jacobian.
#[derive(Copy, Clone, Debug)]
pub struct Newton<F, E, J = FiniteDifference> {
    function: E,
    jacobian: J,
    tolerance: F,
    max_iterations: usize,
    dx: F,
    trust_radius: Option<F>,
}

impl<F: RealField + Float, E> Newton<F, E> {
    /// Create a solver for the roots of `function` with the default settings.
    pub fn new(function: E) -> Self {
        Self {
            function,
            jacobian: FiniteDifference,
            tolerance: convert(1e-6),
            max_iterations: 20,
            dx: convert(1e-6),
            trust_radius: None,
        }
    }
}

impl<F: RealField + Float, E, J> Newton<F, E, J> {
    /// Set the tolerance on the residual norm.
    ///
    /// The iteration stops as soon as `$\|\vec{f}(\vec{x})\| < \mathtt{tolerance}$`.
    ///
    /// # Panics
    ///
    /// Panics if `$\mathtt{tolerance} < 0$` or `tolerance` is `NaN`.
    pub fn with_tolerance(self, tolerance: F) -> Self {
        assert!(tolerance >= F::zero(), "tolerance must be >= 0");
        Self { tolerance, ..self }
    }

    /// Set the maximal number of Newton steps.
    ///
    /// # Panics
    ///
    /// Panics if `$\mathtt{max\_iterations} = 0$`.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            max_iterations,
            ..self
        }
    }

    /// Set the step `$\delta$` of the finite difference Jacobian.
    ///
    /// Has no effect when an analytical Jacobian is used.
    ///
    /// # Panics
    ///
    /// Panics if `$\delta \leq 0$` or `$\delta$` is not finite.
    pub fn with_dx(self, dx: F) -> Self {
        assert!(dx > F::zero() && Float::is_finite(dx), "dx must be finite and > 0");
        Self { dx, ..self }
    }

    /// Fail with [`Failure::RadiusExceeded`](enum.Failure.html#variant.RadiusExceeded)
    /// as soon as an iterate is farther than `radius` from the initial guess.
    ///
    /// # Panics
    ///
    /// Panics if `$\mathtt{radius} \leq 0$` or `radius` is `NaN`.
    pub fn with_trust_radius(self, radius: F) -> Self {
        assert!(radius > F::zero(), "trust radius must be > 0");
        Self {
            trust_radius: Some(radius),
            ..self
        }
    }

    /// Use the analytical Jacobian `jacobian` instead of finite differences.
    pub fn with_jacobian<G>(self, jacobian: G) -> Newton<F, E, Analytical<G>> {
        Newton {
            function: self.function,
            jacobian: Analytical(jacobian),
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            dx: self.dx,
            trust_radius: self.trust_radius,
        }
    }

    /// The function whose root is sought.
    pub fn function(&self) -> &E {
        &self.function
    }

    /// Tolerance on `$\|\vec{f}(\vec{x})\|$`.
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// Maximal number of Newton steps.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Step of the finite difference Jacobian.
    pub fn dx(&self) -> F {
        self.dx
    }

    /// Trust radius around the initial guess, if any.
    pub fn trust_radius(&self) -> Option<F> {
        self.trust_radius
    }
}

impl<F: RealField + Float, E, G> Newton<F, E, Analytical<G>> {
    /// The user supplied Jacobian.
    pub fn analytical_jacobian(&self) -> &G {
        &self.jacobian.0
    }
}

impl<F, E, J> Newton<F, E, J>
where
    F: RealField + Float,
{
    /// Take a single Newton step from `x`.
    ///
    /// Solves `$\mathbf{J}(\vec{x})\vec{h} = \vec{f}(\vec{x})$` and returns
    /// `$\vec{x} - \vec{h}$`.
    pub fn step<D>(&self, x: &OVector<F, D>) -> Result<OVector<F, D>, Failure>
    where
        D: DimMin<D, Output = D>,
        E: Evaluable<OVector<F, D>, Output = OVector<F, D>>,
        J: JacobianSource<F, D>,
        DefaultAllocator: Allocator<D> + Allocator<D, D>,
    {
        let fx = self.function.evaluate(x);
        self.step_with_residuals(x, &fx)
    }

    /// Like [`step`](#method.step) with `fx` already known to be `$\vec{f}(\vec{x})$`.
    pub fn step_with_residuals<D>(
        &self,
        x: &OVector<F, D>,
        fx: &OVector<F, D>,
    ) -> Result<OVector<F, D>, Failure>
    where
        D: DimMin<D, Output = D>,
        E: Evaluable<OVector<F, D>, Output = OVector<F, D>>,
        J: JacobianSource<F, D>,
        DefaultAllocator: Allocator<D> + Allocator<D, D>,
    {
        let n = x.nrows();
        if fx.nrows() != n {
            return Err(Failure::DimensionMismatch {
                expected: n,
                found: fx.nrows(),
            });
        }
        let jacobian = match self.jacobian.analytical(x) {
            Some(jacobian) => jacobian,
            None => forward_difference(&self.function, x, fx, self.dx),
        };
        if jacobian.shape() != (n, n) {
            return Err(Failure::DimensionMismatch {
                expected: n,
                found: if jacobian.nrows() != n {
                    jacobian.nrows()
                } else {
                    jacobian.ncols()
                },
            });
        }
        let h = jacobian.lu().solve(fx).ok_or(Failure::SingularJacobian)?;
        trace!("newton step: |h| = {}", h.norm());
        Ok(x - h)
    }

    /// Find a root of `$\vec{f}$` starting from `x0`.
    ///
    /// On failure the error carries the last iterate. See
    /// [`solve_with_report`](#method.solve_with_report) for more details about the run.
    pub fn solve<D>(&self, x0: OVector<F, D>) -> Result<OVector<F, D>, SolveError<F, D>>
    where
        D: DimMin<D, Output = D>,
        E: Evaluable<OVector<F, D>, Output = OVector<F, D>>,
        J: JacobianSource<F, D>,
        DefaultAllocator: Allocator<D> + Allocator<D, D>,
    {
        let (x, report) = self.solve_with_report(x0);
        match report.failure {
            None => Ok(x),
            Some(failure) => Err(SolveError { failure, x }),
        }
    }

    /// Find a root of `$\vec{f}$` starting from `x0`.
    ///
    /// Always returns the last iterate, even if the report contains a failure.
    pub fn solve_with_report<D>(&self, x0: OVector<F, D>) -> (OVector<F, D>, SolveReport<F>)
    where
        D: DimMin<D, Output = D>,
        E: Evaluable<OVector<F, D>, Output = OVector<F, D>>,
        J: JacobianSource<F, D>,
        DefaultAllocator: Allocator<D> + Allocator<D, D>,
    {
        let mut report = SolveReport {
            failure: None,
            iterations: 0,
            residual_norm: <F as Float>::nan(),
        };
        let mut x = x0.clone();
        for iteration in 0..self.max_iterations {
            let fx = self.function.evaluate(&x);
            report.residual_norm = fx.norm();
            debug!(
                "newton iteration {}: |f(x)| = {}",
                iteration, report.residual_norm
            );
            if report.residual_norm < self.tolerance {
                return (x, report);
            }
            x = match self.step_with_residuals(&x, &fx) {
                Ok(x) => x,
                Err(failure) => {
                    warn!("newton step failed at iteration {}: {}", iteration, failure);
                    report.failure = Some(failure);
                    return (x, report);
                }
            };
            report.iterations += 1;
            // the residual belongs to the previous iterate now
            report.residual_norm = <F as Float>::nan();
            if let Some(radius) = self.trust_radius {
                let distance = (&x - &x0).norm();
                if distance > radius {
                    warn!(
                        "newton iterate left trust radius {} at iteration {}: distance {}",
                        radius, report.iterations, distance
                    );
                    report.failure = Some(Failure::RadiusExceeded {
                        iteration: report.iterations,
                    });
                    return (x, report);
                }
            }
        }
        report.residual_norm = self.function.evaluate(&x).norm();
        if !(report.residual_norm < self.tolerance) {
            warn!(
                "newton did not converge in {} iterations: |f(x)| = {}",
                self.max_iterations, report.residual_norm
            );
            report.failure = Some(Failure::NonConvergence {
                iterations: self.max_iterations,
            });
        }
        (x, report)
    }
}
