//! Forward finite difference approximation of the Jacobian.
use nalgebra::{allocator::Allocator, DefaultAllocator, Dim, OMatrix, OVector, RealField};

use crate::Evaluable;

/// Compute a [numerical approximation](https://en.wikipedia.org/wiki/Numerical_differentiation)
/// to the Jacobian of `f` at `x`.
///
/// Column `$i$` is the forward difference quotient
/// ```math
///   \frac{\vec{f}(\vec{x} + \delta\vec{e}_i) - \vec{f}(\vec{x})}{\delta}
/// ```
/// with `$\delta = \mathtt{dx}$`. The function `f` is evaluated exactly `$n+1$` times.
///
/// The quotient is one-sided, so the error is `$O(\delta)$` plus cancellation
/// of order `$\varepsilon\|\vec{f}\|/\delta$`. `dx` must be positive; there is
/// no special case for `$\delta = 0$`.
///
/// # Example
///
/// ```
/// # use approx::assert_relative_eq;
/// # use nalgebra::{Matrix2, Vector2};
/// # use newton_raphson::approximate_jacobian;
/// let a = Matrix2::new(1., 2., 3., 4.);
/// let f = |x: &Vector2<f64>| a * x;
/// let jacobian = approximate_jacobian(&f, &Vector2::new(5., 6.), 1e-6);
/// assert_relative_eq!(jacobian, a, epsilon = 1e-6);
/// ```
pub fn approximate_jacobian<F, D, E>(f: &E, x: &OVector<F, D>, dx: F) -> OMatrix<F, D, D>
where
    F: RealField + Copy,
    D: Dim,
    E: Evaluable<OVector<F, D>, Output = OVector<F, D>> + ?Sized,
    DefaultAllocator: Allocator<D> + Allocator<D, D>,
{
    let fx = f.evaluate(x);
    forward_difference(f, x, &fx, dx)
}

/// Like [`approximate_jacobian`](fn.approximate_jacobian.html) but reuses an
/// already computed `$\vec{f}(\vec{x})$`, so `f` is evaluated `$n$` times only.
///
/// `fx` must equal `f(x)` and have the dimension of `x`.
pub fn forward_difference<F, D, E>(
    f: &E,
    x: &OVector<F, D>,
    fx: &OVector<F, D>,
    dx: F,
) -> OMatrix<F, D, D>
where
    F: RealField + Copy,
    D: Dim,
    E: Evaluable<OVector<F, D>, Output = OVector<F, D>> + ?Sized,
    DefaultAllocator: Allocator<D> + Allocator<D, D>,
{
    let n = x.shape_generic().0;
    let mut jacobian = OMatrix::<F, D, D>::zeros_generic(n, n);
    let mut perturbed = x.clone();
    for i in 0..n.value() {
        perturbed[i] = x[i] + dx;
        let column = (f.evaluate(&perturbed) - fx) / dx;
        jacobian.set_column(i, &column);
        perturbed[i] = x[i];
    }
    jacobian
}
