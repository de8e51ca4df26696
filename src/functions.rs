//! Test functions with known roots and analytical derivatives.
use alloc::vec::Vec;
use core::fmt;

use nalgebra::{
    allocator::Allocator, DefaultAllocator, Dim, Matrix1, OMatrix, OVector, RealField, Vector1,
};

use crate::Evaluable;

/// Polynomial `$p(x) = c_0 x^d + c_1 x^{d-1} + \cdots + c_d$`.
///
/// The coefficients are given in descending degree, so `[1, 2, 3]`
/// is `$x^2 + 2x + 3$`:
///
/// ```
/// # use newton_raphson::Polynomial;
/// let p = Polynomial::new([1., 2., 3.]);
/// assert_eq!(p.eval(5.), 38.);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial<F> {
    coeffs: Vec<F>,
}

impl<F: RealField + Copy> Polynomial<F> {
    pub fn new(coeffs: impl Into<Vec<F>>) -> Self {
        Self {
            coeffs: coeffs.into(),
        }
    }

    pub fn coefficients(&self) -> &[F] {
        &self.coeffs
    }

    /// Evaluate with Horner's rule. The empty polynomial is zero.
    pub fn eval(&self, x: F) -> F {
        self.coeffs.iter().fold(F::zero(), |acc, &c| acc * x + c)
    }

    /// The derivative `$p'$`, of any degree.
    pub fn derivative(&self) -> Self {
        let degree = self.coeffs.len().saturating_sub(1);
        let coeffs = self.coeffs[..degree]
            .iter()
            .enumerate()
            .map(|(i, &c)| c * nalgebra::convert::<f64, F>((degree - i) as f64))
            .collect::<Vec<_>>();
        Self { coeffs }
    }

    /// The analytical `$1\times 1$` Jacobian, to be passed to
    /// [`Newton::with_jacobian`](struct.Newton.html#method.with_jacobian).
    pub fn jacobian(&self) -> PolynomialJacobian<F> {
        PolynomialJacobian {
            derivative: self.derivative(),
        }
    }
}

impl<F: RealField + Copy> Evaluable<Vector1<F>> for Polynomial<F> {
    type Output = Vector1<F>;

    fn evaluate(&self, x: &Vector1<F>) -> Vector1<F> {
        Vector1::new(self.eval(x[0]))
    }
}

impl<F: fmt::Display> fmt::Display for Polynomial<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Polynomial(")?;
        for (i, c) in self.coeffs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str(")")
    }
}

/// Analytical Jacobian of a [`Polynomial`](struct.Polynomial.html).
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialJacobian<F> {
    derivative: Polynomial<F>,
}

impl<F: RealField + Copy> Evaluable<Vector1<F>> for PolynomialJacobian<F> {
    type Output = Matrix1<F>;

    fn evaluate(&self, x: &Vector1<F>) -> Matrix1<F> {
        Matrix1::new(self.derivative.eval(x[0]))
    }
}

/// Affine system `$\vec{f}(\vec{x}) = \mathbf{A}\vec{x} + \vec{b}$`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearSystem<F, D>
where
    F: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<D> + Allocator<D, D>,
{
    a: OMatrix<F, D, D>,
    b: OVector<F, D>,
}

impl<F, D> LinearSystem<F, D>
where
    F: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<D> + Allocator<D, D>,
{
    /// # Panics
    ///
    /// Panics if `a` is not square or `b` does not match it. This can only
    /// happen for dynamically sized systems.
    pub fn new(a: OMatrix<F, D, D>, b: OVector<F, D>) -> Self {
        assert!(a.is_square(), "A must be square");
        assert_eq!(a.nrows(), b.nrows(), "A and b must have the same number of rows");
        Self { a, b }
    }

    pub fn matrix(&self) -> &OMatrix<F, D, D> {
        &self.a
    }

    pub fn offset(&self) -> &OVector<F, D> {
        &self.b
    }

    /// The constant Jacobian `$\mathbf{A}$`.
    pub fn jacobian(&self) -> LinearSystemJacobian<F, D> {
        LinearSystemJacobian { a: self.a.clone() }
    }
}

impl<F, D> Evaluable<OVector<F, D>> for LinearSystem<F, D>
where
    F: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<D> + Allocator<D, D>,
{
    type Output = OVector<F, D>;

    fn evaluate(&self, x: &OVector<F, D>) -> OVector<F, D> {
        &self.a * x + &self.b
    }
}

impl<F, D> fmt::Display for LinearSystem<F, D>
where
    F: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<D> + Allocator<D, D>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LinearSystem(A, b)")
    }
}

/// Analytical Jacobian of a [`LinearSystem`](struct.LinearSystem.html).
#[derive(Clone, Debug, PartialEq)]
pub struct LinearSystemJacobian<F, D>
where
    F: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<D, D>,
{
    a: OMatrix<F, D, D>,
}

impl<F, D> Evaluable<OVector<F, D>> for LinearSystemJacobian<F, D>
where
    F: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<D> + Allocator<D, D>,
{
    type Output = OMatrix<F, D, D>;

    fn evaluate(&self, _x: &OVector<F, D>) -> OMatrix<F, D, D> {
        self.a.clone()
    }
}
