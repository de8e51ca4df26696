use nalgebra::{Matrix1, RealField, Vector1};

/// Something that can be evaluated at a point.
///
/// This is what [`Newton`](struct.Newton.html) needs to compute the residuals
/// `$\vec{f}(\vec{x})$` and, optionally, the Jacobian `$\mathbf{J}(\vec{x})$`.
/// See the [module documentation](index.html) for a usage example.
///
/// Every closure `Fn(&X) -> Y` is `Evaluable<X>`, so ad hoc functions need no
/// wrapper type:
///
/// ```
/// # use nalgebra::Vector2;
/// # use newton_raphson::Evaluable;
/// let f = |x: &Vector2<f64>| Vector2::new(x.x * x.y, x.x - x.y);
/// assert_eq!(f.evaluate(&Vector2::new(2., 3.)), Vector2::new(6., -1.));
/// ```
pub trait Evaluable<X> {
    type Output;

    /// Evaluate at `x`.
    fn evaluate(&self, x: &X) -> Self::Output;
}

impl<X, Y, G> Evaluable<X> for G
where
    G: Fn(&X) -> Y,
{
    type Output = Y;

    #[inline]
    fn evaluate(&self, x: &X) -> Y {
        self(x)
    }
}

/// Adapter for a scalar function `$f\!:\R\to\R$`.
///
/// The solver works on vectors throughout, so a scalar problem is a system
/// of dimension one:
///
/// ```
/// # use nalgebra::Vector1;
/// # use newton_raphson::{Evaluable, Univariate};
/// let f = Univariate(|x: f64| 3. * x + 6.);
/// assert_eq!(f.evaluate(&Vector1::new(1.)), Vector1::new(9.));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Univariate<G>(pub G);

impl<F, G> Evaluable<Vector1<F>> for Univariate<G>
where
    F: RealField + Copy,
    G: Fn(F) -> F,
{
    type Output = Vector1<F>;

    fn evaluate(&self, x: &Vector1<F>) -> Vector1<F> {
        Vector1::new((self.0)(x[0]))
    }
}

/// Adapter for the derivative `$f'$` of a scalar function, evaluating to a `$1\times 1$` Jacobian.
#[derive(Copy, Clone, Debug)]
pub struct UnivariateDerivative<G>(pub G);

impl<F, G> Evaluable<Vector1<F>> for UnivariateDerivative<G>
where
    F: RealField + Copy,
    G: Fn(F) -> F,
{
    type Output = Matrix1<F>;

    fn evaluate(&self, x: &Vector1<F>) -> Matrix1<F> {
        Matrix1::new((self.0)(x[0]))
    }
}
