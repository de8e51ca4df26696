//! Implementation of the [Newton-Raphson](https://en.wikipedia.org/wiki/Newton%27s_method)
//! root finding method using [nalgebra](https://nalgebra.org).
//!
//! This algorithm tries to find a root `$\vec{x}^*$` of a function
//! ```math
//!   \vec{f}\!:\R^n \to \R^n,\qquad \vec{f}(\vec{x}^*) \approx \vec{0},
//! ```
//! by repeatedly solving the linearized system
//! ```math
//!   \mathbf{J}(\vec{x}_k)\,\vec{h}_k = \vec{f}(\vec{x}_k),\qquad
//!   \vec{x}_{k+1} = \vec{x}_k - \vec{h}_k,
//! ```
//! until `$\|\vec{f}(\vec{x}_k)\|$` drops below a tolerance.
//!
//! # Inputs
//!
//! You must provide
//!
//! - the function `$\vec{x} \mapsto \vec{f}(\vec{x})$` as an [`Evaluable`](trait.Evaluable.html),
//!   for example a closure `Fn(&OVector<F, D>) -> OVector<F, D>`,
//! - optionally its Jacobian `$\mathbf{J} \in \R^{n\times n}$`, defined as
//!   ```math
//!   \mathbf{J} \coloneqq
//!   \begin{pmatrix}
//!   \frac{\partial f_1}{\partial x_1} & \cdots & \frac{\partial f_1}{\partial x_n} \\
//!   \vdots & \ddots & \vdots \\
//!   \frac{\partial f_n}{\partial x_1} & \cdots & \frac{\partial f_n}{\partial x_n}
//!   \end{pmatrix}.
//!   ```
//!   Without it the Jacobian is approximated by
//!   [forward differences](fn.approximate_jacobian.html).
//!
//! Finally, you have to provide an initial guess for `$\vec{x}$`. Newton's
//! method converges only locally, so the result _crucially_ depends on it.
//!
//! Scalar equations are systems of dimension one, see [`Univariate`](struct.Univariate.html).
//!
//! The hyperparameters are documented at [`Newton`](struct.Newton.html).
//!
//! # Usage Example
//!
//! We look for a root of
//! ```math
//!   f_1(\vec{x}) \coloneqq x_1^2 + x_2 - 11\quad\text{and}\quad
//!   f_2(\vec{x}) \coloneqq x_1 + x_2^2 - 7,
//! ```
//! the system behind [Himmelblau's function](https://en.wikipedia.org/wiki/Himmelblau%27s_function).
//!
//! ```
//! # use approx::assert_relative_eq;
//! # use nalgebra::{Matrix2, Vector2};
//! use newton_raphson::Newton;
//!
//! let f = |x: &Vector2<f64>| Vector2::new(x.x * x.x + x.y - 11., x.x + x.y * x.y - 7.);
//! let jacobian = |x: &Vector2<f64>| Matrix2::new(2. * x.x, 1., 1., 2. * x.y);
//!
//! let solver = Newton::new(f)
//!     .with_tolerance(1e-12)
//!     .with_jacobian(jacobian);
//! let root = solver.solve(Vector2::new(4., 3.)).unwrap();
//! assert_relative_eq!(root, Vector2::new(3., 2.), epsilon = 1e-10);
//! ```
//!
//! # Failures
//!
//! [`Newton::solve`](struct.Newton.html#method.solve) returns a
//! [`SolveError`](struct.SolveError.html) if the iteration did not converge,
//! left the trust radius or hit a singular Jacobian. The error still holds
//! the last iterate:
//!
//! ```
//! # use nalgebra::Vector1;
//! use newton_raphson::{Failure, Newton, Polynomial};
//!
//! // x^3 - 2x + 2 cycles between 0 and 1
//! let p = Polynomial::new([1., 0., -2., 2.]);
//! let solver = Newton::new(p.clone()).with_jacobian(p.jacobian());
//! let err = solver.solve(Vector1::new(0.)).unwrap_err();
//! assert_eq!(err.failure, Failure::NonConvergence { iterations: 20 });
//! assert_eq!(err.x, Vector1::new(0.));
//! ```
#![no_std]

extern crate alloc;

mod evaluable;
mod functions;
mod jacobian;
mod newton;

pub use evaluable::{Evaluable, Univariate, UnivariateDerivative};
pub use functions::{LinearSystem, LinearSystemJacobian, Polynomial, PolynomialJacobian};
pub use jacobian::{approximate_jacobian, forward_difference};
pub use newton::{
    Analytical, Failure, FiniteDifference, JacobianSource, Newton, SolveError, SolveReport,
};
