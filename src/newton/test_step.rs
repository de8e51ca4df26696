use approx::assert_relative_eq;
use nalgebra::{DVector, Matrix1, Matrix2, Vector1, Vector2};

use super::test_helpers::{MockCall, MockFunction};
use super::{Failure, Newton};
use crate::{Evaluable, Univariate, UnivariateDerivative};

#[test]
fn single_step_is_forward_difference_quotient() {
    // f(x) = a x^2 + b x + c
    let (a, b, c) = (2., 3., -5.);
    let f = |x: f64| a * x * x + b * x + c;
    let x0 = 2.0;
    for dx in [1., 1e-1, 1e-2, 1e-3, 1e-4, 1e-5, 1e-6] {
        let solver = Newton::new(Univariate(f)).with_max_iterations(1).with_dx(dx);
        let x = solver.step(&Vector1::new(x0)).unwrap();
        let expected = x0 - f(x0) / ((f(x0 + dx) - f(x0)) / dx);
        assert_relative_eq!(x[0], expected, epsilon = 1e-14);
    }
}

#[test]
fn update_is_subtracted() {
    // f(x) = 3x + 6 has its root at -2
    let f = Univariate(|x: f64| 3. * x + 6.);
    let solver = Newton::new(f);
    let x0 = Vector1::new(2.);
    let next = solver.step(&x0).unwrap();
    let h = x0 - next;

    assert_relative_eq!(next[0], -2., epsilon = 1e-8);
    assert!(f.evaluate(&next)[0].abs() < 1e-7);
    // adding the increment moves away from the root
    let wrong = x0 + h;
    assert_relative_eq!(wrong[0], 6., epsilon = 1e-8);
    assert!(f.evaluate(&wrong)[0].abs() > 20.);
}

#[test]
fn given_residuals_are_reused() {
    let mock = MockFunction::new(Matrix2::new(1., 2., 3., 4.), Vector2::new(5., 7.));
    let solver = Newton::new(|x: &Vector2<f64>| mock.evaluate(x));
    let x = Vector2::new(1., 1.);
    let fx = Vector2::new(8., 14.);
    solver.step_with_residuals(&x, &fx).unwrap();
    // one perturbed evaluation per coordinate, none at x
    assert_eq!(mock.calls(), [MockCall::Function, MockCall::Function]);

    let mock = MockFunction::new(Matrix2::new(1., 2., 3., 4.), Vector2::new(5., 7.));
    let solver = Newton::new(|x: &Vector2<f64>| mock.evaluate(x));
    solver.step(&x).unwrap();
    assert_eq!(mock.count(MockCall::Function), 3);
}

#[test]
fn analytical_jacobian_replaces_finite_differences() {
    let mock = MockFunction::new(Matrix2::new(1., 2., 3., 4.), Vector2::new(5., 7.));
    let solver = Newton::new(|x: &Vector2<f64>| mock.evaluate(x)).with_jacobian(mock.jacobian());
    let x = solver.step(&Vector2::zeros()).unwrap();
    assert_eq!(mock.calls(), [MockCall::Function, MockCall::Jacobian]);
    // linear, so a single exact step lands on the root
    assert_relative_eq!(x, Vector2::new(3., -4.), epsilon = 1e-12);
}

#[test]
fn singular_jacobian() {
    // f(x) = x^2 has a vanishing derivative at 0
    let solver = Newton::new(Univariate(|x: f64| x * x + 1.))
        .with_jacobian(UnivariateDerivative(|x: f64| 2. * x));
    assert_eq!(
        solver.step(&Vector1::new(0.)),
        Err(Failure::SingularJacobian)
    );

    // constant function, the finite difference is exactly zero
    let solver = Newton::new(|_x: &Vector2<f64>| Vector2::new(1., 1.));
    assert_eq!(
        solver.step(&Vector2::new(0.5, 0.5)),
        Err(Failure::SingularJacobian)
    );
}

#[test]
fn dimension_mismatch() {
    let solver = Newton::new(|x: &DVector<f64>| DVector::from_element(x.len() + 1, 1.));
    assert_eq!(
        solver.step(&DVector::from_element(2, 0.)),
        Err(Failure::DimensionMismatch {
            expected: 2,
            found: 3
        })
    );

    let solver = Newton::new(|x: &DVector<f64>| x.clone())
        .with_jacobian(|_x: &DVector<f64>| nalgebra::DMatrix::identity(2, 3));
    assert_eq!(
        solver.step(&DVector::from_element(2, 1.)),
        Err(Failure::DimensionMismatch {
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn dynamic_dimension() {
    let solver = Newton::new(|x: &DVector<f64>| x.map(|v| v * v - 4.))
        .with_jacobian(|x: &DVector<f64>| nalgebra::DMatrix::from_diagonal(&(x * 2.)));
    let x = solver.step(&DVector::from_element(3, 4.)).unwrap();
    // 4 - 12 / 8
    assert_relative_eq!(x, DVector::from_element(3, 2.5), epsilon = 1e-12);
}

#[test]
fn one_by_one_matrix_jacobian() {
    let solver = Newton::new(|x: &Vector1<f64>| x * 2. - Vector1::new(1.))
        .with_jacobian(|_x: &Vector1<f64>| Matrix1::new(2.));
    assert_eq!(solver.step(&Vector1::new(10.)).unwrap(), Vector1::new(0.5));
}
