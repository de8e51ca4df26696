use alloc::{vec, vec::Vec};
use core::cell::RefCell;

use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OMatrix, OVector};

use crate::Evaluable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Function,
    Jacobian,
}

/// Linear function `$\mathbf{A}\vec{x} + \vec{b}$` which records every evaluation.
pub struct MockFunction<N: DimName>
where
    DefaultAllocator: Allocator<N> + Allocator<N, N>,
{
    call_history: RefCell<Vec<MockCall>>,
    a: OMatrix<f64, N, N>,
    b: OVector<f64, N>,
}

impl<N: DimName> MockFunction<N>
where
    DefaultAllocator: Allocator<N> + Allocator<N, N>,
{
    pub fn new(a: OMatrix<f64, N, N>, b: OVector<f64, N>) -> Self {
        Self {
            call_history: RefCell::new(vec![]),
            a,
            b,
        }
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.call_history.borrow().clone()
    }

    pub fn count(&self, call: MockCall) -> usize {
        self.call_history
            .borrow()
            .iter()
            .filter(|&c| *c == call)
            .count()
    }

    /// The analytical Jacobian, recording into the same history.
    pub fn jacobian(&self) -> impl Fn(&OVector<f64, N>) -> OMatrix<f64, N, N> + '_ {
        move |_x| {
            self.call_history.borrow_mut().push(MockCall::Jacobian);
            self.a.clone()
        }
    }
}

impl<N: DimName> Evaluable<OVector<f64, N>> for MockFunction<N>
where
    DefaultAllocator: Allocator<N> + Allocator<N, N>,
{
    type Output = OVector<f64, N>;

    fn evaluate(&self, x: &OVector<f64, N>) -> OVector<f64, N> {
        self.call_history.borrow_mut().push(MockCall::Function);
        &self.a * x + &self.b
    }
}
