//! Operation provider: the numeric kernels behind the algebraic commands.
//!
//! The [`OperationProvider`] trait is the seam between the interpreter and
//! the matrix arithmetic. Providers only ever see shared borrows of their
//! inputs and return a fresh matrix; installing it is the dispatcher's job.

use std::io::{self, Write};

use crate::slots::{Matrix, MATRIX_SIZE};

/// A provider operation. One per algebraic command plus `Print`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Print,
    Add,
    Sub,
    Mul,
    Scale,
    Transpose,
}

/// Operands gathered by the dispatcher for one operation.
#[derive(Debug, Clone, Copy)]
pub struct Operands<'a> {
    pub a: &'a Matrix,
    /// Second input, for binary operations.
    pub b: Option<&'a Matrix>,
    /// Scale factor; 1.0 when the command takes none.
    pub scalar: f64,
}

/// Matrix kernels used by the dispatcher.
pub trait OperationProvider {
    /// Compute the result of `op`. `Print` never reaches this method.
    fn compute(&self, op: Operation, operands: Operands<'_>) -> Matrix;

    /// Write `matrix` to `out` in transcript format.
    fn render(&self, matrix: &Matrix, out: &mut dyn Write) -> io::Result<()>;
}

/// Straightforward row-major kernels.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardOps;

impl OperationProvider for StandardOps {
    fn compute(&self, op: Operation, operands: Operands<'_>) -> Matrix {
        let a = operands.a;
        let b = operands.b.unwrap_or(a);
        match op {
            Operation::Add => Matrix::from_fn(|i, j| a.get(i, j) + b.get(i, j)),
            Operation::Sub => Matrix::from_fn(|i, j| a.get(i, j) - b.get(i, j)),
            Operation::Mul => Matrix::from_fn(|i, j| {
                (0..MATRIX_SIZE).map(|k| a.get(i, k) * b.get(k, j)).sum()
            }),
            Operation::Scale => Matrix::from_fn(|i, j| operands.scalar * a.get(i, j)),
            Operation::Transpose => Matrix::from_fn(|i, j| a.get(j, i)),
            Operation::Print => *a,
        }
    }

    fn render(&self, matrix: &Matrix, out: &mut dyn Write) -> io::Result<()> {
        for row in matrix.rows() {
            for cell in row {
                write!(out, "{:<9.2}\t", cell)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
