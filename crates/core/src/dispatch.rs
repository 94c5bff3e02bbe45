//! Dispatcher: executes a validated [`Invocation`] against the slot registry.

use std::io::Write;

use crate::command::Command;
use crate::error::ExecError;
use crate::ops::{Operands, Operation, OperationProvider};
use crate::parser::Invocation;
use crate::slots::{Matrix, SlotId, SlotRegistry};

/// Whether the session keeps reading lines after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// `stop` was accepted.
    Halt,
}

fn role(slot: Option<SlotId>, role: &'static str, command: Command) -> Result<SlotId, ExecError> {
    slot.ok_or(ExecError::MissingOperand { command, role })
}

/// Run `invocation`. Output produced by the command (only `print_mat`)
/// goes to `out`.
pub fn dispatch<P: OperationProvider + ?Sized>(
    invocation: &Invocation,
    slots: &mut SlotRegistry,
    provider: &P,
    out: &mut dyn Write,
) -> Result<Flow, ExecError> {
    let command = invocation.command;

    match command {
        Command::Stop => {
            tracing::debug!("stop requested");
            return Ok(Flow::Halt);
        }
        Command::ReadMat => {
            let target = role(invocation.output, "target", command)?;
            let elements = invocation.elements.as_deref().unwrap_or_default();
            slots.install(target, Matrix::from_elements(elements));
            tracing::debug!(slot = slots.name(target), read = elements.len(), "matrix loaded");
            return Ok(Flow::Continue);
        }
        _ => {}
    }

    let Some(op) = command.operation() else {
        return Ok(Flow::Continue);
    };
    let a = role(invocation.input_a, "first input", command)?;

    if op == Operation::Print {
        provider.render(slots.get(a), out)?;
        return Ok(Flow::Continue);
    }

    let output = role(invocation.output, "output", command)?;
    let result = {
        let operands = Operands {
            a: slots.get(a),
            b: invocation.input_b.map(|b| slots.get(b)),
            scalar: invocation.scalar.unwrap_or(1.0),
        };
        provider.compute(op, operands)
    };
    slots.install(output, result);
    tracing::debug!(%command, slot = slots.name(output), "slot replaced");

    Ok(Flow::Continue)
}
