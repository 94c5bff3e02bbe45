//! Command registry: the closed set of calculator commands and the
//! parameter layout each one expects.

use crate::ops::Operation;

/// Static parameter metadata for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Exact command word.
    pub name: &'static str,
    /// Matrix-reference inputs read first (0, 1 or 2).
    pub matrix_inputs: u8,
    /// Reads a numeric scalar after the matrix inputs.
    pub takes_scalar: bool,
    /// Reads a target matrix after the inputs (and scalar).
    pub has_output: bool,
    /// Reads a comma separated list of matrix elements last.
    pub reads_elements: bool,
    /// Total parameters, counting the element list as one.
    pub parameter_count: u8,
}

/// A calculator command. The set is closed; see [`Command::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ReadMat,
    PrintMat,
    AddMat,
    SubMat,
    MulMat,
    MulScalar,
    TransMat,
    Stop,
}

const fn descriptor(
    name: &'static str,
    matrix_inputs: u8,
    takes_scalar: bool,
    has_output: bool,
    reads_elements: bool,
    parameter_count: u8,
) -> CommandDescriptor {
    CommandDescriptor {
        name,
        matrix_inputs,
        takes_scalar,
        has_output,
        reads_elements,
        parameter_count,
    }
}

impl Command {
    /// Every command, in registry order.
    pub const ALL: [Command; 8] = [
        Command::ReadMat,
        Command::PrintMat,
        Command::AddMat,
        Command::SubMat,
        Command::MulMat,
        Command::MulScalar,
        Command::TransMat,
        Command::Stop,
    ];

    /// Parameter layout of this command.
    pub fn descriptor(self) -> &'static CommandDescriptor {
        // read_mat names its target as the output slot and loads it directly.
        static READ_MAT: CommandDescriptor = descriptor("read_mat", 0, false, true, true, 2);
        static PRINT_MAT: CommandDescriptor = descriptor("print_mat", 1, false, false, false, 1);
        static ADD_MAT: CommandDescriptor = descriptor("add_mat", 2, false, true, false, 3);
        static SUB_MAT: CommandDescriptor = descriptor("sub_mat", 2, false, true, false, 3);
        static MUL_MAT: CommandDescriptor = descriptor("mul_mat", 2, false, true, false, 3);
        static MUL_SCALAR: CommandDescriptor = descriptor("mul_scalar", 1, true, true, false, 3);
        static TRANS_MAT: CommandDescriptor = descriptor("trans_mat", 1, false, true, false, 2);
        static STOP: CommandDescriptor = descriptor("stop", 0, false, false, false, 0);

        match self {
            Command::ReadMat => &READ_MAT,
            Command::PrintMat => &PRINT_MAT,
            Command::AddMat => &ADD_MAT,
            Command::SubMat => &SUB_MAT,
            Command::MulMat => &MUL_MAT,
            Command::MulScalar => &MUL_SCALAR,
            Command::TransMat => &TRANS_MAT,
            Command::Stop => &STOP,
        }
    }

    /// The command word as typed.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Case-sensitive exact-match lookup.
    pub fn lookup(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.name() == name)
    }

    /// The provider operation this command runs, if it goes through the
    /// operation provider at all. `read_mat` and `stop` are handled by the
    /// dispatcher itself.
    pub fn operation(self) -> Option<Operation> {
        match self {
            Command::PrintMat => Some(Operation::Print),
            Command::AddMat => Some(Operation::Add),
            Command::SubMat => Some(Operation::Sub),
            Command::MulMat => Some(Operation::Mul),
            Command::MulScalar => Some(Operation::Scale),
            Command::TransMat => Some(Operation::Transpose),
            Command::ReadMat | Command::Stop => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(Command::lookup("add_mat"), Some(Command::AddMat));
        assert_eq!(Command::lookup("stop"), Some(Command::Stop));
        assert_eq!(Command::lookup("ADD_MAT"), None);
        assert_eq!(Command::lookup("add_mat,"), None);
        assert_eq!(Command::lookup(""), None);
    }

    #[test]
    fn every_command_round_trips_through_its_name() {
        for c in Command::ALL {
            assert_eq!(Command::lookup(c.name()), Some(c));
        }
    }

    #[test]
    fn parameter_counts_match_layout() {
        for c in Command::ALL {
            let d = c.descriptor();
            let counted = d.matrix_inputs
                + u8::from(d.takes_scalar)
                + u8::from(d.has_output)
                + u8::from(d.reads_elements);
            assert_eq!(counted, d.parameter_count, "{}", d.name);
        }
    }

    #[test]
    fn only_algebraic_commands_use_the_provider() {
        assert!(Command::ReadMat.operation().is_none());
        assert!(Command::Stop.operation().is_none());
        assert_eq!(Command::MulScalar.operation(), Some(Operation::Scale));
    }
}
