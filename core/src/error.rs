use thiserror::Error;

/// Everything that can stop the interpreter.
///
/// None of these are recovered from inside the core; they're handed back to whoever is
/// driving the machine, which decides whether to halt or log and carry on.
#[derive(Debug, Error)]
pub enum Chip8Error {
    /// The fetched word doesn't map to any instruction: (opcode, pc)
    #[error("unknown opcode {0:04X} at {1:#05X}")]
    UnknownOpcode(u16, u16),

    #[error("stack overflow: more than 16 nested calls at {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return with an empty call stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("program image is {size} bytes but at most {max} fit in memory")]
    ImageTooLarge { size: usize, max: usize },

    #[error("address {address:#06X} is outside of memory")]
    AddressOutOfRange { address: usize },

    #[error("unable to read program image: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
