use thiserror::Error;

use crate::memory::TypeAddr;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions raised by the core. Anything not listed here (register
/// wraparound, address masking, unknown instructions) is defined behavior.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("program is {len} bytes but only {capacity} bytes fit above 0x200")]
    ProgramTooLarge { len: usize, capacity: usize },
    #[error("call stack overflow at pc {pc:#05x}")]
    StackOverflow { pc: TypeAddr },
    #[error("return with empty call stack at pc {pc:#05x}")]
    StackUnderflow { pc: TypeAddr },
}
