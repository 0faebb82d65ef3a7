// 16 8-bit data registers named V0 to VF
// I -> address register (12 bits used)
//
// Delay timer & Sound timer: count down at 60 times / s until 0
//
// Display res: 64 width, 32 height
//
// Instructions are 2 bytes (big-endian)
//      NNN: address
//      NN: 8-bit constant
//      N: 4-bit constant
//      X and Y: 4-bit register identifier

pub mod config;
pub mod decode;
pub mod display;
pub mod emulator;
pub mod error;
pub mod execute;
pub mod keyboard;
pub mod memory;
pub mod registers;
pub mod timer;
#[cfg(feature = "window")]
pub mod window;

pub use config::Config;
pub use decode::{Instruction, RawInstruction};
pub use display::FrameBuffer;
pub use emulator::Emulator;
pub use error::{Error, Result};
pub use execute::{execute, Effect};
pub use keyboard::{Keyboard, Keypad};
pub use memory::Memory;
pub use registers::Registers;
