//! A Chip-8 interpreter with no opinions about windows, files, clocks or speakers.
//!
//! The host loads a program image, then repeatedly calls `Chip8::advance_cpu` at whatever
//! instruction rate it likes and `Chip8::advance_timers` at 60Hz, feeding key states in and
//! reading frames out in between.
pub use chip8::Chip8;
pub use error::{Chip8Error, Result};
pub use frame::FrameBuffer;
pub use quirks::Quirks;
pub use state::Snapshot;

mod chip8;
pub mod constants;
mod error;
mod frame;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod quirks;
mod state;
mod timers;
