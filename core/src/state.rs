use std::fmt;

use crate::constants::{ADDRESS_MASK, PROGRAM_START, REGISTER_COUNT};
use crate::frame::FrameBuffer;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::timers::Timers;

/// What the program counter does once an instruction has executed
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Flow {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// pc = addr
    Jump(u16),
    /// pc stays put until a key is pressed
    Wait,
}

impl Flow {
    pub fn skip_if(condition: bool) -> Self {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// The Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 12-bit memory address register
///
/// Counter
/// - (pc) a 12-bit program counter
///
/// ## Memory
/// - 4096 bytes of addressable memory and a 16 entry stack (see `Memory`)
/// - a 64x32 frame buffer that stores the contents of the next frame to be drawn
///
/// ## Input
/// - the pressed status of keys 0..F
/// - Emulation halts until a key's value is written to `register_needing_key`
pub(crate) struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub opcode: u16,
    pub memory: Memory,
    pub timers: Timers,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: Keypad,
    pub register_needing_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            opcode: 0,
            memory: Memory::new(),
            timers: Timers::new(),
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            keypad: Keypad::default(),
            register_needing_key: None,
        }
    }

    pub fn advance_pc(&mut self, flow: Flow) {
        self.pc = match flow {
            Flow::Next => self.pc.wrapping_add(2),
            Flow::Skip => self.pc.wrapping_add(4),
            Flow::Jump(addr) => addr,
            Flow::Wait => self.pc,
        } & ADDRESS_MASK;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            v: self.v,
            i: self.i,
            pc: self.pc,
            sp: self.memory.sp(),
            opcode: self.opcode,
            delay_timer: self.timers.delay,
            sound_timer: self.timers.sound,
            register_needing_key: self.register_needing_key,
        }
    }
}

/// A read-only copy of the registers for debuggers and inspectors
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub opcode: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub register_needing_key: Option<u8>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04X} v{:02X?} i{:04X} pc{:04X} sp{:X} dt{:02X} st{:02X}",
            self.opcode, self.v, self.i, self.pc, self.sp, self.delay_timer, self.sound_timer
        )?;
        if let Some(register) = self.register_needing_key {
            write!(f, " wait v{:X}", register)?;
        }
        Ok(())
    }
}
