use std::io::Read;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::KEY_COUNT;
use crate::error::Result;
use crate::frame::FrameBuffer;
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::operations;
use crate::quirks::Quirks;
use crate::state::{Flow, Snapshot, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns all machine state; collaborators only ever get copies or shared references.
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers, which the caller must do at 60Hz independently of the CPU
/// - inspecting its frame buffer for rendering by some display
/// - inspecting its registers for debugging
///
/// A host that runs the CPU and timers on separate threads should put the whole machine behind
/// one `Mutex` so that no operation is observed half done.
pub struct Chip8 {
    state: State,
    quirks: Quirks,
    rng: Box<dyn RngCore + Send>,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8::with_quirks(Quirks::default())
    }

    pub fn with_quirks(quirks: Quirks) -> Self {
        Chip8 {
            state: State::new(),
            quirks,
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the source of random bytes used by Cxkk
    pub fn with_rng(mut self, rng: Box<dyn RngCore + Send>) -> Self {
        self.rng = rng;
        self
    }

    /// Load a program image into memory at 0x200.
    /// Nothing is written if the image is too large.
    pub fn load_image(&mut self, image: &[u8]) -> Result<()> {
        self.state.memory.load(image)?;
        debug!("loaded {} byte program image", image.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut image = Vec::new();
        reader.read_to_end(&mut image)?;
        self.load_image(&image)
    }

    /// Returns the FrameBuffer if it changed since the last time it was returned
    pub fn get_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// The current FrameBuffer, changed or not
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keypad.release(key);
    }

    /// Replace the pressed status of every key with a fresh reading from the input device
    pub fn set_keys(&mut self, keys: [bool; KEY_COUNT]) {
        self.state.keypad.set_all(keys);
    }

    pub fn keys(&self) -> [bool; KEY_COUNT] {
        self.state.keypad.as_array()
    }

    /// Advances the CPU by a single instruction
    /// - while awaiting a keypress only checks whether one has arrived
    /// - otherwise gets, decodes and executes the next opcode
    ///
    /// Timers are not touched; see `advance_timers`.
    pub fn advance_cpu(&mut self) -> Result<()> {
        if let Some(register) = self.state.register_needing_key {
            if let Some(key) = self.state.keypad.first_pressed() {
                debug!("key {:X} pressed into v{:X}", key, register);
                self.state.v[register as usize] = key;
                self.state.register_needing_key = None;
                self.state.advance_pc(Flow::Next);
            }
            return Ok(());
        }

        let op = self.state.memory.read_opcode(self.state.pc)?;
        self.state.opcode = op;
        let instruction = Instruction::decode(Opcode(op));
        trace!("{}", self.state.snapshot());

        let flow = operations::execute(instruction, &mut self.state, self.quirks, self.rng.as_mut())?;
        self.state.advance_pc(flow);
        Ok(())
    }

    /// Decrements the delay and sound timers by one.
    /// Call this at 60Hz. Returns true on the tick that silences the sound.
    pub fn advance_timers(&mut self) -> bool {
        self.state.timers.tick()
    }

    /// Whether a tone should currently be playing
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    /// Whether the CPU is parked on Fx0A waiting for a key
    pub fn awaiting_key(&self) -> bool {
        self.state.register_needing_key.is_some()
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// The whole address space, for memory viewers
    pub fn memory(&self) -> &[u8] {
        self.state.memory.as_slice()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
