use std::time::Duration;

use log::info;

use emu8_core::constants::{KEY_COUNT, MEMORY_SIZE};
use emu8_core::{Chip8, Snapshot};

use crate::clock::Clock;

/// Times per second the machine state is written to the log
const INSPECT_FREQUENCY: u32 = 2;

/// Bytes shown on each line of a memory dump
const MEMORY_ROW: usize = 32;

/// Memory rows shown, starting at the row holding the program counter
const MEMORY_ROWS: usize = 2;

/// Keys in the order they sit on the hexadecimal keypad
const KEYPAD_LAYOUT: [[u8; 4]; 4] = [
    [0x1, 0x2, 0x3, 0xC],
    [0x4, 0x5, 0x6, 0xD],
    [0x7, 0x8, 0x9, 0xE],
    [0xA, 0x0, 0xB, 0xF],
];

/// Periodically logs the keypad, registers and memory of a running machine
pub struct Inspector {
    clock: Clock,
}

impl Inspector {
    pub fn new() -> Self {
        Inspector {
            clock: Clock::new(INSPECT_FREQUENCY),
        }
    }

    /// Logs the machine state if enough time has passed since the last dump
    pub fn update(&mut self, chip8: &Chip8, elapsed: Duration) {
        if self.clock.ticks(elapsed) == 0 {
            return;
        }
        let snapshot = chip8.snapshot();
        for line in keypad(&chip8.keys()).lines() {
            info!("keypad {}", line);
        }
        info!("{}", registers(&snapshot));
        info!("{}", misc(&snapshot));
        for line in memory(chip8.memory(), snapshot.pc as usize, MEMORY_ROWS).lines() {
            info!("{}", line);
        }
    }
}

/// Draws the keypad as a grid, held keys in brackets
pub fn keypad(keys: &[bool; KEY_COUNT]) -> String {
    let mut grid = String::new();
    for row in KEYPAD_LAYOUT.iter() {
        for &key in row.iter() {
            if keys[key as usize] {
                grid.push_str(&format!("[{:X}]", key));
            } else {
                grid.push_str(&format!(" {:X} ", key));
            }
        }
        grid.push('\n');
    }
    grid
}

pub fn registers(snapshot: &Snapshot) -> String {
    let values: Vec<String> = snapshot
        .v
        .iter()
        .enumerate()
        .map(|(x, value)| format!("v{:X}={:02X}", x, value))
        .collect();
    values.join(" ")
}

pub fn misc(snapshot: &Snapshot) -> String {
    format!(
        "pc={:03X} i={:03X} op={:04X} sp={:X} dt={:02X} st={:02X}",
        snapshot.pc,
        snapshot.i,
        snapshot.opcode,
        snapshot.sp,
        snapshot.delay_timer,
        snapshot.sound_timer
    )
}

/// Hex dump of `rows` lines of memory, starting at the line containing `address`
pub fn memory(bytes: &[u8], address: usize, rows: usize) -> String {
    let start = (address % MEMORY_SIZE) / MEMORY_ROW * MEMORY_ROW;
    let mut dump = String::new();
    for (n, row) in bytes[start.min(bytes.len())..]
        .chunks(MEMORY_ROW)
        .take(rows)
        .enumerate()
    {
        let hex: Vec<String> = row.iter().map(|byte| format!("{:02X}", byte)).collect();
        dump.push_str(&format!("{:03X}: {}\n", start + n * MEMORY_ROW, hex.join(" ")));
    }
    dump
}
