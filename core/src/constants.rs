/// Total addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;

/// Every address the interpreter computes is reduced to 12 bits
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// 0x200 is where ROMs are loaded into memory and where execution begins
pub const PROGRAM_START: u16 = 0x200;

/// The largest program image that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Maximum depth of nested subroutine calls
pub const STACK_SIZE: usize = 16;

/// V0..VF
pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag
pub const FLAG_REGISTER: usize = 0xF;

/// Keys 0..F on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Timers count down at a fixed 60Hz no matter how fast instructions execute
pub const TIMER_FREQUENCY: u32 = 60;

/// Instructions per second used when the driver isn't told otherwise
pub const DEFAULT_CLOCK_SPEED: u32 = 500;

/// Address of the first glyph in the sprite sheet
pub const SPRITE_SHEET_ADDRESS: u16 = 0x000;

/// Each glyph is 5 rows of 8 pixels
pub const SPRITE_HEIGHT: u16 = 5;

/// # Sprite sheet
/// Hexadecimal digits 0..F, 4 pixels wide and 5 tall, stored one row per byte in the high nibble.
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
