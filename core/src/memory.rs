use crate::constants::{
    ADDRESS_MASK, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, SPRITE_SHEET_ADDRESS,
    STACK_SIZE,
};
use crate::error::{Chip8Error, Result};

/// # Memory
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet
///     - 0x050..0x200 is otherwise unused
///     - 0x200..0x1000 holds the program
/// - a 16 entry call stack kept beside the address space rather than in it
///
/// Addresses are `u16` but only their low 12 bits are meaningful. The interpreter masks every
/// address it computes, so `AddressOutOfRange` only surfaces through direct misuse.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
    stack: [u16; STACK_SIZE],
    sp: u8,
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font = SPRITE_SHEET_ADDRESS as usize;
        bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        Memory {
            bytes,
            stack: [0; STACK_SIZE],
            sp: 0,
        }
    }

    /// Copies a program image into memory starting at 0x200.
    /// Memory is untouched if the image doesn't fit.
    pub fn load(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::ImageTooLarge {
                size: image.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + image.len()].copy_from_slice(image);
        Ok(())
    }

    pub fn read(&self, address: u16) -> Result<u8> {
        self.bytes
            .get(address as usize)
            .copied()
            .ok_or(Chip8Error::AddressOutOfRange {
                address: address as usize,
            })
    }

    pub fn write(&mut self, address: u16, value: u8) -> Result<()> {
        let cell = self
            .bytes
            .get_mut(address as usize)
            .ok_or(Chip8Error::AddressOutOfRange {
                address: address as usize,
            })?;
        *cell = value;
        Ok(())
    }

    /// Opcodes are 16 bits but memory is stored as bytes, so two subsequent bytes are combined
    /// most significant first. The second byte wraps around to 0x000.
    pub fn read_opcode(&self, pc: u16) -> Result<u16> {
        let high = u16::from(self.read(pc)?);
        let low = u16::from(self.read(pc.wrapping_add(1) & ADDRESS_MASK)?);
        Ok(high << 8 | low)
    }

    /// STACK.push(return_address)
    pub fn push(&mut self, return_address: u16, pc: u16) -> Result<()> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Chip8Error::StackOverflow { pc })?;
        *slot = return_address;
        self.sp += 1;
        Ok(())
    }

    /// STACK.pop()
    pub fn pop(&mut self, pc: u16) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Current stack depth
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// The whole address space, for inspectors
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_loads_sprite_sheet() {
        let memory = Memory::new();
        assert_eq!(memory.as_slice()[0..80], SPRITE_SHEET[..]);
        assert!(memory.as_slice()[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_places_image_at_program_start() {
        let mut memory = Memory::new();
        memory.load(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
        assert_eq!(memory.as_slice()[0x200..0x204], [0x00, 0xE0, 0x12, 0x00]);
    }

    #[test]
    fn test_load_accepts_image_filling_memory() {
        let mut memory = Memory::new();
        memory.load(&[0xAA; MAX_ROM_SIZE]).unwrap();
        assert_eq!(memory.read(0xFFF).unwrap(), 0xAA);
    }

    #[test]
    fn test_load_rejects_oversized_image_without_writing() {
        let mut memory = Memory::new();
        let result = memory.load(&[0xAA; MAX_ROM_SIZE + 1]);
        assert!(matches!(
            result,
            Err(Chip8Error::ImageTooLarge {
                size: 3585,
                max: 3584
            })
        ));
        assert!(memory.as_slice()[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_read_write() {
        let mut memory = Memory::new();
        memory.write(0x300, 0x42).unwrap();
        assert_eq!(memory.read(0x300).unwrap(), 0x42);
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.read(0x1000),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
        assert!(matches!(
            memory.write(0xFFFF, 0x1),
            Err(Chip8Error::AddressOutOfRange { address: 0xFFFF })
        ));
    }

    #[test]
    fn test_read_opcode_is_big_endian() {
        let mut memory = Memory::new();
        memory.load(&[0xAA, 0xBB]).unwrap();
        assert_eq!(memory.read_opcode(0x200).unwrap(), 0xAABB);
    }

    #[test]
    fn test_read_opcode_wraps_at_end_of_memory() {
        let mut memory = Memory::new();
        memory.write(0xFFF, 0x12).unwrap();
        // 0x000 holds the first byte of the "0" glyph
        assert_eq!(memory.read_opcode(0xFFF).unwrap(), 0x12F0);
    }

    #[test]
    fn test_push_pop() {
        let mut memory = Memory::new();
        memory.push(0x200, 0x200).unwrap();
        memory.push(0x300, 0x300).unwrap();
        assert_eq!(memory.sp(), 2);
        assert_eq!(memory.pop(0x400).unwrap(), 0x300);
        assert_eq!(memory.pop(0x302).unwrap(), 0x200);
        assert_eq!(memory.sp(), 0);
    }

    #[test]
    fn test_push_overflows_after_sixteen() {
        let mut memory = Memory::new();
        for depth in 0..STACK_SIZE as u16 {
            memory.push(depth, 0x200).unwrap();
        }
        assert!(matches!(
            memory.push(0x0, 0x234),
            Err(Chip8Error::StackOverflow { pc: 0x234 })
        ));
        assert_eq!(memory.sp(), 16);
    }

    #[test]
    fn test_pop_underflows_when_empty() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.pop(0x202),
            Err(Chip8Error::StackUnderflow { pc: 0x202 })
        ));
        assert_eq!(memory.sp(), 0);
    }
}
