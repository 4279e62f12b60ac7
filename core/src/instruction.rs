use crate::opcode::Opcode;

/// Every instruction the interpreter understands, decoded from an `Opcode`.
///
/// Register operands are the raw 4-bit register numbers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Instruction {
    /// 00E0: clear
    Clr,
    /// 00EE: PC = STACK.pop()
    Rts,
    /// 1nnn: PC = addr
    Jump { addr: u16 },
    /// 2nnn: STACK.push(PC); PC = addr
    Call { addr: u16 },
    /// 3xkk: if Vx == kk then pc += 2
    Ske { x: u8, kk: u8 },
    /// 4xkk: if Vx != kk then pc += 2
    Skne { x: u8, kk: u8 },
    /// 5xy0: if Vx == Vy then pc += 2
    Skre { x: u8, y: u8 },
    /// 6xkk: Vx = kk
    Load { x: u8, kk: u8 },
    /// 7xkk: Vx += kk
    Add { x: u8, kk: u8 },
    /// 8xy0: Vx = Vy
    Move { x: u8, y: u8 },
    /// 8xy1: Vx |= Vy
    Or { x: u8, y: u8 },
    /// 8xy2: Vx &= Vy
    And { x: u8, y: u8 },
    /// 8xy3: Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// 8xy4: Vx += Vy; VF = carry
    Addr { x: u8, y: u8 },
    /// 8xy5: Vx -= Vy; VF = !borrow
    Sub { x: u8, y: u8 },
    /// 8xy6: Vx >>= 1; VF = shifted out bit
    Shr { x: u8, y: u8 },
    /// 8xy7: Vx = Vy - Vx; VF = !borrow
    Subn { x: u8, y: u8 },
    /// 8xyE: Vx <<= 1; VF = shifted out bit
    Shl { x: u8, y: u8 },
    /// 9xy0: if Vx != Vy then pc += 2
    Skrne { x: u8, y: u8 },
    /// Annn: I = addr
    Loadi { addr: u16 },
    /// Bnnn: PC = V0 + addr
    Jumpi { addr: u16 },
    /// Cxkk: Vx = rand_byte & kk
    Rand { x: u8, kk: u8 },
    /// Dxyn: draw_sprite(x=Vx, y=Vy, size=n)
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E: if Vx.pressed then pc += 2
    Skpr { x: u8 },
    /// ExA1: if !Vx.pressed then pc += 2
    Skup { x: u8 },
    /// Fx07: Vx = DT
    Moved { x: u8 },
    /// Fx0A: await keypress for Vx
    Keyd { x: u8 },
    /// Fx15: DT = Vx
    Loadd { x: u8 },
    /// Fx18: ST = Vx
    Loads { x: u8 },
    /// Fx1E: I += Vx
    Addi { x: u8 },
    /// Fx29: I = address of the glyph for Vx
    Ldspr { x: u8 },
    /// Fx33: mem[I..I+3] = bcd(Vx)
    Bcd { x: u8 },
    /// Fx55: mem[I..=I+x] = V0..=Vx
    Stor { x: u8 },
    /// Fx65: V0..=Vx = mem[I..=I+x]
    Read { x: u8 },
    /// Anything else, including the unsupported 0nnn machine code call
    Unknown(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn decode(op: Opcode) -> Self {
        use Instruction::*;

        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clr,
            (0x0, 0x0, 0xE, 0xE) => Rts,
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => Ske { x, kk },
            (0x4, ..) => Skne { x, kk },
            (0x5, .., 0x0) => Skre { x, y },
            (0x6, ..) => Load { x, kk },
            (0x7, ..) => Add { x, kk },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => Addr { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => Shr { x, y },
            (0x8, .., 0x7) => Subn { x, y },
            (0x8, .., 0xE) => Shl { x, y },
            (0x9, .., 0x0) => Skrne { x, y },
            (0xA, ..) => Loadi { addr },
            (0xB, ..) => Jumpi { addr },
            (0xC, ..) => Rand { x, kk },
            (0xD, ..) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Skpr { x },
            (0xE, _, 0xA, 0x1) => Skup { x },
            (0xF, _, 0x0, 0x7) => Moved { x },
            (0xF, _, 0x0, 0xA) => Keyd { x },
            (0xF, _, 0x1, 0x5) => Loadd { x },
            (0xF, _, 0x1, 0x8) => Loads { x },
            (0xF, _, 0x1, 0xE) => Addi { x },
            (0xF, _, 0x2, 0x9) => Ldspr { x },
            (0xF, _, 0x3, 0x3) => Bcd { x },
            (0xF, _, 0x5, 0x5) => Stor { x },
            (0xF, _, 0x6, 0x5) => Read { x },
            _ => Unknown(op.0),
        }
    }
}
