use log::debug;
use rand::{Rng, RngCore};

use crate::constants::{ADDRESS_MASK, FLAG_REGISTER, SPRITE_HEIGHT, SPRITE_SHEET_ADDRESS};
use crate::error::{Chip8Error, Result};
use crate::instruction::Instruction;
use crate::quirks::Quirks;
use crate::state::{Flow, State};

/// Runs a single decoded instruction against `state`.
///
/// The program counter is left alone; the returned `Flow` says where it goes next.
pub(crate) fn execute(
    instruction: Instruction,
    state: &mut State,
    quirks: Quirks,
    rng: &mut dyn RngCore,
) -> Result<Flow> {
    use Instruction::*;

    match instruction {
        Clr => clr(state),
        Rts => rts(state),
        Jump { addr } => Ok(Flow::Jump(addr)),
        Call { addr } => call(state, addr),
        Ske { x, kk } => Ok(Flow::skip_if(state.v[x as usize] == kk)),
        Skne { x, kk } => Ok(Flow::skip_if(state.v[x as usize] != kk)),
        Skre { x, y } => Ok(Flow::skip_if(state.v[x as usize] == state.v[y as usize])),
        Load { x, kk } => {
            state.v[x as usize] = kk;
            Ok(Flow::Next)
        }
        Add { x, kk } => {
            state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
            Ok(Flow::Next)
        }
        Move { x, y } => alu(state, x, y, |_, vy| (vy, None)),
        Or { x, y } => alu(state, x, y, |vx, vy| (vx | vy, None)),
        And { x, y } => alu(state, x, y, |vx, vy| (vx & vy, None)),
        Xor { x, y } => alu(state, x, y, |vx, vy| (vx ^ vy, None)),
        Addr { x, y } => alu(state, x, y, |vx, vy| {
            let (res, over) = vx.overflowing_add(vy);
            (res, Some(over as u8))
        }),
        Sub { x, y } => alu(state, x, y, |vx, vy| {
            let (res, under) = vx.overflowing_sub(vy);
            (res, Some(!under as u8))
        }),
        Subn { x, y } => alu(state, x, y, |vx, vy| {
            let (res, under) = vy.overflowing_sub(vx);
            (res, Some(!under as u8))
        }),
        Shr { x, y } => alu(state, x, y, |vx, vy| {
            let src = if quirks.shift_uses_vy { vy } else { vx };
            (src >> 1, Some(src & 0x1))
        }),
        Shl { x, y } => alu(state, x, y, |vx, vy| {
            let src = if quirks.shift_uses_vy { vy } else { vx };
            (src << 1, Some(src >> 7))
        }),
        Skrne { x, y } => Ok(Flow::skip_if(state.v[x as usize] != state.v[y as usize])),
        Loadi { addr } => {
            state.i = addr & ADDRESS_MASK;
            Ok(Flow::Next)
        }
        Jumpi { addr } => Ok(jumpi(state, addr, quirks)),
        Rand { x, kk } => {
            let rand_byte: u8 = rng.gen();
            state.v[x as usize] = rand_byte & kk;
            Ok(Flow::Next)
        }
        Draw { x, y, n } => draw(state, x, y, n),
        Skpr { x } => Ok(Flow::skip_if(state.keypad.is_pressed(state.v[x as usize]))),
        Skup { x } => Ok(Flow::skip_if(!state.keypad.is_pressed(state.v[x as usize]))),
        Moved { x } => {
            state.v[x as usize] = state.timers.delay;
            Ok(Flow::Next)
        }
        Keyd { x } => Ok(keyd(state, x)),
        Loadd { x } => {
            state.timers.delay = state.v[x as usize];
            Ok(Flow::Next)
        }
        Loads { x } => {
            state.timers.sound = state.v[x as usize];
            Ok(Flow::Next)
        }
        Addi { x } => {
            state.i = offset(state.i, u16::from(state.v[x as usize]));
            Ok(Flow::Next)
        }
        Ldspr { x } => {
            let digit = u16::from(state.v[x as usize] & 0xF);
            state.i = SPRITE_SHEET_ADDRESS + digit * SPRITE_HEIGHT;
            Ok(Flow::Next)
        }
        Bcd { x } => bcd(state, x),
        Stor { x } => stor(state, x, quirks),
        Read { x } => read(state, x, quirks),
        Unknown(opcode) => Err(Chip8Error::UnknownOpcode(opcode, state.pc)),
    }
}

/// base + n, wrapped to the 12-bit address space
fn offset(base: u16, n: u16) -> u16 {
    base.wrapping_add(n) & ADDRESS_MASK
}

/// Vx = f(Vx, Vy); VF = flag if there is one.
/// The flag is written last so it wins when x is F.
fn alu<F>(state: &mut State, x: u8, y: u8, f: F) -> Result<Flow>
where
    F: FnOnce(u8, u8) -> (u8, Option<u8>),
{
    let (res, flag) = f(state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = res;
    if let Some(flag) = flag {
        state.v[FLAG_REGISTER] = flag;
    }
    Ok(Flow::Next)
}

/// clear
fn clr(state: &mut State) -> Result<Flow> {
    state.frame_buffer.clear();
    state.draw_flag = true;
    Ok(Flow::Next)
}

/// PC = STACK.pop()
/// The stack holds the address of the call itself, so execution resumes just after it.
fn rts(state: &mut State) -> Result<Flow> {
    let call_site = state.memory.pop(state.pc)?;
    Ok(Flow::Jump(offset(call_site, 2)))
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, addr: u16) -> Result<Flow> {
    state.memory.push(state.pc, state.pc)?;
    Ok(Flow::Jump(addr))
}

/// PC = V0 + addr
fn jumpi(state: &State, addr: u16, quirks: Quirks) -> Flow {
    let register = if quirks.jump_uses_vx {
        ((addr >> 8) & 0xF) as usize
    } else {
        0x0
    };
    Flow::Jump(offset(addr, u16::from(state.v[register])))
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels would be erased
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<Flow> {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);

    // Reset the carry flag (used for collision detection)
    state.v[FLAG_REGISTER] = 0x0;

    let mut sprite = [0; 15];
    let sprite = &mut sprite[..n as usize];
    for (row, byte) in sprite.iter_mut().enumerate() {
        *byte = state.memory.read(offset(state.i, row as u16))?;
    }

    if state.frame_buffer.draw_sprite(vx, vy, sprite) {
        state.v[FLAG_REGISTER] = 0x1;
    }
    state.draw_flag = true;
    Ok(Flow::Next)
}

/// await keypress for Vx
/// A key that is already down satisfies the wait immediately.
fn keyd(state: &mut State, x: u8) -> Flow {
    match state.keypad.first_pressed() {
        Some(key) => {
            state.v[x as usize] = key;
            Flow::Next
        }
        None => {
            debug!("waiting for a key press into v{:X}", x);
            state.register_needing_key = Some(x);
            Flow::Wait
        }
    }
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
fn bcd(state: &mut State, x: u8) -> Result<Flow> {
    let value = state.v[x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (n, digit) in digits.iter().enumerate() {
        state.memory.write(offset(state.i, n as u16), *digit)?;
    }
    Ok(Flow::Next)
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: u8, quirks: Quirks) -> Result<Flow> {
    for register in 0..=x {
        let address = offset(state.i, u16::from(register));
        state.memory.write(address, state.v[register as usize])?;
    }
    if quirks.load_store_increments_i {
        state.i = offset(state.i, u16::from(x) + 1);
    }
    Ok(Flow::Next)
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: u8, quirks: Quirks) -> Result<Flow> {
    for register in 0..=x {
        let address = offset(state.i, u16::from(register));
        state.v[register as usize] = state.memory.read(address)?;
    }
    if quirks.load_store_increments_i {
        state.i = offset(state.i, u16::from(x) + 1);
    }
    Ok(Flow::Next)
}
