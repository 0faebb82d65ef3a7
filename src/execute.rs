use rand::{Rng, RngCore};
use tracing::{trace, warn};

use crate::decode::Instruction;
use crate::display::FrameBuffer;
use crate::error::Result;
use crate::keyboard::Keypad;
use crate::memory::Memory;
use crate::registers::{Registers, FLAG};

/// What the host needs to know after one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Continue,
    /// The framebuffer changed and should be presented again.
    Redraw,
    /// The word is not part of the instruction set; nothing changed.
    Ignored(u16),
}

impl Effect {
    pub fn needs_redraw(&self) -> bool {
        matches!(self, Effect::Redraw)
    }
}

/// Applies one decoded instruction. `pc` must already point past it.
///
/// Without a keypad attached EX9E and EXA1 do nothing at all.
pub fn execute(
    ins: Instruction,
    mem: &mut Memory,
    regs: &mut Registers,
    fb: &mut FrameBuffer,
    rng: &mut dyn RngCore,
    keypad: Option<&dyn Keypad>,
) -> Result<Effect> {
    trace!(pc = regs.pc.0, ?ins, "execute");
    match ins {
        Instruction::ClearScreen => {
            fb.clear_buffer();
            return Ok(Effect::Redraw);
        }
        Instruction::PopSubroutine => {
            let addr = regs.pop_return()?;
            regs.pc.set_addr(addr);
        }
        Instruction::Jump(addr) => regs.pc.set_addr(addr),
        Instruction::PushSubroutine(addr) => {
            // pc already holds the instruction after the call
            regs.push_return(regs.pc.0)?;
            regs.pc.set_addr(addr);
        }
        Instruction::SkipEqualConstant(vx, nn) => {
            if regs.get(vx) == nn {
                regs.pc.increment();
            }
        }
        Instruction::SkipNotEqualConstant(vx, nn) => {
            if regs.get(vx) != nn {
                regs.pc.increment();
            }
        }
        Instruction::SetRegister(vx, nn) => regs.set_register(vx, nn),
        Instruction::AddToRegister(vx, nn) => regs.add_to_register(vx, nn),
        Instruction::CopyRegister(vx, vy) => regs.set_register(vx, regs.get(vy)),
        Instruction::Or(vx, vy) => regs.set_register(vx, regs.get(vx) | regs.get(vy)),
        Instruction::And(vx, vy) => regs.set_register(vx, regs.get(vx) & regs.get(vy)),
        Instruction::XOr(vx, vy) => regs.set_register(vx, regs.get(vx) ^ regs.get(vy)),
        // The flag is written last in every ALU op, so VF as a target holds the flag.
        Instruction::Add(vx, vy) => {
            let (z, carry) = regs.get(vx).overflowing_add(regs.get(vy));
            regs.set_register(vx, z);
            regs.set_flag(carry);
        }
        Instruction::SubtractForward(vx, vy) => {
            let (x, y) = (regs.get(vx), regs.get(vy));
            regs.set_register(vx, x.wrapping_sub(y));
            regs.set_flag(x >= y); // no borrow
        }
        Instruction::SubtractBackward(vx, vy) => {
            let (x, y) = (regs.get(vx), regs.get(vy));
            regs.set_register(vx, y.wrapping_sub(x));
            regs.set_flag(y >= x);
        }
        // Shifts take their input from VY, as on the COSMAC VIP.
        Instruction::RightShift(vx, vy) => {
            let vy_value = regs.get(vy);
            let vf = vy_value & 1;
            regs.set_register(vx, vy_value >> 1);
            regs.set_register(FLAG, vf);
        }
        Instruction::LeftShift(vx, vy) => {
            let vy_value = regs.get(vy);
            let vf = (vy_value >> 7) & 1;
            regs.set_register(vx, vy_value << 1);
            regs.set_register(FLAG, vf);
        }
        Instruction::SetIndexRegister(addr) => regs.index.set_addr(addr),
        Instruction::JumpWithOffset(addr) => {
            regs.pc.set_addr(addr.wrapping_add(regs.get(0) as u16));
        }
        Instruction::Random(vx, nn) => {
            let ransuu: u8 = rng.gen();
            regs.set_register(vx, ransuu & nn);
        }
        Instruction::Display(reg_x, reg_y, height) => {
            let (x, y) = (regs.get(reg_x), regs.get(reg_y));
            let mut sprite = [0u8; 15];
            let sprite = &mut sprite[..height as usize];
            for (row, byte) in sprite.iter_mut().enumerate() {
                *byte = mem.read_byte(regs.index.0.wrapping_add(row as u16));
            }
            let collided = fb.paint(x, y, sprite);
            regs.set_flag(collided);
            return Ok(Effect::Redraw);
        }
        Instruction::SkipIfPressed(vx) => {
            if let Some(keypad) = keypad {
                if keypad.is_pressed(regs.get(vx)) {
                    regs.pc.increment();
                }
            }
        }
        Instruction::SkipIfNotPressed(vx) => {
            if let Some(keypad) = keypad {
                if !keypad.is_pressed(regs.get(vx)) {
                    regs.pc.increment();
                }
            }
        }
        Instruction::CopyDelayToRegister(vx) => regs.set_register(vx, regs.delay_timer.count),
        Instruction::CopyRegisterToDelay(vx) => regs.delay_timer.set(regs.get(vx)),
        Instruction::CopyRegisterToSound(vx) => regs.sound_timer.set(regs.get(vx)),
        Instruction::AddToIndex(vx) => {
            regs.index
                .set_addr(regs.index.0.wrapping_add(regs.get(vx) as u16));
        }
        Instruction::ToDecimal(vx) => {
            let value = regs.get(vx);
            let digits = [value / 100, value / 10 % 10, value % 10];
            for (i, digit) in digits.into_iter().enumerate() {
                mem.write_byte(regs.index.0.wrapping_add(i as u16), digit);
            }
        }
        Instruction::StoreRegisterToMemory(vx) => {
            for reg in 0..=vx {
                mem.write_byte(regs.index.0.wrapping_add(reg as u16), regs.get(reg));
            }
        }
        Instruction::LoadRegisterFromMemory(vx) => {
            for reg in 0..=vx {
                let reg_val = mem.read_byte(regs.index.0.wrapping_add(reg as u16));
                regs.set_register(reg, reg_val);
            }
        }
        Instruction::Unknown(code) => {
            warn!("ignoring unknown instruction {code:04x}");
            return Ok(Effect::Ignored(code));
        }
    }
    Ok(Effect::Continue)
}
