use crate::error::{Error, Result};
use crate::memory::{TypeAddr, ADDRESS_MASK, PROGRAM_START};
use crate::timer::Timer;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_SIZE: usize = 16;
/// VF doubles as the carry / borrow / collision flag.
pub const FLAG: u8 = 0xF;

/// V0..VF, I, PC, the call stack and both timers.
#[derive(Debug, Clone)]
pub struct Registers {
    registers: [u8; REGISTER_COUNT],
    pub index: IndexRegister,
    pub pc: ProgramCounter,
    pub stack: Stack,
    pub delay_timer: Timer,
    pub sound_timer: Timer,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            index: IndexRegister(0),
            pc: ProgramCounter(PROGRAM_START as TypeAddr),
            stack: Stack::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
        }
    }

    pub fn get(&self, reg_num: u8) -> u8 {
        self.registers[(reg_num & 0xF) as usize]
    }

    pub fn set_register(&mut self, reg_num: u8, value: u8) {
        self.registers[(reg_num & 0xF) as usize] = value;
    }

    pub fn add_to_register(&mut self, reg_num: u8, value: u8) {
        let total = self.get(reg_num).wrapping_add(value);
        self.set_register(reg_num, total);
    }

    pub fn set_flag(&mut self, set: bool) {
        self.set_register(FLAG, set as u8);
    }

    pub fn flag(&self) -> u8 {
        self.get(FLAG)
    }

    pub fn all(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    /// Saves `addr` as a return address. The 17th nested call fails.
    pub fn push_return(&mut self, addr: TypeAddr) -> Result<()> {
        if self.stack.is_full() {
            return Err(Error::StackOverflow { pc: self.pc.0 });
        }
        self.stack.push(addr);
        Ok(())
    }

    pub fn pop_return(&mut self) -> Result<TypeAddr> {
        self.stack
            .pop()
            .ok_or(Error::StackUnderflow { pc: self.pc.0 })
    }

    pub fn tick_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
    }
}

// Special registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramCounter(pub TypeAddr);

impl ProgramCounter {
    /// Steps over one instruction word, wrapping inside the address space.
    pub fn increment(&mut self) {
        self.set_addr(self.0.wrapping_add(2));
    }

    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr & ADDRESS_MASK;
    }
}

/// Holds the full 16-bit value; only the low 12 bits address memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRegister(pub TypeAddr);

impl IndexRegister {
    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }
}

/// Fixed 16-deep return stack; `sp` is the number of live entries.
#[derive(Debug, Clone)]
pub struct Stack {
    addresses: [TypeAddr; STACK_SIZE],
    sp: u8,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            addresses: [0; STACK_SIZE],
            sp: 0,
        }
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn is_full(&self) -> bool {
        self.sp as usize == STACK_SIZE
    }

    fn push(&mut self, addr: TypeAddr) {
        self.addresses[self.sp as usize] = addr;
        self.sp += 1;
    }

    fn pop(&mut self) -> Option<TypeAddr> {
        if self.sp == 0 {
            return None;
        }
        self.sp -= 1;
        Some(self.addresses[self.sp as usize])
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
