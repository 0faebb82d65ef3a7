use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::{
    decode::Instruction,
    display::FrameBuffer,
    error::Result,
    execute::{execute, Effect},
    keyboard::Keypad,
    memory::Memory,
    registers::Registers,
};

/// One emulated session: memory, registers and screen plus the random source
/// used by CXNN. Sessions share nothing, so several can run side by side.
pub struct Emulator {
    pub mem: Memory,
    pub regs: Registers,
    pub fb: FrameBuffer,
    rng: Box<dyn RngCore + Send>,
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {
    pub fn new() -> Self {
        Self::with_rng(Box::new(StdRng::from_entropy()))
    }

    /// A session whose random numbers repeat for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn with_rng(rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            mem: Memory::new(),
            regs: Registers::new(),
            fb: FrameBuffer::new(),
            rng,
        }
    }

    pub fn load_program(&mut self, bytes: &[u8]) -> Result<()> {
        self.mem.load_program(bytes)
    }

    /// Back to power-on state. The loaded program is kept.
    pub fn reset(&mut self) {
        debug!("resetting registers and framebuffer");
        self.regs = Registers::new();
        self.fb.clear_buffer();
        self.mem.load_font();
    }

    pub fn fetch(&mut self) -> u16 {
        let ins = self.mem.read_word(self.regs.pc.0);
        self.regs.pc.increment();
        ins
    }

    pub fn fetch_decode(&mut self) -> Instruction {
        Instruction::decode_raw(self.fetch())
    }

    pub fn execute_ins(&mut self, ins: Instruction, keypad: Option<&dyn Keypad>) -> Result<Effect> {
        execute(
            ins,
            &mut self.mem,
            &mut self.regs,
            &mut self.fb,
            self.rng.as_mut(),
            keypad,
        )
    }

    /// Fetch, decode and execute one instruction.
    pub fn step(&mut self, keypad: Option<&dyn Keypad>) -> Result<Effect> {
        let operation = self.fetch_decode();
        self.execute_ins(operation, keypad)
    }

    /// Runs `count` instructions and reports whether any of them touched the
    /// screen. Stops at the first fatal error.
    pub fn run(&mut self, count: u32, keypad: Option<&dyn Keypad>) -> Result<bool> {
        let mut redraw = false;
        for _ in 0..count {
            redraw |= self.step(keypad)?.needs_redraw();
        }
        Ok(redraw)
    }

    /// One 60 Hz timer decrement.
    pub fn tick_timers(&mut self) {
        self.regs.tick_timers();
    }

    pub fn sound_active(&self) -> bool {
        self.regs.sound_timer.is_active()
    }
}
