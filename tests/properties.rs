use chip8vm::{Emulator, FrameBuffer, Registers};
use proptest::collection::vec;
use proptest::prelude::*;

fn run_words(emu: &mut Emulator, code: &[u16]) {
    let bytes: Vec<u8> = code.iter().flat_map(|w| w.to_be_bytes()).collect();
    emu.reset();
    emu.load_program(&bytes).unwrap();
    emu.run(code.len() as u32, None).unwrap();
}

proptest! {
    #[test]
    fn add_wraps_with_carry(a in any::<u8>(), b in any::<u8>()) {
        let mut emu = Emulator::with_seed(1);
        run_words(&mut emu, &[0x6000 | a as u16, 0x6100 | b as u16, 0x8014]);
        prop_assert_eq!(emu.regs.get(0), a.wrapping_add(b));
        prop_assert_eq!(emu.regs.flag(), (a as u16 + b as u16 > 255) as u8);
    }

    #[test]
    fn sub_wraps_with_no_borrow(a in any::<u8>(), b in any::<u8>()) {
        let mut emu = Emulator::with_seed(1);
        run_words(&mut emu, &[0x6000 | a as u16, 0x6100 | b as u16, 0x8015]);
        prop_assert_eq!(emu.regs.get(0), a.wrapping_sub(b));
        prop_assert_eq!(emu.regs.flag(), (a >= b) as u8);
    }

    #[test]
    fn drawing_twice_restores_screen(
        background in vec(any::<u8>(), 1..=15),
        sprite in vec(any::<u8>(), 1..=15),
        x in any::<u8>(),
        y in any::<u8>(),
    ) {
        let mut fb = FrameBuffer::new();
        fb.paint(3, 7, &background);
        let before = fb.clone();
        fb.paint(x, y, &sprite);
        fb.paint(x, y, &sprite);
        prop_assert_eq!(fb, before);
    }

    #[test]
    fn clear_screen_leaves_nothing_lit(
        sprites in vec((any::<u8>(), any::<u8>(), vec(any::<u8>(), 1..=15)), 0..8),
    ) {
        let mut emu = Emulator::with_seed(1);
        for (x, y, sprite) in &sprites {
            emu.fb.paint(*x, *y, sprite);
        }
        emu.load_program(&[0x00, 0xE0]).unwrap();
        emu.step(None).unwrap();
        prop_assert!(emu.fb.pixels().iter().all(|&p| !p));
    }

    #[test]
    fn store_then_load_round_trips(
        values in prop::array::uniform16(any::<u8>()),
        x in 0u8..16,
        index in 0x300u16..0xF00,
    ) {
        let mut emu = Emulator::with_seed(1);
        emu.load_program(&[0xF0 | x, 0x55, 0xF0 | x, 0x65]).unwrap();
        for (reg, value) in values.iter().enumerate() {
            emu.regs.set_register(reg as u8, *value);
        }
        emu.regs.index.set_addr(index);
        emu.step(None).unwrap();
        let stored = emu.regs.clone();
        for reg in 0..16 {
            emu.regs.set_register(reg, 0);
        }
        emu.step(None).unwrap();
        for reg in 0..=x {
            prop_assert_eq!(emu.regs.get(reg), stored.get(reg));
        }
        for reg in (x + 1)..16 {
            prop_assert_eq!(emu.regs.get(reg), 0);
        }
    }

    #[test]
    fn timers_never_underflow(start in any::<u8>(), ticks in 0usize..300) {
        let mut regs = Registers::new();
        regs.delay_timer.set(start);
        for _ in 0..ticks {
            regs.tick_timers();
        }
        prop_assert_eq!(regs.delay_timer.count as usize, (start as usize).saturating_sub(ticks));
    }
}
