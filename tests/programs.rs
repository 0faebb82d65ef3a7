use chip8vm::{Effect, Emulator, Error};

fn boot(program: &[u8]) -> Emulator {
    let mut emu = Emulator::with_seed(0x5EED);
    emu.load_program(program).unwrap();
    emu
}

fn words(code: &[u16]) -> Vec<u8> {
    code.iter().flat_map(|w| w.to_be_bytes()).collect()
}

#[test]
fn call_returns_to_next_instruction() {
    // 200: call 206 ; 202: V1 = 1 ; 204: jump 204 ; 206: V0 = 7 ; 208: ret
    let mut emu = boot(&words(&[0x2206, 0x6101, 0x1204, 0x6007, 0x00EE]));
    emu.run(3, None).unwrap();
    assert_eq!(emu.regs.pc.0, 0x202);
    assert_eq!(emu.regs.get(0), 7);
    emu.run(2, None).unwrap();
    assert_eq!(emu.regs.get(1), 1);
    assert_eq!(emu.regs.pc.0, 0x204);
}

#[test]
fn seventeenth_nested_call_overflows() {
    // 200: call 200, forever
    let mut emu = boot(&words(&[0x2200]));
    for _ in 0..16 {
        emu.step(None).unwrap();
    }
    assert_eq!(emu.regs.stack.sp(), 16);
    assert_eq!(emu.step(None), Err(Error::StackOverflow { pc: 0x202 }));
}

#[test]
fn bare_return_underflows() {
    let mut emu = boot(&words(&[0x00EE]));
    assert_eq!(emu.step(None), Err(Error::StackUnderflow { pc: 0x202 }));
}

#[test]
fn countdown_loop() {
    // V0 = 0 ; V0 += 1 ; skip if V0 == 5 ; jump 202 ; jump 208
    let mut emu = boot(&words(&[0x6000, 0x7001, 0x3005, 0x1202, 0x1208]));
    emu.run(1 + 4 * 3 + 2, None).unwrap();
    assert_eq!(emu.regs.get(0), 5);
    assert_eq!(emu.regs.pc.0, 0x208);
}

#[test]
fn draws_font_glyph() {
    // I = glyph "1" ; V0 = 0 ; draw 5 rows at (V0, V0)
    let mut emu = boot(&words(&[0xA055, 0x6000, 0xD005]));
    let redraw = emu.run(3, None).unwrap();
    assert!(redraw);
    // 0x20 0x60 0x20 0x20 0x70
    assert!(emu.fb.is_on(2, 0));
    assert!(emu.fb.is_on(1, 1) && emu.fb.is_on(2, 1));
    assert!(emu.fb.is_on(1, 4) && emu.fb.is_on(2, 4) && emu.fb.is_on(3, 4));
    assert!(!emu.fb.is_on(0, 0));
    assert_eq!(emu.regs.flag(), 0);
}

#[test]
fn unknown_instructions_are_skipped() {
    // 5xy0 and Fx29 are outside the instruction set
    let mut emu = boot(&words(&[0x5120, 0xF029, 0x6142]));
    assert_eq!(emu.step(None), Ok(Effect::Ignored(0x5120)));
    assert_eq!(emu.step(None), Ok(Effect::Ignored(0xF029)));
    assert_eq!(emu.step(None), Ok(Effect::Continue));
    assert_eq!(emu.regs.get(1), 0x42);
    assert_eq!(emu.regs.index.0, 0);
}

#[test]
fn delay_timer_counts_down_per_tick() {
    // V0 = 3 ; delay = V0 ; V1 = delay
    let mut emu = boot(&words(&[0x6003, 0xF015, 0xF107]));
    emu.run(2, None).unwrap();
    emu.tick_timers();
    emu.step(None).unwrap();
    assert_eq!(emu.regs.get(1), 2);
    for _ in 0..10 {
        emu.tick_timers();
    }
    assert_eq!(emu.regs.delay_timer.count, 0);
}

#[test]
fn pc_wraps_at_end_of_memory() {
    let mut emu = boot(&words(&[0x1FFE]));
    emu.mem.write_byte(0xFFE, 0x60);
    emu.mem.write_byte(0xFFF, 0x99);
    emu.run(2, None).unwrap();
    assert_eq!(emu.regs.get(0), 0x99);
    assert_eq!(emu.regs.pc.0, 0x000);
}

#[test]
fn sessions_are_independent() {
    let mut a = boot(&words(&[0x60AA]));
    let b = boot(&words(&[0x60AA]));
    a.step(None).unwrap();
    assert_eq!(a.regs.get(0), 0xAA);
    assert_eq!(b.regs.get(0), 0);
}
