use crate::memory::TypeAddr;

/// Operand fields of a raw instruction word.
///
/// ```text
///  15   12 11    8 7     4 3     0
/// | opcode |  x   |  y   |  n   |
///          |      |     nn      |
///          |        nnn         |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInstruction {
    pub code: u16,
    pub opcode: u8,
    pub x: u8,
    pub y: u8,
    pub n: u8,
    pub nn: u8,
    pub nnn: TypeAddr,
}

impl RawInstruction {
    pub fn new(code: u16) -> Self {
        RawInstruction {
            code,
            opcode: ((code & 0xF000) >> 12) as u8,
            x: ((code & 0x0F00) >> 8) as u8,
            y: ((code & 0x00F0) >> 4) as u8,
            n: (code & 0x000F) as u8,
            nn: (code & 0x00FF) as u8,
            nnn: code & 0x0FFF,
        }
    }
}

impl PartialEq<u16> for RawInstruction {
    fn eq(&self, ins: &u16) -> bool {
        ins.eq(&self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    // 00E0
    // turn all pixels off
    ClearScreen,
    // 00EE
    PopSubroutine,
    // 1NNN
    // set PC to address NNN, "jump" to memory location
    Jump(TypeAddr),
    // 2NNN
    PushSubroutine(TypeAddr),

    // 3XNN
    SkipEqualConstant(u8, u8),
    // 4XNN
    SkipNotEqualConstant(u8, u8),

    // 6XNN
    // set register VX to value NN
    SetRegister(u8, u8),
    // 7XNN
    // add value NN to VX, VF untouched
    AddToRegister(u8, u8),

    // 8XY0
    CopyRegister(u8, u8),
    // 8XY1
    Or(u8, u8),
    // 8XY2
    And(u8, u8),
    // 8XY3
    XOr(u8, u8),
    /// 8XY4
    Add(u8, u8),
    // 8XY5
    SubtractForward(u8, u8),
    // 8XY6
    RightShift(u8, u8),
    // 8XY7
    SubtractBackward(u8, u8),
    // 8XYE
    LeftShift(u8, u8),

    // ANNN
    // set index register I to address NNN
    SetIndexRegister(TypeAddr),
    // BNNN
    JumpWithOffset(TypeAddr),
    // CXNN
    Random(u8, u8),
    // DXYN
    // draw an N pixel tall sprite from I at (VX, VY)
    Display(u8, u8, u8),

    // EX9E
    SkipIfPressed(u8),
    // EXA1
    SkipIfNotPressed(u8),

    // FX07
    CopyDelayToRegister(u8),
    // FX15
    CopyRegisterToDelay(u8),
    // FX18
    CopyRegisterToSound(u8),
    // FX1E
    AddToIndex(u8),
    // FX33
    ToDecimal(u8),
    // FX55
    StoreRegisterToMemory(u8),
    // FX65
    LoadRegisterFromMemory(u8),

    /// Any word outside the instruction set. Executes as a no-op.
    Unknown(u16),
}

impl Instruction {
    pub fn decode_raw(ins: u16) -> Self {
        let raw = RawInstruction::new(ins);
        let (x, y) = (raw.x, raw.y);

        match raw.opcode {
            0x0 => match raw.nnn {
                0x0E0 => Self::ClearScreen,
                0x0EE => Self::PopSubroutine,
                _ => Self::Unknown(ins),
            },
            0x1 => Self::Jump(raw.nnn),
            0x2 => Self::PushSubroutine(raw.nnn),
            0x3 => Self::SkipEqualConstant(x, raw.nn),
            0x4 => Self::SkipNotEqualConstant(x, raw.nn),
            0x6 => Self::SetRegister(x, raw.nn),
            0x7 => Self::AddToRegister(x, raw.nn),
            0x8 => match raw.n {
                0x0 => Self::CopyRegister(x, y),
                0x1 => Self::Or(x, y),
                0x2 => Self::And(x, y),
                0x3 => Self::XOr(x, y),
                0x4 => Self::Add(x, y),
                0x5 => Self::SubtractForward(x, y),
                0x6 => Self::RightShift(x, y),
                0x7 => Self::SubtractBackward(x, y),
                0xE => Self::LeftShift(x, y),
                _ => Self::Unknown(ins),
            },
            0xA => Self::SetIndexRegister(raw.nnn),
            0xB => Self::JumpWithOffset(raw.nnn),
            0xC => Self::Random(x, raw.nn),
            0xD => Self::Display(x, y, raw.n),
            0xE => match raw.nn {
                0x9E => Self::SkipIfPressed(x),
                0xA1 => Self::SkipIfNotPressed(x),
                _ => Self::Unknown(ins),
            },
            0xF => match raw.nn {
                0x07 => Self::CopyDelayToRegister(x),
                0x15 => Self::CopyRegisterToDelay(x),
                0x18 => Self::CopyRegisterToSound(x),
                0x1E => Self::AddToIndex(x),
                0x33 => Self::ToDecimal(x),
                0x55 => Self::StoreRegisterToMemory(x),
                0x65 => Self::LoadRegisterFromMemory(x),
                _ => Self::Unknown(ins),
            },
            _ => Self::Unknown(ins),
        }
    }
}
