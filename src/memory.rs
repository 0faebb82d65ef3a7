use std::fmt::Write;
use std::ops::RangeInclusive;

use tracing::debug;

use crate::error::{Error, Result};

pub type TypeAddr = u16; // in reality u12
type FontBytes = [u8; 5 * 16];

pub const MEMORY_SIZE: usize = 4096;
pub const ADDRESS_MASK: TypeAddr = 0x0FFF;
pub const FONT_START: usize = 0x050;
pub const PROGRAM_START: usize = 0x200;
pub const PROGRAM_CAPACITY: usize = MEMORY_SIZE - PROGRAM_START;

const DEFAULT_FONT: FontBytes = [
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

/// Masks any computed 16-bit address down to the 12 bits the machine decodes.
pub fn effective(addr: TypeAddr) -> usize {
    (addr & ADDRESS_MASK) as usize
}

/// The 4K address space.
///
/// 0x000 -> 0x04F and 0x0A0 -> 0x1FF are reserved and stay zeroed, the font
/// lives at 0x050 -> 0x09F and programs are loaded from 0x200 upward. Nothing
/// is write-protected.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Zeroed memory with the font installed.
    pub fn new() -> Self {
        let mut mem = Self {
            bytes: [0; MEMORY_SIZE],
        };
        mem.load_font();
        mem
    }

    pub fn read_byte(&self, addr: TypeAddr) -> u8 {
        self.bytes[effective(addr)]
    }

    pub fn write_byte(&mut self, addr: TypeAddr, val: u8) {
        self.bytes[effective(addr)] = val;
    }

    /// Big-endian instruction word at `addr`; the second byte wraps at 0xFFF.
    pub fn read_word(&self, addr: TypeAddr) -> u16 {
        let (l, r) = (self.read_byte(addr), self.read_byte(addr.wrapping_add(1)));
        ((l as u16) << 8) | r as u16
    }

    pub fn load_font(&mut self) {
        self.bytes[FONT_START..FONT_START + DEFAULT_FONT.len()].copy_from_slice(&DEFAULT_FONT);
    }

    /// Copies a flat program image to 0x200. Whatever a previous program left
    /// in the program area is zeroed first.
    pub fn load_program(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > PROGRAM_CAPACITY {
            return Err(Error::ProgramTooLarge {
                len: bytes.len(),
                capacity: PROGRAM_CAPACITY,
            });
        }
        self.bytes[PROGRAM_START..].fill(0);
        self.bytes[PROGRAM_START..PROGRAM_START + bytes.len()].copy_from_slice(bytes);
        debug!(len = bytes.len(), "program loaded at {PROGRAM_START:#05x}");
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex listing of `range`, `columns` bytes per row:
    ///
    /// ```text
    /// 0x0050: F0 90 90 90 F0 20 60 20 20 70 F0 10 F0 80 F0 F0
    /// ```
    pub fn dump(&self, range: RangeInclusive<TypeAddr>, columns: usize) -> String {
        let (start, end) = (effective(*range.start()), effective(*range.end()));
        let mut out = String::new();
        if start > end {
            return out;
        }
        for (i, row) in self.bytes[start..=end].chunks(columns.max(1)).enumerate() {
            let _ = write!(out, "0x{:04X}:", start + i * columns.max(1));
            for byte in row {
                let _ = write!(out, " {byte:02X}");
            }
            out.push('\n');
        }
        out
    }

    /// Reserved area, font and program area, labelled.
    pub fn dump_regions(&self) -> String {
        let mut out = String::new();
        for (label, range) in [
            ("Interpreter/Reserved", 0x000..=0x1FF),
            ("Font Data", 0x050..=0x09F),
            ("Program Area", 0x200..=0xFFF),
        ] {
            let _ = writeln!(out, "[0x{:03X}-0x{:03X}] {label}:", range.start(), range.end());
            out.push_str(&self.dump(range, 16));
        }
        out
    }
}
