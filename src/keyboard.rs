#[cfg(feature = "window")]
use minifb::Key;

pub const KEY_COUNT: usize = 16;

/// Input collaborator queried by EX9E / EXA1.
pub trait Keypad {
    fn is_pressed(&self, key: u8) -> bool;
}

/// Pressed state of the 16-key hex pad.
#[derive(Debug, Default, Clone)]
pub struct Keyboard {
    keys: [bool; KEY_COUNT],
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_COUNT],
        }
    }

    pub fn reset(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    pub fn press(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = true;
    }

    pub fn release(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = false;
    }

    /// Replaces the whole pad state with the host keys currently held.
    #[cfg(feature = "window")]
    pub fn update_keys(&mut self, held: &[Key]) {
        self.reset();
        for key in held.iter().filter_map(key_to_num) {
            self.press(key);
        }
    }
}

impl Keypad for Keyboard {
    fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }
}

// 1 2 3 C      1 2 3 4
// 4 5 6 D  <-  Q W E R
// 7 8 9 E      A S D F
// A 0 B F      Z X C V
#[cfg(feature = "window")]
pub fn key_to_num(key: &Key) -> Option<u8> {
    match key {
        Key::Key1 => Some(0x1),
        Key::Key2 => Some(0x2),
        Key::Key3 => Some(0x3),
        Key::Key4 => Some(0xC),
        Key::Q => Some(0x4),
        Key::W => Some(0x5),
        Key::E => Some(0x6),
        Key::R => Some(0xD),
        Key::A => Some(0x7),
        Key::S => Some(0x8),
        Key::D => Some(0x9),
        Key::F => Some(0xE),
        Key::Z => Some(0xA),
        Key::X => Some(0x0),
        Key::C => Some(0xB),
        Key::V => Some(0xF),
        _ => None,
    }
}
