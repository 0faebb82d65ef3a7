use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use crate::display::{FrameBuffer, HEIGHT, WIDTH};
use crate::keyboard::Keyboard;

const PIXEL_ON: u32 = from_u8_rgb(0, 127, 255);
const PIXEL_OFF: u32 = from_u8_rgb(0, 0, 0);

const fn from_u8_rgb(r: u8, g: u8, b: u8) -> u32 {
    let (r, g, b) = (r as u32, g as u32, b as u32);
    (r << 16) | (g << 8) | b
}

fn scale_from(factor: u8) -> Scale {
    match factor {
        0 | 1 => Scale::X1,
        2 => Scale::X2,
        3 | 4 => Scale::X4,
        5..=8 => Scale::X8,
        9..=16 => Scale::X16,
        _ => Scale::X32,
    }
}

/// Host window that presents the framebuffer as scaled blocks.
pub struct Screen {
    pixel_buffer: Vec<u32>,
    pub window: Window,
}

impl Screen {
    pub fn new(title: &str, scale: u8) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            title,
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale: scale_from(scale),
                ..WindowOptions::default()
            },
        )?;
        window.set_position(500, 300);
        Ok(Self {
            pixel_buffer: vec![PIXEL_OFF; WIDTH * HEIGHT],
            window,
        })
    }

    pub fn is_running(&self) -> bool {
        self.window.is_open() && !self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    pub fn poll_keys(&self, keyboard: &mut Keyboard) {
        keyboard.update_keys(&self.window.get_keys());
    }

    /// Pushes `fb` to the window. Also pumps window events.
    pub fn sync(&mut self, fb: &FrameBuffer) -> Result<(), minifb::Error> {
        for (pixel, &on) in self.pixel_buffer.iter_mut().zip(fb.pixels()) {
            *pixel = if on { PIXEL_ON } else { PIXEL_OFF };
        }
        self.window
            .update_with_buffer(&self.pixel_buffer, WIDTH, HEIGHT)
    }

    /// Pumps window events without repainting.
    pub fn update(&mut self) {
        self.window.update();
    }
}
