// Window for the demo.
// Visual: a window showing the element; press Space (or click) and it turns to dust.

use crate::error::Error;
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseButton, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
    mouse_was_down: bool,
}

impl Drawer {
    /// Create a window big enough for the element plus room for the dust to fly.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        // ~60 fps; the dissolve is tuned per frame, not per second.
        window.set_target_fps(60);
        Ok(Self { window, mouse_was_down: false })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Space or a fresh left click: the "delete" action that kicks off the effect.
    pub fn trigger_pressed_once(&mut self) -> bool {
        let mouse_down = self.window.get_mouse_down(MouseButton::Left);
        let clicked = mouse_down && !self.mouse_was_down;
        self.mouse_was_down = mouse_down;
        clicked || self.window.is_key_pressed(Key::Space, KeyRepeat::No)
    }
}
