//! PS/2 Keyboard Driver
//!
//! Polled keyboard input. Raw scancodes come from a [`ScancodeSource`]
//! (the 8042 controller on hardware, a script in the simulator) and are
//! decoded with `pc_keyboard` into the few keys the shell understands.

use pc_keyboard::{layouts, DecodedKey, HandleControl, KeyCode, Keyboard, ScancodeSet1};

/// PS/2 data port
pub const PS2_DATA_PORT: u16 = 0x60;
/// PS/2 status/command port
pub const PS2_STATUS_PORT: u16 = 0x64;
/// Status bit set while the output buffer holds a byte.
pub const STATUS_OUTPUT_FULL: u8 = 0x01;

/// A key the line editor acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Up,
    Down,
}

/// Something that can be asked for the next scancode without blocking.
pub trait ScancodeSource {
    /// Next pending scancode, if the controller has one.
    fn poll(&mut self) -> Option<u8>;
}

/// Port-level access to the keyboard controller.
pub trait Ps2Port {
    fn read_status(&mut self) -> u8;
    fn read_data(&mut self) -> u8;
}

/// Polls a PS/2 controller: a byte is read only when the status register
/// says one is waiting.
pub struct Ps2Controller<P: Ps2Port> {
    port: P,
}

impl<P: Ps2Port> Ps2Controller<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }
}

impl<P: Ps2Port> ScancodeSource for Ps2Controller<P> {
    fn poll(&mut self) -> Option<u8> {
        if self.port.read_status() & STATUS_OUTPUT_FULL == 0 {
            return None;
        }
        Some(self.port.read_data())
    }
}

/// Scan code set 1 decoder with a US 104-key layout.
pub struct KeyboardDecoder {
    keyboard: Keyboard<layouts::Us104Key, ScancodeSet1>,
}

impl KeyboardDecoder {
    pub fn new() -> Self {
        Self {
            keyboard: Keyboard::new(
                ScancodeSet1::new(),
                layouts::Us104Key,
                HandleControl::Ignore,
            ),
        }
    }

    /// Feed one scancode. Returns a key once a full press has been seen.
    pub fn feed(&mut self, scancode: u8) -> Option<Key> {
        let event = match self.keyboard.add_byte(scancode) {
            Ok(Some(event)) => event,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("keyboard: bad scancode {:#04x}: {:?}", scancode, e);
                return None;
            }
        };
        match self.keyboard.process_keyevent(event)? {
            DecodedKey::Unicode('\n') => Some(Key::Enter),
            DecodedKey::Unicode('\u{8}') => Some(Key::Backspace),
            DecodedKey::Unicode(c) if !c.is_control() => Some(Key::Char(c)),
            DecodedKey::RawKey(KeyCode::ArrowUp) => Some(Key::Up),
            DecodedKey::RawKey(KeyCode::ArrowDown) => Some(Key::Down),
            other => {
                log::trace!("keyboard: ignoring {:?}", other);
                None
            }
        }
    }

    /// Drain one scancode from `source`, if any, and decode it.
    pub fn poll(&mut self, source: &mut dyn ScancodeSource) -> Option<Key> {
        source.poll().and_then(|code| self.feed(code))
    }
}

impl Default for KeyboardDecoder {
    fn default() -> Self {
        Self::new()
    }
}
