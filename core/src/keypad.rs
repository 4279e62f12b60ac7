use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad:
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
/// The machine only ever reads this; key states are written by the host between instructions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn press(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = true;
    }

    pub fn release(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = false;
    }

    /// Replaces every key state at once
    pub fn set_all(&mut self, keys: [bool; KEY_COUNT]) {
        self.keys = keys;
    }

    /// Keys outside 0..F alias onto their low nibble
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// Lowest numbered key that is currently down
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }

    pub fn as_array(&self) -> [bool; KEY_COUNT] {
        self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::default();
        keypad.press(0xE);
        assert!(keypad.is_pressed(0xE));
        keypad.release(0xE);
        assert!(!keypad.is_pressed(0xE));
    }

    #[test]
    fn test_keys_are_masked() {
        let mut keypad = Keypad::default();
        keypad.press(0x1A);
        assert!(keypad.is_pressed(0xA));
        assert!(keypad.is_pressed(0xFA));
    }

    #[test]
    fn test_first_pressed_is_lowest() {
        let mut keypad = Keypad::default();
        assert_eq!(keypad.first_pressed(), None);
        let mut keys = [false; KEY_COUNT];
        keys[0x9] = true;
        keys[0x3] = true;
        keypad.set_all(keys);
        assert_eq!(keypad.first_pressed(), Some(0x3));
        assert_eq!(keypad.as_array(), keys);
    }
}
