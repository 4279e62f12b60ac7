use sdl2::keyboard::{KeyboardState, Scancode};

use emu8_core::constants::KEY_COUNT;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// Scancodes are used rather than keycodes so the layout stays put on non-QWERTY keyboards.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
const KEYMAP: [Scancode; KEY_COUNT] = [
    Scancode::X,    // 0
    Scancode::Num1, // 1
    Scancode::Num2, // 2
    Scancode::Num3, // 3
    Scancode::Q,    // 4
    Scancode::W,    // 5
    Scancode::E,    // 6
    Scancode::A,    // 7
    Scancode::S,    // 8
    Scancode::D,    // 9
    Scancode::Z,    // A
    Scancode::C,    // B
    Scancode::Num4, // C
    Scancode::R,    // D
    Scancode::F,    // E
    Scancode::V,    // F
];

/// Which Chip-8 key, if any, a physical key stands for
pub fn keymap(scancode: Scancode) -> Option<u8> {
    KEYMAP
        .iter()
        .position(|&mapped| mapped == scancode)
        .map(|key| key as u8)
}

/// Reads the whole keypad from the keyboard in one go
pub fn keypad(keyboard: &KeyboardState) -> [bool; KEY_COUNT] {
    keys_from_scancodes(keyboard.pressed_scancodes())
}

/// Chip-8 keys held down given every physical key held down
fn keys_from_scancodes<I: Iterator<Item = Scancode>>(pressed: I) -> [bool; KEY_COUNT] {
    let mut keys = [false; KEY_COUNT];
    for key in pressed.filter_map(keymap) {
        keys[key as usize] = true;
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_every_key_once() {
        for key in 0..KEY_COUNT as u8 {
            assert_eq!(keymap(KEYMAP[key as usize]), Some(key));
        }
    }

    #[test]
    fn test_corners() {
        assert_eq!(keymap(Scancode::Num1), Some(0x1));
        assert_eq!(keymap(Scancode::Num4), Some(0xC));
        assert_eq!(keymap(Scancode::Z), Some(0xA));
        assert_eq!(keymap(Scancode::V), Some(0xF));
        assert_eq!(keymap(Scancode::X), Some(0x0));
    }

    #[test]
    fn test_unmapped() {
        assert_eq!(keymap(Scancode::Space), None);
        assert_eq!(keymap(Scancode::Num5), None);
    }

    #[test]
    fn test_keys_from_scancodes() {
        let pressed = vec![Scancode::Num1, Scancode::Space, Scancode::V, Scancode::X];
        let keys = keys_from_scancodes(pressed.into_iter());
        for key in 0..KEY_COUNT {
            assert_eq!(keys[key], key == 0x0 || key == 0x1 || key == 0xF, "key {:X}", key);
        }
    }

    #[test]
    fn test_no_keys_held() {
        assert_eq!(keys_from_scancodes(std::iter::empty()), [false; KEY_COUNT]);
    }
}
