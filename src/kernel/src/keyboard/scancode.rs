//! Scancode set 1 translation.
//!
//! Maps PS/2 make-codes to ASCII characters for a US layout. Break codes
//! (top bit set) identify key releases and must never be looked up.

/// Number of distinct make-codes.
const TABLE_SIZE: usize = 128;

/// Make-code to ASCII map; 0 marks keys with no printable mapping.
static SCANCODE_ASCII: [u8; TABLE_SIZE] = [
    // 0x00-0x0E: escape, digit row, backspace
    0, 0x1B, b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'0', b'-', b'=', 0x08,
    // 0x0F-0x1D: tab, top letter row, enter, left ctrl
    b'\t', b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', b'o', b'p', b'[', b']', b'\n', 0,
    // 0x1E-0x2B: home letter row, left shift, backslash
    b'a', b's', b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';', b'\'', b'`', 0, b'\\',
    // 0x2C-0x39: bottom letter row, right shift, keypad star, left alt, space
    b'z', b'x', b'c', b'v', b'b', b'n', b'm', b',', b'.', b'/', 0, b'*', 0, b' ',
    // 0x3A-0x49: caps lock, function keys, num/scroll lock, keypad upper rows
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 0x4A-0x59
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 0x5A-0x69
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 0x6A-0x79
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 0x7A-0x7F
    0, 0, 0, 0, 0, 0,
];

/// Translates a set 1 make-code to its ASCII character.
///
/// Returns `None` for codes outside the table and for keys with no
/// printable mapping.
pub fn translate(code: u8) -> Option<u8> {
    let index = code as usize;
    if index >= TABLE_SIZE {
        return None;
    }
    match SCANCODE_ASCII[index] {
        0 => None,
        byte => Some(byte),
    }
}
