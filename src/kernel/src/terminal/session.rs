//! Line-edit prompt session.
//!
//! A thin policy layer over the display surface: it prints and locks the
//! prompt, echoes input, and routes backspace and newline. The session never
//! blocks; it drains whatever input is pending and returns.

use crate::arch::x86_64::vga::{Color, Writer};
use core::fmt::Write as _;
use virta_hal::{HardwareCursor, InputSource};

/// Prompt literal shown at the start of every input line.
const PROMPT: &str = "virta> ";

/// Terminal session state: the prompt literal and its two colors.
pub struct Session {
    prompt: &'static str,
    prompt_color: Color,
    echo_color: Color,
}

impl Session {
    /// Creates a session with the default prompt and colors.
    pub fn new() -> Session {
        Session {
            prompt: PROMPT,
            prompt_color: Color::LightGreen,
            echo_color: Color::White,
        }
    }

    /// Prints the prompt and locks the erase boundary behind it.
    pub fn prompt<C: HardwareCursor>(&self, writer: &mut Writer<C>) {
        writer.set_color(self.prompt_color, Color::Black);
        let _ = writer.write_str(self.prompt);
        writer.set_color(self.echo_color, Color::Black);
        writer.lock_prompt();
    }

    /// Routes one decoded character.
    ///
    /// Newline finishes the active line and reprints the prompt; backspace
    /// erases back to the prompt boundary; everything else is echoed.
    pub fn handle_key<C: HardwareCursor>(&self, byte: u8, writer: &mut Writer<C>) {
        match byte {
            b'\n' => {
                writer.write_byte(b'\n');
                self.prompt(writer);
            }
            0x08 => writer.backspace(),
            byte => writer.write_byte(byte),
        }
    }

    /// Drains all pending input through [`Self::handle_key`].
    pub fn pump<C, K>(&self, keys: &mut K, writer: &mut Writer<C>)
    where
        C: HardwareCursor,
        K: InputSource,
    {
        while let Some(byte) = keys.next_char() {
            self.handle_key(byte, writer);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::x86_64::vga::testing::{blank_buffer, writer_over};
    use crate::keyboard::{decode, InputQueue};

    /// Scripted input source for tests.
    struct ScriptedKeys<'a> {
        bytes: &'a [u8],
        next: usize,
    }

    impl<'a> ScriptedKeys<'a> {
        fn new(bytes: &'a [u8]) -> ScriptedKeys<'a> {
            ScriptedKeys { bytes, next: 0 }
        }
    }

    impl InputSource for ScriptedKeys<'_> {
        fn next_char(&mut self) -> Option<u8> {
            let byte = self.bytes.get(self.next).copied();
            self.next += 1;
            byte
        }
    }

    #[test]
    fn prompt_prints_and_locks_the_boundary() {
        let mut buffer = blank_buffer();
        let mut writer = writer_over(&mut buffer);
        let session = Session::new();

        session.prompt(&mut writer);

        assert_eq!(&writer.row_bytes(0)[..7], b"virta> ");
        assert_eq!(writer.position(), (7, 0));

        // The prompt text is protected from erasure.
        let mut keys = ScriptedKeys::new(&[0x08, 0x08, 0x08]);
        session.pump(&mut keys, &mut writer);
        assert_eq!(writer.position(), (7, 0));
        assert_eq!(&writer.row_bytes(0)[..7], b"virta> ");
    }

    #[test]
    fn backspace_edits_the_line_in_place() {
        let mut buffer = blank_buffer();
        let mut writer = writer_over(&mut buffer);
        let session = Session::new();

        writer.lock_prompt();
        let mut keys = ScriptedKeys::new(b"hi\x08\x08ok");
        session.pump(&mut keys, &mut writer);

        assert_eq!(&writer.row_bytes(0)[..3], b"ok ");
        assert_eq!(writer.position(), (2, 0));
    }

    #[test]
    fn newline_reprints_and_relocks_the_prompt() {
        let mut buffer = blank_buffer();
        let mut writer = writer_over(&mut buffer);
        let session = Session::new();

        session.prompt(&mut writer);
        let mut keys = ScriptedKeys::new(b"ok\n");
        session.pump(&mut keys, &mut writer);

        assert_eq!(&writer.row_bytes(0)[..9], b"virta> ok");
        assert_eq!(&writer.row_bytes(1)[..7], b"virta> ");
        assert_eq!(writer.position(), (7, 1));

        // The fresh boundary holds on the new row.
        session.handle_key(0x08, &mut writer);
        assert_eq!(writer.position(), (7, 1));
    }

    #[test]
    fn typed_scancodes_reach_the_display() {
        let mut buffer = blank_buffer();
        let mut writer = writer_over(&mut buffer);
        let session = Session::new();

        // "hi\b\bok\n" as set 1 traffic, releases interleaved.
        let stream = [
            0x23u8, 0xA3, // h
            0x17, 0x97, // i
            0x0E, 0x8E, // backspace
            0x0E, 0x8E, // backspace
            0x18, 0x98, // o
            0x25, 0xA5, // k
            0x1C, 0x9C, // enter
        ];

        let mut queue = InputQueue::new();
        for code in stream {
            if let Some(byte) = decode(code) {
                queue.push(byte);
            }
        }

        writer.lock_prompt();
        // Echo everything up to the newline.
        let mut column_before_newline = None;
        while let Some(byte) = queue.pop() {
            if byte == b'\n' {
                column_before_newline = Some(writer.position().0);
            }
            session.handle_key(byte, &mut writer);
        }

        assert_eq!(&writer.row_bytes(0)[..3], b"ok ");
        assert_eq!(column_before_newline, Some(2));
        // The newline moved to a fresh prompt on the next row.
        assert_eq!(&writer.row_bytes(1)[..7], b"virta> ");
        assert_eq!(writer.position(), (7, 1));
    }
}
