//! VGA text mode driver for x86_64.
//!
//! Renders colored text into the memory-mapped buffer at 0xB8000, tracks the
//! cursor through line wrap and scrolling, and keeps the CRT controller's
//! hardware cursor in sync with the software position.

use core::fmt::{self, Write};
use core::ptr;
use spin::Mutex;
use virta_hal::HardwareCursor;
use x86_64::instructions::port::Port;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// Number of rows in VGA text mode.
pub const BUFFER_HEIGHT: usize = 25;

/// Number of columns in VGA text mode.
pub const BUFFER_WIDTH: usize = 80;

/// CRT controller address register port.
const CRTC_ADDR_PORT: u16 = 0x3D4;

/// CRT controller data register port.
const CRTC_DATA_PORT: u16 = 0x3D5;

/// Cursor Location Low register index.
const CURSOR_LOW_REG: u8 = 0x0F;

/// Cursor Location High register index.
const CURSOR_HIGH_REG: u8 = 0x0E;

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

/// Combined foreground and background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
struct ColorCode(u8);

impl ColorCode {
    /// Creates a new color code from foreground and background colors.
    const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }
}

/// Attribute used for scrolled-in rows and backspace erasure.
const BLANK_COLOR: ColorCode = ColorCode::new(Color::LightGray, Color::Black);

/// A single character cell in the VGA buffer.
///
/// `#[repr(C)]` keeps the hardware layout: low byte character, high byte
/// attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
struct ScreenChar {
    ascii_character: u8,
    color_code: ColorCode,
}

/// The VGA text buffer layout.
#[repr(transparent)]
pub(crate) struct Buffer {
    chars: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

/// Hardware cursor driven through the CRT controller's cursor registers.
pub struct CrtCursor {
    addr: Port<u8>,
    data: Port<u8>,
}

impl CrtCursor {
    fn new() -> CrtCursor {
        CrtCursor {
            addr: Port::new(CRTC_ADDR_PORT),
            data: Port::new(CRTC_DATA_PORT),
        }
    }
}

impl HardwareCursor for CrtCursor {
    fn move_to(&mut self, position: u16) {
        // SAFETY: 0x3D4/0x3D5 are the standard VGA CRT controller ports; the
        // kernel runs with full I/O port access. Writing the cursor location
        // registers has no side effect beyond moving the visible cursor.
        unsafe {
            self.addr.write(CURSOR_LOW_REG);
            self.data.write((position & 0xFF) as u8);
            self.addr.write(CURSOR_HIGH_REG);
            self.data.write((position >> 8) as u8);
        }
    }
}

/// Global VGA writer instance.
///
/// Uses a spinlock for safe concurrent access.
pub static WRITER: spin::Once<Mutex<Writer<CrtCursor>>> = spin::Once::new();

/// Initializes the global VGA writer.
///
/// Idempotent - safe to call multiple times.
pub fn init() {
    WRITER.call_once(|| {
        // SAFETY: VGA_BUFFER_ADDR (0xB8000) is the standard VGA text buffer
        // address on x86 systems. This memory is always present and mapped
        // when running on x86 hardware or in QEMU.
        Mutex::new(Writer::new(VGA_BUFFER_ADDR as *mut Buffer, CrtCursor::new()))
    });
}

/// Returns a reference to the global VGA writer, initializing if necessary.
pub fn writer() -> &'static Mutex<Writer<CrtCursor>> {
    init();
    WRITER.get().expect("VGA writer not initialized")
}

/// VGA text mode writer.
///
/// Owns the display grid, the cursor coordinates, the current color, and the
/// prompt erase boundary. All grid and cursor mutation goes through this type.
pub struct Writer<C: HardwareCursor> {
    /// Current column position (0 to BUFFER_WIDTH-1).
    column: usize,
    /// Current row position. May transiently reach BUFFER_HEIGHT inside an
    /// operation, before the scroll check clamps it back.
    row: usize,
    /// Current color code for new characters.
    color_code: ColorCode,
    /// Leftmost column of the active line that backspace may not cross.
    prompt_limit: usize,
    /// Pointer to the cell grid.
    ///
    /// SAFETY: valid for the lifetime of the writer; the production instance
    /// points at the always-mapped VGA buffer.
    buffer: *mut Buffer,
    /// Hardware cursor kept in sync with `(column, row)`.
    cursor: C,
}

// SAFETY: Writer only accesses the cell grid through volatile operations.
// The production buffer is memory-mapped hardware that exists for the
// kernel's lifetime. Access is synchronized through the WRITER spinlock.
unsafe impl<C: HardwareCursor + Send> Send for Writer<C> {}

impl<C: HardwareCursor> Writer<C> {
    /// Creates a writer over the given cell grid.
    pub(crate) fn new(buffer: *mut Buffer, cursor: C) -> Writer<C> {
        Writer {
            column: 0,
            row: 0,
            color_code: ColorCode::new(Color::White, Color::Black),
            prompt_limit: 0,
            buffer,
            cursor,
        }
    }

    /// Sets the foreground and background colors for subsequent writes.
    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.color_code = ColorCode::new(foreground, background);
    }

    /// Writes a single byte at the cursor position.
    ///
    /// A newline moves the cursor to the start of the next row without
    /// writing a cell; any other byte is written with the current color and
    /// advances the cursor, wrapping at the right edge. Either path may
    /// trigger a scroll, and the hardware cursor is synchronized afterwards.
    pub fn write_byte(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.column = 0;
                self.row += 1;
            }
            byte => {
                let cell = ScreenChar {
                    ascii_character: byte,
                    color_code: self.color_code,
                };
                self.write_cell(self.row, self.column, cell);
                self.column += 1;
                if self.column >= BUFFER_WIDTH {
                    self.column = 0;
                    self.row += 1;
                }
            }
        }
        self.scroll();
        self.sync_cursor();
    }

    /// Records the current column as the erase boundary of the active line.
    ///
    /// Called once after each freshly printed prompt.
    pub fn lock_prompt(&mut self) {
        self.prompt_limit = self.column;
    }

    /// Erases the character left of the cursor, up to the prompt boundary.
    ///
    /// A no-op at the boundary. Never moves the cursor up a row.
    pub fn backspace(&mut self) {
        if self.column <= self.prompt_limit {
            return;
        }
        self.column -= 1;
        let blank = ScreenChar {
            ascii_character: b' ',
            color_code: BLANK_COLOR,
        };
        self.write_cell(self.row, self.column, blank);
        self.sync_cursor();
    }

    /// Clears the entire screen with the current color and homes the cursor.
    pub fn clear_screen(&mut self) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row, self.color_code);
        }
        self.column = 0;
        self.row = 0;
        self.sync_cursor();
    }

    /// Shifts all rows up by one once the cursor has run past the last row.
    ///
    /// No-op while the cursor is still on screen; a single write can only
    /// advance the row by one, so the lazy check stays O(1).
    fn scroll(&mut self) {
        if self.row < BUFFER_HEIGHT {
            return;
        }
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                let character = self.read_cell(row, col);
                self.write_cell(row - 1, col, character);
            }
        }
        self.clear_row(BUFFER_HEIGHT - 1, BLANK_COLOR);
        self.row = BUFFER_HEIGHT - 1;
    }

    /// Clears a single row by filling it with spaces.
    fn clear_row(&mut self, row: usize, color_code: ColorCode) {
        let blank = ScreenChar {
            ascii_character: b' ',
            color_code,
        };
        for col in 0..BUFFER_WIDTH {
            self.write_cell(row, col, blank);
        }
    }

    /// Mirrors `(column, row)` to the hardware cursor.
    fn sync_cursor(&mut self) {
        let position = (self.row * BUFFER_WIDTH + self.column) as u16;
        self.cursor.move_to(position);
    }

    fn write_cell(&mut self, row: usize, col: usize, cell: ScreenChar) {
        debug_assert!(row < BUFFER_HEIGHT, "row index out of bounds");
        debug_assert!(col < BUFFER_WIDTH, "column index out of bounds");

        // SAFETY: row/col are kept in range by the cursor invariants checked
        // above; the buffer pointer was validated at construction time. The
        // write is volatile because the VGA buffer is memory-mapped I/O.
        unsafe {
            ptr::write_volatile(&mut (*self.buffer).chars[row][col], cell);
        }
    }

    fn read_cell(&self, row: usize, col: usize) -> ScreenChar {
        debug_assert!(row < BUFFER_HEIGHT, "row index out of bounds");
        debug_assert!(col < BUFFER_WIDTH, "column index out of bounds");

        // SAFETY: as for write_cell; volatile because the buffer is
        // memory-mapped I/O.
        unsafe { ptr::read_volatile(&(*self.buffer).chars[row][col]) }
    }
}

impl<C: HardwareCursor> fmt::Write for Writer<C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            match byte {
                // Printable ASCII or newline
                0x20..=0x7e | b'\n' => self.write_byte(byte),
                // Non-printable: show placeholder
                _ => self.write_byte(0xfe),
            }
        }
        Ok(())
    }
}

impl<C: HardwareCursor> virta_hal::Console for Writer<C> {
    fn write_str(&mut self, s: &str) {
        let _ = <Self as fmt::Write>::write_str(self, s);
    }

    fn clear(&mut self) {
        self.clear_screen();
    }
}

/// Prints to the VGA buffer without a newline.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::arch::x86_64::vga::_print(format_args!($($arg)*))
    };
}

/// Prints to the VGA buffer with a newline.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    writer().lock().write_fmt(args).expect("vga write failed");
}

/// Sets the VGA output color.
pub fn set_color(foreground: Color, background: Color) {
    writer().lock().set_color(foreground, background);
}

/// Clears the VGA screen.
pub fn clear_screen() {
    writer().lock().clear_screen();
}

/// Host-test support: writers over in-memory buffers, no hardware access.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Cursor sink that records where the hardware cursor would be.
    #[derive(Default)]
    pub(crate) struct TrackingCursor {
        pub(crate) position: u16,
        pub(crate) moves: usize,
    }

    impl HardwareCursor for TrackingCursor {
        fn move_to(&mut self, position: u16) {
            self.position = position;
            self.moves += 1;
        }
    }

    pub(crate) fn blank_buffer() -> Buffer {
        let blank = ScreenChar {
            ascii_character: b' ',
            color_code: BLANK_COLOR,
        };
        Buffer {
            chars: [[blank; BUFFER_WIDTH]; BUFFER_HEIGHT],
        }
    }

    pub(crate) fn writer_over(buffer: &mut Buffer) -> Writer<TrackingCursor> {
        Writer::new(buffer, TrackingCursor::default())
    }

    impl<C: HardwareCursor> Writer<C> {
        /// Returns `(character, attribute)` of the given cell.
        pub(crate) fn cell(&self, row: usize, col: usize) -> (u8, u8) {
            let cell = self.read_cell(row, col);
            (cell.ascii_character, cell.color_code.0)
        }

        /// Returns the characters of a whole row.
        pub(crate) fn row_bytes(&self, row: usize) -> [u8; BUFFER_WIDTH] {
            let mut bytes = [0u8; BUFFER_WIDTH];
            for (col, byte) in bytes.iter_mut().enumerate() {
                *byte = self.read_cell(row, col).ascii_character;
            }
            bytes
        }

        /// Returns the software cursor as `(column, row)`.
        pub(crate) fn position(&self) -> (usize, usize) {
            (self.column, self.row)
        }
    }
}
