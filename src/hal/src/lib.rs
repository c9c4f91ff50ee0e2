//! VirtaOS Hardware Abstraction Layer (HAL) traits.
//!
//! This crate defines traits that abstract away platform-specific hardware details.

#![no_std]

/// Trait for a hardware text cursor that mirrors a software cursor position.
pub trait HardwareCursor {
    /// Moves the cursor marker to a linear cell offset from the top-left corner.
    fn move_to(&mut self, position: u16);
}

/// Trait for a non-blocking source of decoded input characters.
pub trait InputSource {
    /// Returns the next pending character, or `None` when no input is ready.
    fn next_char(&mut self) -> Option<u8>;
}

/// Trait for a text-based console output.
pub trait Console {
    /// Writes a string to the console.
    fn write_str(&mut self, s: &str);
    /// Clears the console screen.
    fn clear(&mut self);
}
