//! PS/2 keyboard input.
//!
//! Decoded characters are staged in a fixed-size ring buffer that decouples
//! input production from consumption. Two entry points feed the ring through
//! one shared decode-and-enqueue routine: `poll`, which checks the controller
//! status flag synchronously, and the keyboard interrupt handler.
//!
//! Refers to: `virta_kernel::arch::x86_64::interrupts::keyboard_interrupt_handler`

pub mod scancode;

use spin::Mutex;
use virta_hal::InputSource;
use x86_64::instructions::interrupts;
use x86_64::instructions::port::Port;

/// PS/2 controller data port.
const DATA_PORT: u16 = 0x60;

/// PS/2 controller status port.
const STATUS_PORT: u16 = 0x64;

/// Status bit: output buffer holds a byte for us.
const OUTPUT_BUFFER_FULL: u8 = 0x01;

/// Scancode bit marking a key release.
const KEY_RELEASE: u8 = 0x80;

/// Ring buffer capacity; one slot stays unused to distinguish full from empty.
const BUFFER_CAPACITY: usize = 256;

/// Fixed-capacity ring of decoded characters.
///
/// `head` is the next write slot, `tail` the next read slot, both wrapping
/// modulo the capacity. `head == tail` means empty, so at most
/// `BUFFER_CAPACITY - 1` characters are held; an append into a full ring
/// drops the incoming character.
pub(crate) struct InputQueue {
    buffer: [u8; BUFFER_CAPACITY],
    head: usize,
    tail: usize,
}

impl InputQueue {
    pub(crate) const fn new() -> InputQueue {
        InputQueue {
            buffer: [0; BUFFER_CAPACITY],
            head: 0,
            tail: 0,
        }
    }

    /// Appends a character, dropping it when the ring is full.
    pub(crate) fn push(&mut self, byte: u8) {
        let next = (self.head + 1) % BUFFER_CAPACITY;
        if next == self.tail {
            return;
        }
        self.buffer[self.head] = byte;
        self.head = next;
    }

    /// Removes and returns the oldest character, or `None` when empty.
    pub(crate) fn pop(&mut self) -> Option<u8> {
        if self.head == self.tail {
            return None;
        }
        let byte = self.buffer[self.tail];
        self.tail = (self.tail + 1) % BUFFER_CAPACITY;
        Some(byte)
    }
}

/// Characters decoded from the keyboard, awaiting the session loop.
///
/// The interrupt handler and the polling path both push here; the consumer
/// side takes the lock with interrupts disabled, so the handler can never
/// spin against a held lock.
static QUEUE: Mutex<InputQueue> = Mutex::new(InputQueue::new());

/// Decodes a raw scancode, filtering key releases and unmapped keys.
pub(crate) fn decode(code: u8) -> Option<u8> {
    if code & KEY_RELEASE != 0 {
        return None;
    }
    scancode::translate(code)
}

/// Shared decode-and-enqueue step for the polling and interrupt paths.
pub fn handle_scancode(code: u8) {
    if let Some(byte) = decode(code) {
        interrupts::without_interrupts(|| {
            QUEUE.lock().push(byte);
        });
    }
}

/// Polls the controller and drains one pending scancode, if any.
///
/// Non-blocking; returns immediately when the device has nothing for us.
pub fn poll() {
    let mut status_port: Port<u8> = Port::new(STATUS_PORT);
    let mut data_port: Port<u8> = Port::new(DATA_PORT);

    // SAFETY: 0x60/0x64 are the standard PS/2 controller ports; reading them
    // in kernel mode is side-effect free apart from consuming the pending
    // scancode, which is exactly what we want.
    let status = unsafe { status_port.read() };
    if status & OUTPUT_BUFFER_FULL != 0 {
        let code = unsafe { data_port.read() };
        handle_scancode(code);
    }
}

/// Returns the next decoded character without blocking.
pub fn read_char() -> Option<u8> {
    interrupts::without_interrupts(|| QUEUE.lock().pop())
}

/// [`InputSource`] over the keyboard ring buffer, for the session loop.
pub struct KeyboardSource;

impl InputSource for KeyboardSource {
    fn next_char(&mut self) -> Option<u8> {
        read_char()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_order_matches_append_order() {
        let mut queue = InputQueue::new();

        for byte in b"hello" {
            queue.push(*byte);
        }
        for byte in b"hello" {
            assert_eq!(queue.pop(), Some(*byte));
        }
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn indices_wrap_around_the_capacity() {
        let mut queue = InputQueue::new();

        // Walk the indices most of the way around, then fill across the seam.
        for i in 0..200u8 {
            queue.push(i);
            assert_eq!(queue.pop(), Some(i));
        }
        for i in 0..255u8 {
            queue.push(i);
        }
        for i in 0..255u8 {
            assert_eq!(queue.pop(), Some(i));
        }
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn saturated_ring_drops_the_incoming_character() {
        let mut queue = InputQueue::new();

        for i in 0..=255u8 {
            queue.push(i);
        }

        // 255 slots usable; the 256th append was dropped.
        for i in 0..255u8 {
            assert_eq!(queue.pop(), Some(i));
        }
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn decode_filters_releases_and_unmapped_keys() {
        assert_eq!(decode(0x23), Some(b'h'));
        // Release of the same key.
        assert_eq!(decode(0x23 | 0x80), None);
        // Left shift make-code has no printable mapping.
        assert_eq!(decode(0x2A), None);
    }

    #[test]
    fn scancode_stream_reaches_the_ring_in_order() {
        let mut queue = InputQueue::new();

        // "hi", typed: make and break codes interleaved.
        for code in [0x23u8, 0xA3, 0x17, 0x97] {
            if let Some(byte) = decode(code) {
                queue.push(byte);
            }
        }

        assert_eq!(queue.pop(), Some(b'h'));
        assert_eq!(queue.pop(), Some(b'i'));
        assert_eq!(queue.pop(), None);
    }
}
