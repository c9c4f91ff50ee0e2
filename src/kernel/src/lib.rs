//! VirtaOS Kernel
//!
//! A minimal text-terminal kernel for x86_64: a VGA display surface with
//! scrolling and a hardware cursor, a PS/2 scancode ring buffer, and a
//! line-edit prompt.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `arch`: Platform-specific code (VGA, serial, PIC, interrupts)
//! - `keyboard`: Scancode translation and the input ring buffer
//! - `terminal`: The line-edit prompt session
//! - `boot`: Boot banner and status logging
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with safety
//! invariants explaining why the usage is correct.

#![no_std]
#![feature(abi_x86_interrupt)]
#![warn(missing_docs)]

pub mod arch;
pub mod boot;
pub mod keyboard;
pub mod terminal;

/// Initializes core kernel subsystems.
///
/// Called early in the boot process to set up essential services.
pub fn init() {
    #[cfg(target_arch = "x86_64")]
    {
        arch::x86_64::serial::init();
        arch::x86_64::vga::init();
        arch::x86_64::interrupts::init_idt();
    }
}
