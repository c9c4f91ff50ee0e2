//! VirtaOS Kernel Entry Point
//!
//! Boots the terminal subsystem and runs the session loop.

#![no_std]
#![no_main]

use bootloader::{entry_point, BootInfo};
use core::panic::PanicInfo;
use virta_kernel::arch::x86_64::{self, vga::Color};
use virta_kernel::boot::{self, Status};
use virta_kernel::keyboard::{self, KeyboardSource};
use virta_kernel::terminal::Session;
use virta_kernel::{println, serial_println};

entry_point!(kernel_main);

/// Kernel entry point.
///
/// Called by the bootloader after setting up the initial environment.
fn kernel_main(_boot_info: &'static BootInfo) -> ! {
    // ========================================================================
    // Phase 1: Core Initialization
    // ========================================================================
    virta_kernel::init();

    // Clear screen and show banner
    x86_64::vga::clear_screen();
    boot::banner::print_banner();

    // ========================================================================
    // Phase 2: Boot Logging
    // ========================================================================
    boot::log(Status::Ok, "Serial port initialized");
    boot::log(Status::Ok, "IDT configured");
    boot::log(Status::Ok, "Keyboard driver ready");
    boot::log_detail("PS/2 set 1, polled; IRQ 1 routed as well");

    // Run kernel self tests
    boot::log(Status::Info, "Running self tests");
    virta_kernel::tests::run_all();
    boot::log(Status::Ok, "Self tests passed");

    // ========================================================================
    // Boot Complete
    // ========================================================================
    boot::log(Status::Ok, "Terminal ready");
    println!();

    // ========================================================================
    // Phase 3: Terminal Session Loop
    // ========================================================================
    let session = Session::new();
    let mut keys = KeyboardSource;

    {
        let mut writer = x86_64::vga::writer().lock();
        session.prompt(&mut writer);
    }

    loop {
        keyboard::poll();
        {
            let mut writer = x86_64::vga::writer().lock();
            session.pump(&mut keys, &mut writer);
        }
        x86_64::hlt();
    }
}

/// Panic handler.
///
/// Called when the kernel encounters an unrecoverable error.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // Use the already-initialized serial port
    serial_println!("KERNEL PANIC: {}", info);

    x86_64::vga::set_color(Color::LightRed, Color::Black);
    println!("\n\n!!! KERNEL PANIC !!!");
    x86_64::vga::set_color(Color::White, Color::Black);
    println!("{}", info);

    x86_64::halt_loop()
}
