//! Boot banner and branding.

use crate::arch::x86_64::vga::{self, Color};
use crate::println;

/// Print the VirtaOS boot banner.
pub fn print_banner() {
    vga::set_color(Color::Cyan, Color::Black);
    println!(" __     ___      _         ___  ____  ");
    println!(" \\ \\   / (_)_ __| |_ __ _ / _ \\/ ___| ");
    println!("  \\ \\ / /| | '__| __/ _` | | | \\___ \\ ");
    println!("   \\ V / | | |  | || (_| | |_| |___) |");
    println!("    \\_/  |_|_|   \\__\\__,_|\\___/|____/ ");
    println!();
    vga::set_color(Color::White, Color::Black);
    println!(" VirtaOS v0.1.0");
    println!();
}
