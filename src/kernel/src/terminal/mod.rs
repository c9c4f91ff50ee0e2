//! Terminal subsystem for VirtaOS.
//!
//! Drives the read-render cycle: characters drained from the keyboard ring
//! are echoed, edited, or acted on by the line-edit session.

pub mod session;

pub use session::Session;
