//! Toast surfaces for the verification screen

pub mod console;

pub use console::ConsoleNotifier;
