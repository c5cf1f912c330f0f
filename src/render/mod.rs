//! Text rendering of instances and tours.
//!
//! Rendering is pure: it returns strings and never writes to an output
//! itself.

mod ascii;

pub use ascii::AsciiMap;
