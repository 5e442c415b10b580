//! Handler types built on `textdispatch-core`.
//!
//! - [`brainf`]: a byte-tape interpreter dispatching one character at a time.
//! - [`forth`]: a stack interpreter dispatching whitespace-separated words.
//! - [`showcase`]: self-test handlers covering every classification rule.

pub mod brainf;
pub mod forth;
pub mod showcase;

#[cfg(test)]
mod tests;

pub use self::brainf::{BrainF, BrainFError};
pub use self::forth::{Forth, ForthError};
pub use self::showcase::{Second, Showcase, ShowcaseError, run_showcase};
