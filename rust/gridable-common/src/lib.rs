#![warn(missing_docs)]

//! This crate constitutes a library of light weight helpers that are shared
//! across the other gridable crates. Their chief quality is that they have
//! virtually zero dependencies.

mod sync;
pub use sync::*;

mod hash;
pub use hash::*;

mod r#async;
pub use r#async::*;

pub use gridable_macros::test;
