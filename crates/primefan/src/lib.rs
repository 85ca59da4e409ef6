#![doc = include_str!("../README.md")]

mod candidates;
mod cursor;
mod engine;
mod error;
mod primality;
mod sieve;
mod sink;
mod worker;

pub use crate::candidates::*;
pub use crate::cursor::*;
pub use crate::engine::*;
pub use crate::error::*;
pub use crate::primality::*;
pub use crate::sieve::*;
pub use crate::sink::*;
