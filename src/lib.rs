#![doc = include_str!("../README.md")]

mod collector;
pub use collector::*;

mod field;
pub use field::*;

mod list;
pub use list::*;

mod tidy;
pub use tidy::*;
