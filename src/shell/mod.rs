//! Command dispatch and option translation
//!
//! A typed line flows through [`tokenizer`], [`dispatcher`], [`parser`]
//! (driven by [`catalog`]) and [`adapter`] before it reaches the engine,
//! unless [`fallback`] hands it to the reference CLI.

pub mod adapter;
pub mod catalog;
pub mod completion;
pub mod dispatcher;
pub mod fallback;
pub mod help;
pub mod interrupt;
pub mod option;
pub mod parser;
pub mod tokenizer;
pub mod value;

pub use dispatcher::{Context, Dispatcher, Outcome, Output, Refresh};
pub use interrupt::Interrupt;
