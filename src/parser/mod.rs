//! Placeholder scanning for template source

pub mod ast;
pub mod lexer;
mod scanner;

pub use ast::*;
pub use scanner::{placeholders, scan};
