pub mod analysis;
pub mod ast;
pub mod builtins;
pub mod config;
pub mod diag;
pub mod module;
pub mod parser;
pub mod token;

pub use analysis::{Analysis, analyze};
pub use parser::parse;
