// NicoLISP Library
//
// A tiny prefix-notation integer calculator: one line of text is parsed into
// a syntax tree, which is then reduced to a number or an arithmetic error.

// Public modules
pub mod ast;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{count_nodes, Node, Tag};
pub use config::{Config, OverflowPolicy};
pub use error::{Expected, ParseError, Span};
pub use evaluator::{apply, evaluate, Evaluator};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{parse, Parser};
pub use value::{EvalError, Value};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{run, run_line, Outcome};
