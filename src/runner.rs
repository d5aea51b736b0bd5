use crate::ast::{count_nodes, Node};
use crate::config::Config;
use crate::error::ParseError;
use crate::evaluator::Evaluator;
use crate::parser;
use crate::value::Value;
use log::debug;
use std::io::{self, Write};

/// Result of pushing one line through parse and evaluate.
#[derive(Debug, Clone)]
pub enum Outcome {
    Evaluated { tree: Node, value: Value },
    Syntax(ParseError),
}

impl Outcome {
    pub fn value(&self) -> Option<Value> {
        match self {
            Outcome::Evaluated { value, .. } => Some(*value),
            Outcome::Syntax(_) => None,
        }
    }
}

pub fn run_line(source: &str, config: &Config) -> Outcome {
    let tree = match parser::parse(source) {
        Ok(tree) => tree,
        Err(error) => {
            debug!("{}", error.describe(source, None));
            return Outcome::Syntax(error);
        }
    };

    let value = Evaluator::new(config.overflow).evaluate(&tree);
    if value.is_error() {
        debug!("{:?} evaluated to {:?}", source, value);
    }
    Outcome::Evaluated { tree, value }
}

/// Run one line, writing the result to `out` and any syntax error to stderr.
/// Returns whether the line parsed.
pub fn run(source: &str, config: &Config, out: &mut impl Write) -> io::Result<bool> {
    match run_line(source, config) {
        Outcome::Evaluated { tree, value } => {
            if config.show_tree {
                write!(out, "{}", tree)?;
                writeln!(out, "nodes: {}", count_nodes(&tree))?;
            }
            writeln!(out, "{}", value)?;
            Ok(true)
        }
        Outcome::Syntax(error) => {
            error.report(source, None)?;
            Ok(false)
        }
    }
}
