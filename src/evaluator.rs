use crate::ast::{Node, Tag};
use crate::config::OverflowPolicy;
use crate::value::{EvalError, Value};
use log::trace;

/// Reduce a parsed tree to a value using wraparound arithmetic.
pub fn evaluate(tree: &Node) -> Value {
    Evaluator::default().evaluate(tree)
}

/// Combine two values with the operator written as `op`, using wraparound arithmetic.
pub fn apply(left: Value, op: &str, right: Value) -> Value {
    Evaluator::default().apply(left, op, right)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    overflow: OverflowPolicy,
}

impl Evaluator {
    pub fn new(overflow: OverflowPolicy) -> Self {
        Self { overflow }
    }

    pub fn evaluate(&self, node: &Node) -> Value {
        if node.tag == Tag::Number {
            return self.number(&node.contents);
        }

        // Child 0 is '(' or the start anchor, so the operator is always child 1.
        let op = match node.children.get(1) {
            Some(op) => op.contents.as_str(),
            None => return Value::Error(EvalError::BadOperator),
        };

        let mut operands = node.operands();
        let mut acc = match operands.next() {
            Some(first) => self.evaluate(first),
            None => return Value::Error(EvalError::BadNumber),
        };

        // Every operand is evaluated even after an error has been produced.
        for operand in operands {
            let right = self.evaluate(operand);
            acc = self.apply(acc, op, right);
        }

        acc
    }

    pub fn apply(&self, left: Value, op: &str, right: Value) -> Value {
        let (x, y) = match (left, right) {
            (Value::Error(_), _) => return left,
            (_, Value::Error(_)) => return right,
            (Value::Number(x), Value::Number(y)) => (x, y),
        };

        let result = match op {
            "+" => Ok(self.add(x, y)),
            "-" => Ok(self.sub(x, y)),
            "*" => Ok(self.mul(x, y)),
            "/" if y == 0 => Err(EvalError::DivisionByZero),
            "/" => Ok(self.div(x, y)),
            _ => Err(EvalError::BadOperator),
        };

        trace!("{} {} {} = {:?}", x, op, y, result);
        Value::from(result)
    }

    fn number(&self, text: &str) -> Value {
        match text.parse::<i64>() {
            Ok(n) => Value::Number(n),
            Err(error) => {
                trace!("rejected literal {:?}: {}", text, error);
                Value::Error(EvalError::BadNumber)
            }
        }
    }

    fn add(&self, x: i64, y: i64) -> i64 {
        match self.overflow {
            OverflowPolicy::Wrapping => x.wrapping_add(y),
            OverflowPolicy::Saturating => x.saturating_add(y),
        }
    }

    fn sub(&self, x: i64, y: i64) -> i64 {
        match self.overflow {
            OverflowPolicy::Wrapping => x.wrapping_sub(y),
            OverflowPolicy::Saturating => x.saturating_sub(y),
        }
    }

    fn mul(&self, x: i64, y: i64) -> i64 {
        match self.overflow {
            OverflowPolicy::Wrapping => x.wrapping_mul(y),
            OverflowPolicy::Saturating => x.saturating_mul(y),
        }
    }

    // Truncates toward zero. Only i64::MIN / -1 can overflow.
    fn div(&self, x: i64, y: i64) -> i64 {
        match self.overflow {
            OverflowPolicy::Wrapping => x.wrapping_div(y),
            OverflowPolicy::Saturating => x.saturating_div(y),
        }
    }
}
