use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, Node},
    error::{CurlexError, CurlexResult},
    interface::{Context, Method, Methods},
    value::Value,
};

/// Walks a syntax tree against one context and method table.
///
/// Holds only shared references, so any number of evaluators may run over the
/// same tree at once.
struct Evaluator<'e> {
    context: &'e Context,
    methods: &'e Methods,
}

impl Evaluator<'_> {
    fn eval(&self, node: &Node) -> CurlexResult<Value> {
        match node {
            Node::Concat { parts } => {
                let mut output = String::new();
                for part in parts {
                    output.push_str(&self.eval(part)?.to_template_string());
                }
                Ok(Value::String(output))
            }
            Node::Expression { statement } => match statement {
                Some(statement) => self.eval(statement),
                None => Ok(Value::Undefined),
            },
            Node::Number(number) => Ok(Value::Number(*number)),
            Node::String(string) => Ok(Value::String(string.clone())),
            Node::Boolean(boolean) => Ok(Value::Boolean(*boolean)),
            Node::Variable { path } => Ok(self.context.resolve(path.as_slice())),
            Node::Function { name, args } => {
                let method = self.method(name)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<CurlexResult<Vec<_>>>()?;
                Ok(method(&args))
            }
            Node::BinaryOp { .. } => self.chain(node),
        }
    }

    fn method(&self, name: &str) -> CurlexResult<&Method> {
        self.methods
            .get(name)
            .ok_or_else(|| CurlexError::UnknownMethod {
                name: name.to_string(),
            })
    }

    /// Evaluate a run of binary operators without recursing down the left
    /// spine, so long chains like `1 + 1 + ... + 1` use constant stack.
    ///
    /// Right operands bind tighter than their parent and nest only as deep
    /// as there are precedence levels.
    fn chain(&self, node: &Node) -> CurlexResult<Value> {
        let mut spine = Vec::new();
        let mut current = node;
        while let Node::BinaryOp {
            operator,
            left,
            right,
        } = current
        {
            spine.push((*operator, right.as_ref()));
            current = left.as_ref();
        }

        let mut value = self.eval(current)?;
        for (operator, right) in spine.into_iter().rev() {
            value = self.binary(operator, value, right)?;
        }
        Ok(value)
    }

    fn binary(&self, operator: BinaryOperator, left: Value, right: &Node) -> CurlexResult<Value> {
        match operator {
            BinaryOperator::Pipe => return self.pipe(left, right),
            BinaryOperator::And => {
                return if left.is_truthy() { self.eval(right) } else { Ok(left) };
            }
            BinaryOperator::Or => {
                return if left.is_truthy() { Ok(left) } else { self.eval(right) };
            }
            BinaryOperator::Multiplication
            | BinaryOperator::Division
            | BinaryOperator::Modulo
            | BinaryOperator::Addition
            | BinaryOperator::Subtraction
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual
            | BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::StrictEqual
            | BinaryOperator::StrictNotEqual => {}
        }

        let right = self.eval(right)?;
        let ordering = || left.compare(&right);
        let value = match operator {
            BinaryOperator::Multiplication => left.multiply(&right),
            BinaryOperator::Division => left.divide(&right),
            BinaryOperator::Modulo => left.remainder(&right),
            BinaryOperator::Addition => left.add(&right),
            BinaryOperator::Subtraction => left.subtract(&right),
            BinaryOperator::GreaterThan => Value::Boolean(ordering() == Some(Ordering::Greater)),
            BinaryOperator::GreaterThanOrEqual => Value::Boolean(matches!(
                ordering(),
                Some(Ordering::Greater | Ordering::Equal)
            )),
            BinaryOperator::LessThan => Value::Boolean(ordering() == Some(Ordering::Less)),
            BinaryOperator::LessThanOrEqual => Value::Boolean(matches!(
                ordering(),
                Some(Ordering::Less | Ordering::Equal)
            )),
            BinaryOperator::StrictEqual => Value::Boolean(left.strict_equals(&right)),
            BinaryOperator::StrictNotEqual => Value::Boolean(!left.strict_equals(&right)),
            BinaryOperator::Pipe | BinaryOperator::And | BinaryOperator::Or => Value::Undefined,
        };
        Ok(value)
    }

    /// `input | name` calls `name(input)`; `input | name(a, b)` calls `name(input, a, b)`.
    ///
    /// The method is looked up before any of its own arguments run.
    fn pipe(&self, input: Value, right: &Node) -> CurlexResult<Value> {
        match right {
            Node::Variable { path } => {
                let method = self.method(&path.join("."))?;
                Ok(method(&[input]))
            }
            Node::Function { name, args } => {
                let method = self.method(name)?;
                let mut call_args = Vec::with_capacity(args.len() + 1);
                call_args.push(input);
                for arg in args {
                    call_args.push(self.eval(arg)?);
                }
                Ok(method(&call_args))
            }
            Node::Concat { .. }
            | Node::Expression { .. }
            | Node::Number(_)
            | Node::String(_)
            | Node::Boolean(_)
            | Node::BinaryOp { .. } => Err(CurlexError::InvalidPipeTarget {
                found: right.kind_name().to_string(),
            }),
        }
    }
}

/// Evaluate a syntax tree.
///
/// Missing variables resolve to [`Value::Undefined`]; only calling an
/// unregistered method or piping into something that is not a method fails.
pub fn evaluate(ast: &Node, context: &Context, methods: &Methods) -> CurlexResult<Value> {
    Evaluator { context, methods }.eval(ast)
}
