/// Binary operators, from tightest to loosest binding.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Multiplication,
    Division,
    Modulo,
    Addition,
    Subtraction,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    StrictEqual,
    StrictNotEqual,
    And,
    Or,
    Pipe,
}

impl BinaryOperator {
    /// Recognise an operator token.
    pub fn from_token(token: &str) -> Option<Self> {
        let operator = match token {
            "*" => Self::Multiplication,
            "/" => Self::Division,
            "%" => Self::Modulo,
            "+" => Self::Addition,
            "-" => Self::Subtraction,
            ">" => Self::GreaterThan,
            ">=" => Self::GreaterThanOrEqual,
            "<" => Self::LessThan,
            "<=" => Self::LessThanOrEqual,
            "===" => Self::StrictEqual,
            "!==" => Self::StrictNotEqual,
            "&&" => Self::And,
            "||" => Self::Or,
            "|" => Self::Pipe,
            _ => return None,
        };
        Some(operator)
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Multiplication => "*",
            Self::Division => "/",
            Self::Modulo => "%",
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::StrictEqual => "===",
            Self::StrictNotEqual => "!==",
            Self::And => "&&",
            Self::Or => "||",
            Self::Pipe => "|",
        }
    }

    /// Higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Multiplication | Self::Division | Self::Modulo => 12,
            Self::Addition | Self::Subtraction => 11,
            Self::GreaterThan
            | Self::GreaterThanOrEqual
            | Self::LessThan
            | Self::LessThanOrEqual => 9,
            Self::StrictEqual | Self::StrictNotEqual => 8,
            Self::And => 4,
            Self::Or => 3,
            Self::Pipe => 1,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A node of the syntax tree.
///
/// Trees are immutable once parsing finishes and can be evaluated any number of
/// times against different contexts.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Root of a text template: literal text interleaved with `{{ }}` blocks.
    Concat { parts: Vec<Node> },
    /// Root of an expression, and the body of every `{{ }}` block.
    Expression { statement: Option<Box<Node>> },
    Number(f64),
    String(String),
    Boolean(bool),
    /// A dotted accessor path such as `metadata.count`.
    Variable { path: Vec<String> },
    Function { name: String, args: Vec<Node> },
    BinaryOp {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub(crate) fn variable(name: &str) -> Self {
        Self::Variable {
            path: name.split('.').map(str::to_owned).collect(),
        }
    }

    /// Short description used in error messages.
    pub(crate) const fn kind_name(&self) -> &'static str {
        match self {
            Self::Concat { .. } => "concat",
            Self::Expression { .. } => "expression",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Variable { .. } => "variable",
            Self::Function { .. } => "function",
            Self::BinaryOp { .. } => "binary operation",
        }
    }
}

impl Node {
    /// Move the direct children of this node into `pending`, leaving it a leaf.
    fn take_children(&mut self, pending: &mut Vec<Self>) {
        match self {
            Self::Concat { parts } => pending.append(parts),
            Self::Expression { statement } => pending.extend(statement.take().map(|node| *node)),
            Self::Function { args, .. } => pending.append(args),
            Self::BinaryOp { left, right, .. } => {
                pending.push(std::mem::replace(left.as_mut(), Self::Boolean(false)));
                pending.push(std::mem::replace(right.as_mut(), Self::Boolean(false)));
            }
            Self::Number(_) | Self::String(_) | Self::Boolean(_) | Self::Variable { .. } => {}
        }
    }
}

/// Long operator chains nest one box per operator; free them with a work list
/// instead of recursing once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}
