use crate::{
    ast::{BinaryOperator, Node},
    error::{ParseError, ParseErrorKind},
    tokenizer::Token,
};

type ParseResult<T> = Result<T, ParseError>;

/// Grammar used for the root of the tree.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The whole source is one expression.
    #[default]
    Expression,
    /// Literal text with `{{ expression }}` interpolations.
    Concat,
}

/// A node that is still being filled in.
enum Frame {
    Concat {
        parts: Vec<Node>,
    },
    Expression {
        statement: Option<Node>,
    },
    /// An open argument list. `current` is the argument being built.
    Function {
        name: String,
        args: Vec<Node>,
        current: Option<Node>,
    },
}

impl Frame {
    fn root(mode: Mode) -> Self {
        match mode {
            Mode::Expression => Self::Expression { statement: None },
            Mode::Concat => Self::Concat { parts: Vec::new() },
        }
    }

    /// The slot binary operators read their left operand from.
    fn statement_slot(&mut self) -> Option<&mut Option<Node>> {
        match self {
            Self::Expression { statement } => Some(statement),
            Self::Function { current, .. } => Some(current),
            Self::Concat { .. } => None,
        }
    }

    fn into_node(self) -> Node {
        match self {
            Self::Concat { parts } => Node::Concat { parts },
            Self::Expression { statement } => Node::Expression {
                statement: statement.map(Box::new),
            },
            Self::Function {
                name,
                mut args,
                current,
            } => {
                args.extend(current);
                Node::Function { name, args }
            }
        }
    }
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    index: usize,
    /// Innermost frame last. The root frame is never popped.
    stack: Vec<Frame>,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], mode: Mode) -> Self {
        Parser {
            tokens,
            index: 0,
            stack: vec![Frame::root(mode)],
        }
    }

    fn consume_token(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.index).copied();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    /// Consume the next token that is not whitespace.
    fn consume_non_empty_token(&mut self) -> Option<Token<'a>> {
        loop {
            let token = self.consume_token()?;
            if !token.is_whitespace() {
                return Some(token);
            }
        }
    }

    /// Peek at the very next token, whitespace included.
    fn peek_token(&self) -> Option<Token<'a>> {
        self.tokens.get(self.index).copied()
    }

    fn make_error(token: Token<'_>, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line: token.line(),
            column: token.column(),
            kind,
        }
    }

    fn unexpected(token: Token<'_>) -> ParseError {
        Self::make_error(token, ParseErrorKind::unexpected_token(token.as_str()))
    }

    /// Error located just past the last token.
    fn eof_error(&self) -> ParseError {
        let (mut line, mut column) = (1, 1);
        if let Some(last) = self.tokens.last() {
            line = last.line();
            column = last.column();
            for c in last.as_str().chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += c.len_utf8();
                }
            }
        }
        ParseError {
            line,
            column,
            kind: ParseErrorKind::UnexpectedEof,
        }
    }

    fn run(mut self) -> ParseResult<Node> {
        loop {
            let in_text = matches!(self.stack.last(), Some(Frame::Concat { .. }));
            let more = if in_text {
                self.parse_concat()
            } else {
                self.parse_expression()?
            };
            if !more {
                break;
            }
        }

        if self.stack.len() != 1 {
            return Err(self.eof_error());
        }
        self.stack
            .pop()
            .map(Frame::into_node)
            .ok_or_else(|| self.eof_error())
    }

    /// Text mode: everything but `{{` is literal, whitespace included.
    fn parse_concat(&mut self) -> bool {
        let Some(token) = self.consume_token() else {
            return false;
        };

        if token.as_str() == "{{" {
            self.stack.push(Frame::Expression { statement: None });
        } else if let Some(Frame::Concat { parts }) = self.stack.last_mut() {
            parts.push(Node::String(token.as_str().to_owned()));
        }
        true
    }

    /// Consume one meaningful token inside an expression or argument list.
    fn parse_expression(&mut self) -> ParseResult<bool> {
        let Some(token) = self.consume_non_empty_token() else {
            return Ok(false);
        };

        if let Some(operator) = BinaryOperator::from_token(token.as_str()) {
            self.parse_binary_operand(token, operator)?;
        } else if let Some(operand) = self.parse_operand(token) {
            self.set_statement(token, operand)?;
        } else {
            match token.as_str() {
                "," => self.end_argument(token)?,
                ")" => self.end_function(token)?,
                "}}" => self.end_expression(token)?,
                _ => return Err(Self::unexpected(token)),
            }
        }
        Ok(true)
    }

    /// Classify a token as a single operand. A name immediately followed by
    /// `(` starts a call; the `(` is consumed and the returned `Function`
    /// node has no arguments yet.
    fn parse_operand(&mut self, token: Token<'a>) -> Option<Node> {
        let text = token.as_str();
        if is_number(text) {
            text.parse().ok().map(Node::Number)
        } else if is_string(text) {
            let inner = text.get(1..text.len() - 1).unwrap_or_default();
            Some(Node::String(inner.to_owned()))
        } else if text == "true" || text == "false" {
            Some(Node::Boolean(text == "true"))
        } else if is_variable(text) {
            if self.peek_token().is_some_and(|next| next.as_str() == "(") {
                self.consume_token();
                Some(Node::Function {
                    name: text.to_owned(),
                    args: Vec::new(),
                })
            } else {
                Some(Node::variable(text))
            }
        } else {
            None
        }
    }

    /// Install an operand as the current statement or argument.
    fn set_statement(&mut self, token: Token<'_>, operand: Node) -> ParseResult<()> {
        let opens_call = function_name(&operand);
        let slot = self
            .stack
            .last_mut()
            .and_then(Frame::statement_slot)
            .ok_or_else(|| Self::unexpected(token))?;
        if slot.is_some() {
            return Err(Self::unexpected(token));
        }
        *slot = Some(operand);

        if let Some(name) = opens_call {
            self.open_function(name);
        }
        Ok(())
    }

    fn parse_binary_operand(&mut self, token: Token<'_>, operator: BinaryOperator) -> ParseResult<()> {
        let has_left = self
            .stack
            .last_mut()
            .and_then(Frame::statement_slot)
            .is_some_and(|slot| slot.is_some());
        if !has_left {
            return Err(Self::make_error(
                token,
                ParseErrorKind::MissingLeftOperand {
                    operator: token.as_str().to_owned(),
                },
            ));
        }

        let right_token = self.consume_non_empty_token().ok_or_else(|| {
            Self::make_error(
                token,
                ParseErrorKind::MissingRightOperand {
                    operator: token.as_str().to_owned(),
                },
            )
        })?;
        let right = self.parse_operand(right_token).ok_or_else(|| {
            Self::make_error(
                right_token,
                ParseErrorKind::UnexpectedRightOperand {
                    token: right_token.as_str().to_owned(),
                },
            )
        })?;
        let opens_call = function_name(&right);

        let slot = self
            .stack
            .last_mut()
            .and_then(Frame::statement_slot)
            .ok_or_else(|| Self::unexpected(token))?;
        if let Some(statement) = slot {
            splice(statement, operator, right);
        }

        if let Some(name) = opens_call {
            self.open_function(name);
        }
        Ok(())
    }

    fn open_function(&mut self, name: String) {
        self.stack.push(Frame::Function {
            name,
            args: Vec::new(),
            current: None,
        });
    }

    /// `,` finishes the argument being built.
    fn end_argument(&mut self, token: Token<'_>) -> ParseResult<()> {
        match self.stack.last_mut() {
            Some(Frame::Function { args, current, .. }) => {
                let argument = current.take().ok_or_else(|| Self::unexpected(token))?;
                args.push(argument);
                Ok(())
            }
            Some(Frame::Expression { .. } | Frame::Concat { .. }) | None => {
                Err(Self::unexpected(token))
            }
        }
    }

    /// `)` closes the innermost call and puts the finished node where its
    /// placeholder sits: the rightmost leaf of the enclosing statement.
    fn end_function(&mut self, token: Token<'_>) -> ParseResult<()> {
        match self.stack.last() {
            Some(Frame::Function { args, current, .. }) => {
                if current.is_none() && !args.is_empty() {
                    // trailing comma
                    return Err(Self::unexpected(token));
                }
            }
            Some(Frame::Expression { .. } | Frame::Concat { .. }) | None => {
                return Err(Self::unexpected(token));
            }
        }

        let function = self
            .stack
            .pop()
            .map(Frame::into_node)
            .ok_or_else(|| Self::unexpected(token))?;
        match self.stack.last_mut().and_then(Frame::statement_slot) {
            Some(Some(statement)) => {
                *rightmost_leaf(statement) = function;
                Ok(())
            }
            Some(None) | None => Err(Self::unexpected(token)),
        }
    }

    /// `}}` closes an interpolation and returns to the enclosing text.
    fn end_expression(&mut self, token: Token<'_>) -> ParseResult<()> {
        let closes_interpolation = matches!(
            self.stack.as_slice(),
            [.., Frame::Concat { .. }, Frame::Expression { .. }]
        );
        if !closes_interpolation {
            return Err(Self::unexpected(token));
        }

        let expression = self
            .stack
            .pop()
            .map(Frame::into_node)
            .ok_or_else(|| Self::unexpected(token))?;
        if let Some(Frame::Concat { parts }) = self.stack.last_mut() {
            parts.push(expression);
        }
        Ok(())
    }
}

fn function_name(node: &Node) -> Option<String> {
    match node {
        Node::Function { name, .. } => Some(name.clone()),
        Node::Concat { .. }
        | Node::Expression { .. }
        | Node::Number(_)
        | Node::String(_)
        | Node::Boolean(_)
        | Node::Variable { .. }
        | Node::BinaryOp { .. } => None,
    }
}

/// Insert `operator` with its right operand into an existing statement.
///
/// The new node descends the right spine past every operator that binds
/// strictly looser, then takes the subtree it stops at as its left operand.
/// Equal precedence stops the descent, so chains stay left-associative.
fn splice(statement: &mut Node, operator: BinaryOperator, right: Node) {
    let target = splice_point(statement, operator);
    let left = std::mem::replace(target, Node::Boolean(false));
    *target = Node::BinaryOp {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    };
}

/// Right-spine descent is bounded by the number of precedence levels.
fn splice_point(node: &mut Node, operator: BinaryOperator) -> &mut Node {
    let descend = matches!(
        node,
        Node::BinaryOp { operator: existing, .. } if existing.precedence() < operator.precedence()
    );
    if !descend {
        return node;
    }
    match node {
        Node::BinaryOp { right, .. } => splice_point(right, operator),
        other => other,
    }
}

fn rightmost_leaf(node: &mut Node) -> &mut Node {
    match node {
        Node::BinaryOp { right, .. } => rightmost_leaf(right),
        other => other,
    }
}

/// `-?\d+(\.\d+)?`
fn is_number(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(integer) && fraction.is_none_or(all_digits)
}

/// Quoted with the same character at both ends.
fn is_string(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first @ ('"' | '\'')), Some(last)) => first == last,
        _ => false,
    }
}

/// `[a-zA-Z_$][a-zA-Z0-9_$.]*`, not ending in `.`
fn is_variable(text: &str) -> bool {
    let mut chars = text.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.'))
        && !text.ends_with('.')
}

/// Build a syntax tree from `tokens`.
///
/// The first malformed construct aborts the parse; no partial tree is returned.
pub fn parse(tokens: &[Token<'_>], mode: Mode) -> Result<Node, ParseError> {
    Parser::new(tokens, mode).run()
}


/// Tests for the parser via the tokenizer.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    // Helper macros for quick node creation in tests
    macro_rules! num {
        ($value:expr) => {
            Node::Number($value)
        };
    }
    macro_rules! string {
        ($value:expr) => {
            Node::String($value.to_string())
        };
    }
    macro_rules! var {
        ($name:expr) => {
            Node::variable($name)
        };
    }
    macro_rules! op {
        ($operator:ident, $left:expr, $right:expr) => {
            Node::BinaryOp {
                operator: BinaryOperator::$operator,
                left: Box::new($left),
                right: Box::new($right),
            }
        };
    }
    macro_rules! call {
        ($name:expr $(, $arg:expr)* $(,)?) => {
            Node::Function {
                name: $name.to_string(),
                args: vec![$($arg),*],
            }
        };
    }

    fn expression(statement: Node) -> Node {
        Node::Expression {
            statement: Some(Box::new(statement)),
        }
    }

    fn parse_expression(source: &str) -> ParseResult<Node> {
        parse(&tokenize(source), Mode::Expression)
    }

    fn parse_concat(source: &str) -> ParseResult<Node> {
        parse(&tokenize(source), Mode::Concat)
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_empty_expression() {
        assert_eq!(
            parse_expression("").unwrap(),
            Node::Expression { statement: None }
        );
        assert_eq!(
            parse_expression("  \n ").unwrap(),
            Node::Expression { statement: None }
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_literals() {
        assert_eq!(parse_expression("0").unwrap(), expression(num!(0.0)));
        assert_eq!(parse_expression("2.5").unwrap(), expression(num!(2.5)));
        assert_eq!(parse_expression("'ä'").unwrap(), expression(string!("ä")));
        assert_eq!(
            parse_expression("\"ohh 'you'\"").unwrap(),
            expression(string!("ohh 'you'"))
        );
        assert_eq!(parse_expression("''").unwrap(), expression(string!("")));
        assert_eq!(
            parse_expression("true").unwrap(),
            expression(Node::Boolean(true))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_variable() {
        assert_eq!(
            parse_expression("metadata.title").unwrap(),
            expression(var!("metadata.title"))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_addition_without_whitespace() {
        assert_eq!(
            parse_expression("1+2").unwrap(),
            expression(op!(Addition, num!(1.0), num!(2.0)))
        );
        assert_eq!(
            parse_expression("\"👹\" + '🦄'").unwrap(),
            expression(op!(Addition, string!("👹"), string!("🦄")))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_same_precedence_is_left_associative() {
        assert_eq!(
            parse_expression("1 + 2 + 3").unwrap(),
            expression(op!(
                Addition,
                op!(Addition, num!(1.0), num!(2.0)),
                num!(3.0)
            ))
        );
        assert_eq!(
            parse_expression("8 / 4 * 2").unwrap(),
            expression(op!(
                Multiplication,
                op!(Division, num!(8.0), num!(4.0)),
                num!(2.0)
            ))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_higher_precedence_nests_right() {
        assert_eq!(
            parse_expression("1 + 2 * 3").unwrap(),
            expression(op!(
                Addition,
                num!(1.0),
                op!(Multiplication, num!(2.0), num!(3.0))
            ))
        );
        assert_eq!(
            parse_expression("1 + 2 * 3 / 4").unwrap(),
            expression(op!(
                Addition,
                num!(1.0),
                op!(
                    Division,
                    op!(Multiplication, num!(2.0), num!(3.0)),
                    num!(4.0)
                )
            ))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_lower_precedence_becomes_root() {
        assert_eq!(
            parse_expression("1 * 2 + 3").unwrap(),
            expression(op!(
                Addition,
                op!(Multiplication, num!(1.0), num!(2.0)),
                num!(3.0)
            ))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_splice_descends_several_levels() {
        assert_eq!(
            parse_expression("a || b + c * d").unwrap(),
            expression(op!(
                Or,
                var!("a"),
                op!(Addition, var!("b"), op!(Multiplication, var!("c"), var!("d")))
            ))
        );
        assert_eq!(
            parse_expression("a && b === c > d").unwrap(),
            expression(op!(
                And,
                var!("a"),
                op!(StrictEqual, var!("b"), op!(GreaterThan, var!("c"), var!("d")))
            ))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_pipe_chain() {
        assert_eq!(
            parse_expression("0 | inc | add(2)").unwrap(),
            expression(op!(
                Pipe,
                op!(Pipe, num!(0.0), var!("inc")),
                call!("add", num!(2.0))
            ))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_functions() {
        assert_eq!(parse_expression("foo()").unwrap(), expression(call!("foo")));
        assert_eq!(
            parse_expression("add(1, 2)").unwrap(),
            expression(call!("add", num!(1.0), num!(2.0)))
        );
        assert_eq!(
            parse_expression("print(metadata.title)").unwrap(),
            expression(call!("print", var!("metadata.title")))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_function_operands() {
        assert_eq!(
            parse_expression("foo() + bar() + \"foo\"").unwrap(),
            expression(op!(
                Addition,
                op!(Addition, call!("foo"), call!("bar")),
                string!("foo")
            ))
        );
        assert_eq!(
            parse_expression("1 + 2 * f(3) - 4").unwrap(),
            expression(op!(
                Subtraction,
                op!(
                    Addition,
                    num!(1.0),
                    op!(Multiplication, num!(2.0), call!("f", num!(3.0)))
                ),
                num!(4.0)
            ))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_nested_calls_and_argument_expressions() {
        assert_eq!(
            parse_expression("foo(a, \"b\", c(), d && a)").unwrap(),
            expression(call!(
                "foo",
                var!("a"),
                string!("b"),
                call!("c"),
                op!(And, var!("d"), var!("a"))
            ))
        );
        assert_eq!(
            parse_expression("f(g(1) + h(2, 3), 4)").unwrap(),
            expression(call!(
                "f",
                op!(
                    Addition,
                    call!("g", num!(1.0)),
                    call!("h", num!(2.0), num!(3.0))
                ),
                num!(4.0)
            ))
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_concat_words_are_separate_parts() {
        assert_eq!(
            parse_concat("foo \"hey\"").unwrap(),
            Node::Concat {
                parts: vec![string!("foo"), string!(" "), string!("\"hey\"")]
            }
        );
        assert_eq!(
            parse_concat("a{b}").unwrap(),
            Node::Concat {
                parts: vec![string!("a{b}")]
            }
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_concat_interpolations() {
        assert_eq!(
            parse_concat("{{var}}x{{ var2 }}").unwrap(),
            Node::Concat {
                parts: vec![expression(var!("var")), string!("x"), expression(var!("var2"))]
            }
        );
        assert_eq!(
            parse_concat("{{}}{{   }}").unwrap(),
            Node::Concat {
                parts: vec![
                    Node::Expression { statement: None },
                    Node::Expression { statement: None }
                ]
            }
        );
        assert_eq!(
            parse_concat("{{\"a\"+metadata.b}}").unwrap(),
            Node::Concat {
                parts: vec![expression(op!(Addition, string!("a"), var!("metadata.b")))]
            }
        );
        assert_eq!(
            parse_concat("{{foo()}}").unwrap(),
            Node::Concat {
                parts: vec![expression(call!("foo"))]
            }
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_concat_text_after_closing() {
        assert_eq!(
            parse_concat("}} {{ 1 }}").unwrap(),
            Node::Concat {
                parts: vec![string!("}}"), string!(" "), expression(num!(1.0))]
            }
        );
    }

    fn error_kind(result: ParseResult<Node>) -> ParseErrorKind {
        result.unwrap_err().kind
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_wrong_terminator() {
        let err = parse_concat("{{foo}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::unexpected_token("foo}"));
        assert_eq!((err.line, err.column), (1, 3));
        assert_eq!(err.kind.to_string(), "Unexpected token: foo}");
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_unexpected_end_of_input() {
        let err = parse_concat("{{").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
        assert_eq!((err.line, err.column), (1, 3));
        assert_eq!(error_kind(parse_expression("f(")), ParseErrorKind::UnexpectedEof);
        assert_eq!(
            error_kind(parse_concat("{{ add(1, g(2) }}")),
            ParseErrorKind::unexpected_token("}}")
        );
        assert_eq!(
            error_kind(parse_concat("{{ add(1,\n 2")),
            ParseErrorKind::UnexpectedEof
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_second_statement_is_rejected() {
        assert_eq!(
            error_kind(parse_expression("1 2")),
            ParseErrorKind::unexpected_token("2")
        );
        assert_eq!(
            error_kind(parse_expression("f(1 2)")),
            ParseErrorKind::unexpected_token("2")
        );
        assert_eq!(
            error_kind(parse_expression("foo (1)")),
            ParseErrorKind::unexpected_token("(")
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_missing_operands() {
        assert_eq!(
            error_kind(parse_expression("+ 1")),
            ParseErrorKind::MissingLeftOperand {
                operator: "+".to_string()
            }
        );
        assert_eq!(
            error_kind(parse_expression("1 +")),
            ParseErrorKind::MissingRightOperand {
                operator: "+".to_string()
            }
        );
        assert_eq!(
            error_kind(parse_expression("f(, 1)")),
            ParseErrorKind::unexpected_token(",")
        );
        assert_eq!(
            error_kind(parse_expression("1 + * 2")),
            ParseErrorKind::UnexpectedRightOperand {
                token: "*".to_string()
            }
        );
        assert_eq!(
            error_kind(parse_concat("{{ 1 + }}")),
            ParseErrorKind::UnexpectedRightOperand {
                token: "}}".to_string()
            }
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_misplaced_punctuation() {
        assert_eq!(
            error_kind(parse_expression("}}")),
            ParseErrorKind::unexpected_token("}}")
        );
        assert_eq!(
            error_kind(parse_expression("1, 2")),
            ParseErrorKind::unexpected_token(",")
        );
        assert_eq!(
            error_kind(parse_expression("1)")),
            ParseErrorKind::unexpected_token(")")
        );
        assert_eq!(
            error_kind(parse_expression("f(1,)")),
            ParseErrorKind::unexpected_token(")")
        );
        assert_eq!(
            error_kind(parse_concat("{{ {{ }}")),
            ParseErrorKind::unexpected_token("{{")
        );
        assert_eq!(
            error_kind(parse_expression("a.")),
            ParseErrorKind::unexpected_token("a.")
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_error_position_on_later_line() {
        let err = parse_expression("1\n  + 2\n  ?").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::unexpected_token("?"));
        assert_eq!((err.line, err.column), (3, 3));
    }
}
