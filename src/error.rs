pub type CurlexResult<T> = std::result::Result<T, CurlexError>;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A token that is not valid where it appeared.
    UnexpectedToken { token: String },
    /// The token following a binary operator is not an operand.
    UnexpectedRightOperand { token: String },
    MissingLeftOperand { operator: String },
    MissingRightOperand { operator: String },
    /// An `{{` block or a `(` argument list was never closed.
    UnexpectedEof,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token } => write!(f, "Unexpected token: {}", token),
            Self::UnexpectedRightOperand { token } => {
                write!(f, "Unexpected right operand: {}", token)
            }
            Self::MissingLeftOperand { operator } => {
                write!(f, "Missing left operand: {}", operator)
            }
            Self::MissingRightOperand { operator } => {
                write!(f, "Missing right operand: {}", operator)
            }
            Self::UnexpectedEof => write!(f, "Unexpected end of input"),
        }
    }
}

impl std::error::Error for ParseErrorKind {}

impl ParseErrorKind {
    pub(crate) fn unexpected_token<T: Into<String>>(token: T) -> Self {
        Self::UnexpectedToken {
            token: token.into(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub kind: ParseErrorKind,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.line, self.column, self.kind
        )
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CurlexError {
    Parse(ParseError),
    /// A function call or pipe named a method that is not registered.
    UnknownMethod {
        name: String,
    },
    /// The right side of `|` was neither a bare name nor a function call.
    InvalidPipeTarget {
        found: String,
    },
    TemplateExists {
        template_name: String,
    },
    MissingTemplate {
        template_name: String,
    },
}

impl std::fmt::Display for CurlexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(parse_error) => write!(f, "{}", parse_error),
            Self::UnknownMethod { name } => write!(f, "Unknown method: {}", name),
            Self::InvalidPipeTarget { found } => {
                write!(f, "Invalid pipe right-hand side: {}", found)
            }
            Self::TemplateExists { template_name } => {
                write!(f, "Template already exists: {}", template_name)
            }
            Self::MissingTemplate { template_name } => {
                write!(f, "Template not found: {}", template_name)
            }
        }
    }
}

impl std::error::Error for CurlexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(parse_error) => Some(parse_error),
            Self::UnknownMethod { .. }
            | Self::InvalidPipeTarget { .. }
            | Self::TemplateExists { .. }
            | Self::MissingTemplate { .. } => None,
        }
    }
}

impl From<ParseError> for CurlexError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    #[ntest::timeout(100)]
    fn test_parse_error_display_names_position_and_token() {
        let error = ParseError {
            line: 1,
            column: 3,
            kind: ParseErrorKind::unexpected_token("foo}"),
        };
        assert_eq!(
            error.to_string(),
            "Parse error at line 1, column 3: Unexpected token: foo}"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_curlex_error_chains_parse_source() {
        let error: CurlexError = ParseError {
            line: 2,
            column: 1,
            kind: ParseErrorKind::UnexpectedEof,
        }
        .into();
        let source = error.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("Parse error at line 2, column 1: Unexpected end of input")
        );
        assert!(
            CurlexError::UnknownMethod {
                name: "f".to_string()
            }
            .source()
            .is_none(),
            "runtime errors have no source"
        );
    }
}
