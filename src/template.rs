use crate::ast::{BinaryOperator, Node};
use crate::error::CurlexResult;
use crate::evaluator::evaluate;
use crate::interface::{Context, Methods};
use crate::parser::{Mode, parse};
use crate::tokenizer::tokenize;
use crate::value::Value;

/// A compiled expression or text template.
///
/// The source is tokenized and parsed once; the resulting tree is then
/// evaluated against as many contexts as needed.
///
/// # Example
///
/// ```rust
/// use curlex::{Context, Template, Value};
///
/// let template = Template::new("metadata.count % 2").unwrap();
///
/// let metadata: Value = [("count", 3)].into_iter().collect();
/// let mut context = Context::new();
/// context.insert("metadata", metadata);
///
/// assert_eq!(template.evaluate(&context).unwrap(), Value::from(1));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    mode: Mode,
    #[cfg_attr(feature = "serde", serde(skip))]
    ast: Node,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Template {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct TemplateHelper {
            source: String,
            #[serde(default)]
            mode: Mode,
        }

        let helper = TemplateHelper::deserialize(deserializer)?;

        // The tree is not serialized; rebuild it from the source.
        Self::with_mode(helper.source, helper.mode)
            .map_err(|e| serde::de::Error::custom(format!("Failed to parse template: {}", e)))
    }
}

impl Template {
    /// Compile `source` as a single expression.
    ///
    /// # Errors
    ///
    /// Returns `CurlexError::Parse` if the expression is malformed.
    pub fn new<T: Into<String>>(source: T) -> CurlexResult<Self> {
        Self::with_mode(source, Mode::Expression)
    }

    /// Compile `source` as text with `{{ expression }}` interpolations.
    ///
    /// ```
    /// use curlex::{Context, Template, Value};
    ///
    /// let template = Template::concat("Hello, {{ name }}!").unwrap();
    /// let mut context = Context::new();
    /// context.insert("name", "World");
    ///
    /// assert_eq!(template.evaluate(&context).unwrap(), Value::from("Hello, World!"));
    /// ```
    pub fn concat<T: Into<String>>(source: T) -> CurlexResult<Self> {
        Self::with_mode(source, Mode::Concat)
    }

    pub fn with_mode<T: Into<String>>(source: T, mode: Mode) -> CurlexResult<Self> {
        let source = source.into();
        let ast = parse(&tokenize(&source), mode)?;
        Ok(Self { source, mode, ast })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn ast(&self) -> &Node {
        &self.ast
    }

    /// Evaluate with no methods available.
    pub fn evaluate(&self, context: &Context) -> CurlexResult<Value> {
        self.evaluate_with(context, &Methods::default())
    }

    /// # Errors
    ///
    /// * `CurlexError::UnknownMethod` - a call or pipe names an unregistered method
    /// * `CurlexError::InvalidPipeTarget` - the right side of `|` is not a method
    pub fn evaluate_with(&self, context: &Context, methods: &Methods) -> CurlexResult<Value> {
        evaluate(&self.ast, context, methods)
    }

    /// Dotted variable paths read by this template, sorted and deduplicated.
    ///
    /// Names used as pipe targets refer to methods and are not included.
    pub fn variables(&self) -> Vec<String> {
        let mut variables = Vec::new();
        collect_variables_from_node(&self.ast, &mut variables);
        variables.sort();
        variables.dedup();
        variables
    }
}

fn collect_variables_from_node(root: &Node, variables: &mut Vec<String>) {
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        match node {
            Node::Concat { parts } => pending.extend(parts),
            Node::Expression { statement } => pending.extend(statement.as_deref()),
            Node::Variable { path } => variables.push(path.join(".")),
            Node::Function { args, .. } => pending.extend(args),
            Node::BinaryOp {
                operator: BinaryOperator::Pipe,
                left,
                right,
            } => {
                pending.push(left);
                // A bare name on the right is a method reference.
                if let Node::Function { args, .. } = right.as_ref() {
                    pending.extend(args);
                }
            }
            Node::BinaryOp { left, right, .. } => {
                pending.push(left);
                pending.push(right);
            }
            Node::Number(_) | Node::String(_) | Node::Boolean(_) => {}
        }
    }
}

/// Compile `source` as an expression. Shorthand for [`Template::new`].
pub fn compile_template<T: Into<String>>(source: T) -> CurlexResult<Template> {
    Template::new(source)
}

/// Compile and evaluate an expression in one step, with no methods available.
pub fn evaluate_template<T: Into<String>>(source: T, context: &Context) -> CurlexResult<Value> {
    compile_template(source)?.evaluate(context)
}
