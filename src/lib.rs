//! A small expression and template language.
//!
//! Sources are split into tokens, parsed into a syntax tree, and the tree is
//! evaluated against a [`Context`] of variables and a table of [`Methods`]:
//!
//! ```
//! use curlex::{Context, Methods, Mode, Value, evaluate, parse, tokenize};
//!
//! let ast = parse(&tokenize("Total: {{ price * count | round }}"), Mode::Concat).unwrap();
//!
//! let mut methods = Methods::new();
//! methods.register("round", |args| {
//!     Value::from(args.first().map_or(f64::NAN, Value::to_number).round())
//! });
//! let context: Context = [("price", 2.4), ("count", 3.0)].into_iter().collect();
//!
//! assert_eq!(evaluate(&ast, &context, &methods).unwrap(), Value::from("Total: 7"));
//! ```

mod ast;
mod engine;
mod error;
mod evaluator;
mod interface;
mod parser;
mod template;
mod tokenizer;
mod value;

// Public exports.
pub use ast::{BinaryOperator, Node};
pub use engine::Engine;
pub use error::{CurlexError, CurlexResult, ParseError, ParseErrorKind};
pub use evaluator::evaluate;
pub use interface::{Context, Method, Methods};
pub use parser::{Mode, parse};
pub use template::{Template, compile_template, evaluate_template};
pub use tokenizer::{Token, tokenize};
pub use value::Value;
