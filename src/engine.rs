use std::collections::HashMap;

use crate::error::{CurlexError, CurlexResult};
use crate::interface::{Context, Methods};
use crate::parser::Mode;
use crate::template::Template;
use crate::value::{Value, format_number};

/// A registry of named templates sharing one method table.
///
/// # Examples
///
/// ```
/// use curlex::{Context, Engine, Mode, Value};
///
/// let mut engine = Engine::new();
/// engine.register_method("shout", |args| {
///     Value::from(args.first().map(|v| v.to_string().to_uppercase()).unwrap_or_default())
/// });
/// engine.add_template("greeting", "Hello, {{ name | shout }}!", Mode::Concat).unwrap();
///
/// let mut context = Context::new();
/// context.insert("name", "World");
///
/// let output = engine.render("greeting", &context).unwrap();
/// assert_eq!(output, Value::from("Hello, WORLD!"));
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    templates: HashMap<String, Template>,
    methods: Methods,
}

impl Engine {
    /// Creates an engine with no templates and the built-in methods.
    pub fn new() -> Self {
        let mut engine = Self::default();
        engine.register_builtins();
        engine
    }

    /// Creates an engine that calls only the methods in `methods`.
    pub fn with_methods(methods: Methods) -> Self {
        Self {
            templates: HashMap::new(),
            methods,
        }
    }

    fn register_builtins(&mut self) {
        self.methods
            .register("string", |args| {
                Value::String(args.first().map(Value::to_template_string).unwrap_or_default())
            })
            .register("number", |args| {
                Value::Number(args.first().map_or(0.0, Value::to_number))
            })
            .register("fixed", |args| {
                let number = args.first().map_or(f64::NAN, Value::to_number);
                let digits = args.get(1).map_or(0.0, Value::to_number);
                if !number.is_finite() || !(0.0..=100.0).contains(&digits) {
                    return Value::String(format_number(number));
                }
                Value::String(format!("{:.*}", digits as usize, number))
            });
    }

    pub fn register_method<N, F>(&mut self, name: N, method: F) -> &mut Self
    where
        N: Into<String>,
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.methods.register(name, method);
        self
    }

    pub const fn methods(&self) -> &Methods {
        &self.methods
    }

    /// Compiles `source` and stores it under `name`.
    ///
    /// # Errors
    ///
    /// * `CurlexError::TemplateExists` if a template with the given name already exists
    /// * `CurlexError::Parse` if the source contains syntax errors
    pub fn add_template<N: AsRef<str>, S: Into<String>>(
        &mut self,
        name: N,
        source: S,
        mode: Mode,
    ) -> CurlexResult<()> {
        let name = name.as_ref();

        if self.templates.contains_key(name) {
            return Err(CurlexError::TemplateExists {
                template_name: name.to_string(),
            });
        }

        let template = Template::with_mode(source, mode)?;
        self.templates.insert(name.to_string(), template);

        Ok(())
    }

    pub fn template<N: AsRef<str>>(&self, name: N) -> Option<&Template> {
        self.templates.get(name.as_ref())
    }

    /// Evaluates the named template against `context`.
    ///
    /// # Errors
    ///
    /// * `CurlexError::MissingTemplate` if no template with the given name exists
    /// * evaluation errors from [`Template::evaluate_with`]
    pub fn render<N: AsRef<str>>(&self, template_name: N, context: &Context) -> CurlexResult<Value> {
        let name = template_name.as_ref();
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| CurlexError::MissingTemplate {
                template_name: name.to_string(),
            })?;

        template.evaluate_with(context, &self.methods)
    }

    /// Variable paths the named template reads that do not resolve against `context`.
    ///
    /// Returns an empty vector if the template doesn't exist.
    pub fn missing_variables<N: AsRef<str>>(&self, template_name: N, context: &Context) -> Vec<String> {
        let Some(template) = self.templates.get(template_name.as_ref()) else {
            return vec![];
        };

        template
            .variables()
            .into_iter()
            .filter(|path| {
                let segments: Vec<&str> = path.split('.').collect();
                context.resolve(segments.as_slice()).is_undefined()
            })
            .collect()
    }
}
