use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::Value;

/// Variable bindings that expressions are evaluated against.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Context {
    data: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<N: Into<String>, V: Into<Value>>(&mut self, name: N, value: V) -> &mut Self {
        self.data.insert(name.into(), value.into());
        self
    }

    pub fn get<T: AsRef<str>>(&self, name: T) -> Option<&Value> {
        self.data.get(name.as_ref())
    }

    pub fn contains<T: AsRef<str>>(&self, name: T) -> bool {
        self.data.contains_key(name.as_ref())
    }

    /// Follow a dotted accessor path.
    ///
    /// Only keys that are actually present are followed: object keys, array
    /// and string indices, and the `length` of arrays and strings. Anything else
    /// resolves to [`Value::Undefined`].
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Value {
        let Some((first, rest)) = path.split_first() else {
            return Value::Undefined;
        };
        self.get(first)
            .map_or(Value::Undefined, |value| resolve_path(value, rest))
    }
}

fn resolve_path<S: AsRef<str>>(value: &Value, path: &[S]) -> Value {
    let mut current = value;
    for (position, segment) in path.iter().enumerate() {
        let segment = segment.as_ref();
        let rest = path.get(position + 1..).unwrap_or_default();
        match current {
            Value::Object(map) => match map.get(segment) {
                Some(next) => current = next,
                None => return Value::Undefined,
            },
            Value::Array(items) if segment == "length" => {
                return resolve_path(&Value::from(items.len()), rest);
            }
            Value::Array(items) => match parse_index(segment).and_then(|index| items.get(index)) {
                Some(next) => current = next,
                None => return Value::Undefined,
            },
            Value::String(string) if segment == "length" => {
                return resolve_path(&Value::from(string.encode_utf16().count()), rest);
            }
            // Indices address UTF-16 code units.
            Value::String(string) => {
                return parse_index(segment)
                    .and_then(|index| string.encode_utf16().nth(index))
                    .map_or(Value::Undefined, |unit| {
                        resolve_path(&Value::String(String::from_utf16_lossy(&[unit])), rest)
                    });
            }
            Value::Null | Value::Undefined | Value::Boolean(_) | Value::Number(_) => {
                return Value::Undefined;
            }
        }
    }
    current.clone()
}

/// Canonical decimal array index: no sign, no leading zeros.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty()
        || (segment.len() > 1 && segment.starts_with('0'))
        || !segment.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    segment.parse().ok()
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// A callable registered under a name. Arguments are passed positionally.
pub type Method = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Named functions available to calls such as `add(1, 2)` and pipes such as
/// `value | inc`.
#[derive(Clone, Default)]
pub struct Methods {
    table: HashMap<String, Arc<Method>>,
}

impl Methods {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<N, F>(&mut self, name: N, method: F) -> &mut Self
    where
        N: Into<String>,
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.table.insert(name.into(), Arc::new(method));
        self
    }

    pub fn get<T: AsRef<str>>(&self, name: T) -> Option<&Method> {
        self.table.get(name.as_ref()).map(|method| method.as_ref())
    }

    pub fn contains<T: AsRef<str>>(&self, name: T) -> bool {
        self.table.contains_key(name.as_ref())
    }
}

impl fmt::Debug for Methods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Methods").field("names", &names).finish()
    }
}
