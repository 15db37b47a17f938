//! Runtime object model for the Ember interpreter.
//!
//! Arrays, hashes and functions are shared handles: cloning an [`Object`]
//! never deep-copies them, and `==` in the language compares them by identity.

use std::fmt;
use std::rc::Rc;

use ember_parser::FunctionLiteral;
use indexmap::IndexMap;

use crate::environment::Environment;
use crate::error::Result;

/// Native function signature used by the builtin registry
pub type BuiltinFunction = fn(&[Object]) -> Result<Object>;

/// Runtime values
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Rc<Vec<Object>>),
    Hash(Rc<IndexMap<HashKey, HashPair>>),
    Function(Rc<Function>),
    Builtin(Builtin),
    /// Runtime fault as seen from the outside
    Error(String),
}

/// A closure: the function literal plus the scope it was defined in
#[derive(Debug)]
pub struct Function {
    pub literal: Rc<FunctionLiteral>,
    pub env: Environment,
}

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub function: BuiltinFunction,
}

/// Key derived from a hashable object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

/// Stored hash entry; the original key object is kept for inspection
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Error(_) => "ERROR",
        }
    }

    /// `null` and `false` are falsy, everything else is truthy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    /// Hash key for this object, or `None` if it cannot be used as one
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            Object::String(value) => Some(HashKey::String(value.clone())),
            _ => None,
        }
    }

    /// Language-level equality for two objects of the same type
    ///
    /// Scalars compare by value; arrays, hashes and functions compare by
    /// identity; builtins compare by name.
    pub fn is_identical(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::Array(a), Object::Array(b)) => Rc::ptr_eq(a, b),
            (Object::Hash(a), Object::Hash(b)) => Rc::ptr_eq(a, b),
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }

    /// Inspection text, as printed by the REPL
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    pub fn array(elements: Vec<Object>) -> Self {
        Object::Array(Rc::new(elements))
    }
}

/// Structural equality, used by tests and the session harness
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::Hash(a), Object::Hash(b)) => a == b,
            (Object::Error(a), Object::Error(b)) => a == b,
            _ => self.is_identical(other),
        }
    }
}

impl From<HashKey> for Object {
    fn from(key: HashKey) -> Self {
        match key {
            HashKey::Integer(value) => Object::Integer(value),
            HashKey::Boolean(value) => Object::Boolean(value),
            HashKey::String(value) => Object::String(value),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{value}"),
            Object::Boolean(value) => write!(f, "{value}"),
            Object::String(value) => write!(f, "\"{value}\""),
            Object::Null => f.write_str("null"),
            Object::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Object::Hash(pairs) => {
                f.write_str("{")?;
                for (i, pair) in pairs.values().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                f.write_str("}")
            }
            Object::Function(function) => {
                f.write_str("func(")?;
                for (i, param) in function.literal.parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") {}", function.literal.body)
            }
            Object::Builtin(_) => f.write_str("builtin function"),
            Object::Error(message) => write!(f, "Error:{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(pairs: &[(Object, Object)]) -> Object {
        let mut map = IndexMap::new();
        for (key, value) in pairs {
            if let Some(hash_key) = key.hash_key() {
                map.insert(
                    hash_key,
                    HashPair {
                        key: key.clone(),
                        value: value.clone(),
                    },
                );
            }
        }
        Object::Hash(Rc::new(map))
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Object::Integer(1).type_name(), "INTEGER");
        assert_eq!(Object::Null.type_name(), "NULL");
        assert_eq!(Object::array(vec![]).type_name(), "ARRAY");
        assert_eq!(Object::Error("x".into()).type_name(), "ERROR");
    }

    #[test]
    fn test_truthiness() {
        assert!(Object::Integer(0).is_truthy());
        assert!(Object::String(String::new()).is_truthy());
        assert!(Object::array(vec![]).is_truthy());
        assert!(!Object::Null.is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
    }

    #[test]
    fn test_equal_values_share_hash_keys() {
        assert_eq!(
            Object::String("name".into()).hash_key(),
            Object::String("name".into()).hash_key()
        );
        assert_ne!(
            Object::Integer(1).hash_key(),
            Object::Boolean(true).hash_key()
        );
        assert_eq!(Object::array(vec![]).hash_key(), None);
    }

    #[test]
    fn test_inspection() {
        let array = Object::array(vec![
            Object::Integer(1),
            Object::String("two".into()),
            Object::Null,
        ]);
        assert_eq!(array.inspect(), "[1, \"two\", null]");

        let map = hash(&[
            (Object::String("b".into()), Object::Integer(2)),
            (Object::Integer(1), Object::Boolean(true)),
        ]);
        assert_eq!(map.inspect(), "{\"b\": 2, 1: true}");

        assert_eq!(
            Object::Error("division by zero".into()).inspect(),
            "Error:division by zero"
        );
    }

    #[test]
    fn test_identity_versus_structure() {
        let a = Object::array(vec![Object::Integer(1)]);
        let b = Object::array(vec![Object::Integer(1)]);
        assert!(a.is_identical(&a.clone()));
        assert!(!a.is_identical(&b));
        assert_eq!(a, b);
    }
}
