//! Runtime values.
//!
//! Every bind site clones the value it stores. `Clone` on [`Value`] is the
//! deep copy the language promises: struct fields are copied recursively,
//! and `Rc<str>` only shares immutable text, so no mutation is ever visible
//! through two bindings.

use std::fmt;
use std::rc::Rc;

use meta_ir::{Name, StringInterner};

/// A runtime value.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Int(i32),
    Str(Rc<str>),
    /// Produced only by comparison operators; there is no `bool` type or
    /// literal in the surface language.
    Bool(bool),
    Struct(StructValue),
    /// The result of a procedure that never hits `return`, and of
    /// expression statements.
    Unit,
}

impl Value {
    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Value::Str(text.into())
    }

    /// The value's type as shown in diagnostics.
    pub fn type_name(&self, interner: &StringInterner) -> &'static str {
        match self {
            Value::Int(_) => "i32",
            Value::Str(_) => "String",
            Value::Bool(_) => "bool",
            Value::Struct(s) => interner.lookup(s.type_name),
            Value::Unit => "()",
        }
    }
}

/// A struct instance: its type plus one value per declared field, in
/// declaration order.
#[derive(Clone, PartialEq, Debug)]
pub struct StructValue {
    pub type_name: Name,
    fields: Vec<(Name, Value)>,
}

impl StructValue {
    pub fn new(type_name: Name, fields: Vec<(Name, Value)>) -> Self {
        StructValue { type_name, fields }
    }

    pub fn field(&self, name: Name) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn field_mut(&mut self, name: Name) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Struct(_) => write!(f, "<struct>"),
            Value::Unit => write!(f, "()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clone_is_deep_for_structs() {
        let interner = StringInterner::new();
        let ty = interner.intern("Person");
        let age = interner.intern("age");

        let original = StructValue::new(ty, vec![(age, Value::Int(22))]);
        let mut copy = original.clone();
        if let Some(slot) = copy.field_mut(age) {
            *slot = Value::Int(23);
        }

        assert_eq!(original.field(age), Some(&Value::Int(22)));
        assert_eq!(copy.field(age), Some(&Value::Int(23)));
    }

    #[test]
    fn test_type_name() {
        let interner = StringInterner::new();
        let car = interner.intern("Car");
        assert_eq!(Value::Int(1).type_name(&interner), "i32");
        assert_eq!(Value::string("x").type_name(&interner), "String");
        assert_eq!(Value::Unit.type_name(&interner), "()");
        assert_eq!(
            Value::Struct(StructValue::new(car, Vec::new())).type_name(&interner),
            "Car"
        );
    }
}
