//! Declared result types and raw domain values.

use std::fmt;

/// Declared result type of a criteria node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    Int32,
    Int64,
    Double,
    String,
    Character,
    Date,
    Time,
    Timestamp,
    /// Collection of elements of the inner type
    Collection(Box<ValueType>),
    /// Managed entity, identified by entity name
    Entity(String),
    /// Unconstrained type; compatible with everything
    Object,
}

impl ValueType {
    pub fn collection_of(element: ValueType) -> Self {
        ValueType::Collection(Box::new(element))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Int32 | ValueType::Int64 | ValueType::Double
        )
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, ValueType::Int32 | ValueType::Int64)
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, ValueType::String | ValueType::Character)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            ValueType::Date | ValueType::Time | ValueType::Timestamp
        )
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ValueType::Collection(_))
    }

    /// Element type of a collection type
    pub fn element_type(&self) -> Option<&ValueType> {
        match self {
            ValueType::Collection(element) => Some(element),
            _ => None,
        }
    }

    /// Check whether values of the two types may be compared or mixed.
    ///
    /// `Object` is compatible with anything. Numeric types mix freely, as do
    /// strings and characters.
    pub fn is_compatible_with(&self, other: &ValueType) -> bool {
        if self == other {
            return true;
        }

        match (self, other) {
            (ValueType::Object, _) | (_, ValueType::Object) => true,
            (a, b) if a.is_numeric() && b.is_numeric() => true,
            (a, b) if a.is_textual() && b.is_textual() => true,
            (ValueType::Collection(a), ValueType::Collection(b)) => a.is_compatible_with(b),
            _ => false,
        }
    }

    /// Get the display name for this type
    pub fn name(&self) -> String {
        match self {
            ValueType::Boolean => "Boolean".to_string(),
            ValueType::Int32 => "Integer".to_string(),
            ValueType::Int64 => "Long".to_string(),
            ValueType::Double => "Double".to_string(),
            ValueType::String => "String".to_string(),
            ValueType::Character => "Character".to_string(),
            ValueType::Date => "Date".to_string(),
            ValueType::Time => "Time".to_string(),
            ValueType::Timestamp => "Timestamp".to_string(),
            ValueType::Collection(element) => format!("Collection<{}>", element.name()),
            ValueType::Entity(name) => name.clone(),
            ValueType::Object => "Object".to_string(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raw domain value carried by constants and simple-case keys
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    String(String),
    Character(char),
    Collection(Vec<Datum>),
}

impl Datum {
    /// Get the runtime type of this value
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Datum::Null => None,
            Datum::Boolean(_) => Some(ValueType::Boolean),
            Datum::Int32(_) => Some(ValueType::Int32),
            Datum::Int64(_) => Some(ValueType::Int64),
            Datum::Double(_) => Some(ValueType::Double),
            Datum::String(_) => Some(ValueType::String),
            Datum::Character(_) => Some(ValueType::Character),
            Datum::Collection(items) => {
                let element = items
                    .iter()
                    .find_map(Datum::value_type)
                    .unwrap_or(ValueType::Object);
                Some(ValueType::collection_of(element))
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    /// Integral value, if this is an integral number
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Datum::Int32(v) => Some(i64::from(*v)),
            Datum::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Plain text of this value, without the quoting `Display` adds
    pub fn to_text(&self) -> String {
        match self {
            Datum::String(s) => s.clone(),
            Datum::Character(c) => c.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => write!(f, "null"),
            Datum::Boolean(v) => write!(f, "{}", v),
            Datum::Int32(v) => write!(f, "{}", v),
            Datum::Int64(v) => write!(f, "{}", v),
            Datum::Double(v) => write!(f, "{}", v),
            Datum::String(s) => write!(f, "\"{}\"", s),
            Datum::Character(c) => write!(f, "'{}'", c),
            Datum::Collection(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Datum {
    fn from(v: bool) -> Self {
        Datum::Boolean(v)
    }
}

impl From<i32> for Datum {
    fn from(v: i32) -> Self {
        Datum::Int32(v)
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::Int64(v)
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Double(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::String(v.to_string())
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Datum::String(v)
    }
}

impl From<char> for Datum {
    fn from(v: char) -> Self {
        Datum::Character(v)
    }
}

impl<T: Into<Datum>> From<Vec<T>> for Datum {
    fn from(v: Vec<T>) -> Self {
        Datum::Collection(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datum_value_type() {
        assert_eq!(Datum::Null.value_type(), None);
        assert_eq!(Datum::from(true).value_type(), Some(ValueType::Boolean));
        assert_eq!(Datum::from(42).value_type(), Some(ValueType::Int32));
        assert_eq!(Datum::from(42i64).value_type(), Some(ValueType::Int64));
        assert_eq!(Datum::from(1.5).value_type(), Some(ValueType::Double));
        assert_eq!(Datum::from("x").value_type(), Some(ValueType::String));
        assert_eq!(Datum::from('x').value_type(), Some(ValueType::Character));
        assert_eq!(
            Datum::from(vec![1, 2]).value_type(),
            Some(ValueType::collection_of(ValueType::Int32))
        );
        assert_eq!(
            Datum::Collection(vec![]).value_type(),
            Some(ValueType::collection_of(ValueType::Object))
        );
    }

    #[test]
    fn test_type_compatibility() {
        assert!(ValueType::Int32.is_compatible_with(&ValueType::Int32));
        assert!(ValueType::Int32.is_compatible_with(&ValueType::Double));
        assert!(ValueType::String.is_compatible_with(&ValueType::Character));
        assert!(ValueType::Object.is_compatible_with(&ValueType::Date));
        assert!(ValueType::Date.is_compatible_with(&ValueType::Object));

        assert!(!ValueType::Int32.is_compatible_with(&ValueType::String));
        assert!(!ValueType::Boolean.is_compatible_with(&ValueType::Int64));
        assert!(!ValueType::Entity("Employee".to_string())
            .is_compatible_with(&ValueType::Entity("Department".to_string())));
    }

    #[test]
    fn test_type_classification() {
        assert!(ValueType::Int64.is_integral());
        assert!(!ValueType::Double.is_integral());
        assert!(ValueType::Double.is_numeric());
        assert!(ValueType::Timestamp.is_temporal());

        let tags = ValueType::collection_of(ValueType::String);
        assert!(tags.is_collection());
        assert_eq!(tags.element_type(), Some(&ValueType::String));
        assert_eq!(ValueType::String.element_type(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Datum::from(-5).to_string(), "-5");
        assert_eq!(Datum::from("A%_").to_string(), "\"A%_\"");
        assert_eq!(Datum::from('*').to_string(), "'*'");
        assert_eq!(Datum::from('*').to_text(), "*");
        assert_eq!(Datum::from(vec!["a", "b"]).to_string(), "[\"a\", \"b\"]");
        assert_eq!(
            ValueType::collection_of(ValueType::Int64).to_string(),
            "Collection<Long>"
        );
    }
}
