//! Array values.
//!
//! Arrays are shared mutable references: every alias observes element
//! writes, as in Java.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use jscratch_ir::PrimitiveType;

use super::Value;
use crate::stack::ensure_sufficient_stack;

/// Element type of an array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentType {
    Primitive(PrimitiveType),
    /// Reference component named by its type, e.g. `java.lang.String` or `int[]`.
    Reference(Rc<str>),
}

impl ComponentType {
    /// Value of a freshly allocated element.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Primitive(p) => Value::zero_of(*p),
            Self::Reference(_) => Value::Null,
        }
    }

    pub fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(p) => Some(*p),
            Self::Reference(_) => None,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.keyword()),
            Self::Reference(name) => f.write_str(name),
        }
    }
}

struct ArrayData {
    component: ComponentType,
    elements: RefCell<Vec<Value>>,
}

/// Shared handle to an array.
#[derive(Clone)]
pub struct ArrayRef(Rc<ArrayData>);

impl ArrayRef {
    pub fn new(component: ComponentType, elements: Vec<Value>) -> Self {
        ArrayRef(Rc::new(ArrayData {
            component,
            elements: RefCell::new(elements),
        }))
    }

    /// An array of `len` default-initialized elements.
    pub fn with_len(component: ComponentType, len: usize) -> Self {
        let elements = vec![component.default_value(); len];
        Self::new(component, elements)
    }

    pub fn component(&self) -> &ComponentType {
        &self.0.component
    }

    pub fn len(&self) -> usize {
        self.0.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, `None` when out of range (including negative).
    pub fn get(&self, index: i32) -> Option<Value> {
        let index = usize::try_from(index).ok()?;
        self.0.elements.borrow().get(index).cloned()
    }

    /// Store at `index`; returns `false` when out of range.
    pub fn set(&self, index: i32, value: Value) -> bool {
        let Ok(index) = usize::try_from(index) else {
            return false;
        };
        match self.0.elements.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Copy of the current elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.elements.borrow().clone()
    }

    /// `int[]`, `java.lang.String[]`, ...
    pub fn type_name(&self) -> String {
        format!("{}[]", self.0.component)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl ArrayRef {
    /// Write `[a, b, ...]`, recursing into nested arrays.
    ///
    /// `open` holds the arrays being written further up; meeting one again
    /// writes `[...]`, as `Arrays.deepToString` does.
    pub(super) fn write_elements(
        &self,
        f: &mut fmt::Formatter<'_>,
        open: &mut Vec<ArrayRef>,
        debug: bool,
    ) -> fmt::Result {
        if open.iter().any(|array| array.ptr_eq(self)) {
            return f.write_str("[...]");
        }
        open.push(self.clone());
        let result = self.write_each(f, open, debug);
        open.pop();
        result
    }

    fn write_each(
        &self,
        f: &mut fmt::Formatter<'_>,
        open: &mut Vec<ArrayRef>,
        debug: bool,
    ) -> fmt::Result {
        f.write_str("[")?;
        for (i, element) in self.to_vec().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match element {
                Value::Array(inner) if debug => {
                    write!(f, "Array({}", inner.type_name())?;
                    ensure_sufficient_stack(|| inner.write_elements(f, open, debug))?;
                    f.write_str(")")?;
                }
                Value::Array(inner) => {
                    ensure_sufficient_stack(|| inner.write_elements(f, open, debug))?;
                }
                other if debug => write!(f, "{other:?}")?,
                other => write!(f, "{other}")?,
            }
        }
        f.write_str("]")
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())?;
        self.write_elements(f, &mut Vec::new(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_observe_writes() {
        let a = ArrayRef::with_len(ComponentType::Primitive(PrimitiveType::Int), 3);
        let b = a.clone();
        assert!(a.set(1, Value::Int(7)));
        assert_eq!(b.get(1), Some(Value::Int(7)));
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn out_of_range_access() {
        let a = ArrayRef::with_len(ComponentType::Reference("java.lang.String".into()), 2);
        assert_eq!(a.get(0), Some(Value::Null));
        assert_eq!(a.get(2), None);
        assert_eq!(a.get(-1), None);
        assert!(!a.set(-1, Value::Null));
    }

    #[test]
    fn self_containing_array_debug_stops_at_the_cycle() {
        let a = ArrayRef::with_len(ComponentType::Reference("java.lang.Object".into()), 2);
        assert!(a.set(0, Value::Array(a.clone())));
        assert_eq!(
            format!("{a:?}"),
            "java.lang.Object[][Array(java.lang.Object[][...]), Null]"
        );
    }

    #[test]
    fn default_elements_follow_component() {
        let a = ArrayRef::with_len(ComponentType::Primitive(PrimitiveType::Boolean), 1);
        assert_eq!(a.get(0), Some(Value::Bool(false)));
        let d = ArrayRef::with_len(ComponentType::Primitive(PrimitiveType::Double), 1);
        assert_eq!(d.get(0), Some(Value::Double(0.0)));
        assert_eq!(d.type_name(), "double[]");
    }
}
