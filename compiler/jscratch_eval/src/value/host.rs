//! Host object and class capabilities.
//!
//! Objects and classes are owned by the host runtime. The interpreter reads
//! them through these traits and never inspects their representation; host
//! implementations downcast through `as_any` when they receive their own
//! values back from a bridge call.

use std::any::Any;
use std::rc::Rc;

use super::Value;
use crate::bridge::HostException;

/// Shared handle to a host object.
pub type ObjectRef = Rc<dyn HostObject>;

/// Shared handle to a host class.
pub type ClassRef = Rc<dyn HostClass>;

/// An instance living in the host runtime.
pub trait HostObject {
    /// Qualified class name, e.g. `java.awt.Point`.
    fn class_name(&self) -> &str;

    /// Reflective read of a public field.
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }

    /// The property accessor protocol, for objects that expose one.
    ///
    /// Unresolved `getX()`/`isX()`/`setX(v)` calls are routed here.
    fn properties(&self) -> Option<&dyn PropertyAccess> {
        None
    }

    /// Snapshot of the elements, for objects usable in for-each.
    fn iter_values(&self) -> Option<Vec<Value>> {
        None
    }

    /// `toString()` text.
    fn display(&self) -> String {
        self.class_name().to_string()
    }

    fn as_any(&self) -> &dyn Any;
}

/// Named property access, e.g. a bean or a UI node with observable
/// properties.
pub trait PropertyAccess {
    fn get_property(&self, name: &str) -> Option<Value>;

    /// Returns `false` when the property does not exist or is read-only.
    fn set_property(&self, name: &str, value: Value) -> bool;
}

/// A class living in the host runtime.
pub trait HostClass {
    /// Qualified class name.
    fn name(&self) -> &str;

    /// Instantiate through the public no-argument constructor.
    fn new_instance(&self) -> Result<Value, HostException>;

    /// Reflective read of a public static field.
    fn static_field(&self, _name: &str) -> Option<Value> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}
