//! A small in-process host for tests and embedder experiments.
//!
//! [`MockHost`] implements both [`HostBridge`] and [`ClassResolver`] over a
//! fixed set of classes:
//!
//! - `java.lang.System` with static `out`/`err` print streams
//! - `java.io.PrintStream` whose `print`/`println` write through [`capture`]
//! - `java.lang.Math` with static `max`, `abs`, `sqrt` and the `PI` field
//! - `java.lang.Integer.parseInt`, throwing `NumberFormatException`
//! - `java.lang.String` instance methods `length` and `toUpperCase`
//! - `java.awt.Point` with public `x`/`y` fields
//! - `java.util.ArrayList` (iterable)
//! - `com.example.Person`, a bean reached through the property protocol
//! - `com.example.Counter` with `increment()`/`get()` and a `count` field
//! - `javafx.scene.control.Button` storing an `onAction` handler
//!
//! [`capture`]: crate::capture

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use jscratch_ir::{ClassDecl, ConstructorDecl, MethodDecl, Name, SharedInterner};
use rustc_hash::FxHashMap;

use crate::bridge::{ClassResolver, HostBridge, HostException};
use crate::capture::{self, Stream};
use crate::coerce::char_code;
use crate::value::{ClassRef, HostClass, HostObject, PropertyAccess, Value};

/// Classes [`MockHost`] knows, by qualified name.
pub const KNOWN_CLASSES: &[&str] = &[
    "java.lang.System",
    "java.io.PrintStream",
    "java.lang.Math",
    "java.lang.Integer",
    "java.lang.String",
    "java.awt.Point",
    "java.util.ArrayList",
    "com.example.Person",
    "com.example.Counter",
    "javafx.scene.control.Button",
];

fn exception(class_name: &str, message: impl Into<String>) -> HostException {
    HostException::new(class_name, message)
}

fn illegal_argument(message: impl Into<String>) -> HostException {
    exception("java.lang.IllegalArgumentException", message)
}

// Host objects

/// `System.out` / `System.err`.
pub struct PrintStream {
    stream: Stream,
}

impl HostObject for PrintStream {
    fn class_name(&self) -> &str {
        "java.io.PrintStream"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `java.awt.Point` with mutable public fields.
pub struct Point {
    pub x: Cell<i32>,
    pub y: Cell<i32>,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point {
            x: Cell::new(x),
            y: Cell::new(y),
        }
    }
}

impl HostObject for Point {
    fn class_name(&self) -> &str {
        "java.awt.Point"
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "x" => Some(Value::Int(self.x.get())),
            "y" => Some(Value::Int(self.y.get())),
            _ => None,
        }
    }

    fn display(&self) -> String {
        format!("java.awt.Point[x={},y={}]", self.x.get(), self.y.get())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `java.util.ArrayList`.
#[derive(Default)]
pub struct ArrayList {
    elements: RefCell<Vec<Value>>,
}

impl ArrayList {
    pub fn from_values(values: Vec<Value>) -> Self {
        ArrayList {
            elements: RefCell::new(values),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }
}

impl HostObject for ArrayList {
    fn class_name(&self) -> &str {
        "java.util.ArrayList"
    }

    fn iter_values(&self) -> Option<Vec<Value>> {
        Some(self.elements.borrow().clone())
    }

    fn display(&self) -> String {
        let items: Vec<String> = self.elements.borrow().iter().map(Value::to_string).collect();
        format!("[{}]", items.join(", "))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A bean with named properties.
///
/// Only properties present at construction exist; setting an unknown one
/// fails like a missing setter.
pub struct Bean {
    class_name: &'static str,
    properties: RefCell<FxHashMap<String, Value>>,
}

impl Bean {
    pub fn new(class_name: &'static str, properties: &[(&str, Value)]) -> Self {
        Bean {
            class_name,
            properties: RefCell::new(
                properties
                    .iter()
                    .map(|(name, value)| ((*name).to_string(), value.clone()))
                    .collect(),
            ),
        }
    }

    pub fn person() -> Self {
        Bean::new(
            "com.example.Person",
            &[("name", Value::Null), ("active", Value::Bool(false))],
        )
    }

    pub fn button() -> Self {
        Bean::new(
            "javafx.scene.control.Button",
            &[("text", Value::str("")), ("onAction", Value::Null)],
        )
    }
}

impl HostObject for Bean {
    fn class_name(&self) -> &str {
        self.class_name
    }

    fn properties(&self) -> Option<&dyn PropertyAccess> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PropertyAccess for Bean {
    fn get_property(&self, name: &str) -> Option<Value> {
        self.properties.borrow().get(name).cloned()
    }

    fn set_property(&self, name: &str, value: Value) -> bool {
        match self.properties.borrow_mut().get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// `com.example.Counter`.
#[derive(Default)]
pub struct Counter {
    count: Cell<i32>,
}

impl Counter {
    pub fn get(&self) -> i32 {
        self.count.get()
    }
}

impl HostObject for Counter {
    fn class_name(&self) -> &str {
        "com.example.Counter"
    }

    fn field(&self, name: &str) -> Option<Value> {
        (name == "count").then(|| Value::Int(self.count.get()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// Host classes

/// A class known to [`MockHost`].
pub struct MockClass {
    name: &'static str,
}

impl HostClass for MockClass {
    fn name(&self) -> &str {
        self.name
    }

    fn new_instance(&self) -> Result<Value, HostException> {
        let object: Rc<dyn HostObject> = match self.name {
            "java.awt.Point" => Rc::new(Point::new(0, 0)),
            "java.util.ArrayList" => Rc::new(ArrayList::default()),
            "com.example.Person" => Rc::new(Bean::person()),
            "com.example.Counter" => Rc::new(Counter::default()),
            "javafx.scene.control.Button" => Rc::new(Bean::button()),
            "java.lang.String" => return Ok(Value::str("")),
            other => {
                return Err(exception(
                    "java.lang.IllegalAccessException",
                    format!("{other} has no public no-argument constructor"),
                ))
            }
        };
        Ok(Value::Object(object))
    }

    fn static_field(&self, name: &str) -> Option<Value> {
        match (self.name, name) {
            ("java.lang.System", "out") => Some(print_stream(Stream::Out)),
            ("java.lang.System", "err") => Some(print_stream(Stream::Err)),
            ("java.lang.Math", "PI") => Some(Value::Double(std::f64::consts::PI)),
            ("java.lang.Integer", "MAX_VALUE") => Some(Value::Int(i32::MAX)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn print_stream(stream: Stream) -> Value {
    Value::Object(Rc::new(PrintStream { stream }))
}

/// Host bridge and class resolver over the classes in [`KNOWN_CLASSES`].
///
/// Class objects are created once per host, so repeated references to the
/// same class compare identical.
pub struct MockHost {
    interner: SharedInterner,
    classes: RefCell<FxHashMap<Name, ClassRef>>,
    calls: Cell<usize>,
}

impl MockHost {
    pub fn new(interner: SharedInterner) -> Self {
        MockHost {
            interner,
            classes: RefCell::new(FxHashMap::default()),
            calls: Cell::new(0),
        }
    }

    /// Number of bridge invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    fn count_call(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl ClassResolver for MockHost {
    fn class_of(&self, decl: ClassDecl) -> Option<ClassRef> {
        let qualified = self.name(decl.name);
        let name = *KNOWN_CLASSES.iter().find(|known| **known == qualified)?;
        let class = self
            .classes
            .borrow_mut()
            .entry(decl.name)
            .or_insert_with(|| Rc::new(MockClass { name }))
            .clone();
        Some(class)
    }
}

impl HostBridge for MockHost {
    fn invoke_method(
        &self,
        decl: &MethodDecl,
        receiver: &Value,
        args: Vec<Value>,
    ) -> Result<Value, HostException> {
        self.count_call();
        let class = self.name(decl.declaring.name);
        let method = self.name(decl.name);
        match (class, method) {
            ("java.io.PrintStream", "println" | "print") => {
                let stream = downcast::<PrintStream>(receiver)?.stream;
                let mut text = args.first().map(Value::to_string).unwrap_or_default();
                if method == "println" {
                    text.push('\n');
                }
                capture::write(stream, &text);
                Ok(Value::Void)
            }
            ("java.lang.Math", "max") => match args.as_slice() {
                [Value::Int(a), Value::Int(b)] => Ok(Value::Int(*a.max(b))),
                [a, b] => Ok(Value::Double(as_double(a)?.max(as_double(b)?))),
                _ => Err(illegal_argument("Math.max takes two arguments")),
            },
            ("java.lang.Math", "abs") => match args.as_slice() {
                [Value::Int(a)] => Ok(Value::Int(a.wrapping_abs())),
                [a] => Ok(Value::Double(as_double(a)?.abs())),
                _ => Err(illegal_argument("Math.abs takes one argument")),
            },
            ("java.lang.Math", "sqrt") => match args.as_slice() {
                [a] => Ok(Value::Double(as_double(a)?.sqrt())),
                _ => Err(illegal_argument("Math.sqrt takes one argument")),
            },
            ("java.lang.Integer", "parseInt") => {
                let text = args.first().and_then(Value::as_str).unwrap_or("null");
                text.parse::<i32>().map(Value::Int).map_err(|_| {
                    exception(
                        "java.lang.NumberFormatException",
                        format!("For input string: \"{text}\""),
                    )
                })
            }
            ("java.lang.String", "length") => {
                let text = receiver.as_str().ok_or_else(|| null_pointer(method))?;
                let units = text.encode_utf16().count();
                Ok(Value::Int(i32::try_from(units).unwrap_or(i32::MAX)))
            }
            ("java.lang.String", "toUpperCase") => {
                let text = receiver.as_str().ok_or_else(|| null_pointer(method))?;
                Ok(Value::str(&text.to_uppercase()))
            }
            ("java.lang.String", "charAt") => {
                let text = receiver.as_str().ok_or_else(|| null_pointer(method))?;
                let index = match args.first() {
                    Some(Value::Int(i)) => usize::try_from(*i).ok(),
                    _ => None,
                };
                index
                    .and_then(|i| text.chars().nth(i))
                    .map(Value::Char)
                    .ok_or_else(|| {
                        exception(
                            "java.lang.StringIndexOutOfBoundsException",
                            "index out of range",
                        )
                    })
            }
            ("java.awt.Point", "translate") => {
                let point = downcast::<Point>(receiver)?;
                let [Value::Int(dx), Value::Int(dy)] = args.as_slice() else {
                    return Err(illegal_argument("translate takes two ints"));
                };
                point.x.set(point.x.get().wrapping_add(*dx));
                point.y.set(point.y.get().wrapping_add(*dy));
                Ok(Value::Void)
            }
            ("java.awt.Point", "getX") => {
                Ok(Value::Double(f64::from(downcast::<Point>(receiver)?.x.get())))
            }
            ("java.util.ArrayList", "add") => {
                let list = downcast::<ArrayList>(receiver)?;
                list.elements.borrow_mut().extend(args);
                Ok(Value::Bool(true))
            }
            ("java.util.ArrayList", "size") => {
                let list = downcast::<ArrayList>(receiver)?;
                Ok(Value::Int(i32::try_from(list.len()).unwrap_or(i32::MAX)))
            }
            ("java.util.ArrayList", "get") => {
                let list = downcast::<ArrayList>(receiver)?;
                let Some(Value::Int(index)) = args.first() else {
                    return Err(illegal_argument("get takes an int"));
                };
                usize::try_from(*index)
                    .ok()
                    .and_then(|i| list.elements.borrow().get(i).cloned())
                    .ok_or_else(|| {
                        exception(
                            "java.lang.IndexOutOfBoundsException",
                            format!("Index {index} out of bounds for length {}", list.len()),
                        )
                    })
            }
            ("com.example.Counter", "increment") => {
                let counter = downcast::<Counter>(receiver)?;
                counter.count.set(counter.count.get().wrapping_add(1));
                Ok(Value::Void)
            }
            ("com.example.Counter", "get") => Ok(Value::Int(downcast::<Counter>(receiver)?.get())),
            (_, "toString") => Ok(Value::str(&receiver.to_string())),
            _ => Err(exception(
                "java.lang.NoSuchMethodError",
                format!("{class}.{method}"),
            )),
        }
    }

    fn invoke_constructor(
        &self,
        decl: &ConstructorDecl,
        args: Vec<Value>,
    ) -> Result<Value, HostException> {
        self.count_call();
        let class = self.name(decl.declaring.name);
        match (class, args.as_slice()) {
            ("java.awt.Point", [Value::Int(x), Value::Int(y)]) => {
                Ok(Value::Object(Rc::new(Point::new(*x, *y))))
            }
            ("java.util.ArrayList", []) => Ok(Value::Object(Rc::new(ArrayList::default()))),
            ("java.lang.String", [Value::Str(text)]) => Ok(Value::Str(text.clone())),
            _ => Err(exception(
                "java.lang.NoSuchMethodError",
                format!("{class}.<init> with {} argument(s)", args.len()),
            )),
        }
    }
}

fn downcast<T: 'static>(receiver: &Value) -> Result<&T, HostException> {
    match receiver {
        Value::Object(object) => object.as_any().downcast_ref::<T>().ok_or_else(|| {
            exception(
                "java.lang.ClassCastException",
                format!("{} cannot be cast", object.class_name()),
            )
        }),
        Value::Null => Err(null_pointer("receiver")),
        other => Err(exception(
            "java.lang.ClassCastException",
            format!("{} cannot be cast", other.type_name()),
        )),
    }
}

fn null_pointer(member: &str) -> HostException {
    exception(
        "java.lang.NullPointerException",
        format!("Cannot invoke \"{member}\" because the receiver is null"),
    )
}

#[expect(clippy::cast_precision_loss, reason = "Java long to double widening")]
fn as_double(value: &Value) -> Result<f64, HostException> {
    Ok(match value {
        Value::Byte(n) => f64::from(*n),
        Value::Short(n) => f64::from(*n),
        Value::Char(c) => f64::from(char_code(*c)),
        Value::Int(n) => f64::from(*n),
        Value::Long(n) => *n as f64,
        Value::Float(n) => f64::from(*n),
        Value::Double(n) => *n,
        other => return Err(illegal_argument(format!("not a number: {}", other.type_name()))),
    })
}
