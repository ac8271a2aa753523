use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::rc::Rc;

use hashbrown::HashMap;
use num_bigint::BigInt;

use crate::error::SkiffError;

// ── Function payloads ─────────────────────────────────────────────

/// A pure builtin callable from Scheme.
pub struct PrimitiveFn {
    pub name: String,
    pub func: Box<dyn Fn(&[Value]) -> Result<Value, SkiffError>>,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<primitive {}>", self.name)
    }
}

/// A builtin with side-effect authority: ports, host IO, `apply`.
pub struct IoFn {
    pub name: String,
    pub func: Box<dyn Fn(&[Value]) -> Result<Value, SkiffError>>,
}

impl fmt::Debug for IoFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<IO primitive {}>", self.name)
    }
}

/// A user-defined procedure closing over its defining environment.
#[derive(Debug, Clone)]
pub struct Func {
    pub params: Vec<String>,
    pub rest_param: Option<String>,
    pub body: Vec<Value>,
    pub env: Env,
}

// ── Ports ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum PortStream {
    Input(BufReader<File>),
    Output(File),
}

/// A handle to an open OS file stream. The stream slot is emptied on
/// close; use after close is an IO error at the call site.
#[derive(Debug)]
pub struct Port {
    pub stream: Option<PortStream>,
}

impl Port {
    pub fn input(file: File) -> Self {
        Port {
            stream: Some(PortStream::Input(BufReader::new(file))),
        }
    }

    pub fn output(file: File) -> Self {
        Port {
            stream: Some(PortStream::Output(file)),
        }
    }

    /// Close the underlying stream. False when already closed.
    pub fn close(&mut self) -> bool {
        self.stream.take().is_some()
    }
}

// ── Value ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Value {
    Symbol(String),
    List(Vec<Value>),
    DottedList(Vec<Value>, Box<Value>),
    Number(BigInt),
    String(String),
    Bool(bool),
    Port(Rc<RefCell<Port>>),
    PrimitiveFn(Rc<PrimitiveFn>),
    IoFn(Rc<IoFn>),
    Func(Rc<Func>),
}

impl Value {
    pub fn symbol(name: &str) -> Value {
        Value::Symbol(name.to_string())
    }

    pub fn string(text: &str) -> Value {
        Value::String(text.to_string())
    }

    pub fn number(n: i64) -> Value {
        Value::Number(BigInt::from(n))
    }

    /// The empty list `()`.
    pub fn nil() -> Value {
        Value::List(Vec::new())
    }

    /// Build an improper list, normalizing on construction: a proper-list
    /// tail is folded into the head, a dotted tail contributes its own
    /// head, and an empty head yields the tail itself. The invariant that
    /// a `DottedList` tail is never a list holds for every value built
    /// through here.
    pub fn dotted(head: Vec<Value>, tail: Value) -> Value {
        if head.is_empty() {
            return tail;
        }
        match tail {
            Value::List(rest) => {
                let mut items = head;
                items.extend(rest);
                Value::List(items)
            }
            Value::DottedList(mid, end) => {
                let mut items = head;
                items.extend(mid);
                Value::DottedList(items, end)
            }
            other => Value::DottedList(head, Box::new(other)),
        }
    }

    /// Only `#f` is false; every other value, including `0`, `""` and
    /// `()`, is true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }
}

/// Structural equality with cross-scope identity for ports and
/// procedures. This is exactly the dialect's `eqv?`.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        use Value::*;

        match (self, other) {
            (Symbol(a), Symbol(b)) => a == b,
            (List(a), List(b)) => a == b,
            (DottedList(h1, t1), DottedList(h2, t2)) => h1 == h2 && t1 == t2,
            (Number(a), Number(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Port(a), Port(b)) => Rc::ptr_eq(a, b),
            (PrimitiveFn(a), PrimitiveFn(b)) => Rc::ptr_eq(a, b),
            (IoFn(a), IoFn(b)) => Rc::ptr_eq(a, b),
            (Func(a), Func(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

pub(crate) fn unwords(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Printing mirrors the reader: anything printed here (ports and
/// procedures aside) reads back as an equal value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Symbol(name) => write!(f, "{name}"),
            Value::Number(n) => write!(f, "{n}"),
            // No escape processing in either direction.
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Bool(true) => write!(f, "#t"),
            Value::Bool(false) => write!(f, "#f"),
            Value::List(items) => write!(f, "({})", unwords(items)),
            Value::DottedList(head, tail) => write!(f, "({} . {})", unwords(head), tail),
            Value::Port(_) => write!(f, "<IO port>"),
            Value::PrimitiveFn(_) => write!(f, "<primitive>"),
            Value::IoFn(_) => write!(f, "<IO primitive>"),
            Value::Func(func) => {
                write!(f, "(lambda ({}", func.params.join(" "))?;
                if let Some(rest) = &func.rest_param {
                    write!(f, " . {rest}")?;
                }
                write!(f, ") ...)")
            }
        }
    }
}

// ── Env ───────────────────────────────────────────────────────────

/// A lexical scope: a mutable binding frame chained to its parent.
///
/// Cloning an `Env` shares the frame, so a closure that captures its
/// defining environment observes definitions and assignments made there
/// after capture. `define` only ever touches the head frame; `assign`
/// walks the chain and mutates the first match in place, which is how a
/// `set!` in a child scope reaches a binding the parent can still see.
#[derive(Debug, Clone)]
pub struct Env {
    bindings: Rc<RefCell<HashMap<String, Value>>>,
    parent: Option<Rc<Env>>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            bindings: Rc::new(RefCell::new(HashMap::new())),
            parent: None,
        }
    }

    pub fn with_parent(parent: Rc<Env>) -> Self {
        Env {
            bindings: Rc::new(RefCell::new(HashMap::new())),
            parent: Some(parent),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(val) = self.bindings.borrow().get(name) {
            Some(val.clone())
        } else if let Some(parent) = &self.parent {
            parent.get(name)
        } else {
            None
        }
    }

    /// Bind in the current frame, overwriting a same-frame binding and
    /// shadowing any parent binding.
    pub fn define(&self, name: &str, val: Value) {
        self.bindings.borrow_mut().insert(name.to_string(), val);
    }

    /// Mutate the first binding for `name` along the chain. False when
    /// the name is bound nowhere.
    pub fn assign(&self, name: &str, val: Value) -> bool {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(entry) = bindings.get_mut(name) {
            *entry = val;
            true
        } else {
            drop(bindings);
            match &self.parent {
                Some(parent) => parent.assign(name, val),
                None => false,
            }
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────
