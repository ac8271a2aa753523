//! Builtins with side-effect authority. These live in the eval crate
//! rather than the stdlib because `apply` re-enters application and
//! `read`/`read-all` re-enter the reader.

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufRead, Write};
use std::rc::Rc;

use skiff_core::{Env, IoFn, Port, PortStream, SkiffError, Value};

use crate::eval::apply;

pub(crate) fn register_io(env: &Env) {
    register_io_fn(env, "apply", |args| {
        let Some((func, call_args)) = args.split_first() else {
            return Err(SkiffError::num_args(1, args));
        };
        // A trailing list is spliced after the leading arguments;
        // otherwise the arguments pass through verbatim.
        let spread = match call_args.split_last() {
            Some((Value::List(items), init)) => {
                let mut all = init.to_vec();
                all.extend(items.iter().cloned());
                all
            }
            _ => call_args.to_vec(),
        };
        apply(func, &spread)
    });

    register_io_fn(env, "open-input-file", |args| open_port(args, true));
    register_io_fn(env, "open-output-file", |args| open_port(args, false));
    register_io_fn(env, "close-input-port", close_port);
    register_io_fn(env, "close-output-port", close_port);

    register_io_fn(env, "read", read_port);
    register_io_fn(env, "write", write_port);

    register_io_fn(env, "read-contents", |args| match args {
        [Value::String(path)] => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| SkiffError::Default(format!("read-contents {path}: {e}")))?;
            Ok(Value::String(contents))
        }
        [other] => Err(SkiffError::type_mismatch("string", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });

    register_io_fn(env, "read-all", |args| match args {
        [Value::String(path)] => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| SkiffError::Default(format!("read-all {path}: {e}")))?;
            Ok(Value::List(skiff_reader::read_many(&contents)?))
        }
        [other] => Err(SkiffError::type_mismatch("string", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });
}

fn register_io_fn(
    env: &Env,
    name: &str,
    f: impl Fn(&[Value]) -> Result<Value, SkiffError> + 'static,
) {
    env.define(
        name,
        Value::IoFn(Rc::new(IoFn {
            name: name.to_string(),
            func: Box::new(f),
        })),
    );
}

fn open_port(args: &[Value], input: bool) -> Result<Value, SkiffError> {
    match args {
        [Value::String(path)] => {
            let port = if input {
                File::open(path).map(Port::input)
            } else {
                File::create(path).map(Port::output)
            }
            .map_err(|e| SkiffError::Default(format!("{path}: {e}")))?;
            Ok(Value::Port(Rc::new(RefCell::new(port))))
        }
        [other] => Err(SkiffError::type_mismatch("string", other)),
        _ => Err(SkiffError::num_args(1, args)),
    }
}

/// Closing succeeds once per port; a second close, or a non-port
/// argument, yields #f rather than an error.
fn close_port(args: &[Value]) -> Result<Value, SkiffError> {
    match args {
        [Value::Port(port)] => Ok(Value::Bool(port.borrow_mut().close())),
        _ => Ok(Value::Bool(false)),
    }
}

/// Read one line from the port (stdin when absent) and parse it as a
/// single expression.
fn read_port(args: &[Value]) -> Result<Value, SkiffError> {
    let line = match args {
        [] => {
            let mut line = String::new();
            std::io::stdin()
                .read_line(&mut line)
                .map_err(|e| SkiffError::Default(format!("read: {e}")))?;
            line
        }
        [Value::Port(port)] => {
            let mut port = port.borrow_mut();
            match port.stream.as_mut() {
                Some(PortStream::Input(reader)) => {
                    let mut line = String::new();
                    reader
                        .read_line(&mut line)
                        .map_err(|e| SkiffError::Default(format!("read: {e}")))?;
                    line
                }
                Some(PortStream::Output(_)) => {
                    return Err(SkiffError::type_mismatch("input port", &args[0]))
                }
                None => return Err(SkiffError::Default("read: port is closed".to_string())),
            }
        }
        [other] => return Err(SkiffError::type_mismatch("input port", other)),
        _ => return Err(SkiffError::num_args(1, args)),
    };
    skiff_reader::read(&line)
}

/// Write the printed form of a value, plus a newline, to the port
/// (stdout when absent).
fn write_port(args: &[Value]) -> Result<Value, SkiffError> {
    match args {
        [obj] => {
            println!("{obj}");
            Ok(Value::Bool(true))
        }
        [obj, Value::Port(port)] => {
            let mut port = port.borrow_mut();
            match port.stream.as_mut() {
                Some(PortStream::Output(file)) => {
                    writeln!(file, "{obj}")
                        .map_err(|e| SkiffError::Default(format!("write: {e}")))?;
                    Ok(Value::Bool(true))
                }
                Some(PortStream::Input(_)) => {
                    Err(SkiffError::type_mismatch("output port", &args[1]))
                }
                None => Err(SkiffError::Default("write: port is closed".to_string())),
            }
        }
        [_, other] => Err(SkiffError::type_mismatch("output port", other)),
        _ => Err(SkiffError::num_args(1, args)),
    }
}
