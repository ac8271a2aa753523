use std::rc::Rc;

use skiff_core::{Env, Func, SkiffError, Value};

use crate::{io, special_forms};

pub type EvalResult = Result<Value, SkiffError>;

/// The interpreter holds the global environment.
pub struct Interpreter {
    pub global_env: Rc<Env>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let env = Env::new();
        skiff_stdlib::register_stdlib(&env);
        io::register_io(&env);
        Interpreter {
            global_env: Rc::new(env),
        }
    }

    pub fn eval(&self, expr: &Value) -> EvalResult {
        eval(expr, &self.global_env)
    }

    pub fn eval_str(&self, input: &str) -> EvalResult {
        eval_string(input, &self.global_env)
    }
}

/// Evaluate a string of one or more expressions, returning the last
/// value. This is the boundary where the driver renders errors.
pub fn eval_string(input: &str, env: &Env) -> EvalResult {
    let exprs = skiff_reader::read_many(input)?;
    let mut result = Value::nil();
    for expr in &exprs {
        result = eval(expr, env)?;
    }
    Ok(result)
}

/// Evaluate one expression in an environment.
pub fn eval(expr: &Value, env: &Env) -> EvalResult {
    match expr {
        // Self-evaluating forms
        Value::Number(_) | Value::String(_) | Value::Bool(_) => Ok(expr.clone()),

        // Variable reference
        Value::Symbol(name) => env.get(name).ok_or_else(|| SkiffError::UnboundVar {
            message: "Getting an unbound variable".to_string(),
            name: name.clone(),
        }),

        // Special forms and application. Special forms are recognized
        // purely by head symbol: bindings never shadow them.
        Value::List(items) => {
            if let [Value::Symbol(head), args @ ..] = items.as_slice() {
                if let Some(result) = special_forms::eval_special(head, args, env) {
                    return result;
                }
            }
            let Some((head, args)) = items.split_first() else {
                return Err(SkiffError::bad_form("Unrecognized special form", expr));
            };
            // The callee evaluates first, then the arguments left to right.
            let func = eval(head, env)?;
            let mut eval_args = Vec::with_capacity(args.len());
            for arg in args {
                eval_args.push(eval(arg, env)?);
            }
            apply(&func, &eval_args)
        }

        Value::DottedList(..) => Err(SkiffError::bad_form("Unrecognized special form", expr)),

        // Ports and procedures only arise as results of evaluation;
        // re-evaluating one yields the value itself.
        other => Ok(other.clone()),
    }
}

/// Apply a callable to already-evaluated arguments.
pub fn apply(func: &Value, args: &[Value]) -> EvalResult {
    match func {
        Value::PrimitiveFn(prim) => (prim.func)(args),
        Value::IoFn(io_fn) => (io_fn.func)(args),
        Value::Func(func) => apply_func(func, args),
        other => Err(SkiffError::NotFunction {
            message: "Not a function".to_string(),
            callee: other.to_string(),
        }),
    }
}

fn apply_func(func: &Func, args: &[Value]) -> EvalResult {
    let wrong_arity = if func.rest_param.is_some() {
        args.len() < func.params.len()
    } else {
        args.len() != func.params.len()
    };
    if wrong_arity {
        return Err(SkiffError::num_args(func.params.len(), args));
    }

    let env = Env::with_parent(Rc::new(func.env.clone()));
    for (param, arg) in func.params.iter().zip(args) {
        env.define(param, arg.clone());
    }
    if let Some(rest) = &func.rest_param {
        env.define(rest, Value::List(args[func.params.len()..].to_vec()));
    }

    // The body is non-empty by construction.
    let mut result = Value::nil();
    for expr in &func.body {
        result = eval(expr, &env)?;
    }
    Ok(result)
}
