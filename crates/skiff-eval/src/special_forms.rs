use std::rc::Rc;

use skiff_core::{Env, Func, SkiffError, Value};

use crate::eval::{eval, EvalResult};

/// Evaluate a special form. Returns `Some` when the head names one,
/// `None` to fall through to procedure application.
pub fn eval_special(head: &str, args: &[Value], env: &Env) -> Option<EvalResult> {
    match head {
        "quote" => Some(eval_quote(args)),
        "if" => Some(eval_if(args, env)),
        "cond" => Some(eval_cond(args, env)),
        "case" => Some(eval_case(args, env)),
        "set!" => Some(eval_set(args, env)),
        "define" => Some(eval_define(args, env)),
        "lambda" => Some(eval_lambda(args, env)),
        "load" => Some(eval_load(args, env)),
        _ => None,
    }
}

/// Rebuild `(head args…)` for error reporting.
fn form_value(head: &str, args: &[Value]) -> Value {
    let mut items = vec![Value::symbol(head)];
    items.extend_from_slice(args);
    Value::List(items)
}

fn eval_quote(args: &[Value]) -> EvalResult {
    let [quoted] = args else {
        return Err(SkiffError::bad_form(
            "Unrecognized special form",
            &form_value("quote", args),
        ));
    };
    Ok(quoted.clone())
}

fn eval_if(args: &[Value], env: &Env) -> EvalResult {
    let [pred, conseq, alt] = args else {
        return Err(SkiffError::bad_form(
            "Unrecognized special form",
            &form_value("if", args),
        ));
    };
    // Only #f selects the alternative; 0, "" and () are all true.
    if eval(pred, env)?.is_truthy() {
        eval(conseq, env)
    } else {
        eval(alt, env)
    }
}

fn eval_cond(args: &[Value], env: &Env) -> EvalResult {
    for (i, clause) in args.iter().enumerate() {
        let Value::List(items) = clause else {
            return Err(SkiffError::bad_form("Malformed cond clause", clause));
        };
        let Some((test, body)) = items.split_first() else {
            return Err(SkiffError::bad_form("Malformed cond clause", clause));
        };
        let matched = match test {
            Value::Symbol(name) if name == "else" => {
                if i + 1 != args.len() {
                    return Err(SkiffError::bad_form("else clause must be last", clause));
                }
                true
            }
            // A cond test must produce an actual boolean.
            _ => match eval(test, env)? {
                Value::Bool(b) => b,
                other => return Err(SkiffError::type_mismatch("boolean", &other)),
            },
        };
        if matched {
            return eval_body(body, clause, env);
        }
    }
    Err(SkiffError::bad_form(
        "No matching clause",
        &form_value("cond", args),
    ))
}

fn eval_case(args: &[Value], env: &Env) -> EvalResult {
    let Some((key_expr, clauses)) = args.split_first() else {
        return Err(SkiffError::bad_form(
            "Unrecognized special form",
            &form_value("case", args),
        ));
    };
    let key = eval(key_expr, env)?;
    for (i, clause) in clauses.iter().enumerate() {
        let Value::List(items) = clause else {
            return Err(SkiffError::bad_form("Malformed case clause", clause));
        };
        let Some((selector, body)) = items.split_first() else {
            return Err(SkiffError::bad_form("Malformed case clause", clause));
        };
        let matched = match selector {
            Value::Symbol(name) if name == "else" => {
                if i + 1 != clauses.len() {
                    return Err(SkiffError::bad_form("else clause must be last", clause));
                }
                true
            }
            // Datums are matched against the key by eqv?, unevaluated.
            Value::List(datums) => datums.iter().any(|datum| *datum == key),
            _ => return Err(SkiffError::bad_form("Malformed case clause", clause)),
        };
        if matched {
            return eval_body(body, clause, env);
        }
    }
    Err(SkiffError::bad_form(
        "No matching clause",
        &form_value("case", args),
    ))
}

/// Evaluate a clause body in order, returning the last value. An empty
/// body has no value to return and is rejected.
fn eval_body(body: &[Value], clause: &Value, env: &Env) -> EvalResult {
    let Some((last, init)) = body.split_last() else {
        return Err(SkiffError::bad_form("Empty clause body", clause));
    };
    for expr in init {
        eval(expr, env)?;
    }
    eval(last, env)
}

fn eval_set(args: &[Value], env: &Env) -> EvalResult {
    let [Value::Symbol(name), expr] = args else {
        return Err(SkiffError::bad_form(
            "Unrecognized special form",
            &form_value("set!", args),
        ));
    };
    let value = eval(expr, env)?;
    if env.assign(name, value.clone()) {
        Ok(value)
    } else {
        Err(SkiffError::UnboundVar {
            message: "Setting an unbound variable".to_string(),
            name: name.clone(),
        })
    }
}

fn eval_define(args: &[Value], env: &Env) -> EvalResult {
    match args {
        // (define name expr)
        [Value::Symbol(name), expr] => {
            let value = eval(expr, env)?;
            env.define(name, value.clone());
            Ok(value)
        }
        // (define (name p…) body…)
        [Value::List(sig), body @ ..] => {
            let [Value::Symbol(name), params @ ..] = sig.as_slice() else {
                return Err(SkiffError::bad_form(
                    "Unrecognized special form",
                    &form_value("define", args),
                ));
            };
            let func = make_func(params, None, body, env, &form_value("define", args))?;
            env.define(name, func.clone());
            Ok(func)
        }
        // (define (name p… . rest) body…)
        [Value::DottedList(sig, rest), body @ ..] => {
            let [Value::Symbol(name), params @ ..] = sig.as_slice() else {
                return Err(SkiffError::bad_form(
                    "Unrecognized special form",
                    &form_value("define", args),
                ));
            };
            let Value::Symbol(rest_name) = rest.as_ref() else {
                return Err(SkiffError::bad_form(
                    "Rest parameter must be a symbol",
                    &form_value("define", args),
                ));
            };
            let func = make_func(
                params,
                Some(rest_name.clone()),
                body,
                env,
                &form_value("define", args),
            )?;
            env.define(name, func.clone());
            Ok(func)
        }
        _ => Err(SkiffError::bad_form(
            "Unrecognized special form",
            &form_value("define", args),
        )),
    }
}

fn eval_lambda(args: &[Value], env: &Env) -> EvalResult {
    let form = form_value("lambda", args);
    match args {
        // (lambda (p…) body…)
        [Value::List(params), body @ ..] => make_func(params, None, body, env, &form),
        // (lambda (p… . rest) body…)
        [Value::DottedList(params, rest), body @ ..] => {
            let Value::Symbol(rest_name) = rest.as_ref() else {
                return Err(SkiffError::bad_form("Rest parameter must be a symbol", &form));
            };
            make_func(params, Some(rest_name.clone()), body, env, &form)
        }
        // (lambda rest body…): the whole argument list in one name
        [Value::Symbol(rest_name), body @ ..] => {
            make_func(&[], Some(rest_name.clone()), body, env, &form)
        }
        _ => Err(SkiffError::bad_form("Unrecognized special form", &form)),
    }
}

fn make_func(
    params: &[Value],
    rest_param: Option<String>,
    body: &[Value],
    env: &Env,
    form: &Value,
) -> EvalResult {
    let params = params
        .iter()
        .map(|param| match param {
            Value::Symbol(name) => Ok(name.clone()),
            other => Err(SkiffError::bad_form("Parameter must be a symbol", other)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if body.is_empty() {
        return Err(SkiffError::bad_form("Empty procedure body", form));
    }
    Ok(Value::Func(Rc::new(Func {
        params,
        rest_param,
        body: body.to_vec(),
        env: env.clone(),
    })))
}

fn eval_load(args: &[Value], env: &Env) -> EvalResult {
    let [Value::String(path)] = args else {
        return Err(SkiffError::bad_form(
            "Unrecognized special form",
            &form_value("load", args),
        ));
    };
    load_file(path, env)
}

/// Read a file and evaluate every expression in it, in order, in the
/// given environment. Host IO failures surface as plain errors.
fn load_file(path: &str, env: &Env) -> EvalResult {
    let source = std::fs::read_to_string(path)
        .map_err(|e| SkiffError::Default(format!("load {path}: {e}")))?;
    let exprs = skiff_reader::read_many(&source)?;
    let mut result = Value::nil();
    for expr in &exprs {
        result = eval(expr, env)?;
    }
    Ok(result)
}
