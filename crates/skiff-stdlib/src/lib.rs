mod arithmetic;
mod coerce;
mod comparison;
mod equality;
mod list;
mod predicates;
mod string;

use std::rc::Rc;

use skiff_core::{Env, PrimitiveFn, SkiffError, Value};

/// Install every pure builtin into `env`.
pub fn register_stdlib(env: &Env) {
    arithmetic::register(env);
    comparison::register(env);
    equality::register(env);
    list::register(env);
    predicates::register(env);
    string::register(env);
}

pub(crate) fn register_fn(
    env: &Env,
    name: &str,
    f: impl Fn(&[Value]) -> Result<Value, SkiffError> + 'static,
) {
    env.define(
        name,
        Value::PrimitiveFn(Rc::new(PrimitiveFn {
            name: name.to_string(),
            func: Box::new(f),
        })),
    );
}
