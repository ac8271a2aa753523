pub mod error;
pub mod value;

pub use error::{SkiffError, Span};
pub use value::{Env, Func, IoFn, Port, PortStream, PrimitiveFn, Value};
