mod eval;
mod io;
mod special_forms;

pub use eval::{apply, eval, eval_string, Interpreter};
