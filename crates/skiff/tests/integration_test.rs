use std::path::PathBuf;

use skiff_core::{SkiffError, Value};
use skiff_eval::Interpreter;

fn eval(input: &str) -> Value {
    let interp = Interpreter::new();
    interp
        .eval_str(input)
        .unwrap_or_else(|e| panic!("failed to eval `{input}`: {e}"))
}

fn eval_to_string(input: &str) -> String {
    format!("{}", eval(input))
}

fn eval_err(input: &str) -> SkiffError {
    let interp = Interpreter::new();
    interp
        .eval_str(input)
        .expect_err(&format!("expected error for: {input}"))
}

/// A scratch file that is removed when the test finishes.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    fn new(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!("skiff-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write scratch file");
        ScratchFile { path }
    }

    fn path(&self) -> String {
        self.path.display().to_string()
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval("(+ 2 3)"), Value::number(5));
    assert_eq!(eval("(- 10 1 2)"), Value::number(7));
    assert_eq!(eval("(* 4 5)"), Value::number(20));
    assert_eq!(eval("(/ 7 2)"), Value::number(3));
    assert_eq!(eval("(mod 10 3)"), Value::number(1));
    assert_eq!(eval("(remainder 10 3)"), Value::number(1));
    assert_eq!(eval("(quotient 10 3)"), Value::number(3));
}

#[test]
fn test_arbitrary_precision() {
    assert_eq!(
        eval_to_string("(* 1000000000000 1000000000000)"),
        "1000000000000000000000000"
    );
    assert_eq!(
        eval_to_string("(+ 99999999999999999999 1)"),
        "100000000000000000000"
    );
}

#[test]
fn test_negative_numbers_via_subtraction() {
    // Negative literals are not in the grammar; (- 0 n) produces them.
    assert_eq!(eval("(- 0 5)"), Value::number(-5));
    assert_eq!(eval_to_string("(- 0 5)"), "-5");
}

#[test]
fn test_factorial() {
    assert_eq!(
        eval("(define (fact n) (if (= n 0) 1 (* n (fact (- n 1))))) (fact 6)"),
        Value::number(720)
    );
}

#[test]
fn test_counter_closure() {
    assert_eq!(
        eval(
            "(define (counter) (define n 0) (lambda () (set! n (+ n 1)) n)) \
             (define c (counter)) (c) (c) (c)"
        ),
        Value::number(3)
    );
}

#[test]
fn test_cond() {
    assert_eq!(
        eval_to_string("(cond ((= 1 2) 'a) ((= 2 2) 'b) (else 'c))"),
        "b"
    );
}

#[test]
fn test_case() {
    assert_eq!(
        eval_to_string("(case (* 2 3) ((2 3 5 7) 'prime) ((1 4 6 8 9) 'composite))"),
        "composite"
    );
}

#[test]
fn test_equality_coherence() {
    assert_eq!(eval("(equal? 2 \"2\")"), Value::Bool(true));
    assert_eq!(eval("(eqv? 2 \"2\")"), Value::Bool(false));
    assert_eq!(eval("(eqv? '(1 2) '(1 2))"), Value::Bool(true));
    // eqv? implies equal?
    assert_eq!(eval("(equal? '(1 2) '(1 2))"), Value::Bool(true));
    // the coercion property via number->string
    assert_eq!(eval("(equal? 42 (number->string 42))"), Value::Bool(true));
}

#[test]
fn test_pair_surgery() {
    assert_eq!(eval_to_string("(car '(1 . (2 3)))"), "1");
    assert_eq!(eval_to_string("(cdr '(1 2 . 3))"), "(2 . 3)");
    assert_eq!(eval_to_string("(cons 1 2)"), "(1 . 2)");
    assert_eq!(eval_to_string("(cons 1 '(2 3))"), "(1 2 3)");
    assert_eq!(eval_to_string("(car (cons 'a 'b))"), "a");
    assert_eq!(eval_to_string("(cdr (cons 'a '(b)))"), "(b)");
}

#[test]
fn test_set_unbound_is_an_error() {
    let err = eval_err("(set! undefined 1)");
    assert!(matches!(err, SkiffError::UnboundVar { .. }));
}

#[test]
fn test_quote_identity() {
    assert_eq!(eval_to_string("'(1 2 (3 . 4))"), "(1 2 (3 . 4))");
    assert_eq!(eval_to_string("'sym"), "sym");
    assert_eq!(eval("(quote 5)"), Value::number(5));
}

#[test]
fn test_if_falsity() {
    assert_eq!(eval_to_string("(if 0 'a 'b)"), "a");
    assert_eq!(eval_to_string("(if \"\" 'a 'b)"), "a");
    assert_eq!(eval_to_string("(if '() 'a 'b)"), "a");
    assert_eq!(eval_to_string("(if #f 'a 'b)"), "b");
}

#[test]
fn test_comparisons() {
    assert_eq!(eval("(< 1 2)"), Value::Bool(true));
    assert_eq!(eval("(>= 2 2)"), Value::Bool(true));
    assert_eq!(eval("(/= 1 2)"), Value::Bool(true));
    assert_eq!(eval("(string<? \"abc\" \"abd\")"), Value::Bool(true));
    assert_eq!(eval("(string=? \"a\" \"a\")"), Value::Bool(true));
    assert_eq!(eval("(&& #t #f)"), Value::Bool(false));
    assert_eq!(eval("(|| #t #f)"), Value::Bool(true));

    let err = eval_err("(< 1 2 3)");
    assert!(matches!(err, SkiffError::NumArgs { expected: 2, .. }));
    let err = eval_err("(&& #t 1)");
    assert!(matches!(err, SkiffError::TypeMismatch { .. }));
}

#[test]
fn test_numeric_contexts_coerce() {
    // Strings and single-element lists both count as numbers.
    assert_eq!(eval("(= 1 \"1\")"), Value::Bool(true));
    assert_eq!(eval("(= 1 '(1))"), Value::Bool(true));
    assert_eq!(eval("(+ 1 \"2\")"), Value::number(3));
    let err = eval_err("(+ 1 '(2 3))");
    assert!(matches!(err, SkiffError::TypeMismatch { .. }));
}

#[test]
fn test_predicates() {
    assert_eq!(eval("(symbol? 'a)"), Value::Bool(true));
    assert_eq!(eval("(string? \"a\")"), Value::Bool(true));
    assert_eq!(eval("(number? 1)"), Value::Bool(true));
    assert_eq!(eval("(boolean? #f)"), Value::Bool(true));
    assert_eq!(eval("(pair? '(1))"), Value::Bool(true));
    assert_eq!(eval("(pair? '())"), Value::Bool(false));
    assert_eq!(eval("(null? '())"), Value::Bool(true));
    assert_eq!(eval("(list? '(1 2))"), Value::Bool(true));
    assert_eq!(eval("(procedure? car)"), Value::Bool(true));
    assert_eq!(eval("(procedure? (lambda (x) x))"), Value::Bool(true));
    assert_eq!(eval("(not #f)"), Value::Bool(true));
    assert_eq!(eval("(not 1)"), Value::Bool(false));
}

#[test]
fn test_string_bridges() {
    assert_eq!(eval_to_string("(symbol->string 'abc)"), "\"abc\"");
    assert_eq!(eval_to_string("(string->symbol \"abc\")"), "abc");
    assert_eq!(eval("(string->number \"12\")"), Value::number(12));
    assert_eq!(eval("(string->number \"nope\")"), Value::Bool(false));
    assert_eq!(eval("(string-length \"hello\")"), Value::number(5));
    assert_eq!(
        eval_to_string("(string-append \"foo\" \"bar\")"),
        "\"foobar\""
    );
}

#[test]
fn test_list_builders() {
    assert_eq!(eval_to_string("(list 1 2 3)"), "(1 2 3)");
    assert_eq!(eval("(length '(1 2 3))"), Value::number(3));
    assert_eq!(eval_to_string("(reverse '(1 2 3))"), "(3 2 1)");
    assert_eq!(eval_to_string("(append '(1 2) '(3 4))"), "(1 2 3 4)");
}

#[test]
fn test_apply() {
    assert_eq!(eval("(apply + 1 2 '(3 4))"), Value::number(10));
    assert_eq!(eval("(apply + '(1 2))"), Value::number(3));
    assert_eq!(eval("(apply + 1 2)"), Value::number(3));
    assert_eq!(eval("(apply (lambda (a b) (* a b)) '(3 4))"), Value::number(12));
}

#[test]
fn test_varargs_arity() {
    assert_eq!(eval_to_string("((lambda (a . rest) rest) 1 2 3)"), "(2 3)");
    assert_eq!(eval_to_string("((lambda all all) 1 2)"), "(1 2)");
    let err = eval_err("((lambda (a b) a) 1)");
    assert!(matches!(err, SkiffError::NumArgs { expected: 2, .. }));
    let err = eval_err("((lambda (a . rest) a))");
    assert!(matches!(err, SkiffError::NumArgs { expected: 1, .. }));
}

#[test]
fn test_not_a_function() {
    let err = eval_err("(1 2)");
    assert!(matches!(err, SkiffError::NotFunction { .. }));
    let err = eval_err("(\"str\")");
    assert!(matches!(err, SkiffError::NotFunction { .. }));
}

#[test]
fn test_parse_errors_reach_the_caller() {
    let err = eval_err("(+ 1");
    assert!(matches!(err, SkiffError::Parser { .. }));
}

#[test]
fn test_load() {
    let script = ScratchFile::new(
        "load.scm",
        "(define (double x) (* x 2))\n(double 21)\n",
    );
    let interp = Interpreter::new();
    let result = interp
        .eval_str(&format!("(load \"{}\")", script.path()))
        .expect("load failed");
    assert_eq!(result, Value::number(42));
    // Definitions from the file land in the loading environment.
    assert_eq!(interp.eval_str("(double 5)").unwrap(), Value::number(10));
}

#[test]
fn test_load_missing_file() {
    let err = eval_err("(load \"/no/such/skiff/file.scm\")");
    assert!(matches!(err, SkiffError::Default(_)));
}

#[test]
fn test_read_contents_and_read_all() {
    let script = ScratchFile::new("readall.scm", "1 (2 3) \"four\"");
    assert_eq!(
        eval(&format!("(read-contents \"{}\")", script.path())),
        Value::string("1 (2 3) \"four\"")
    );
    assert_eq!(
        eval_to_string(&format!("(read-all \"{}\")", script.path())),
        "(1 (2 3) \"four\")"
    );
}

#[test]
fn test_ports_round_trip() {
    let scratch = ScratchFile::new("port.scm", "");
    let path = scratch.path();
    let interp = Interpreter::new();

    let write_side = format!(
        "(define out (open-output-file \"{path}\")) \
         (write (+ 1 2) out) \
         (close-output-port out)"
    );
    assert_eq!(interp.eval_str(&write_side).unwrap(), Value::Bool(true));

    let read_side = format!(
        "(define in (open-input-file \"{path}\")) \
         (define datum (read in)) \
         (close-input-port in) \
         datum"
    );
    assert_eq!(interp.eval_str(&read_side).unwrap(), Value::number(3));

    // Double close yields #f, as does closing a non-port.
    let reopen = format!("(define p (open-input-file \"{path}\"))");
    interp.eval_str(&reopen).unwrap();
    assert_eq!(
        interp.eval_str("(close-input-port p)").unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        interp.eval_str("(close-input-port p)").unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        interp.eval_str("(close-input-port 5)").unwrap(),
        Value::Bool(false)
    );
    // Use after close is an error.
    let err = interp.eval_str("(read p)").unwrap_err();
    assert!(matches!(err, SkiffError::Default(_)));
}

#[test]
fn test_script_args_binding() {
    // Batch mode binds `args` before loading; the same wiring is
    // observable by defining it here.
    let interp = Interpreter::new();
    interp.global_env.define(
        "args",
        Value::List(vec![Value::string("a"), Value::string("b")]),
    );
    assert_eq!(interp.eval_str("(length args)").unwrap(), Value::number(2));
    assert_eq!(interp.eval_str("(car args)").unwrap(), Value::string("a"));
}
