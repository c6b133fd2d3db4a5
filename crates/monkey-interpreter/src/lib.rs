//! Monkey interpreter: evaluates AST nodes with a tree-walking evaluator.
//!
//! The runtime is built from four pieces:
//!
//! - [`Value`]: the closed set of runtime values, including `Error` and
//!   `ReturnValue`, which travel through evaluation as ordinary values.
//! - [`Env`]: shared, chained scopes. Functions capture the scope they were
//!   defined in, which is what makes them closures.
//! - [`Interpreter`]: the recursive evaluator.
//! - [`builtins`]: native functions consulted after environment lookup fails.
//!
//! ```rust
//! use monkey_interpreter::{Interpreter, Value};
//!
//! let mut interp = Interpreter::new();
//! let value = interp.run("let add = fn(a, b) { a + b }; add(2, 3)").unwrap();
//! assert_eq!(value, Value::Integer(5));
//!
//! // failures are values, not Rust errors
//! let value = interp.run("5 + true").unwrap();
//! assert_eq!(value, Value::error("type mismatch: INTEGER + BOOLEAN"));
//! ```

pub mod builtins;
pub mod config;
pub mod env;
pub mod interpreter;
pub mod value;

pub use config::EvalConfig;
pub use env::Env;
pub use interpreter::Interpreter;
pub use value::{Builtin, Function, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use monkey_lexer::Lexer;
    use monkey_parser::Parser;
    use monkey_syntax::ast::Program;

    fn parse(input: &str) -> Program {
        let tokens = Lexer::new(input).tokenize().expect("Lexing should succeed");
        Parser::new(tokens).parse_program().expect("Parsing should succeed")
    }

    fn eval(input: &str) -> Value {
        Interpreter::new().eval_program(&parse(input), &Env::new())
    }

    fn expect_value(input: &str, expected: impl Into<Value>) {
        assert_eq!(eval(input), expected.into(), "Program: {}", input);
    }

    fn expect_error(input: &str, message: &str) {
        match eval(input) {
            Value::Error(msg) => assert_eq!(msg, message, "Program: {}", input),
            other => panic!("Expected error {:?} but got {:?}\nInput: {}", message, other, input),
        }
    }

    #[test]
    fn test_integer_expressions() {
        let cases = [
            ("5", 5),
            ("10", 10),
            ("-5", -5),
            ("-10", -10),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("-50 + 100 + -50", 0),
            ("5 * 2 + 10", 20),
            ("5 + 2 * 10", 25),
            ("20 + 2 * -10", 0),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("3 * 3 * 3 + 10", 37),
            ("3 * (3 * 3) + 10", 37),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
            ("7 / 2", 3),
            ("-7 / 2", -3),
        ];
        for (input, expected) in cases {
            expect_value(input, expected as i64);
        }
    }

    #[test]
    fn test_boolean_expressions() {
        let cases = [
            ("true", true),
            ("false", false),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 < 1", false),
            ("1 > 1", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("1 == 2", false),
            ("1 != 2", true),
            ("true == true", true),
            ("false == false", true),
            ("true == false", false),
            ("true != false", true),
            ("false != true", true),
            ("(1 < 2) == true", true),
            ("(1 < 2) == false", false),
            ("(1 > 2) == true", false),
            ("(1 > 2) == false", true),
        ];
        for (input, expected) in cases {
            expect_value(input, expected);
        }
    }

    #[test]
    fn test_bang_operator() {
        let cases = [
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!0", false),
            ("!!true", true),
            ("!!false", false),
            ("!!5", true),
            ("!\"\"", false),
            ("!if (false) { 1 }", true),
        ];
        for (input, expected) in cases {
            expect_value(input, expected);
        }
    }

    #[test]
    fn test_if_else_expressions() {
        expect_value("if (true) { 10 }", Value::Integer(10));
        expect_value("if (false) { 10 }", Value::Null);
        expect_value("if (1) { 10 }", Value::Integer(10));
        expect_value("if (0) { 10 }", Value::Integer(10));
        expect_value("if (1 < 2) { 10 }", Value::Integer(10));
        expect_value("if (1 > 2) { 10 }", Value::Null);
        expect_value("if (1 > 2) { 10 } else { 20 }", Value::Integer(20));
        expect_value("if (1 < 2) { 10 } else { 20 }", Value::Integer(10));
        expect_value("if (true) { }", Value::Null);
    }

    #[test]
    fn test_return_statements() {
        expect_value("return 10;", Value::Integer(10));
        expect_value("return 10; 9;", Value::Integer(10));
        expect_value("return 2 * 5; 9;", Value::Integer(10));
        expect_value("9; return 2 * 5; 9;", Value::Integer(10));
        expect_value("if (10 > 1) { return 10; }", Value::Integer(10));
        expect_value(
            "if (10 > 1) {
               if (10 > 1) {
                 return 10;
               }
               return 1;
             }",
            Value::Integer(10),
        );
        expect_value("let f = fn(x) { return x; x + 10; }; f(10);", Value::Integer(10));
        expect_value(
            "let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);",
            Value::Integer(20),
        );
    }

    #[test]
    fn test_return_value_is_unwrapped_at_the_call_boundary() {
        // the caller keeps running after the callee returns
        expect_value("let f = fn() { return 1; }; f() + 1", Value::Integer(2));
        expect_value(
            "let inner = fn() { return 5; };
             let outer = fn() { inner(); 10 };
             outer()",
            Value::Integer(10),
        );

        let env = Env::new();
        let program = parse("let f = fn() { return 7; 8 };");
        let mut interp = Interpreter::new();
        interp.eval_program(&program, &env);
        let f = env.get("f").expect("f should be bound");
        assert_eq!(interp.apply_function(&f, &[]), Value::Integer(7));
    }

    #[test]
    fn test_return_inside_nested_expression_leaves_the_function() {
        expect_value(
            "let f = fn() { let x = if (true) { return 1; }; 2 }; f()",
            Value::Integer(1),
        );
    }

    #[test]
    fn test_error_handling() {
        let cases = [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("-\"str\"", "unknown operator: -STRING"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("true + false + true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            ("true < false", "unknown operator: BOOLEAN < BOOLEAN"),
            ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "identifier not found: foobar"),
            ("\"Hello\" - \"World\"", "unknown operator: STRING - STRING"),
            ("1 == true", "type mismatch: INTEGER == BOOLEAN"),
            ("\"a\" + 1", "type mismatch: STRING + INTEGER"),
            ("5(1)", "not a function: INTEGER"),
            ("\"f\"()", "not a function: STRING"),
            ("let f = fn(x) { x }; f(1, 2)", "wrong number of arguments: got=2, want=1"),
            ("let f = fn(x, y) { x }; f()", "wrong number of arguments: got=0, want=2"),
            ("10 / 0", "division by zero"),
        ];
        for (input, message) in cases {
            expect_error(input, message);
        }
    }

    #[test]
    fn test_error_short_circuits_siblings() {
        // the condition fails, so neither branch runs and nothing is bound
        expect_error("if (missing) { let a = 1 } else { let a = 2 }; a", "identifier not found: missing");
        // the failing let leaves the name unbound
        let env = Env::new();
        let result = Interpreter::new().eval_program(&parse("let x = 1 + true; 5"), &env);
        assert_eq!(result, Value::error("type mismatch: INTEGER + BOOLEAN"));
        assert_eq!(env.get("x"), None);
    }

    #[test]
    fn test_first_failing_argument_wins() {
        // `boom` would fail with a different message if it were evaluated
        expect_error("len(nope, boom)", "identifier not found: nope");
        expect_error("missing(1 + true)", "identifier not found: missing");
        expect_error("len(1 + true, 2 + false)", "type mismatch: INTEGER + BOOLEAN");
    }

    #[test]
    fn test_let_statements() {
        expect_value("let a = 5; a;", Value::Integer(5));
        expect_value("let a = 5 * 5; a;", Value::Integer(25));
        expect_value("let a = 5; let b = a; b;", Value::Integer(5));
        expect_value("let a = 5; let b = a; let c = a + b + 5; c;", Value::Integer(15));
        expect_value("let a = 5;", Value::Null);
    }

    #[test]
    fn test_let_shadows_instead_of_mutating() {
        expect_value(
            "let x = 1;
             let f = fn() { let x = 2; x };
             f() + x",
            Value::Integer(3),
        );
    }

    #[test]
    fn test_function_object() {
        match eval("fn(x) { x + 2; };") {
            Value::Function(func) => {
                assert_eq!(func.parameters, vec!["x".to_string()]);
                assert_eq!(func.body.to_string(), "(x + 2)");
                assert_eq!(Value::Function(func).to_string(), "fn(x) {\n(x + 2)\n}");
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_function_application() {
        expect_value("let identity = fn(x) { x; }; identity(5);", Value::Integer(5));
        expect_value("let identity = fn(x) { return x; }; identity(5);", Value::Integer(5));
        expect_value("let double = fn(x) { x * 2; }; double(5);", Value::Integer(10));
        expect_value("let add = fn(x, y) { x + y; }; add(5, 5);", Value::Integer(10));
        expect_value("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", Value::Integer(20));
        expect_value("fn(x) { x; }(5)", Value::Integer(5));
        expect_value("fn() { }()", Value::Null);
    }

    #[test]
    fn test_recursion() {
        expect_value(
            "let fib = fn(n) { if (n < 2) { return n; } fib(n - 1) + fib(n - 2) }; fib(15)",
            Value::Integer(610),
        );
    }

    #[test]
    fn test_closures() {
        expect_value(
            "let newAdder = fn(x) { fn(y) { x + y }; };
             let addTwo = newAdder(2);
             addTwo(2);",
            Value::Integer(4),
        );
        // each call frame gets its own captured x
        expect_value(
            "let newAdder = fn(x) { fn(y) { x + y } };
             let addOne = newAdder(1);
             let addTen = newAdder(10);
             addOne(0) * 100 + addTen(0)",
            Value::Integer(110),
        );
    }

    #[test]
    fn test_closures_resolve_lexically_not_dynamically() {
        expect_value(
            "let x = 1;
             let getX = fn() { x };
             let caller = fn() { let x = 99; getX() };
             caller()",
            Value::Integer(1),
        );
    }

    #[test]
    fn test_closures_see_later_bindings_of_their_scope() {
        // the environment is captured by reference, not copied
        expect_value("let f = fn() { later }; let later = 42; f()", Value::Integer(42));
    }

    #[test]
    fn test_string_literal_and_concatenation() {
        expect_value("\"Hello World!\"", "Hello World!");
        expect_value("\"Hello\" + \" \" + \"World!\"", "Hello World!");
    }

    #[test]
    fn test_string_comparison() {
        expect_value("\"aaa\" == \"aaa\"", true);
        expect_value("\"aaa\" == \"bbb\"", false);
        expect_value("\"aaa\" != \"aaa\"", false);
        expect_value("\"aaa\" != \"bbb\"", true);
        expect_value("let a = \"a\" + \"aa\"; a == \"aaa\"", true);
    }

    #[test]
    fn test_equality_of_other_values() {
        expect_value("if (false) { 1 } == if (false) { 2 }", true);
        expect_value("let f = fn() { 1 }; f == f", true);
        expect_value("fn() { 1 } == fn() { 1 }", false);
        expect_value("len == len", true);
        expect_error("let f = fn() { 1 }; f + f", "unknown operator: FUNCTION + FUNCTION");
    }

    #[test]
    fn test_builtin_functions() {
        expect_value("len(\"\")", Value::Integer(0));
        expect_value("len(\"four\")", Value::Integer(4));
        expect_value("len(\"hello world\")", Value::Integer(11));
        expect_error("len(1)", "argument to `len` not supported, got INTEGER");
        expect_error("len(\"one\", \"two\")", "wrong number of arguments. got=2, want=1");
        expect_error("len()", "wrong number of arguments. got=0, want=1");
        expect_value("type(fn(x) { x })", "FUNCTION");
        expect_value("str(1 + 2) + \"!\"", "3!");
        expect_value("int(\"12\") * 2", Value::Integer(24));
    }

    #[test]
    fn test_bindings_shadow_builtins() {
        expect_value("let len = fn(x) { 99 }; len(\"abc\")", Value::Integer(99));
        expect_value("let f = len; f(\"abc\")", Value::Integer(3));
    }

    #[test]
    fn test_integer_overflow_wraps() {
        expect_value("9223372036854775807 + 1", i64::MIN);
        expect_value("-9223372036854775807 - 1 - 1", i64::MAX);
    }

    #[test]
    fn test_call_depth_limit() {
        let program = parse("let down = fn(n) { if (n == 0) { 0 } else { down(n - 1) } }; down(50)");
        let config = EvalConfig::new().with_max_call_depth(10);
        let result = Interpreter::with_config(config).eval_program(&program, &Env::new());
        assert_eq!(result, Value::error("maximum call depth exceeded: 10"));

        let result = Interpreter::new().eval_program(&program, &Env::new());
        assert_eq!(result, Value::Integer(0));
    }

    #[test]
    fn test_default_config_has_no_depth_limit() {
        assert_eq!(EvalConfig::default().max_call_depth, None);

        // Monkey calls recurse on the host stack; test threads default to 2 MiB
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024 * 1024)
            .spawn(|| {
                let sum = "let sum = fn(n) { if (n == 0) { 0 } else { n + sum(n - 1) } };";
                let mut interp = Interpreter::new();
                let shallow = interp.run(&format!("{} sum(300)", sum)).unwrap();
                let deep = interp.run(&format!("{} sum(2000)", sum)).unwrap();
                (shallow.to_string(), deep.to_string())
            })
            .unwrap();
        let (shallow, deep) = handle.join().unwrap();
        assert_eq!(shallow, "45150");
        assert_eq!(deep, "2001000");
    }

    #[test]
    fn test_evaluation_is_repeatable_across_fresh_environments() {
        let program = parse(
            "let counter = fn(x) { let y = x * 2; fn() { y + x } };
             let c = counter(4);
             c() + len(\"abc\")",
        );
        let first = Interpreter::new().eval_program(&program, &Env::new());
        let second = Interpreter::new().eval_program(&program, &Env::new());
        assert_eq!(first, Value::Integer(15));
        assert_eq!(first, second);

        let mut shared = Interpreter::new();
        assert_eq!(shared.eval_program(&program, &Env::new()), first);
        assert_eq!(shared.eval_program(&program, &Env::new()), first);
    }

    #[test]
    fn test_run_reports_syntax_errors() {
        let err = Interpreter::new().run("let = 1").unwrap_err();
        assert_eq!(err.msg, "expected next token to be identifier, got =");
        assert_eq!(Interpreter::new().run("1 + 2").unwrap(), Value::Integer(3));
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(eval("5").to_string(), "5");
        assert_eq!(eval("true").to_string(), "true");
        assert_eq!(eval("\"hi\"").to_string(), "hi");
        assert_eq!(eval("if (false) { 1 }").to_string(), "null");
        assert_eq!(eval("foo").to_string(), "ERROR: identifier not found: foo");
        assert_eq!(eval("len").to_string(), "fn() { builtin function }");
        assert_eq!(eval("str(upper)").to_string(), "fn() { builtin function }");
        assert_eq!(Value::ReturnValue(Box::new(Value::Integer(3))).to_string(), "3");
    }
}
