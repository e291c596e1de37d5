use sotto::{build_source, render_build_errors, BuildOptions, BuildErrors};
use sotto::source::ModuleSource;
use sotto::parser::stmt::Stmt;
use sotto::parser::ParserErrorKind;
use sotto::interpreter::Interpreter;
use sotto::runtime::Variant;
use sotto::runtime::errors::ErrorKind;
use sotto::transform::TransformErrorKind;


fn build_script(source: &str, options: BuildOptions) -> (Vec<sotto::parser::stmt::StmtMeta>, Interpreter) {
    let module = ModuleSource::new("<test>", source);

    let (ast, interner) = match build_source(&module, &options) {
        Ok(output) => output,
        Err(errors) => panic!("{}", render_build_errors(&module, &errors)),
    };

    (ast, Interpreter::new(interner))
}

fn run_script_with(source: &str, options: BuildOptions) -> Interpreter {
    let (ast, interp) = build_script(source, options);

    if let Err(error) = interp.exec_module(&ast) {
        panic!("runtime error: {}", error);
    }
    interp
}

fn run_script(source: &str) -> Interpreter {
    run_script_with(source, BuildOptions::default())
}

// scripts must behave identically with and without the call-site optimizer
fn run_both(source: &str) {
    run_script_with(source, BuildOptions::default());
    run_script_with(source, BuildOptions { flatten_calls: true });
}

fn build_failure(source: &str) -> BuildErrors {
    let module = ModuleSource::new("<test>", source);
    build_source(&module, &BuildOptions::default()).err().expect("build unexpectedly succeeded")
}

fn transform_failure(source: &str) -> sotto::transform::TransformError {
    match build_failure(source) {
        BuildErrors::Transform(error) => *error,
        other => panic!("unexpected build failure: {:?}", other),
    }
}

fn int(value: i64) -> Variant {
    Variant::Integer(value)
}


const FACT: &str = r#"
    fun fact(n, #acc = 1) {
        if (n <= 1) { return acc; }
        return fact(n - 1, acc * n);
    }
"#;

#[test]
fn accumulator_threads_through_recursion() {
    run_both(&format!(r#"{}
        assert fact(5) == 120;
        assert fact(3) == 6;
        assert fact(0) == 1;
    "#, FACT));
}

#[test]
fn superfluous_arguments_are_discarded() {
    run_both(&format!(r#"{}
        assert fact(3, 999, nil) == 6;
        assert fact(3, 999, nil) == fact(3);
    "#, FACT));
}

#[test]
fn caller_visible_arity_counts_public_parameters_only() {
    run_both(&format!(r#"{}
        assert arity(fact) == 1;
    "#, FACT));

    run_script(r#"
        fun three(a, b, c, #hidden = 0) { return a; }
        assert arity(three) == 3;
    "#);
}

#[test]
fn arguments_reflect_only_supplied_public_arguments() {
    run_script(r#"
        fun probe(x, #acc = 0) {
            return arguments;
        }

        let seen = probe(1, 2, 3);
        assert len(seen) == 1;
        assert seen[0] == 1;
    "#);
}

#[test]
fn arguments_never_contain_accumulator_values() {
    run_script(r#"
        fun depth(n, #acc = 0) {
            if (n == 0) { return len(arguments); }
            return depth(n - 1, acc + 1);
        }

        assert depth(0) == 1;
        assert depth(3) == 1;
    "#);
}

#[test]
fn under_supplied_calls_expose_only_what_was_passed() {
    run_script(r#"
        fun probe(x, y, #acc = 0) {
            return len(arguments);
        }

        assert probe(1) == 1;
        assert probe(1, 2) == 2;
        assert probe(1, 2, 3, 4) == 2;
    "#);
}

#[test]
fn private_defaults_evaluate_left_to_right_per_invocation() {
    run_script(r#"
        fun pair(x, #a = x + 1, #b = a * 2) {
            return b;
        }

        assert pair(3) == 8;
        assert pair(10) == 22;
    "#);
}

#[test]
fn multiple_accumulators() {
    run_both(r#"
        fun fib(n, #a = 0, #b = 1) {
            if (n == 0) { return a; }
            return fib(n - 1, b, a + b);
        }

        assert fib(0) == 0;
        assert fib(1) == 1;
        assert fib(10) == 55;
    "#);
}

#[test]
fn identity_operations_forward_to_the_outer_function() {
    run_both(r#"
        fun tagged(n, #acc = 0) {
            tagged.calls = (tagged.calls or 0) + 1;
            return n;
        }

        tagged(7);
        tagged(8);

        assert tagged.calls == 2;
        assert hasattr(tagged, "calls");
        assert len(attrnames(tagged)) == 1;

        assert delattr(tagged, "calls");
        assert not hasattr(tagged, "calls");
    "#);
}

#[test]
fn attributes_set_outside_are_visible_inside() {
    run_both(r#"
        fun reader(x, #acc = 0) {
            return reader.tag;
        }

        reader.tag = 42;
        assert reader(1) == 42;
    "#);
}

#[test]
fn zero_private_functions_pass_through_unchanged() {
    run_both(r#"
        fun add(x, y = 1) { return x + y; }

        assert add(2) == 3;
        assert add(2, 5) == 7;
        assert arity(add) == 1;

        fun gather(x, ...rest) { return len(rest); }

        assert gather(1) == 0;
        assert gather(1, 2, 3) == 2;
    "#);
}

#[test]
fn anonymous_function_with_privates() {
    run_script(r#"
        let bump = fun(x, #a = 5) { return x + a; };

        assert bump(1) == 6;
        assert bump(1, 99) == 6;
    "#);
}

#[test]
fn nested_function_with_privates() {
    run_both(r#"
        fun host(x) {
            fun counter(n, #acc = 0) {
                if (n == 0) { return acc; }
                return counter(n - 1, acc + 1);
            }
            return counter(x);
        }

        assert host(4) == 4;
    "#);
}

#[test]
fn while_loops_and_assignment() {
    run_script(r#"
        fun total(n) {
            let sum = 0;
            let i = 0;
            while (i < n) {
                i = i + 1;
                sum = sum + i;
            }
            return sum;
        }

        assert total(4) == 10;
        echo total(4);
    "#);
}

#[test]
fn calls_from_the_embedding_driver() {
    let interp = run_script(FACT);
    let fact = interp.global("fact").expect("fact not defined");

    let result = interp.call(&fact, vec![int(3), int(999), Variant::Nil]).unwrap();
    assert!(result.cmp_eq(&int(6)));

    let result = interp.call(&fact, vec![int(5)]).unwrap();
    assert!(result.cmp_eq(&int(120)));
}

#[test]
fn runaway_recursion_is_reported() {
    let interp = run_script(r#"
        fun forever(n) { return forever(n + 1); }
    "#);

    let forever = interp.global("forever").expect("forever not defined");
    let error = interp.call(&forever, vec![int(0)]).unwrap_err();

    assert!(matches!(error.kind(), ErrorKind::RecursionLimit));
}

#[test]
fn optimizer_flattens_and_preserves_behavior() {
    let source = r#"
        fun fib(n, #a = 0, #b = 1) {
            if (n == 0) { return a; }
            return fib(n - 1, b, a + b);
        }

        assert fib(10) == 55;
    "#;

    let (ast, interp) = build_script(source, BuildOptions { flatten_calls: true });

    // flattened: a single function taking all parameters positionally
    let fundef = ast.iter()
        .find_map(|stmt| match stmt.variant() {
            Stmt::Function(fundef) => Some(fundef),
            _ => None,
        })
        .expect("no function definition");
    assert!(fundef.params.len() == 3);
    assert!(fundef.body.len() == 2);

    interp.exec_module(&ast).unwrap();
}


/*** compile-time diagnostics ***/

#[test]
fn missing_default_is_rejected() {
    let error = transform_failure("fun f(x, y = 1, #a, #b = 3) { }");

    assert!(error.kind() == TransformErrorKind::MissingDefaultForPrivateParameter);
    assert!(error.param_name() == "a");
    assert!(error.position() == 2);
}

#[test]
fn public_after_private_is_rejected() {
    let error = transform_failure("fun f(x, #a = 1, y) { }");

    assert!(error.kind() == TransformErrorKind::OrderingViolation);
    assert!(error.param_name() == "y");
}

#[test]
fn private_rest_parameter_is_rejected() {
    let error = transform_failure("fun f(#...xs) { }");

    assert!(error.kind() == TransformErrorKind::PrivateRestParameterRejected);
}

#[test]
fn nothing_is_emitted_for_an_invalid_function() {
    // the whole build fails; there is no partially rewritten output
    assert!(matches!(build_failure("fun f(x, #a) { }"), BuildErrors::Transform(..)));
}

#[test]
fn diagnostics_carry_parameter_name_and_position() {
    let source = "fun f(x, y = 1, #a, #b = 3) { }";
    let module = ModuleSource::new("example", source);

    let errors = build_source(&module, &BuildOptions::default()).err()
        .expect("build unexpectedly succeeded");
    let rendered = render_build_errors(&module, &errors);

    assert!(rendered.contains("'a' at position 2"), "rendered: {}", rendered);
    assert!(rendered.contains("example:1:"), "rendered: {}", rendered);
}

#[test]
fn malformed_parameter_lists_are_syntax_errors() {
    for source in ["fun f(#) { }", "fun f(...xs = 1) { }", "fun f(...xs, y) { }"] {
        match build_failure(source) {
            BuildErrors::Syntax(errors) => {
                assert!(errors[0].kind() == ParserErrorKind::MalformedParameterList);
            },
            other => panic!("unexpected build failure: {:?}", other),
        }
    }
}
