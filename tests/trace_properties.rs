/// Trace synthesis properties, checked through the public library API.

use whatcode::domain::data_structure::DataStructureKind;
use whatcode::domain::flowgraph::FlowKind;
use whatcode::domain::inference::{infer_value, Environment};
use whatcode::domain::language::SupportedLanguage;
use whatcode::domain::trace::{is_significant, synthesize, Step};
use whatcode::domain::value::Value;

const SNIPPETS: &[&str] = &[
    "def add(a, b):\n    result = a + b\n    return result",
    concat!(
        "# Python Example\ndef fibonacci(n):\n    if n <= 1:\n        return n\n",
        "    return fibonacci(n-1) + fibonacci(n-2)\n\nresult = fibonacci(5)\nprint(result)",
    ),
    concat!(
        "function factorial(n: number): number {\n    if (n <= 1) {\n        return 1;\n    }\n",
        "    return n * factorial(n - 1);\n}\n\nconst result = factorial(5);",
    ),
    "nums = [1, 2, 3]\ngrid = [[1,2],[3,4]]\ncopy = nums\nfor n in nums:\n    total = n",
];

fn significant_count(code: &str) -> usize {
    code.split('\n').take(15).filter(|l| is_significant(l)).count()
}

/// Blank out the per-run fields so two traces can be compared.
fn normalized(mut steps: Vec<Step>) -> Vec<Step> {
    for step in &mut steps {
        step.timestamp = 0;
        for obj in &mut step.memory_objects {
            obj.address.clear();
        }
    }
    steps
}

#[test]
fn test_step_count_is_significant_lines_plus_one() {
    for code in SNIPPETS {
        let steps = synthesize(code, SupportedLanguage::Python);
        assert_eq!(steps.len(), significant_count(code) + 1, "snippet: {code}");
    }
    assert_eq!(synthesize("\n\n  \n", SupportedLanguage::Python).len(), 0);
}

#[test]
fn test_step_numbers_are_contiguous() {
    for code in SNIPPETS {
        let steps = synthesize(code, SupportedLanguage::TypeScript);
        let numbers: Vec<usize> = steps.iter().map(|s| s.step_number).collect();
        let expected: Vec<usize> = (1..=steps.len()).collect();
        assert_eq!(numbers, expected);
    }
}

#[test]
fn test_cumulative_lists_only_grow() {
    for code in SNIPPETS {
        let steps = synthesize(code, SupportedLanguage::Python);
        for pair in steps.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            assert!(after.memory_objects.starts_with(&before.memory_objects));
            assert!(after.control_flow.starts_with(&before.control_flow));
            assert!(after.data_structures.starts_with(&before.data_structures));
        }
    }
}

#[test]
fn test_frames_shrink_only_after_return_lines() {
    for code in SNIPPETS {
        let steps = synthesize(code, SupportedLanguage::Python);
        let lines: Vec<&str> = code.split('\n').collect();
        for pair in steps.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if after.stack_frames.len() < before.stack_frames.len() {
                assert_eq!(after.stack_frames.len() + 1, before.stack_frames.len());
                let line = before.line_highlight.expect("popping step has a line");
                assert!(lines[line - 1].contains("return"));
            }
        }
    }
}

#[test]
fn test_runs_are_idempotent_modulo_addresses_and_time() {
    for code in SNIPPETS {
        let first = normalized(synthesize(code, SupportedLanguage::Java));
        let second = normalized(synthesize(code, SupportedLanguage::Java));
        assert_eq!(first, second);
    }
}

#[test]
fn test_addresses_unique_within_run() {
    let code: Vec<String> = (0..15).map(|i| format!("v{i} = {i}")).collect();
    let steps = synthesize(&code.join("\n"), SupportedLanguage::Python);
    let last = steps.last().unwrap();
    let mut addresses: Vec<&str> =
        last.memory_objects.iter().map(|o| o.address.as_str()).collect();
    addresses.sort();
    addresses.dedup();
    assert_eq!(addresses.len(), 15);
}

#[test]
fn test_earlier_snapshots_unaffected_by_later_lines() {
    let steps = synthesize("x = 1\nx = \"two\"\ny = [1]", SupportedLanguage::Python);
    assert_eq!(steps[0].variable_states.len(), 1);
    assert_eq!(steps[0].variable_states.get("x"), Some(&Value::Int(1)));
    assert_eq!(steps[0].memory_objects.len(), 1);
    assert!(steps[0].data_structures.is_empty());
    assert_eq!(steps[1].variable_states.get("x"), Some(&Value::Text("two".into())));
}

#[test]
fn test_literal_round_trips() {
    let env = Environment::new();
    let v = infer_value("42", &env);
    assert_eq!((v.clone(), v.type_tag()), (Value::Int(42), "int"));
    let v = infer_value("3.14", &env);
    assert_eq!((v.clone(), v.type_tag()), (Value::Double(3.14), "double"));
    let v = infer_value("\"hi\"", &env);
    assert_eq!((v.clone(), v.type_tag()), (Value::Text("hi".into()), "String"));
}

#[test]
fn test_list_classification_through_trace() {
    let steps = synthesize("a = [1,2,3]\ng = [[1,2],[3,4]]", SupportedLanguage::Python);
    let structures = &steps.last().unwrap().data_structures;
    assert_eq!(structures.len(), 2);
    assert_eq!(structures[0].kind, DataStructureKind::Array);
    assert_eq!(structures[0].data.as_list().map(|l| l.len()), Some(3));
    assert_eq!(structures[1].kind, DataStructureKind::Graph);
}

#[test]
fn test_reference_with_spaced_semicolon_copies_list() {
    let steps = synthesize("nums = [1,2,3]\ncopy = nums ;", SupportedLanguage::Python);
    let last = steps.last().unwrap();
    let nums = Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert_eq!(last.variable_states.get("copy"), Some(&nums));
    assert_eq!(last.memory_objects[1].type_tag, "List/Array");
    assert_eq!(last.data_structures.len(), 2);
    assert_eq!(last.data_structures[1].kind, DataStructureKind::Array);
}

#[test]
fn test_add_function_scenario() {
    let code = "def add(a, b):\n    result = a + b\n    return result";
    let steps = synthesize(code, SupportedLanguage::Python);
    assert_eq!(steps.len(), 4);

    assert_eq!(steps[0].description, "Defining a function");
    assert_eq!(steps[0].line_highlight, Some(1));
    assert_eq!(steps[0].stack_frames[0].function_name, "add");
    assert!(steps[0].stack_frames[0].parameters.contains_key("a"));
    assert!(steps[0].stack_frames[0].parameters.contains_key("b"));
    assert!(steps[0].memory_objects.is_empty());

    assert_eq!(steps[1].description, "Assigning value to variable");
    assert_eq!(steps[1].line_highlight, Some(2));
    assert_eq!(steps[1].variable_states.get("result"), Some(&Value::Opaque));
    assert_eq!(steps[1].memory_objects[0].type_tag, "Object");
    assert_eq!(steps[1].control_flow.len(), 1);
    assert_eq!(steps[1].control_flow[0].kind, FlowKind::Sequential);
    assert_eq!((steps[1].control_flow[0].from_line, steps[1].control_flow[0].to_line), (1, 2));

    assert_eq!(steps[2].description, "Returning value");
    assert_eq!(steps[2].line_highlight, Some(3));
    assert_eq!(steps[2].control_flow[1].kind, FlowKind::Return);
    assert_eq!((steps[2].control_flow[1].from_line, steps[2].control_flow[1].to_line), (2, 3));
    assert_eq!(steps[2].stack_frames.len(), 1);

    assert_eq!(steps[3].description, "Execution completed");
    assert_eq!(steps[3].line_highlight, None);
    assert_eq!(
        steps[3].output.as_deref(),
        Some("Code executed successfully\nOutput: [Simulated Python execution]")
    );
    assert!(steps[3].stack_frames.is_empty());
}

#[test]
fn test_concurrent_runs_agree() {
    let code = SNIPPETS[1];
    let expected = normalized(synthesize(code, SupportedLanguage::Python));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(move || normalized(synthesize(code, SupportedLanguage::Python)))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
