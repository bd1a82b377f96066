use cppfront::diagnostics::DiagnosticKind;
use cppfront::parser::ast::{Node, Statement};
use cppfront::{accepted_extension, compile};
use std::path::Path;

#[test]
fn scenario_minimal_main() {
    let result = compile("int main() { return 0; }");
    assert!(result.success, "errors: {:?}", result.errors);
    assert!(result.errors.is_empty());

    let function = result.intermediate_code.find("FUNCTION main:").unwrap();
    let ret = result.intermediate_code.find("RETURN 0").unwrap();
    assert!(function < ret);

    assert!(result.target_code.contains("main:"));
    assert!(result.target_code.contains("movl $0, %eax"));
}

#[test]
fn scenario_missing_semicolon() {
    let result = compile("int main() { int x = 5 }");
    assert!(!result.success);
    assert!(result
        .errors
        .iter()
        .any(|e| e.message == "Missing semicolon" && e.line == 1));
}

#[test]
fn scenario_declared_but_not_defined() {
    let result = compile("void helper(); int main(){ return 0; }");
    assert!(!result.success);
    assert!(result
        .errors
        .iter()
        .any(|e| e.message == "Function 'helper' declared but not defined"));
}

#[test]
fn scenario_empty_input() {
    let result = compile("");
    assert!(!result.success);
    assert!(result.tokens.is_empty());
    assert!(result
        .errors
        .iter()
        .any(|e| e.message == "Missing main function" && e.line == 0));
}

#[test]
fn whitespace_only_input() {
    let result = compile("  \n\t\n");
    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, DiagnosticKind::MissingEntryPoint);
}

#[test]
fn warnings_do_not_affect_success() {
    let src = "int unused() {\n  return 1;\n}\n\nint main() {\n  int spare = 2;\n  return 0;\n}\n";
    let result = compile(src);
    assert!(result.success, "errors: {:?}", result.errors);
    let warnings: Vec<&str> = result.warnings().iter().map(|w| w.message.as_str()).collect();
    assert_eq!(
        warnings,
        vec!["Unused variable 'spare'", "Unused function 'unused'"]
    );
}

#[test]
fn full_program() {
    let src = r#"#include <iostream>

int square(int n) {
    int result = n * n;
    return result;
}

int main() {
    int value = 4;
    value = square(value);
    std::cout << value;
    return 0;
}
"#;
    let result = compile(src);
    assert!(result.success, "errors: {:?}", result.errors);

    assert!(matches!(result.ast.body.first(), Some(Node::Include(_))));
    let functions: Vec<&str> = result.ast.functions().map(|f| f.name.as_str()).collect();
    assert_eq!(functions, vec!["square", "main"]);

    let main = result.ast.functions().nth(1).unwrap();
    assert!(matches!(&main.body[1], Statement::Expression(e) if e.expression == "value = square(value)"));

    let expected_ir = [
        "FUNCTION square:",
        "  PARAM n",
        "  T0 = n * n",
        "  result = T0",
        "  RETURN result",
        "FUNCTION main:",
        "  T1 = 4",
        "  value = T1",
        "  T2 = square(value)",
        "  value = T2",
        "  EVAL std::cout << value",
        "  RETURN 0",
    ]
    .join("\n");
    assert_eq!(result.intermediate_code, expected_ir);

    assert!(result.target_code.contains("square:\n  pushq %rbp\n  movq %rsp, %rbp\n  subq $8, %rsp\n  movl $result, %eax\n  leave\n  ret\n"));
    assert_eq!(result.semantic_analysis.functions.len(), 2);
}

#[test]
fn temporaries_never_repeat() {
    let src = "int a() {\n  int x = 1;\n  x = 2;\n  return x;\n}\nint main() {\n  int y = 3;\n  y = a();\n  return y;\n}";
    let result = compile(src);
    let temps: Vec<usize> = result
        .intermediate_code
        .lines()
        .filter_map(|line| line.trim().strip_prefix('T'))
        .filter_map(|rest| rest.split(' ').next()?.parse().ok())
        .collect();
    assert_eq!(temps, vec![0, 1, 2, 3]);
}

#[test]
fn report_serializes_for_display_layer() {
    let result = compile("int main() { return 0; }");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["ast"]["body"][0]["type"], "FunctionDeclaration");
    assert_eq!(json["ast"]["body"][0]["body"][0]["type"], "ReturnStatement");
    assert_eq!(json["tokens"][0]["kind"], "keyword");
    assert!(json["intermediateCode"].as_str().unwrap().contains("RETURN 0"));
}

#[test]
fn display_report_mentions_status() {
    let text = compile("").to_string();
    assert!(text.starts_with("Compilation failed"));
    assert!(text.contains("line 0: Missing main function"));
}

#[test]
fn accepted_extensions() {
    assert!(accepted_extension(Path::new("prog.cpp")));
    assert!(accepted_extension(Path::new("prog.cxx")));
    assert!(accepted_extension(Path::new("prog.cc")));
    assert!(!accepted_extension(Path::new("prog.c")));
    assert!(!accepted_extension(Path::new("prog")));
}
