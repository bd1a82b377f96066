use crate::{
    diagnostics::{find_line, Diagnostic},
    parser::ast::{Node, Param, Program},
    validator::entry::ENTRY_POINT,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub _type: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSymbol {
    pub name: String,
    #[serde(rename = "returnType")]
    pub return_type: String,
    pub params: Vec<Param>,
    pub line: usize,
}

/// Symbol tables and usage warnings, rebuilt from the AST on every compile.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SemanticReport {
    pub variables: Vec<VariableSymbol>,
    pub functions: Vec<FunctionSymbol>,
    pub warnings: Vec<Diagnostic>,
}

/// Usage is a textual count over the whole source: a symbol seen once is
/// only its declaration. Shadowed names and mentions inside strings or
/// comments are counted like any other occurrence.
fn occurrences(src: &str, needle: &str) -> usize {
    src.matches(needle).count()
}

pub fn analyze(program: &Program, src: &str) -> SemanticReport {
    let mut report = SemanticReport::default();

    for node in &program.body {
        match node {
            Node::Variable(var) => report.variables.push(VariableSymbol {
                name: var.name.clone(),
                _type: var._type.clone(),
                line: find_line(src, &var.name),
            }),
            Node::Function(func) => report.functions.push(FunctionSymbol {
                name: func.name.clone(),
                return_type: func.return_type.clone(),
                params: func.params.clone(),
                line: find_line(src, &func.name),
            }),
            Node::Include(_) => {}
        }
    }

    for var in &report.variables {
        if occurrences(src, &var.name) <= 1 {
            report
                .warnings
                .push(Diagnostic::unused_variable(&var.name, var.line));
        }
    }

    for func in &report.functions {
        if func.name == ENTRY_POINT {
            continue;
        }
        if occurrences(src, &format!("{}(", func.name)) <= 1 {
            report
                .warnings
                .push(Diagnostic::unused_function(&func.name, func.line));
        }
    }

    log::debug!(
        "semantic analysis: {} variables, {} functions, {} warnings",
        report.variables.len(),
        report.functions.len(),
        report.warnings.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::pattern::parse;

    fn report(src: &str) -> SemanticReport {
        analyze(&parse(src).unwrap(), src)
    }

    #[test]
    fn collects_symbols_with_lines() {
        let src = "int counter = 0;\nint main() {\n  return counter;\n}";
        let report = report(src);
        assert_eq!(report.functions.len(), 1);
        assert_eq!(report.functions[0].line, 2);
        assert_eq!(report.variables.len(), 1);
        assert_eq!(report.variables[0].name, "counter");
        assert_eq!(report.variables[0].line, 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn unused_variable_is_warned() {
        let report = report("int main() {\n  int lonely = 3;\n  return 0;\n}");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].message, "Unused variable 'lonely'");
        assert_eq!(report.warnings[0].line, 2);
    }

    #[test]
    fn unused_function_is_warned_but_main_is_not() {
        let report = report("int helper(int a) {\n  return a;\n}\nint main() {\n  return 0;\n}");
        let messages: Vec<&str> = report.warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, vec!["Unused function 'helper'"]);
    }

    #[test]
    fn called_function_is_used() {
        let report = report("int helper() {\n  return 1;\n}\nint main() {\n  return helper();\n}");
        assert!(report.warnings.is_empty());
    }
}
