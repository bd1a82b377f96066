use crate::diagnostics::Diagnostic;

/// Brace balance over raw text. Braces inside strings and comments count.
pub fn check_brackets(src: &str) -> Vec<Diagnostic> {
    let mut open_lines: Vec<usize> = vec![];
    let mut errors = vec![];

    for (idx, line) in src.split('\n').enumerate() {
        for ch in line.chars() {
            match ch {
                '{' => open_lines.push(idx + 1),
                '}' => {
                    if open_lines.pop().is_none() {
                        errors.push(Diagnostic::unmatched_closing(idx + 1));
                    }
                }
                _ => {}
            }
        }
    }

    if let Some(&first) = open_lines.first() {
        errors.push(Diagnostic::unmatched_opening(first));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    #[test]
    fn balanced_source_has_no_errors() {
        assert!(check_brackets("int main() {\n  { }\n}").is_empty());
    }

    #[test]
    fn trailing_open_brace() {
        let errors = check_brackets("int x;\nint main() {");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, DiagnosticKind::UnmatchedOpeningBracket);
        assert_eq!(errors[0].line, 2);
    }

    #[test]
    fn leading_close_brace() {
        let errors = check_brackets("}\nint x;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, DiagnosticKind::UnmatchedClosingBracket);
        assert_eq!(errors[0].line, 1);
    }

    #[test]
    fn residual_opens_report_bottom_of_stack_once() {
        let errors = check_brackets("{\n{\n{\n}");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
    }
}
