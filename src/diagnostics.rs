use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    MissingEntryPoint,
    MissingSemicolon,
    UnmatchedOpeningBracket,
    UnmatchedClosingBracket,
    UndefinedFunction,
    UnusedVariable,
    UnusedFunction,
    InternalFault,
}

impl DiagnosticKind {
    /// Warnings are reported but never decide whether a compile succeeded.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::UnusedVariable | DiagnosticKind::UnusedFunction
        )
    }
}

/// A line-tagged message. Line 0 means the fault is not tied to a source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: usize, message: impl Into<String>) -> Diagnostic {
        Diagnostic {
            line,
            message: message.into(),
            kind,
        }
    }

    pub fn missing_entry_point(line: usize) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::MissingEntryPoint, line, "Missing main function")
    }

    pub fn missing_semicolon(line: usize) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::MissingSemicolon, line, "Missing semicolon")
    }

    pub fn unmatched_opening(line: usize) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::UnmatchedOpeningBracket,
            line,
            "Unmatched opening bracket",
        )
    }

    pub fn unmatched_closing(line: usize) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::UnmatchedClosingBracket,
            line,
            "Unmatched closing bracket",
        )
    }

    pub fn undefined_function(name: &str, line: usize) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::UndefinedFunction,
            line,
            format!("Function '{}' declared but not defined", name),
        )
    }

    pub fn unused_variable(name: &str, line: usize) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::UnusedVariable,
            line,
            format!("Unused variable '{}'", name),
        )
    }

    pub fn unused_function(name: &str, line: usize) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::UnusedFunction,
            line,
            format!("Unused function '{}'", name),
        )
    }

    pub fn internal_fault(fault: impl fmt::Display) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::InternalFault,
            0,
            format!("Compilation error: {}", fault),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// 1-based number of the first line containing `needle`, or 0.
pub fn find_line(src: &str, needle: &str) -> usize {
    src.split('\n')
        .position(|line| line.contains(needle))
        .map(|idx| idx + 1)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_line_is_one_based() {
        let src = "int a;\nint b;\nint c;";
        assert_eq!(find_line(src, "int b"), 2);
        assert_eq!(find_line(src, "nothing"), 0);
    }

    #[test]
    fn only_unused_symbols_are_warnings() {
        assert!(Diagnostic::unused_variable("x", 1).kind.is_warning());
        assert!(!Diagnostic::missing_semicolon(1).kind.is_warning());
    }
}
