use crate::diagnostics::Diagnostic;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FUNCTION_SIGNATURE_RE: Regex =
        Regex::new(r"(\w+\s+)?\w+\s*\([^)]*\)(\s*const)?\s*(=\s*0)?\s*$").unwrap();
}

const KEYWORD_CLAUSES: &[&str] = &[
    "namespace ",
    "class ",
    "struct ",
    "enum ",
    "typedef ",
    "using ",
    "template ",
    "return ",
    "if ",
    "else ",
    "for ",
    "while ",
    "do ",
    "switch ",
    "case ",
    "default:",
];

const BLOCK_HEADER_WORDS: &[&str] = &["const", "else", "do", "try"];

fn is_keyword_clause(text: &str) -> bool {
    KEYWORD_CLAUSES.iter().any(|clause| text.contains(clause))
}

fn opens_code_block(header: &str) -> bool {
    if header.ends_with(')') {
        return true;
    }
    let last_word = header
        .rsplit(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .next()
        .unwrap_or("");
    BLOCK_HEADER_WORDS.contains(&last_word)
}

/// Tracks `/*` and `*/` across lines. A line is commented if a comment was
/// open when it started or if it carries either marker.
#[derive(Debug, Default)]
struct BlockComment {
    open: bool,
}

impl BlockComment {
    fn covers(&mut self, line: &str) -> bool {
        let was_open = self.open;
        match (line.rfind("/*"), line.rfind("*/")) {
            (None, None) => was_open,
            (Some(open), Some(close)) => {
                self.open = open > close;
                true
            }
            (Some(_), None) => {
                self.open = true;
                true
            }
            (None, Some(_)) => {
                self.open = false;
                true
            }
        }
    }
}

/// Looks at blocks that open and close on the same line, e.g.
/// `int main() { int x = 5 }`, where the text before `}` is a statement
/// that must still end in `;`.
fn unterminated_inline_statement(line: &str) -> bool {
    let mut blocks = vec![];
    let mut segment_start = 0;

    for (idx, ch) in line.char_indices() {
        match ch {
            '{' => {
                blocks.push(opens_code_block(line[segment_start..idx].trim()));
                segment_start = idx + 1;
            }
            '}' => {
                let segment = line[segment_start..idx].trim();
                segment_start = idx + 1;
                if blocks.pop() == Some(true)
                    && !segment.is_empty()
                    && !segment.ends_with(';')
                    && !is_keyword_clause(segment)
                {
                    return true;
                }
            }
            ';' => segment_start = idx + 1,
            _ => {}
        }
    }

    false
}

pub fn check_termination(src: &str) -> Vec<Diagnostic> {
    let mut errors = vec![];
    let mut comment = BlockComment::default();

    for (idx, line) in src.split('\n').enumerate() {
        if comment.covers(line) {
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }

        if is_keyword_clause(trimmed) {
            continue;
        }

        if unterminated_inline_statement(trimmed) {
            errors.push(Diagnostic::missing_semicolon(idx + 1));
            continue;
        }

        if trimmed.ends_with('{') || trimmed.ends_with('}') || trimmed.starts_with('}') {
            continue;
        }

        if !trimmed.ends_with(';') && !FUNCTION_SIGNATURE_RE.is_match(trimmed) {
            errors.push(Diagnostic::missing_semicolon(idx + 1));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<usize> {
        check_termination(src).into_iter().map(|d| d.line).collect()
    }

    #[test]
    fn terminated_statements_pass() {
        assert!(lines("int main() {\n  int x = 5;\n  return x;\n}").is_empty());
    }

    #[test]
    fn missing_semicolon_on_its_own_line() {
        assert_eq!(lines("int main() {\n  int x = 5\n  return x;\n}"), vec![2]);
    }

    #[test]
    fn missing_semicolon_inside_one_line_body() {
        assert_eq!(lines("int main() { int x = 5 }"), vec![1]);
    }

    #[test]
    fn keyword_clause_lines_skip_the_inline_check() {
        assert!(lines("if (x) { y = 1 }").is_empty());
        assert!(lines("for (int i = 0; i < n; i++) { sum += i }").is_empty());
    }

    #[test]
    fn initializer_lists_are_not_statements() {
        assert!(lines("int values[] = {1, 2, 3};").is_empty());
    }

    #[test]
    fn signatures_and_clauses_are_exempt() {
        assert!(lines("int add(int a, int b)\n{\n  return a + b;\n}").is_empty());
        assert!(lines("virtual void draw() const = 0").is_empty());
        assert!(lines("if (x) y = 1").is_empty());
    }

    #[test]
    fn block_comments_are_skipped() {
        assert!(lines("/* a\n no semicolon here\n*/\nint x;").is_empty());
        assert!(lines("int x; /* trailing note */").is_empty());
    }
}
