use crate::diagnostics::Diagnostic;

pub const ENTRY_POINT: &str = "main";

const ENTRY_SHAPES: &[&str] = &["int main(", "void main("];

pub fn has_entry_point(src: &str) -> bool {
    ENTRY_SHAPES.iter().any(|shape| src.contains(shape))
}

/// Line of the first entry-point header, or 0 when there is none.
pub fn entry_point_line(src: &str) -> usize {
    src.split('\n')
        .position(|line| ENTRY_SHAPES.iter().any(|shape| line.contains(shape)))
        .map(|idx| idx + 1)
        .unwrap_or(0)
}

pub fn check_entry_point(src: &str) -> Vec<Diagnostic> {
    if has_entry_point(src) {
        return vec![];
    }
    vec![Diagnostic::missing_entry_point(entry_point_line(src))]
}
