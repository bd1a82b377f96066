use crate::diagnostics::Diagnostic;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref DEFINITION_RE: Regex = Regex::new(r"(\w+)\s+(\w+)\s*\([^)]*\)\s*\{").unwrap();
    static ref PROTOTYPE_RE: Regex = Regex::new(r"(\w+)\s+(\w+)\s*\([^)]*\)\s*;").unwrap();
}

/// Words that can precede a call but never name a return type.
const STATEMENT_HEADS: &[&str] = &["return", "else", "new", "delete", "throw", "case", "goto"];

#[derive(Debug, Clone, PartialEq)]
struct Signature<'a> {
    name: &'a str,
    offset: usize,
}

fn signatures<'a>(re: &Regex, src: &'a str) -> Vec<Signature<'a>> {
    re.captures_iter(src)
        .filter_map(|caps| {
            let head = caps.get(1)?.as_str();
            if STATEMENT_HEADS.contains(&head) {
                return None;
            }
            let name = caps.get(2)?;
            Some(Signature {
                name: name.as_str(),
                offset: caps.get(0)?.start(),
            })
        })
        .collect()
}

fn line_at(src: &str, offset: usize) -> usize {
    src[..offset].matches('\n').count() + 1
}

/// Every prototype must have a definition with the same name somewhere in
/// the source. Every unmatched prototype is reported at its own line.
pub fn check_declarations(src: &str) -> Vec<Diagnostic> {
    let defined: HashSet<&str> = signatures(&DEFINITION_RE, src)
        .into_iter()
        .map(|sig| sig.name)
        .collect();

    let mut errors = vec![];

    for proto in signatures(&PROTOTYPE_RE, src) {
        if defined.contains(proto.name) {
            continue;
        }
        errors.push(Diagnostic::undefined_function(
            proto.name,
            line_at(src, proto.offset),
        ));
    }

    errors
}
