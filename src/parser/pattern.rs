use crate::parser::ast::{
    ExpressionStatement, FunctionDeclaration, IncludeDirective, Node, Param, Program,
    ReturnStatement, Statement, VariableDeclaration,
};
use anyhow::{bail, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref FUNCTION_RE: Regex = Regex::new(r"(\w+)\s+(\w+)\s*\(([^)]*)\)\s*\{").unwrap();
    static ref VARIABLE_RE: Regex =
        Regex::new(r"(int|float|double|char|bool|auto)\s+(\w+)\s*(=\s*[^;]*)?\s*;").unwrap();
}

const CONTROL_KEYWORDS: &[&str] = &["if", "while", "for", "switch", "catch"];
const STATEMENT_HEADS: &[&str] = &["return", "else", "new", "delete", "throw", "case", "goto"];

/// Shallow, pattern-driven parser over raw source text.
///
/// Function bodies are delimited by counting braces in the raw characters, so
/// braces inside string literals or comments shift the boundary. The
/// top-level variable scan runs over the whole source and also picks up
/// locals declared inside function bodies.
pub struct Parser<'a> {
    src: &'a str,
    body: Vec<Node>,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Parser<'a> {
        Parser { src, body: vec![] }
    }

    pub fn parse(mut self) -> Result<Program> {
        self.parse_includes();
        self.parse_functions()?;
        self.parse_variables();

        log::debug!("parser built {} top-level nodes", self.body.len());

        Ok(Program { body: self.body })
    }

    fn parse_includes(&mut self) {
        for line in self.src.split('\n') {
            let trimmed = line.trim();
            if trimmed.starts_with("#include") {
                self.body.push(Node::Include(IncludeDirective {
                    value: trimmed.to_owned(),
                }));
            }
        }
    }

    fn parse_functions(&mut self) -> Result<()> {
        for caps in FUNCTION_RE.captures_iter(self.src) {
            let (Some(header), Some(return_type), Some(name), Some(params)) =
                (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
            else {
                bail!("function header matched without all of its parts");
            };

            if STATEMENT_HEADS.contains(&return_type.as_str())
                || CONTROL_KEYWORDS.contains(&name.as_str())
            {
                continue;
            }

            let body_start = header.end();
            let body_end = find_body_end(self.src, body_start);
            let Some(body) = self.src.get(body_start..body_end) else {
                bail!("body of function '{}' is out of bounds", name.as_str());
            };

            self.body.push(Node::Function(FunctionDeclaration {
                name: name.as_str().to_owned(),
                return_type: return_type.as_str().to_owned(),
                params: parse_params(params.as_str()),
                body: parse_function_body(body),
                line: self.src[..header.start()].matches('\n').count() + 1,
            }));
        }

        Ok(())
    }

    fn parse_variables(&mut self) {
        for caps in VARIABLE_RE.captures_iter(self.src) {
            self.body.push(Node::Variable(variable_from_captures(&caps)));
        }
    }
}

pub fn parse(src: &str) -> Result<Program> {
    Parser::new(src).parse()
}

/// Byte offset of the `}` closing a body that starts at `start` (just past
/// its `{`). An unterminated body runs to the end of the source.
fn find_body_end(src: &str, start: usize) -> usize {
    let mut depth = 1usize;

    for (offset, byte) in src.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return start + offset;
                }
            }
            _ => {}
        }
    }

    src.len()
}

fn parse_params(list: &str) -> Vec<Param> {
    let list = list.trim();
    if list.is_empty() || list == "void" {
        return vec![];
    }

    list.split(',')
        .map(|param| {
            let mut parts = param.split_whitespace();
            Param {
                _type: parts.next().unwrap_or_default().to_owned(),
                name: parts.next().unwrap_or_default().to_owned(),
            }
        })
        .collect()
}

fn variable_from_captures(caps: &Captures) -> VariableDeclaration {
    VariableDeclaration {
        name: caps[2].to_owned(),
        _type: caps[1].to_owned(),
        init: caps
            .get(3)
            .map(|init| init.as_str().trim_start_matches('=').trim().to_owned()),
    }
}

fn is_return(line: &str) -> bool {
    line.strip_prefix("return")
        .is_some_and(|rest| !rest.starts_with(|ch: char| ch.is_alphanumeric() || ch == '_'))
}

/// One statement per line: a primitive declaration, a `return`, or any other
/// line ending in `;`. Everything else in the body is ignored.
pub fn parse_function_body(body: &str) -> Vec<Statement> {
    let mut stmts = vec![];

    for line in body.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if let Some(caps) = VARIABLE_RE.captures(trimmed) {
            stmts.push(Statement::Variable(variable_from_captures(&caps)));
        } else if is_return(trimmed) {
            let value = trimmed["return".len()..].trim();
            stmts.push(Statement::Return(ReturnStatement {
                value: value.strip_suffix(';').unwrap_or(value).trim().to_owned(),
            }));
        } else if let Some(expr) = trimmed.strip_suffix(';') {
            stmts.push(Statement::Expression(ExpressionStatement {
                expression: expr.trim().to_owned(),
            }));
        }
    }

    stmts
}
