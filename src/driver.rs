use crate::{
    codegen::gen::Codegen,
    diagnostics::Diagnostic,
    emitter::emit::emit_to_string,
    ir::gen::lower,
    lexer::lex::{tokenize, Token},
    parser::{ast::Program, pattern::parse},
    semantics::analyzer::{analyze, SemanticReport},
    validator::{
        brackets::check_brackets, declarations::check_declarations,
        entry::{check_entry_point, has_entry_point}, termination::check_termination,
    },
};
use anyhow::{bail, Result};
use serde::Serialize;
use std::{fmt, io::Write};

/// Everything one compile call produces. Built once, never mutated after.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CompileResult {
    pub success: bool,
    pub tokens: Vec<Token>,
    pub ast: Program,
    pub errors: Vec<Diagnostic>,
    #[serde(rename = "intermediateCode")]
    pub intermediate_code: String,
    #[serde(rename = "semanticAnalysis")]
    pub semantic_analysis: SemanticReport,
    #[serde(rename = "targetCode")]
    pub target_code: String,
}

impl CompileResult {
    pub fn failed(fault: impl fmt::Display) -> CompileResult {
        CompileResult {
            errors: vec![Diagnostic::internal_fault(fault)],
            ..CompileResult::default()
        }
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.semantic_analysis.warnings
    }

    /// Writes the target code of a successful compile.
    pub fn write_target(&self, f: &mut impl Write) -> Result<()> {
        if !self.success {
            bail!("compile failed, no target code written");
        }
        f.write_all(self.target_code.as_bytes())?;
        Ok(())
    }
}

/// Structural checks, in report order: entry point, termination, brace
/// balance, declaration/definition correspondence.
pub fn validate(src: &str) -> Vec<Diagnostic> {
    let mut errors = check_entry_point(src);
    errors.extend(check_termination(src));
    errors.extend(check_brackets(src));
    errors.extend(check_declarations(src));
    errors
}

fn run_pipeline(src: &str) -> Result<CompileResult> {
    let errors = validate(src);
    let tokens = tokenize(src);

    let ast = parse(src)?;
    let semantic_analysis = analyze(&ast, src);
    let intermediate_code = lower(&ast).listing();
    let target_code = emit_to_string(&ast.codegen())?;

    let success = has_entry_point(src) && errors.iter().all(|e| e.kind.is_warning());
    log::debug!(
        "compile finished: success={}, {} errors, {} warnings",
        success,
        errors.len(),
        semantic_analysis.warnings.len()
    );

    Ok(CompileResult {
        success,
        tokens,
        ast,
        errors,
        intermediate_code,
        semantic_analysis,
        target_code,
    })
}

/// Runs every phase over `src`. Source problems land in `errors`; an internal
/// fault in any phase degrades to a failed result instead of escaping.
pub fn compile(src: &str) -> CompileResult {
    match run_pipeline(src) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("pipeline fault: {:#}", err);
            CompileResult::failed(format!("{:#}", err))
        }
    }
}

impl fmt::Display for CompileResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success { "succeeded" } else { "failed" };
        writeln!(f, "Compilation {}", status)?;

        if !self.errors.is_empty() {
            writeln!(f, "\nErrors:")?;
            for err in &self.errors {
                writeln!(f, "  {}", err)?;
            }
        }

        if !self.warnings().is_empty() {
            writeln!(f, "\nWarnings:")?;
            for warning in self.warnings() {
                writeln!(f, "  {}", warning)?;
            }
        }

        writeln!(f, "\nIncludes:")?;
        for include in self.ast.includes() {
            writeln!(f, "  {}", include.value)?;
        }

        writeln!(f, "\nFunctions:")?;
        for func in &self.semantic_analysis.functions {
            let params = func
                .params
                .iter()
                .map(|p| format!("{} {}", p._type, p.name).trim().to_owned())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "  {} {}({}) line {}", func.return_type, func.name, params, func.line)?;
        }

        writeln!(f, "\nVariables:")?;
        for var in &self.semantic_analysis.variables {
            writeln!(f, "  {} {} line {}", var._type, var.name, var.line)?;
        }

        writeln!(f, "\nIntermediate code:\n{}", self.intermediate_code)?;
        write!(f, "\nTarget code:\n{}", self.target_code)
    }
}
