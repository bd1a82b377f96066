pub mod diagnostics;
pub mod driver;
pub mod lexer {
    pub mod lex;
}
pub mod validator {
    pub mod brackets;
    pub mod declarations;
    pub mod entry;
    pub mod termination;
}
pub mod parser {
    pub mod ast;
    pub mod pattern;
}
pub mod semantics {
    pub mod analyzer;
}
pub mod ir {
    pub mod gen;
    pub mod instr;
}
pub mod codegen {
    pub mod gen;
}
pub mod emitter {
    pub mod emit;
    pub mod util;
}

pub use driver::{compile, CompileResult};

/// Extensions a source file must carry before its text is handed to `compile`.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["cpp", "cxx", "cc"];

pub fn accepted_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext))
}
