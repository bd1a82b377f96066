use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum IRInstruction {
    Function(String),
    Param(String),
    /// `T<tmp> = <expr>`
    Temp { tmp: usize, expr: String },
    /// `<dst> = T<tmp>`
    Assign { dst: String, tmp: usize },
    Allocate(String),
    Ret(String),
    Eval(String),
}

impl fmt::Display for IRInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IRInstruction::Function(name) => write!(f, "FUNCTION {}:", name),
            IRInstruction::Param(name) => write!(f, "  PARAM {}", name),
            IRInstruction::Temp { tmp, expr } => write!(f, "  T{} = {}", tmp, expr),
            IRInstruction::Assign { dst, tmp } => write!(f, "  {} = T{}", dst, tmp),
            IRInstruction::Allocate(name) => write!(f, "  ALLOCATE {}", name),
            IRInstruction::Ret(value) => write!(f, "  RETURN {}", value),
            IRInstruction::Eval(expr) => write!(f, "  EVAL {}", expr),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IRFunction {
    pub name: String,
    pub instructions: Vec<IRInstruction>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IRProgram {
    pub functions: Vec<IRFunction>,
}

impl IRProgram {
    pub fn instructions(&self) -> impl Iterator<Item = &IRInstruction> {
        self.functions.iter().flat_map(|func| func.instructions.iter())
    }

    pub fn listing(&self) -> String {
        self.instructions()
            .map(|instr| instr.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for IRProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.listing())
    }
}
