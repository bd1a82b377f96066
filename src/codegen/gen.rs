use crate::parser::ast::{FunctionDeclaration, Program, ReturnStatement, Statement};
use crate::validator::entry::ENTRY_POINT;

/// Every local gets one slot of this many bytes.
pub const STACK_SLOT_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct AsmProgram {
    pub global: String,
    pub strings: Vec<AsmStaticString>,
    pub functions: Vec<AsmFunction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsmStaticString {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsmFunction {
    pub name: String,
    pub instructions: Vec<AsmInstruction>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AsmInstruction {
    Push(AsmOperand),
    Mov {
        asm_type: AsmType,
        src: AsmOperand,
        dst: AsmOperand,
    },
    AllocateStack(usize),
    Leave,
    Ret,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AsmOperand {
    /// Immediates are carried as source text and never evaluated.
    Imm(String),
    Register(AsmRegister),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AsmRegister {
    AX,
    SP,
    BP,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AsmType {
    Longword,
    Quadword,
}

pub trait Codegen {
    type Output;

    fn codegen(&self) -> Self::Output;
}

impl Codegen for Program {
    type Output = AsmProgram;

    fn codegen(&self) -> AsmProgram {
        AsmProgram {
            global: ENTRY_POINT.to_owned(),
            strings: vec![AsmStaticString {
                label: ".LC0".to_owned(),
                value: "Hello, World!".to_owned(),
            }],
            functions: self.functions().map(|func| func.codegen()).collect(),
        }
    }
}

impl Codegen for FunctionDeclaration {
    type Output = AsmFunction;

    fn codegen(&self) -> AsmFunction {
        let mut instructions = vec![
            AsmInstruction::Push(AsmOperand::Register(AsmRegister::BP)),
            AsmInstruction::Mov {
                asm_type: AsmType::Quadword,
                src: AsmOperand::Register(AsmRegister::SP),
                dst: AsmOperand::Register(AsmRegister::BP),
            },
        ];

        let locals = self.locals().count();
        if locals > 0 {
            instructions.push(AsmInstruction::AllocateStack(locals * STACK_SLOT_SIZE));
        }

        for stmt in &self.body {
            if let Statement::Return(ret) = stmt {
                if let Some(mov) = return_value(ret) {
                    instructions.push(mov);
                }
            }
        }

        instructions.push(AsmInstruction::Leave);
        instructions.push(AsmInstruction::Ret);

        AsmFunction {
            name: self.name.clone(),
            instructions,
        }
    }
}

/// Moves the returned value into the return register. Any non-empty value
/// text is used verbatim as an immediate; a bare `return;` moves nothing.
fn return_value(ret: &ReturnStatement) -> Option<AsmInstruction> {
    if ret.value.is_empty() {
        return None;
    }

    Some(AsmInstruction::Mov {
        asm_type: AsmType::Longword,
        src: AsmOperand::Imm(ret.value.clone()),
        dst: AsmOperand::Register(AsmRegister::AX),
    })
}
