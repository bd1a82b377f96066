use crate::{
    codegen::gen::{
        AsmFunction, AsmInstruction, AsmOperand, AsmProgram, AsmRegister, AsmStaticString,
        AsmType,
    },
    emitter::util::escape,
};
use anyhow::Result;
use std::io::Write;

pub trait Emit {
    fn emit(&self, f: &mut impl Write) -> Result<()>;
}

impl Emit for AsmProgram {
    fn emit(&self, f: &mut impl Write) -> Result<()> {
        writeln!(f, ".section .data")?;
        for string in &self.strings {
            string.emit(f)?;
        }
        writeln!(f)?;

        writeln!(f, ".section .text")?;
        writeln!(f, ".globl {}", self.global)?;

        for func in &self.functions {
            writeln!(f)?;
            func.emit(f)?;
        }

        Ok(())
    }
}

impl Emit for AsmStaticString {
    fn emit(&self, f: &mut impl Write) -> Result<()> {
        writeln!(f, "{}:", self.label)?;
        writeln!(f, "  .string \"{}\"", escape(&self.value))?;
        Ok(())
    }
}

impl Emit for AsmFunction {
    fn emit(&self, f: &mut impl Write) -> Result<()> {
        writeln!(f, "{}:", self.name)?;
        for instr in &self.instructions {
            instr.emit(f)?;
        }
        Ok(())
    }
}

impl Emit for AsmInstruction {
    fn emit(&self, f: &mut impl Write) -> Result<()> {
        write!(f, "  ")?;

        match self {
            AsmInstruction::Push(operand) => {
                write!(f, "pushq ")?;
                operand.emit_as(f, AsmType::Quadword)?;
            }
            AsmInstruction::Mov { asm_type, src, dst } => {
                match asm_type {
                    AsmType::Longword => write!(f, "movl ")?,
                    AsmType::Quadword => write!(f, "movq ")?,
                }
                src.emit_as(f, *asm_type)?;
                write!(f, ", ")?;
                dst.emit_as(f, *asm_type)?;
            }
            AsmInstruction::AllocateStack(n) => write!(f, "subq ${}, %rsp", n)?,
            AsmInstruction::Leave => write!(f, "leave")?,
            AsmInstruction::Ret => write!(f, "ret")?,
        }

        writeln!(f)?;

        Ok(())
    }
}

impl AsmOperand {
    fn emit_as(&self, f: &mut impl Write, asm_type: AsmType) -> Result<()> {
        match self {
            AsmOperand::Imm(value) => write!(f, "${}", value)?,
            AsmOperand::Register(reg) => write!(f, "{}", reg.name(asm_type))?,
        }
        Ok(())
    }
}

impl AsmRegister {
    pub fn name(&self, asm_type: AsmType) -> &'static str {
        match (self, asm_type) {
            (AsmRegister::AX, AsmType::Longword) => "%eax",
            (AsmRegister::AX, AsmType::Quadword) => "%rax",
            (AsmRegister::SP, AsmType::Longword) => "%esp",
            (AsmRegister::SP, AsmType::Quadword) => "%rsp",
            (AsmRegister::BP, AsmType::Longword) => "%ebp",
            (AsmRegister::BP, AsmType::Quadword) => "%rbp",
        }
    }
}

/// Renders the whole program into assembly text.
pub fn emit_to_string(program: &AsmProgram) -> Result<String> {
    let mut buf = vec![];
    program.emit(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}
