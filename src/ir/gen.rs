use crate::{
    ir::instr::{IRFunction, IRInstruction, IRProgram},
    parser::ast::{
        ExpressionStatement, FunctionDeclaration, Program, ReturnStatement, Statement,
        VariableDeclaration,
    },
};

/// Source of `T<n>` names. One counter serves a whole lowering run, so
/// temporaries are never reused across functions.
#[derive(Debug, Default)]
pub struct Temporaries {
    next: usize,
}

impl Temporaries {
    pub fn new() -> Temporaries {
        Temporaries::default()
    }

    pub fn make_temporary(&mut self) -> usize {
        let tmp = self.next;
        self.next += 1;
        tmp
    }
}

pub trait Irfy {
    type Output;

    fn irfy(&self, temps: &mut Temporaries) -> Self::Output;
}

impl Irfy for Program {
    type Output = IRProgram;

    fn irfy(&self, temps: &mut Temporaries) -> IRProgram {
        IRProgram {
            functions: self.functions().map(|func| func.irfy(temps)).collect(),
        }
    }
}

impl Irfy for FunctionDeclaration {
    type Output = IRFunction;

    fn irfy(&self, temps: &mut Temporaries) -> IRFunction {
        let mut instructions = vec![IRInstruction::Function(self.name.clone())];

        instructions.extend(
            self.params
                .iter()
                .map(|param| IRInstruction::Param(param.name.clone())),
        );

        for stmt in &self.body {
            instructions.extend(stmt.irfy(temps));
        }

        log::trace!("lowered '{}' to {} IR lines", self.name, instructions.len());

        IRFunction {
            name: self.name.clone(),
            instructions,
        }
    }
}

impl Irfy for Statement {
    type Output = Vec<IRInstruction>;

    fn irfy(&self, temps: &mut Temporaries) -> Vec<IRInstruction> {
        match self {
            Statement::Variable(VariableDeclaration { name, init, .. }) => match init {
                Some(expr) => assign_through_temporary(name, expr, temps),
                None => vec![IRInstruction::Allocate(name.clone())],
            },
            Statement::Return(ReturnStatement { value }) => vec![IRInstruction::Ret(value.clone())],
            Statement::Expression(ExpressionStatement { expression }) => {
                match split_assignment(expression) {
                    Some((dst, src)) => assign_through_temporary(&dst, &src, temps),
                    None => vec![IRInstruction::Eval(expression.clone())],
                }
            }
        }
    }
}

fn assign_through_temporary(dst: &str, expr: &str, temps: &mut Temporaries) -> Vec<IRInstruction> {
    let tmp = temps.make_temporary();
    vec![
        IRInstruction::Temp {
            tmp,
            expr: expr.to_owned(),
        },
        IRInstruction::Assign {
            dst: dst.to_owned(),
            tmp,
        },
    ]
}

/// Splits `lhs = rhs` at the first `=` outside parentheses that is not part
/// of a comparison. Compound forms such as `x += 1` become `x`, `x + 1`.
pub fn split_assignment(expr: &str) -> Option<(String, String)> {
    let bytes = expr.as_bytes();
    let mut depth = 0i32;

    for (idx, &byte) in bytes.iter().enumerate() {
        match byte {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth -= 1,
            b'=' if depth == 0 => {
                let prev = idx.checked_sub(1).map(|i| bytes[i]);
                let next = bytes.get(idx + 1).copied();

                if next == Some(b'=') || prev == Some(b'=') || prev == Some(b'!') {
                    continue;
                }

                let lhs = expr[..idx].trim_end();
                let rhs = expr[idx + 1..].trim();

                if let Some(op) = compound_operator(lhs) {
                    let target = lhs[..lhs.len() - op.len()].trim();
                    return Some((target.to_owned(), format!("{} {} {}", target, op, rhs)));
                }

                // `<=` and `>=` compare unless the operator is a shift.
                if matches!(prev, Some(b'<') | Some(b'>')) {
                    continue;
                }

                return Some((lhs.to_owned(), rhs.to_owned()));
            }
            _ => {}
        }
    }

    None
}

fn compound_operator(lhs: &str) -> Option<&'static str> {
    ["<<", ">>", "+", "-", "*", "/", "%", "&", "|", "^"]
        .into_iter()
        .find(|op| lhs.ends_with(op) && lhs.len() > op.len())
}

pub fn lower(program: &Program) -> IRProgram {
    let mut temps = Temporaries::new();
    let ir = program.irfy(&mut temps);
    log::debug!("IR generator emitted {} lines", ir.instructions().count());
    ir
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::pattern::parse;

    #[test]
    fn lowers_main_return() {
        let ir = lower(&parse("int main() { return 0; }").unwrap());
        assert_eq!(ir.listing(), "FUNCTION main:\n  RETURN 0");
    }

    #[test]
    fn declarations_and_assignments() {
        let src = "int f(int a) {\n  int x = a + 1;\n  int y;\n  y = x;\n  print(y);\n  return y;\n}";
        let ir = lower(&parse(src).unwrap());
        assert_eq!(
            ir.listing(),
            [
                "FUNCTION f:",
                "  PARAM a",
                "  T0 = a + 1",
                "  x = T0",
                "  ALLOCATE y",
                "  T1 = x",
                "  y = T1",
                "  EVAL print(y)",
                "  RETURN y",
            ]
            .join("\n")
        );
    }

    #[test]
    fn temporaries_continue_across_functions() {
        let src = "int f() {\n  int a = 1;\n  return a;\n}\nint main() {\n  int b = 2;\n  return b;\n}";
        let ir = lower(&parse(src).unwrap());
        let temps: Vec<usize> = ir
            .instructions()
            .filter_map(|instr| match instr {
                IRInstruction::Temp { tmp, .. } => Some(*tmp),
                _ => None,
            })
            .collect();
        assert_eq!(temps, vec![0, 1]);
    }

    #[test]
    fn comparisons_are_not_assignments() {
        assert_eq!(split_assignment("a == b"), None);
        assert_eq!(split_assignment("a <= b"), None);
        assert_eq!(split_assignment("f(a = 1)"), None);
        assert_eq!(
            split_assignment("x = y == z"),
            Some(("x".to_owned(), "y == z".to_owned()))
        );
    }

    #[test]
    fn compound_assignment_expands() {
        assert_eq!(
            split_assignment("total += 2"),
            Some(("total".to_owned(), "total + 2".to_owned()))
        );
        assert_eq!(
            split_assignment("bits <<= 1"),
            Some(("bits".to_owned(), "bits << 1".to_owned()))
        );
    }
}
