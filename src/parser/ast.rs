use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub body: Vec<Node>,
}

impl Program {
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDeclaration> {
        self.body.iter().filter_map(|node| match node {
            Node::Function(func) => Some(func),
            _ => None,
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.body.iter().filter_map(|node| match node {
            Node::Variable(var) => Some(var),
            _ => None,
        })
    }

    pub fn includes(&self) -> impl Iterator<Item = &IncludeDirective> {
        self.body.iter().filter_map(|node| match node {
            Node::Include(include) => Some(include),
            _ => None,
        })
    }
}

/// Top-level node. Order in `Program::body` is discovery order: includes,
/// then functions, then variable declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    #[serde(rename = "IncludeDirective")]
    Include(IncludeDirective),
    #[serde(rename = "FunctionDeclaration")]
    Function(FunctionDeclaration),
    #[serde(rename = "VariableDeclaration")]
    Variable(VariableDeclaration),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncludeDirective {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(rename = "returnType")]
    pub return_type: String,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
    pub line: usize,
}

impl FunctionDeclaration {
    pub fn locals(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.body.iter().filter_map(|stmt| match stmt {
            Statement::Variable(var) => Some(var),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub _type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub name: String,
    #[serde(rename = "varType")]
    pub _type: String,
    #[serde(rename = "value")]
    pub init: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    #[serde(rename = "VariableDeclaration")]
    Variable(VariableDeclaration),
    #[serde(rename = "ReturnStatement")]
    Return(ReturnStatement),
    #[serde(rename = "ExpressionStatement")]
    Expression(ExpressionStatement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expression: String,
}
