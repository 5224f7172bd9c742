#[derive(Debug, PartialEq, Clone)]
pub struct Prototype {
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    /// Decimal digits with leading zeros removed; any length.
    Literal(String),
    Variable(String),
    Call(String, Vec<Expression>),
}

/// A `def ... end` block. The body is at most one expression.
#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Option<Expression>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Program {
    Empty,
    Definitions(Vec<Function>),
}

impl Program {
    pub fn functions(&self) -> &[Function] {
        match self {
            Program::Empty => &[],
            Program::Definitions(functions) => functions,
        }
    }
}
