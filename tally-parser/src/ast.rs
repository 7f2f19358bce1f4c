// Tally AST Definitions
// Syntax tree for a single notepad line, with source spans preserved

use std::fmt;

/// Source position information for AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One parsed notepad line
///
/// A blank line or a line holding only a comment parses to a `Line` without a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub statement: Option<Statement>,
    pub span: Span,
}

impl Line {
    /// True when the line only declares something and has no result worth displaying:
    /// a function definition, a bare constant, or an assignment of a bare constant.
    pub fn is_declaration(&self) -> bool {
        match &self.statement {
            Some(statement) => match &statement.kind {
                StatementKind::FunctionAssignment(_) => true,
                StatementKind::Assignment(assignment) => assignment.value.is_constant(),
                StatementKind::Expression(expression) => expression.is_constant(),
            },
            None => false,
        }
    }

    /// True when the line is blank or only a comment
    pub fn is_empty(&self) -> bool {
        self.statement.is_none()
    }
}

/// Statements that can appear on a line
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Expression(Expression),
    Assignment(Assignment),
    FunctionAssignment(FunctionAssignment),
}

/// `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: Identifier,
    pub value: Expression,
    pub span: Span,
}

/// `name(a, b) = body`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionAssignment {
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Expression,
    pub span: Span,
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    /// Literal numbers, strings and booleans are constants; `(5)` and `-5` are not.
    pub fn is_constant(&self) -> bool {
        matches!(
            self.kind,
            ExpressionKind::Number(_) | ExpressionKind::String(_) | ExpressionKind::Boolean(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Number(NumberLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Identifier(Identifier),
    FunctionCall(FunctionCall),
    BinaryOp(BinaryOperation),
    UnaryOp(UnaryOperation),
    Parenthesized(Box<Expression>),
}

/// Numeric literal with its source format
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: f64,
    pub format: NumberFormat,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Decimal,
    Scientific,
    Hexadecimal,
}

/// String literal with escapes already resolved
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// `name(arg, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Identifier,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Exponent => "^",
        };
        write!(f, "{symbol}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    Plus,
    Factorial,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Factorial => "!",
        };
        write!(f, "{symbol}")
    }
}
