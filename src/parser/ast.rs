// AST (Abstract Syntax Tree) definitions for the MiniJava front end
//
// Every node kind is a plain owned value: parents own their children through
// `Box`/`Vec`, nothing is shared and nothing points back up the tree.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Non-array types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleType {
    Int,
    Boolean,
    Void,
    Identifier(String), // Class name
}

/// A declared type. Arrays are exactly one level deep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Simple(SimpleType),
    Array(SimpleType),
}

impl fmt::Display for SimpleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleType::Int => write!(f, "int"),
            SimpleType::Boolean => write!(f, "boolean"),
            SimpleType::Void => write!(f, "void"),
            SimpleType::Identifier(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Simple(simple) => write!(f, "{}", simple),
            Type::Array(element) => write!(f, "{}[]", element),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Logical
    And,
    Or,
    // Comparison
    Less,
    Greater,
    Equal,
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::Equal => "==",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not, // !x
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ===== Program structure =====

/// Top-level program structure: the main class followed by ordinary classes
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub main_class: MainClass,
    pub classes: Vec<ClassDeclaration>,
}

/// The class holding `public static void main()`
#[derive(Debug, Clone, PartialEq)]
pub struct MainClass {
    pub class_name: String,
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub class_name: String,
    pub base_class: Option<String>,
    pub declarations: Vec<Declaration>,
    pub location: SourceLocation,
}

// ===== Declarations =====

/// Field, local variable or formal parameter
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub var_type: Type,
    pub name: String,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub return_type: Type,
    pub name: String,
    pub params: Vec<VarDecl>,
    pub body: Vec<Statement>,
    pub location: SourceLocation,
}

/// Class members
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Variable(VarDecl),
    Method(MethodDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Variable(var) => &var.name,
            Declaration::Method(method) => &method.name,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Declaration::Variable(var) => var.location,
            Declaration::Method(method) => method.location,
        }
    }
}

// ===== Statements =====

#[derive(Debug, Clone, PartialEq)]
pub struct AssertStmt {
    pub condition: Expression,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalVarDeclStmt {
    pub declaration: VarDecl,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub location: SourceLocation,
}

/// `System.out.println(expr);`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expr: Expression,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub target: LValue,
    pub value: Expression,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub expr: Expression,
    pub location: SourceLocation,
}

/// A method call evaluated for its effect: `obj.m(args);`
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCallStmt {
    pub invocation: MethodInvocation,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assert(AssertStmt),
    LocalVarDecl(LocalVarDeclStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    Print(PrintStmt),
    Assign(AssignStmt),
    Return(ReturnStmt),
    MethodCall(MethodCallStmt),
}

impl Statement {
    /// Get the source location of this statement
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Assert(s) => s.location,
            Statement::LocalVarDecl(s) => s.location,
            Statement::Block(s) => s.location,
            Statement::If(s) => s.location,
            Statement::While(s) => s.location,
            Statement::Print(s) => s.location,
            Statement::Assign(s) => s.location,
            Statement::Return(s) => s.location,
            Statement::MethodCall(s) => s.location,
        }
    }
}

// ===== Expressions =====

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Box<Expression>,
    pub op: BinaryOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnaryOperator,
    pub operand: Box<Expression>,
}

/// `array[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayIndex {
    pub array: Box<Expression>,
    pub index: Box<Expression>,
}

/// `array.length`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLength {
    pub array: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodInvocation {
    pub receiver: Box<Expression>,
    pub method: String,
    pub args: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccess {
    pub receiver: Box<Expression>,
    pub field: String,
}

/// `new T[size]`
#[derive(Debug, Clone, PartialEq)]
pub struct NewArray {
    pub element_type: SimpleType,
    pub size: Box<Expression>,
}

/// `new C()`
#[derive(Debug, Clone, PartialEq)]
pub struct NewObject {
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary(BinaryOp),
    Unary(UnaryOp),
    ArrayIndex(ArrayIndex),
    ArrayLength(ArrayLength),
    MethodInvocation(MethodInvocation),
    FieldAccess(FieldAccess),
    NewArray(NewArray),
    NewObject(NewObject),
    IntegerLiteral(i32),
    BooleanLiteral(bool),
    This,
    Identifier(String),
}

impl Expression {
    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Expression::Binary(BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary(UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }
}

// ===== Assignment targets =====

/// `name[index] = ...`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccess {
    pub name: String,
    pub index: Expression,
}

/// Field targets on the implicit `this` receiver
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInvocation {
    /// `this.field`
    Simple(String),
    /// `this.field[index]`
    ArrayIndexed { field: String, index: Expression },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    Identifier(String),
    ArrayAccess(ArrayAccess),
    Field(FieldInvocation),
}
