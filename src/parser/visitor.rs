//! Double-dispatch traversal over the AST
//!
//! A traversal implements [`Visitor`], which has one `visit_*` method per
//! concrete node kind. Every node implements [`Node::accept`], which calls the
//! matching `visit_*` method on itself and nothing else: descending into
//! children is the visitor's job.
//!
//! The default `visit_*` bodies forward to the `walk_*` functions below, which
//! accept each child in source order. A visitor that only cares about a few
//! node kinds overrides those and inherits the full descent for the rest;
//! a visitor that overrides a method and still wants the children visited
//! calls the matching `walk_*` itself.
//!
//! # Example
//!
//! ```ignore
//! struct ReturnCounter(usize);
//!
//! impl Visitor for ReturnCounter {
//!     fn visit_return(&mut self, stmt: &ReturnStmt) {
//!         self.0 += 1;
//!         walk_return(self, stmt);
//!     }
//! }
//!
//! let mut counter = ReturnCounter(0);
//! program.accept(&mut counter);
//! ```

use crate::parser::ast::*;

/// Implemented by every AST node.
pub trait Node {
    fn accept(&self, visitor: &mut dyn Visitor);
}

/// One operation per concrete node kind.
pub trait Visitor {
    // Program structure
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }
    fn visit_main_class(&mut self, main_class: &MainClass) {
        walk_main_class(self, main_class);
    }
    fn visit_class_declaration(&mut self, class: &ClassDeclaration) {
        walk_class_declaration(self, class);
    }

    // Types
    fn visit_int_type(&mut self) {}
    fn visit_boolean_type(&mut self) {}
    fn visit_void_type(&mut self) {}
    fn visit_identifier_type(&mut self, _name: &str) {}
    fn visit_array_type(&mut self, element: &SimpleType) {
        element.accept(self.as_dyn());
    }

    // Declarations
    fn visit_var_decl(&mut self, decl: &VarDecl) {
        decl.var_type.accept(self.as_dyn());
    }
    fn visit_method_decl(&mut self, method: &MethodDecl) {
        walk_method_decl(self, method);
    }

    // Statements
    fn visit_assert(&mut self, stmt: &AssertStmt) {
        stmt.condition.accept(self.as_dyn());
    }
    fn visit_local_var_decl(&mut self, stmt: &LocalVarDeclStmt) {
        stmt.declaration.accept(self.as_dyn());
    }
    fn visit_block(&mut self, stmt: &BlockStmt) {
        walk_statements(self, &stmt.statements);
    }
    fn visit_if(&mut self, stmt: &IfStmt) {
        walk_if(self, stmt);
    }
    fn visit_while(&mut self, stmt: &WhileStmt) {
        walk_while(self, stmt);
    }
    fn visit_print(&mut self, stmt: &PrintStmt) {
        stmt.expr.accept(self.as_dyn());
    }
    fn visit_assign(&mut self, stmt: &AssignStmt) {
        walk_assign(self, stmt);
    }
    fn visit_return(&mut self, stmt: &ReturnStmt) {
        walk_return(self, stmt);
    }
    fn visit_method_call(&mut self, stmt: &MethodCallStmt) {
        stmt.invocation.accept(self.as_dyn());
    }

    // Expressions
    fn visit_binary_op(&mut self, expr: &BinaryOp) {
        walk_binary_op(self, expr);
    }
    fn visit_unary_op(&mut self, expr: &UnaryOp) {
        expr.operand.accept(self.as_dyn());
    }
    fn visit_array_index(&mut self, expr: &ArrayIndex) {
        walk_array_index(self, expr);
    }
    fn visit_array_length(&mut self, expr: &ArrayLength) {
        expr.array.accept(self.as_dyn());
    }
    fn visit_method_invocation(&mut self, expr: &MethodInvocation) {
        walk_method_invocation(self, expr);
    }
    fn visit_field_access(&mut self, expr: &FieldAccess) {
        expr.receiver.accept(self.as_dyn());
    }
    fn visit_new_array(&mut self, expr: &NewArray) {
        walk_new_array(self, expr);
    }
    fn visit_new_object(&mut self, _expr: &NewObject) {}
    fn visit_integer_literal(&mut self, _value: i32) {}
    fn visit_boolean_literal(&mut self, _value: bool) {}
    fn visit_this(&mut self) {}
    fn visit_identifier(&mut self, _name: &str) {}

    // Assignment targets
    fn visit_identifier_lvalue(&mut self, _name: &str) {}
    fn visit_array_access(&mut self, target: &ArrayAccess) {
        target.index.accept(self.as_dyn());
    }
    fn visit_simple_field(&mut self, _field: &str) {}
    fn visit_field_array(&mut self, _field: &str, index: &Expression) {
        index.accept(self.as_dyn());
    }

    /// Upcast used by the default bodies to hand `self` to [`Node::accept`].
    fn as_dyn(&mut self) -> &mut dyn Visitor;
}

// ===== Walk helpers =====

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) {
    program.main_class.accept(visitor.as_dyn());
    for class in &program.classes {
        class.accept(visitor.as_dyn());
    }
}

pub fn walk_main_class<V: Visitor + ?Sized>(visitor: &mut V, main_class: &MainClass) {
    walk_statements(visitor, &main_class.statements);
}

pub fn walk_class_declaration<V: Visitor + ?Sized>(visitor: &mut V, class: &ClassDeclaration) {
    for decl in &class.declarations {
        decl.accept(visitor.as_dyn());
    }
}

pub fn walk_method_decl<V: Visitor + ?Sized>(visitor: &mut V, method: &MethodDecl) {
    method.return_type.accept(visitor.as_dyn());
    for param in &method.params {
        param.accept(visitor.as_dyn());
    }
    walk_statements(visitor, &method.body);
}

pub fn walk_statements<V: Visitor + ?Sized>(visitor: &mut V, statements: &[Statement]) {
    for stmt in statements {
        stmt.accept(visitor.as_dyn());
    }
}

pub fn walk_if<V: Visitor + ?Sized>(visitor: &mut V, stmt: &IfStmt) {
    stmt.condition.accept(visitor.as_dyn());
    stmt.then_branch.accept(visitor.as_dyn());
    if let Some(else_branch) = &stmt.else_branch {
        else_branch.accept(visitor.as_dyn());
    }
}

pub fn walk_while<V: Visitor + ?Sized>(visitor: &mut V, stmt: &WhileStmt) {
    stmt.condition.accept(visitor.as_dyn());
    stmt.body.accept(visitor.as_dyn());
}

pub fn walk_assign<V: Visitor + ?Sized>(visitor: &mut V, stmt: &AssignStmt) {
    stmt.target.accept(visitor.as_dyn());
    stmt.value.accept(visitor.as_dyn());
}

pub fn walk_return<V: Visitor + ?Sized>(visitor: &mut V, stmt: &ReturnStmt) {
    stmt.expr.accept(visitor.as_dyn());
}

pub fn walk_binary_op<V: Visitor + ?Sized>(visitor: &mut V, expr: &BinaryOp) {
    expr.left.accept(visitor.as_dyn());
    expr.right.accept(visitor.as_dyn());
}

pub fn walk_array_index<V: Visitor + ?Sized>(visitor: &mut V, expr: &ArrayIndex) {
    expr.array.accept(visitor.as_dyn());
    expr.index.accept(visitor.as_dyn());
}

pub fn walk_method_invocation<V: Visitor + ?Sized>(visitor: &mut V, expr: &MethodInvocation) {
    expr.receiver.accept(visitor.as_dyn());
    for arg in &expr.args {
        arg.accept(visitor.as_dyn());
    }
}

pub fn walk_new_array<V: Visitor + ?Sized>(visitor: &mut V, expr: &NewArray) {
    expr.element_type.accept(visitor.as_dyn());
    expr.size.accept(visitor.as_dyn());
}

// ===== accept implementations =====

impl Node for Program {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_program(self);
    }
}

impl Node for MainClass {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_main_class(self);
    }
}

impl Node for ClassDeclaration {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_class_declaration(self);
    }
}

impl Node for SimpleType {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            SimpleType::Int => visitor.visit_int_type(),
            SimpleType::Boolean => visitor.visit_boolean_type(),
            SimpleType::Void => visitor.visit_void_type(),
            SimpleType::Identifier(name) => visitor.visit_identifier_type(name),
        }
    }
}

impl Node for Type {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Type::Simple(simple) => simple.accept(visitor),
            Type::Array(element) => visitor.visit_array_type(element),
        }
    }
}

impl Node for VarDecl {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_var_decl(self);
    }
}

impl Node for MethodDecl {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_method_decl(self);
    }
}

impl Node for Declaration {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Declaration::Variable(var) => var.accept(visitor),
            Declaration::Method(method) => method.accept(visitor),
        }
    }
}

impl Node for Statement {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Statement::Assert(s) => visitor.visit_assert(s),
            Statement::LocalVarDecl(s) => visitor.visit_local_var_decl(s),
            Statement::Block(s) => visitor.visit_block(s),
            Statement::If(s) => visitor.visit_if(s),
            Statement::While(s) => visitor.visit_while(s),
            Statement::Print(s) => visitor.visit_print(s),
            Statement::Assign(s) => visitor.visit_assign(s),
            Statement::Return(s) => visitor.visit_return(s),
            Statement::MethodCall(s) => visitor.visit_method_call(s),
        }
    }
}

impl Node for MethodInvocation {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_method_invocation(self);
    }
}

impl Node for Expression {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Expression::Binary(e) => visitor.visit_binary_op(e),
            Expression::Unary(e) => visitor.visit_unary_op(e),
            Expression::ArrayIndex(e) => visitor.visit_array_index(e),
            Expression::ArrayLength(e) => visitor.visit_array_length(e),
            Expression::MethodInvocation(e) => visitor.visit_method_invocation(e),
            Expression::FieldAccess(e) => visitor.visit_field_access(e),
            Expression::NewArray(e) => visitor.visit_new_array(e),
            Expression::NewObject(e) => visitor.visit_new_object(e),
            Expression::IntegerLiteral(value) => visitor.visit_integer_literal(*value),
            Expression::BooleanLiteral(value) => visitor.visit_boolean_literal(*value),
            Expression::This => visitor.visit_this(),
            Expression::Identifier(name) => visitor.visit_identifier(name),
        }
    }
}

impl Node for LValue {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            LValue::Identifier(name) => visitor.visit_identifier_lvalue(name),
            LValue::ArrayAccess(target) => visitor.visit_array_access(target),
            LValue::Field(FieldInvocation::Simple(field)) => visitor.visit_simple_field(field),
            LValue::Field(FieldInvocation::ArrayIndexed { field, index }) => {
                visitor.visit_field_array(field, index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    /// Records the order in which node kinds are visited
    #[derive(Default)]
    struct KindRecorder {
        kinds: Vec<&'static str>,
    }

    impl Visitor for KindRecorder {
        fn visit_main_class(&mut self, main_class: &MainClass) {
            self.kinds.push("main");
            walk_main_class(self, main_class);
        }
        fn visit_class_declaration(&mut self, class: &ClassDeclaration) {
            self.kinds.push("class");
            walk_class_declaration(self, class);
        }
        fn visit_print(&mut self, stmt: &PrintStmt) {
            self.kinds.push("print");
            stmt.expr.accept(self);
        }
        fn visit_method_decl(&mut self, method: &MethodDecl) {
            self.kinds.push("method");
            walk_method_decl(self, method);
        }
        fn visit_int_type(&mut self) {
            self.kinds.push("int");
        }
        fn visit_identifier_type(&mut self, _name: &str) {
            self.kinds.push("class-type");
        }
        fn visit_return(&mut self, stmt: &ReturnStmt) {
            self.kinds.push("return");
            walk_return(self, stmt);
        }
        fn visit_integer_literal(&mut self, _value: i32) {
            self.kinds.push("int-lit");
        }
        fn as_dyn(&mut self) -> &mut dyn Visitor {
            self
        }
    }

    #[test]
    fn test_visit_order_follows_source_order() {
        let source = r#"
            class Main { public static void main() { System.out.println(1); } }
            class A { public int f(Foo x) { return 2; } }
        "#;
        let mut parser = Parser::from_source(source);
        let program = parser.parse_program().unwrap();

        let mut recorder = KindRecorder::default();
        program.accept(&mut recorder);

        assert_eq!(
            recorder.kinds,
            vec![
                "main",
                "print",
                "int-lit",
                "class",
                "method",
                "int",
                "class-type",
                "return",
                "int-lit"
            ]
        );
    }

    /// A visitor that overrides nothing still reaches every leaf
    struct LeafCounter(usize);

    impl Visitor for LeafCounter {
        fn visit_identifier(&mut self, _name: &str) {
            self.0 += 1;
        }
        fn visit_identifier_lvalue(&mut self, _name: &str) {
            self.0 += 1;
        }
        fn visit_simple_field(&mut self, _field: &str) {
            self.0 += 1;
        }
        fn as_dyn(&mut self) -> &mut dyn Visitor {
            self
        }
    }

    #[test]
    fn test_default_bodies_descend() {
        let source = r#"
            class Main { public static void main() { { while (a) if (b) x = c; else this.f = d; } } }
        "#;
        let mut parser = Parser::from_source(source);
        let program = parser.parse_program().unwrap();

        let mut counter = LeafCounter(0);
        program.accept(&mut counter);

        // a, b, x, c, this.f, d
        assert_eq!(counter.0, 6);
    }
}
