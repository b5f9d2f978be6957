//! Indented textual rendering of the AST
//!
//! [`AstPrinter`] is a [`Visitor`] that writes one line per node, two spaces
//! of indentation per nesting level. Types are rendered inline on the line of
//! the declaration that owns them.
//!
//! Every output line also remembers the source line of the closest enclosing
//! node that carries a location, so a viewer can map a tree line back to the
//! code it came from.

use crate::parser::ast::*;
use crate::parser::visitor::{Node, Visitor};

/// A rendered tree line with the source line it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintedLine {
    pub text: String,
    pub source_line: usize,
}

#[derive(Debug, Default)]
pub struct AstPrinter {
    indent: usize,
    current: String,
    source_line: usize,
    lines: Vec<PrintedLine>,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a whole program as text, one node per line.
    pub fn print_program(program: &Program) -> String {
        let mut printer = Self::new();
        program.accept(&mut printer);
        printer.to_text()
    }

    /// Render a whole program, keeping the source line of each output line.
    pub fn program_lines(program: &Program) -> Vec<PrintedLine> {
        let mut printer = Self::new();
        program.accept(&mut printer);
        printer.into_lines()
    }

    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_lines(self) -> Vec<PrintedLine> {
        self.lines
    }

    // ===== Output helpers =====

    fn begin(&mut self, text: &str) {
        self.current.clear();
        self.current.push_str(&"  ".repeat(self.indent));
        self.current.push_str(text);
    }

    fn push(&mut self, text: &str) {
        self.current.push_str(text);
    }

    fn end(&mut self) {
        self.lines.push(PrintedLine {
            text: std::mem::take(&mut self.current),
            source_line: self.source_line,
        });
    }

    fn line(&mut self, text: &str) {
        self.begin(text);
        self.end();
    }

    fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.indent += 1;
        body(self);
        self.indent -= 1;
    }

    fn at(&mut self, location: SourceLocation) {
        self.source_line = location.line;
    }
}

impl Visitor for AstPrinter {
    fn visit_program(&mut self, program: &Program) {
        self.line("Program");
        self.indented(|p| {
            p.line("MainClass:");
            p.indented(|p| program.main_class.accept(p));

            if !program.classes.is_empty() {
                p.line("Classes:");
                p.indented(|p| {
                    for class in &program.classes {
                        class.accept(p);
                    }
                });
            }
        });
    }

    fn visit_main_class(&mut self, main_class: &MainClass) {
        self.at(main_class.location);
        self.line(&format!("Class: {}", main_class.class_name));
        self.indented(|p| {
            p.line("main() statements:");
            p.indented(|p| {
                for stmt in &main_class.statements {
                    stmt.accept(p);
                }
            });
        });
    }

    fn visit_class_declaration(&mut self, class: &ClassDeclaration) {
        self.at(class.location);
        self.begin(&format!("Class: {}", class.class_name));
        if let Some(base) = &class.base_class {
            self.push(&format!(" extends {}", base));
        }
        self.end();

        self.indented(|p| {
            for decl in &class.declarations {
                decl.accept(p);
            }
        });
    }

    fn visit_int_type(&mut self) {
        self.push("int");
    }

    fn visit_boolean_type(&mut self) {
        self.push("boolean");
    }

    fn visit_void_type(&mut self) {
        self.push("void");
    }

    fn visit_identifier_type(&mut self, name: &str) {
        self.push(name);
    }

    fn visit_array_type(&mut self, element: &SimpleType) {
        element.accept(self);
        self.push("[]");
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) {
        self.at(decl.location);
        self.begin("Variable: ");
        decl.var_type.accept(self);
        self.push(&format!(" {}", decl.name));
        self.end();
    }

    fn visit_method_decl(&mut self, method: &MethodDecl) {
        self.at(method.location);
        self.begin("Method: ");
        method.return_type.accept(self);
        self.push(&format!(" {}(", method.name));
        for (i, param) in method.params.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            param.var_type.accept(self);
            self.push(&format!(" {}", param.name));
        }
        self.push(")");
        self.end();

        self.indented(|p| {
            for stmt in &method.body {
                stmt.accept(p);
            }
        });
    }

    fn visit_assert(&mut self, stmt: &AssertStmt) {
        self.at(stmt.location);
        self.line("Assert(");
        self.indented(|p| stmt.condition.accept(p));
        self.line(")");
    }

    fn visit_local_var_decl(&mut self, stmt: &LocalVarDeclStmt) {
        stmt.declaration.accept(self);
    }

    fn visit_block(&mut self, stmt: &BlockStmt) {
        self.at(stmt.location);
        self.line("Block {");
        self.indented(|p| {
            for inner in &stmt.statements {
                inner.accept(p);
            }
        });
        self.at(stmt.location);
        self.line("}");
    }

    fn visit_if(&mut self, stmt: &IfStmt) {
        self.at(stmt.location);
        self.line("If (");
        self.indented(|p| stmt.condition.accept(p));
        self.line(") Then");
        self.indented(|p| stmt.then_branch.accept(p));

        if let Some(else_branch) = &stmt.else_branch {
            self.at(stmt.location);
            self.line("Else");
            self.indented(|p| else_branch.accept(p));
        }
    }

    fn visit_while(&mut self, stmt: &WhileStmt) {
        self.at(stmt.location);
        self.line("While (");
        self.indented(|p| stmt.condition.accept(p));
        self.line(") Do");
        self.indented(|p| stmt.body.accept(p));
    }

    fn visit_print(&mut self, stmt: &PrintStmt) {
        self.at(stmt.location);
        self.line("Print(");
        self.indented(|p| stmt.expr.accept(p));
        self.line(")");
    }

    fn visit_assign(&mut self, stmt: &AssignStmt) {
        self.at(stmt.location);
        self.line("Assign:");
        self.indented(|p| {
            p.line("LValue:");
            p.indented(|p| stmt.target.accept(p));
            p.line("=");
            p.indented(|p| stmt.value.accept(p));
        });
    }

    fn visit_return(&mut self, stmt: &ReturnStmt) {
        self.at(stmt.location);
        self.line("Return:");
        self.indented(|p| stmt.expr.accept(p));
    }

    fn visit_method_call(&mut self, stmt: &MethodCallStmt) {
        self.at(stmt.location);
        self.line("MethodCall:");
        self.indented(|p| stmt.invocation.accept(p));
    }

    fn visit_binary_op(&mut self, expr: &BinaryOp) {
        self.line(&format!("BinaryOp {}", expr.op));
        self.indented(|p| {
            p.line("Left:");
            p.indented(|p| expr.left.accept(p));
            p.line("Right:");
            p.indented(|p| expr.right.accept(p));
        });
    }

    fn visit_unary_op(&mut self, expr: &UnaryOp) {
        self.line(&format!("UnaryOp {}", expr.op));
        self.indented(|p| expr.operand.accept(p));
    }

    fn visit_array_index(&mut self, expr: &ArrayIndex) {
        self.line("ArrayIndex:");
        self.indented(|p| {
            p.line("Array:");
            p.indented(|p| expr.array.accept(p));
            p.line("Index:");
            p.indented(|p| expr.index.accept(p));
        });
    }

    fn visit_array_length(&mut self, expr: &ArrayLength) {
        self.line("ArrayLength:");
        self.indented(|p| expr.array.accept(p));
    }

    fn visit_method_invocation(&mut self, expr: &MethodInvocation) {
        self.line(&format!("MethodInvocation: {}()", expr.method));
        self.indented(|p| {
            p.line("Object:");
            p.indented(|p| expr.receiver.accept(p));

            if !expr.args.is_empty() {
                p.line("Arguments:");
                p.indented(|p| {
                    for arg in &expr.args {
                        arg.accept(p);
                    }
                });
            }
        });
    }

    fn visit_field_access(&mut self, expr: &FieldAccess) {
        self.line(&format!("FieldAccess: {}", expr.field));
        self.indented(|p| expr.receiver.accept(p));
    }

    fn visit_new_array(&mut self, expr: &NewArray) {
        self.begin("NewArray: ");
        expr.element_type.accept(self);
        self.push("[");
        self.end();
        self.indented(|p| expr.size.accept(p));
        self.line("]");
    }

    fn visit_new_object(&mut self, expr: &NewObject) {
        self.line(&format!("NewObject: {}()", expr.class_name));
    }

    fn visit_integer_literal(&mut self, value: i32) {
        self.line(&format!("IntegerLiteral: {}", value));
    }

    fn visit_boolean_literal(&mut self, value: bool) {
        self.line(&format!("BooleanLiteral: {}", value));
    }

    fn visit_this(&mut self) {
        self.line("This");
    }

    fn visit_identifier(&mut self, name: &str) {
        self.line(&format!("Identifier: {}", name));
    }

    fn visit_identifier_lvalue(&mut self, name: &str) {
        self.line(&format!("Identifier: {}", name));
    }

    fn visit_array_access(&mut self, target: &ArrayAccess) {
        self.line(&format!("ArrayAccess: {}[", target.name));
        self.indented(|p| target.index.accept(p));
        self.line("]");
    }

    fn visit_simple_field(&mut self, field: &str) {
        self.line(&format!("this.{}", field));
    }

    fn visit_field_array(&mut self, field: &str, index: &Expression) {
        self.line(&format!("this.{}[", field));
        self.indented(|p| index.accept(p));
        self.line("]");
    }

    fn as_dyn(&mut self) -> &mut dyn Visitor {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn print(source: &str) -> String {
        let program = Parser::from_source(source).parse_program().unwrap();
        AstPrinter::print_program(&program)
    }

    #[test]
    fn test_print_hello() {
        let output = print("class Hello { public static void main() { System.out.println(123); } }");

        insta::assert_snapshot!(output, @r###"
        Program
          MainClass:
            Class: Hello
              main() statements:
                Print(
                  IntegerLiteral: 123
                )
        "###);
    }

    #[test]
    fn test_print_class_members() {
        let output = print(
            "class M { public static void main() { } } \
             class B extends A { int[] xs; public boolean get(int i, Foo f) { this.xs[i] = 1; return !f.ok(); } }",
        );

        insta::assert_snapshot!(output, @r###"
        Program
          MainClass:
            Class: M
              main() statements:
          Classes:
            Class: B extends A
              Variable: int[] xs
              Method: boolean get(int i, Foo f)
                Assign:
                  LValue:
                    this.xs[
                      Identifier: i
                    ]
                  =
                    IntegerLiteral: 1
                Return:
                  UnaryOp !
                    MethodInvocation: ok()
                      Object:
                        Identifier: f
        "###);
    }

    #[test]
    fn test_print_control_flow() {
        let output = print(
            "class M { public static void main() { while (i < 3) { if (a) x = new int[2]; else y = 1; } } }",
        );

        insta::assert_snapshot!(output, @r###"
        Program
          MainClass:
            Class: M
              main() statements:
                While (
                  BinaryOp <
                    Left:
                      Identifier: i
                    Right:
                      IntegerLiteral: 3
                ) Do
                  Block {
                    If (
                      Identifier: a
                    ) Then
                      Assign:
                        LValue:
                          Identifier: x
                        =
                          NewArray: int[
                            IntegerLiteral: 2
                          ]
                    Else
                      Assign:
                        LValue:
                          Identifier: y
                        =
                          IntegerLiteral: 1
                  }
        "###);
    }

    #[test]
    fn test_lines_carry_source_line() {
        let source = "class M {\n  public static void main() {\n    x = 1;\n    System.out.println(x);\n  }\n}";
        let program = Parser::from_source(source).parse_program().unwrap();
        let lines = AstPrinter::program_lines(&program);

        let assign = lines.iter().find(|l| l.text.trim() == "Assign:").unwrap();
        assert_eq!(assign.source_line, 3);

        let print = lines.iter().find(|l| l.text.trim() == "Print(").unwrap();
        assert_eq!(print.source_line, 4);

        let literal = lines
            .iter()
            .find(|l| l.text.trim() == "IntegerLiteral: 1")
            .unwrap();
        assert_eq!(literal.source_line, 3);

        assert_eq!(lines[0].text, "Program");
        assert_eq!(lines[0].source_line, 0);
    }
}
