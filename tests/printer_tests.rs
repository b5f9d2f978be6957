// Integration tests for the AST printer

use minijava::parser::Parser;
use minijava::printer::AstPrinter;

const FACTORIAL: &str = r#"
class Factorial {
  public static void main () {
    System.out.println (new Fac().ComputeFac(10));
  }
}

class Fac {
  public int ComputeFac(int num) {
    assert(num > -1);
    int num_aux;
    if (num == 0)
      num_aux = 1;
    else
      num_aux = num * this.ComputeFac(num - 1);
    return num_aux;
  }
}
"#;

#[test]
fn test_print_factorial() {
    let program = Parser::from_source(FACTORIAL).parse_program().unwrap();
    let output = AstPrinter::print_program(&program);

    insta::assert_snapshot!(output, @r###"
    Program
      MainClass:
        Class: Factorial
          main() statements:
            Print(
              MethodInvocation: ComputeFac()
                Object:
                  NewObject: Fac()
                Arguments:
                  IntegerLiteral: 10
            )
      Classes:
        Class: Fac
          Method: int ComputeFac(int num)
            Assert(
              BinaryOp >
                Left:
                  Identifier: num
                Right:
                  IntegerLiteral: -1
            )
            Variable: int num_aux
            If (
              BinaryOp ==
                Left:
                  Identifier: num
                Right:
                  IntegerLiteral: 0
            ) Then
              Assign:
                LValue:
                  Identifier: num_aux
                =
                  IntegerLiteral: 1
            Else
              Assign:
                LValue:
                  Identifier: num_aux
                =
                  BinaryOp *
                    Left:
                      Identifier: num
                    Right:
                      MethodInvocation: ComputeFac()
                        Object:
                          This
                        Arguments:
                          BinaryOp -
                            Left:
                              Identifier: num
                            Right:
                              IntegerLiteral: 1
            Return:
              Identifier: num_aux
    "###);
}

#[test]
fn test_printed_lines_follow_source() {
    let program = Parser::from_source(FACTORIAL).parse_program().unwrap();
    let lines = AstPrinter::program_lines(&program);

    let line_of = |text: &str| {
        lines
            .iter()
            .find(|l| l.text.trim() == text)
            .map(|l| l.source_line)
    };

    assert_eq!(line_of("Class: Factorial"), Some(2));
    assert_eq!(line_of("Class: Fac"), Some(8));
    assert_eq!(line_of("Method: int ComputeFac(int num)"), Some(9));
    assert_eq!(line_of("Variable: int num_aux"), Some(11));
    assert_eq!(line_of("Return:"), Some(16));

    // Every line below the program header is attributed to a source line
    assert!(lines.iter().skip(2).all(|l| l.source_line > 0));
}
