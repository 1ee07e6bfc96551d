#[cfg(test)]
mod tests {
    use crate::{
        ast::{AssignOp, Expr, Program, Stmt},
        diag::PARSE_ERROR,
        parser::parse,
        token::Position,
    };

    fn parse_ok(src: &str) -> Program {
        let out = parse(src);
        assert!(out.diagnostics.is_empty(), "unexpected diagnostics for {src:?}: {:?}", out.diagnostics);
        out.program
    }

    fn render(src: &str) -> String {
        parse_ok(src).to_string()
    }

    fn first_error(src: &str) -> String {
        let out = parse(src);
        assert!(out.has_errors(), "expected an error for {src:?}");
        out.diagnostics[0].message.clone()
    }

    #[test]
    fn test_bitwise_precedence() {
        assert_eq!(render("1 | 2 ^ 3 & 4\n"), "(1 | (2 ^ (3 & 4)))\n");
        assert_eq!(render("~1 + 2\n"), "((~1) + 2)\n");
        assert_eq!(render("1 << 2 + 3"), "(1 << (2 + 3))\n");
        assert_eq!(render("a == b < c"), "(a == (b < c))\n");
    }

    #[test]
    fn test_prefix_and_logic() {
        assert_eq!(render("-a * b"), "((-a) * b)\n");
        assert_eq!(render("not a and b or c"), "(((not a) and b) or c)\n");
        assert_eq!(render("!x"), "(!x)\n");
    }

    #[test]
    fn test_conditional_precedence() {
        assert_eq!(render("a ? b : c"), "(a ? b : c)\n");
        assert_eq!(render("a ? b : c ? d : e"), "(a ? b : (c ? d : e))\n");
        assert_eq!(render("x if c else y"), "(x if c else y)\n");
        assert_eq!(render("a or b ? 1 : 2"), "((a or b) ? 1 : 2)\n");
        assert_eq!(render("a ?? b ?? c"), "((a ?? b) ?? c)\n");
        assert_eq!(render("v = x if ok else y"), "v = (x if ok else y)\n");
    }

    #[test]
    fn test_postfix_chain() {
        assert_eq!(render("a.b(c)[0].d"), "(a.b(c)[0]).d\n");
        assert_eq!(render("f(1)(2)"), "f(1)(2)\n");
        assert_eq!(render("x.if"), "x.if\n");
    }

    #[test]
    fn test_assignment_chains() {
        assert_eq!(render("a = b = 3"), "a = (b = 3)\n");
        assert_eq!(render("x = (y = 2) + 1"), "x = ((y = 2) + 1)\n");
        assert_eq!(render("a := b := 3"), "a := (b := 3)\n");

        let program = parse_ok("a = b = 3");
        match &program.stmts[0] {
            Stmt::Assign { name, op, value, pos } => {
                assert_eq!(name.name, "a");
                assert_eq!(*op, AssignOp::Assign);
                assert_eq!(*pos, Position::new(1, 1));
                assert!(matches!(value, Expr::Assign { .. }));
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_assignment_targets() {
        assert_eq!(first_error("a + b = 3"), "invalid assignment target");
        assert_eq!(first_error("print((a, b) = (1, 2))"), "invalid assignment target");
        assert_eq!(first_error("arr[0] := 1"), "invalid assignment target");
        assert_eq!(first_error("f() = 1"), "invalid assignment target");
    }

    #[test]
    fn test_compound_assignments() {
        assert_eq!(render("x += 1\na[0] -= 2\no.n *= 3"), "x += 1\na[0] -= 2\no.n *= 3\n");
        let program = parse_ok("o.n |= 1");
        match &program.stmts[0] {
            Stmt::MemberAssign { member, op, .. } => {
                assert_eq!(member.name, "n");
                assert_eq!(*op, AssignOp::BitOr);
            }
            other => panic!("expected member assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_tuples() {
        assert_eq!(render("(1, 2)\n(1)\n(1,)\n()"), "(1, 2)\n1\n(1,)\n()\n");
        assert_eq!(render("(a, b)"), "(a, b)\n");
    }

    #[test]
    fn test_return_values() {
        let program = parse_ok("func f() {\n  return 1, 2\n}\nfunc g() {\n  return\n}");
        assert_eq!(program.to_string(), "func f() { return 1, 2 }\nfunc g() { return }\n");
        assert_eq!(render("return 1, 2\nreturn"), "return 1, 2\nreturn\n");
    }

    #[test]
    fn test_dict_shorthand() {
        assert_eq!(render("#{a, b: 1, c}"), "#{a, b: 1, c}\n");
        assert_eq!(render("#{\n  \"k\": 1,\n  v,\n}"), "#{\"k\": 1, v}\n");
        assert_eq!(render("#{}"), "#{}\n");
    }

    #[test]
    fn test_if_single_statement() {
        let program = parse_ok("if (a) b = 1 else c = 2\nif (a) if (b) x() else y()\nif (a) { b() } else { c() }\nif (a) b()");
        assert_eq!(program.stmts.len(), 4);
        assert_eq!(program.stmts[0].to_string(), "if (a) b = 1 else c = 2");
        // The else binds to the nearest if.
        match &program.stmts[1] {
            Stmt::If { then, els, .. } => {
                assert!(els.is_none());
                assert!(matches!(**then, Stmt::If { els: Some(_), .. }));
            }
            other => panic!("expected if, got {other:?}"),
        }
        assert_eq!(program.stmts[2].to_string(), "if (a) { b() } else { c() }");
    }

    #[test]
    fn test_if_boundaries() {
        let program = parse_ok("if (a) b()\nc()\nif (a) b()\nelse c()\nif (x)\n  y()\nz()");
        assert_eq!(program.stmts.len(), 5);
        assert!(matches!(program.stmts[1], Stmt::Expr { .. }));
        assert!(matches!(program.stmts[2], Stmt::If { els: Some(_), .. }));
        assert!(matches!(program.stmts[3], Stmt::If { els: None, .. }));
        assert_eq!(program.stmts[4].to_string(), "z()");
    }

    #[test]
    fn test_if_errors() {
        let out = parse("if (x) else y = 1\n");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].message, "expected statement after if condition");
        assert_eq!(out.diagnostics[0].range.pos, Position::new(1, 8));
        assert_eq!(out.program.to_string(), "y = 1\n");

        assert!(first_error("if (x) {\n").contains("to close block"));
    }

    #[test]
    fn test_loops() {
        assert_eq!(render("while (x > 0) { x -= 1 }"), "while ((x > 0)) { x -= 1 }\n");
        assert_eq!(render("for (i = 0; i < 3; i += 1) {}"), "for (i = 0; (i < 3); i += 1) {}\n");
        assert_eq!(render("for (;;) { break }"), "for (; ; ) { break }\n");
        assert_eq!(render("for x in xs { print(x) }"), "for (x in xs) { print(x) }\n");
        assert_eq!(render("for (x in xs) { continue }"), "for (x in xs) { continue }\n");
    }

    #[test]
    fn test_for_in_destructuring_forms() {
        assert_eq!(render("for (k, v) in d {}"), "for ((k, v) in d) {}\n");
        assert_eq!(render("for ((k, v) in d) {}"), "for ((k, v) in d) {}\n");

        let out = parse("for (a, b, c) in d {}");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].message, "for-in destructuring expects exactly two targets, found 3");
        assert_eq!(out.program.stmts.len(), 1);

        assert_eq!(first_error("for (a) in d {}"), "for-in destructuring expects exactly two targets, found 1");
    }

    #[test]
    fn test_comprehension_and_slices() {
        assert_eq!(render("[x * 2 for x in xs if x > 1]"), "[(x * 2) for x in xs if (x > 1)]\n");
        assert_eq!(render("[x for x in xs]"), "[x for x in xs]\n");
        assert_eq!(render("a[1:2:3]"), "(a[1:2:3])\n");
        assert_eq!(render("a[:2]"), "(a[:2])\n");
        assert_eq!(render("a[1:]"), "(a[1:])\n");
        assert_eq!(render("a[::2]"), "(a[::2])\n");
        assert_eq!(render("a[i]"), "(a[i])\n");
    }

    #[test]
    fn test_match_expression() {
        let src = "r = match (v) {\n  case 1, 2 { \"a\" }\n  default { \"b\" }\n}";
        assert_eq!(render(src), "r = match (v) { case 1, 2 { \"a\" } default { \"b\" } }\n");
        assert_eq!(first_error("match (v) { 1 }"), "unexpected token in match: INT");
    }

    #[test]
    fn test_switch_and_try() {
        let src = "switch (x) {\n  case 1 { a() }\n  default { b() }\n}";
        assert_eq!(render(src), "switch (x) { case 1 { a() } default { b() } }\n");

        let src = "try {\n  f()\n} catch (e) {\n  g(e)\n} finally {\n  h()\n}";
        assert_eq!(render(src), "try { f() } catch (e) { g(e) } finally { h() }\n");
        assert_eq!(render("try { f() } catch { g() }"), "try { f() } catch { g() }\n");
        assert_eq!(first_error("try { f() }"), "expected catch or finally after try block");
    }

    #[test]
    fn test_functions_and_imports() {
        assert_eq!(render("func add(a, b) { return a + b }"), "func add(a, b) { return (a + b) }\n");
        assert_eq!(render("f = func(x) { return x }"), "f = func(x) { return x }\n");
        assert_eq!(render("import \"std/math\" as m"), "import \"std/math\" as m\n");
        assert_eq!(render("from \"./util\" import a as b, c"), "from \"./util\" import a as b, c\n");
        assert_eq!(render("export func f() {}\nexport x = 1"), "export func f() {}\nexport x = 1\n");
    }

    #[test]
    fn test_export_errors() {
        assert_eq!(first_error("export\n"), "expected statement after export");
        assert_eq!(first_error("export x += 1"), "export expects a function or assignment");
        assert_eq!(first_error("export print(1)"), "export expects a function or assignment");
    }

    #[test]
    fn test_defer_and_spread() {
        assert_eq!(render("defer close(f)"), "defer close(f)\n");
        assert_eq!(first_error("defer x"), "defer expects a call expression");
        assert_eq!(render("f(a, ...rest)"), "f(a, ...rest)\n");
        assert_eq!(first_error("[...xs]"), "spread is only allowed in call arguments");
    }

    #[test]
    fn test_invalid_number() {
        let out = parse("x = 99999999999999999999");
        assert_eq!(out.diagnostics.len(), 1);
        let diag = &out.diagnostics[0];
        assert_eq!(diag.code, PARSE_ERROR);
        assert_eq!(
            diag.message,
            "invalid number \"99999999999999999999\": integer literal out of range"
        );
        assert_eq!(diag.range.pos, Position::new(1, 5));
        assert_eq!(diag.range.length, 20);
    }

    #[test]
    fn test_newlines_inside_brackets() {
        assert_eq!(render("f(\n  1,\n  2\n)"), "f(1, 2)\n");
        assert_eq!(render("xs = [\n  1,\n  2,\n]"), "xs = [1, 2]\n");
        // A block inside a call argument separates statements by newline again.
        assert_eq!(render("g(func() {\n  a()\n  b()\n})"), "g(func() { a(); b() })\n");
    }

    #[test]
    fn test_positions() {
        let program = parse_ok("x = 1\n  foo(bar)");
        assert_eq!(program.stmts[1].pos(), Position::new(2, 3));
        match &program.stmts[1] {
            Stmt::Expr {
                expr: Expr::Call { pos, args, .. },
                ..
            } => {
                assert_eq!(*pos, Position::new(2, 6));
                assert_eq!(args[0].pos(), Position::new(2, 7));
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_display_round_trip_is_stable() {
        let src = r#"
import "lib" as lib
from "./m" import a, b as c
func fib(n) {
  if (n < 2) { return n }
  return fib(n - 1) + fib(n - 2)
}
(x, *rest) := [1, 2, 3]
d = #{name: "w\n", count}
msg = t"hi ${d.name} \${raw}"
total = [v * 2 for v in rest if v % 2 == 0]
label = match (total) { case 1 { "one" } default { "many" } }
for (k, v) in d { print(k, v) }
try { throw "x" } catch (e) { pass }
y = a ?? b ? -1 : ~2
"#;
        let once = render(src);
        let twice = render(&once);
        assert_eq!(once, twice);
    }
}
