#[cfg(test)]
mod tests {
    use crate::{
        ast::{Expr, Stmt},
        parser::{TemplateSegment, parse, split_template},
        token::Position,
    };

    fn template_of(src: &str) -> Expr {
        let out = parse(src);
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        match out.program.stmts.into_iter().next() {
            Some(Stmt::Expr { expr, .. }) => expr,
            Some(Stmt::Assign { value, .. }) => value,
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn test_parts_and_exprs() {
        match template_of(r#"t"a ${x} b ${y + 1}""#) {
            Expr::Template { tag, parts, exprs, .. } => {
                assert!(tag.is_none());
                assert_eq!(parts, vec!["a ", " b ", ""]);
                assert_eq!(exprs.len(), 2);
                assert_eq!(exprs[1].to_string(), "(y + 1)");
            }
            other => panic!("expected template, got {other:?}"),
        }
    }

    #[test]
    fn test_escapes() {
        match template_of(r#"t"tab\t\${x} \"q\"""#) {
            Expr::Template { parts, exprs, .. } => {
                assert!(exprs.is_empty());
                assert_eq!(parts, vec!["tab\t${x} \"q\""]);
            }
            other => panic!("expected template, got {other:?}"),
        }
    }

    #[test]
    fn test_tagged() {
        match template_of(r#"sql t"select ${id}""#) {
            Expr::Template { tag: Some(tag), exprs, .. } => {
                assert_eq!(tag.to_string(), "sql");
                assert_eq!(exprs[0].to_string(), "id");
            }
            other => panic!("expected tagged template, got {other:?}"),
        }
        match template_of(r#"db.q t"${n}""#) {
            Expr::Template { tag: Some(tag), .. } => assert_eq!(tag.to_string(), "db.q"),
            other => panic!("expected tagged template, got {other:?}"),
        }
    }

    #[test]
    fn test_absolute_positions() {
        match template_of(r#"x = t"hi ${name}""#) {
            Expr::Template { pos, exprs, .. } => {
                assert_eq!(pos, Position::new(1, 5));
                assert_eq!(exprs[0].pos(), Position::new(1, 12));
            }
            other => panic!("expected template, got {other:?}"),
        }
        match template_of("\n  t\"${a} ${f(b)}\"") {
            Expr::Template { exprs, .. } => {
                assert_eq!(exprs[0].pos(), Position::new(2, 7));
                match &exprs[1] {
                    Expr::Call { args, .. } => assert_eq!(args[0].pos(), Position::new(2, 14)),
                    other => panic!("expected call, got {other:?}"),
                }
            }
            other => panic!("expected template, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_braces_in_interpolation() {
        match template_of(r#"t"${#{a: 1}["a"]}""#) {
            Expr::Template { exprs, .. } => assert_eq!(exprs[0].to_string(), "(#{a: 1}[\"a\"])"),
            other => panic!("expected template, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_interpolation() {
        let out = parse(r#"t"a ${}""#);
        assert_eq!(out.diagnostics.len(), 1);
        let diag = &out.diagnostics[0];
        assert_eq!(diag.message, "empty template expression");
        assert_eq!(diag.range.pos, Position::new(1, 5));
        assert_eq!(diag.range.length, 2);
    }

    #[test]
    fn test_multiple_expressions() {
        let out = parse(r#"t"${a b}""#);
        assert_eq!(out.diagnostics[0].message, "template expression must be a single expression");
        assert_eq!(out.diagnostics[0].range.pos, Position::new(1, 7));
    }

    #[test]
    fn test_split_segments() {
        let segments = split_template("a${x}b", Position::new(3, 10));
        assert_eq!(
            segments,
            vec![
                TemplateSegment::Text("a".into()),
                TemplateSegment::Interp {
                    source: "x".into(),
                    origin: Position::new(3, 13),
                    open: Position::new(3, 11),
                },
                TemplateSegment::Text("b".into()),
            ]
        );
        assert_eq!(split_template("$5", Position::start()), vec![TemplateSegment::Text("$5".into())]);
    }
}
