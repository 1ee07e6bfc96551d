#[cfg(test)]
mod tests {
    use crate::token::numeric::{Number, normalize, parse_number};
    use crate::token::{Position, TokenKind, Tokenizer, is_keyword, lookup_ident};

    fn kinds(src: &str) -> Vec<TokenKind> {
        Tokenizer::tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn basic() {
        use TokenKind::*;
        assert_eq!(
            kinds(r#"1.3 + * / % == "str1" true false nil null"#),
            vec![Float, Plus, Star, Slash, Percent, Eq, Str, True, False, Nil, Nil, Eof]
        );
    }

    #[test]
    fn test_compound_assignment_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("+= -= *= /= %= |= := ="),
            vec![
                PlusAssign,
                MinusAssign,
                StarAssign,
                SlashAssign,
                PercentAssign,
                BitOrAssign,
                Walrus,
                Assign,
                Eof
            ]
        );
    }

    #[test]
    fn punctuations() {
        use TokenKind::*;
        assert_eq!(
            kinds(">=<= == != ! > < << >> & | ^ ~ ?? ? : ... . # ,;"),
            vec![
                Ge, Le, Eq, Ne, Bang, Gt, Lt, Shl, Shr, BitAnd, BitOr, BitXor, BitNot, Nullish, Question, Colon,
                Ellipsis, Dot, Hash, Comma, Semicolon, Eof
            ]
        );
    }

    #[test]
    fn test_for_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("for (i in [1, 2]) {}"),
            vec![
                For, LParen, Ident, In, LBracket, Int, Comma, Int, RBracket, RParen, LBrace, RBrace, Eof
            ]
        );
    }

    #[test]
    fn newline_is_a_token() {
        use TokenKind::*;
        assert_eq!(kinds("a\nb\r\n"), vec![Ident, Newline, Ident, Newline, Eof]);
    }

    #[test]
    fn comments_are_skipped() {
        use TokenKind::*;
        assert_eq!(kinds("a // trailing\nb /* block\nstill */ c"), vec![Ident, Newline, Ident, Ident, Eof]);
        let toks = Tokenizer::tokenize("a /* never closed");
        assert_eq!(toks[1].kind, Illegal);
        assert_eq!(toks[1].literal, "unterminated comment");
    }

    #[test]
    fn keywords() {
        assert_eq!(lookup_ident("func"), TokenKind::Func);
        assert_eq!(lookup_ident("null"), TokenKind::Nil);
        assert_eq!(lookup_ident("pass"), TokenKind::Pass);
        assert_eq!(lookup_ident("funky"), TokenKind::Ident);
        assert!(is_keyword("default"));
        assert!(!is_keyword("print"));
    }

    #[test]
    fn ids() {
        let toks = Tokenizer::tokenize("id1 _id_2 π 😀x");
        let names: Vec<_> = toks.iter().filter(|t| t.kind == TokenKind::Ident).map(|t| t.literal.as_str()).collect();
        assert_eq!(names, vec!["id1", "_id_2", "π", "😀x"]);
    }

    #[test]
    fn positions_use_byte_columns() {
        let toks = Tokenizer::tokenize("π = 1\n  x");
        assert_eq!(toks[0].pos, Position::new(1, 1));
        // π takes two bytes
        assert_eq!(toks[1].pos, Position::new(1, 4));
        assert_eq!(toks[2].pos, Position::new(1, 6));
        assert_eq!(toks[3].kind, TokenKind::Newline);
        assert_eq!(toks[4].pos, Position::new(2, 3));
    }

    #[test]
    fn origin_offsets_positions() {
        let toks = Tokenizer::tokenize_at("a + b", Position::new(4, 10));
        assert_eq!(toks[0].pos, Position::new(4, 10));
        assert_eq!(toks[2].pos, Position::new(4, 14));
    }

    #[test]
    fn unclosed_str() {
        let toks = Tokenizer::tokenize("\"str");
        assert_eq!(toks[0].kind, TokenKind::Illegal);
        assert_eq!(toks[0].literal, "unterminated string");

        // The newline ends the string and is still its own token.
        let toks = Tokenizer::tokenize("\"a\nb\"");
        assert_eq!(toks[0].kind, TokenKind::Illegal);
        assert_eq!(toks[1].kind, TokenKind::Newline);
        assert_eq!(toks[2].kind, TokenKind::Ident);
    }

    #[test]
    fn string_escape_sequences() {
        let toks = Tokenizer::tokenize(r#""Hello\nWorld\t\"q\" \\ \d""#);
        assert_eq!(toks[0].kind, TokenKind::Str);
        assert_eq!(toks[0].literal, "Hello\nWorld\t\"q\" \\ \\d");
        assert_eq!(toks[0].raw.as_deref(), Some(r#""Hello\nWorld\t\"q\" \\ \d""#));
    }

    #[test]
    fn triple_and_raw_strings() {
        let toks = Tokenizer::tokenize("\"\"\"line1\nline \\n2\"\"\" `raw\\n`");
        assert_eq!(toks[0].kind, TokenKind::Str);
        assert_eq!(toks[0].literal, "line1\nline \\n2");
        assert_eq!(toks[1].kind, TokenKind::Str);
        assert_eq!(toks[1].literal, "raw\\n");
        assert_eq!(toks[1].pos, Position::new(2, 13));

        let toks = Tokenizer::tokenize("`open");
        assert_eq!(toks[0].kind, TokenKind::Illegal);
    }

    #[test]
    fn template_is_one_token() {
        let toks = Tokenizer::tokenize(r#"t"hi ${name + "}"} and ${ #{"a": {1: 2}} }" x"#);
        assert_eq!(toks[0].kind, TokenKind::Template);
        assert_eq!(toks[0].literal, r#"hi ${name + "}"} and ${ #{"a": {1: 2}} }"#);
        assert_eq!(toks[1].kind, TokenKind::Ident);
        assert_eq!(toks[1].literal, "x");
    }

    #[test]
    fn unterminated_template() {
        let toks = Tokenizer::tokenize(r#"t"abc ${x"#);
        assert_eq!(toks[0].kind, TokenKind::Illegal);
        assert_eq!(toks[0].literal, "unterminated template");

        let toks = Tokenizer::tokenize("t\"abc");
        assert_eq!(toks[0].kind, TokenKind::Illegal);
    }

    #[test]
    fn identifier_t_is_not_a_template() {
        use TokenKind::*;
        assert_eq!(kinds("t + tt\"x\""), vec![Ident, Plus, Ident, Str, Eof]);
    }

    #[test]
    fn illegal_character() {
        let toks = Tokenizer::tokenize("a @ b");
        assert_eq!(toks[1].kind, TokenKind::Illegal);
        assert_eq!(toks[1].literal, "illegal character '@'");
        assert_eq!(toks[2].kind, TokenKind::Ident);
    }

    #[test]
    fn numbers_scan_greedily() {
        let toks = Tokenizer::tokenize("1_000 0xFF_FF 1.5e-3 12abc 3.x");
        let lits: Vec<_> = toks.iter().map(|t| (t.kind, t.literal.as_str())).collect();
        assert_eq!(lits[0], (TokenKind::Int, "1_000"));
        assert_eq!(lits[1], (TokenKind::Int, "0xFF_FF"));
        assert_eq!(lits[2], (TokenKind::Float, "1.5e-3"));
        assert_eq!(lits[3], (TokenKind::Int, "12abc"));
        assert_eq!(lits[4], (TokenKind::Int, "3"));
        assert_eq!(lits[5], (TokenKind::Dot, "."));
    }

    #[test]
    fn numeric_grouping() {
        let n = normalize("1_2.3_4").unwrap();
        assert_eq!(n.text, "12.34");
        assert!(n.is_float);
        assert_eq!(parse_number("1_2.3_4").unwrap(), Number::Float(12.34));
        assert_eq!(parse_number("1_000_000").unwrap(), Number::Int(1_000_000));
        assert_eq!(parse_number("0xFF").unwrap(), Number::Int(255));
        assert_eq!(parse_number("0b1010").unwrap(), Number::Int(10));
        assert_eq!(parse_number("0o17").unwrap(), Number::Int(15));
        assert_eq!(parse_number("1e3").unwrap(), Number::Float(1000.0));
        assert_eq!(normalize("2E+1_0").unwrap().text, "2e+10");
    }

    #[test]
    fn numeric_rejects_bad_underscores() {
        for bad in ["1__2", "_1", "1_", "0x_FF", "1e_3", "1_.5", "1._5", "1e", "1e+", "0b102", "0x", "12abc", "0x1.5"] {
            assert!(normalize(bad).is_err(), "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn numeric_out_of_range() {
        let err = parse_number("99999999999999999999").unwrap_err();
        assert_eq!(err.to_string(), "integer literal out of range");
    }
}
