use super::{Parser, helpers::PResult};
use crate::{
    ast::{ImportItem, ImportPath, Stmt},
    token::TokenKind,
};

impl Parser {
    fn parse_import_path(&mut self, after: &str) -> PResult<ImportPath> {
        let tok = self.expect(TokenKind::Str, after)?;
        Ok(ImportPath {
            value: tok.literal,
            pos: tok.pos,
        })
    }

    /// `import "path" [as alias]`
    pub(super) fn parse_import(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        let path = self.parse_import_path("after 'import'")?;
        let alias = if self.eat(TokenKind::As) {
            Some(self.expect_ident("after 'as'")?)
        } else {
            None
        };
        Ok(Stmt::Import {
            pos: tok.pos,
            path,
            alias,
        })
    }

    /// `from "path" import a [as b], c`
    pub(super) fn parse_from_import(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        let path = self.parse_import_path("after 'from'")?;
        self.expect(TokenKind::Import, "after module path")?;
        let mut items = Vec::new();
        loop {
            let name = self.expect_ident("in import list")?;
            let alias = if self.eat(TokenKind::As) {
                Some(self.expect_ident("after 'as'")?)
            } else {
                None
            };
            items.push(ImportItem { name, alias });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(Stmt::FromImport {
            pos: tok.pos,
            path,
            items,
        })
    }
}
