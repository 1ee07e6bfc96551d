mod common;

use std::collections::BTreeMap;

use common::{at, file_name, Project};
use tower_lsp::lsp_types::{Range, TextEdit, WorkspaceEdit};
use welle_lsp::rename;

const LIB: &str = "export func greet(name) {\n  return \"hi \" + name\n}\n";
const A: &str = "from \"./lib\" import greet\nprint(greet(\"a\"))\n";
const B: &str = "import \"./lib\" as m\nm.greet(\"b\")\n";

fn by_file(edit: WorkspaceEdit) -> BTreeMap<String, Vec<TextEdit>> {
    edit.changes
        .unwrap()
        .into_iter()
        .map(|(uri, mut edits)| {
            edits.sort_by_key(|e| (e.range.start.line, e.range.start.character));
            (file_name(&uri), edits)
        })
        .collect()
}

fn range(line: u32, start: u32, end: u32) -> Range {
    Range::new(at(line, start), at(line, end))
}

#[test]
fn test_export_rename_edits_all_importers() {
    let project = Project::new(&[("lib.wll", LIB), ("a.wll", A), ("b.wll", B)]);
    let ws = project.workspace();

    let edit = rename(&ws, &project.uri("lib.wll"), LIB, at(0, 12), "salute").unwrap().unwrap();
    let files = by_file(edit);
    assert_eq!(files.keys().collect::<Vec<_>>(), vec!["a.wll", "b.wll", "lib.wll"]);
    assert_eq!(files["lib.wll"].len(), 1);
    assert_eq!(files["lib.wll"][0].range, range(0, 12, 17));
    assert_eq!(
        files["a.wll"].iter().map(|e| e.range).collect::<Vec<_>>(),
        vec![range(0, 20, 25), range(1, 6, 11)]
    );
    assert_eq!(files["b.wll"][0].range, range(1, 2, 7));
    assert!(files.values().flatten().all(|e| e.new_text == "salute"));
}

#[test]
fn test_rename_from_importer_matches_declaration() {
    let project = Project::new(&[("lib.wll", LIB), ("a.wll", A), ("b.wll", B)]);
    let ws = project.workspace();

    let from_use = by_file(rename(&ws, &project.uri("a.wll"), A, at(1, 7), "x").unwrap().unwrap());
    let from_member = by_file(rename(&ws, &project.uri("b.wll"), B, at(1, 3), "x").unwrap().unwrap());
    assert_eq!(from_use, from_member);
    assert_eq!(from_use.values().map(Vec::len).sum::<usize>(), 4);
}

#[test]
fn test_aliased_import_keeps_alias() {
    let c = "from \"./lib\" import greet as hello\nhello()\n";
    let project = Project::new(&[("lib.wll", LIB), ("c.wll", c)]);
    let ws = project.workspace();

    let files = by_file(rename(&ws, &project.uri("lib.wll"), LIB, at(0, 14), "salute").unwrap().unwrap());
    assert_eq!(files["c.wll"].len(), 1);
    assert_eq!(files["c.wll"][0].range, range(0, 20, 25));
}

#[test]
fn test_unexported_rename_stays_in_file() {
    let main = "count = 1\nprint(count)\n";
    let other = "count = 5\n";
    let project = Project::new(&[("main.wll", main), ("other.wll", other)]);
    let ws = project.workspace();

    let files = by_file(rename(&ws, &project.uri("main.wll"), main, at(1, 7), "total").unwrap().unwrap());
    assert_eq!(files.len(), 1);
    assert_eq!(
        files["main.wll"].iter().map(|e| e.range).collect::<Vec<_>>(),
        vec![range(0, 0, 5), range(1, 6, 11)]
    );
}

#[test]
fn test_param_rename_respects_shadowing() {
    let main = "a = 3\nfunc f(a) {\n  return a * 2\n}\nprint(a)\n";
    let project = Project::new(&[("main.wll", main)]);
    let ws = project.workspace();

    let files = by_file(rename(&ws, &project.uri("main.wll"), main, at(2, 9), "n").unwrap().unwrap());
    assert_eq!(
        files["main.wll"].iter().map(|e| e.range).collect::<Vec<_>>(),
        vec![range(1, 7, 8), range(2, 9, 10)]
    );
}

#[test]
fn test_multibyte_rename() {
    let main = "π = 1\nprint(π)\n";
    let project = Project::new(&[("main.wll", main)]);
    let ws = project.workspace();

    let files = by_file(rename(&ws, &project.uri("main.wll"), main, at(1, 6), "pi").unwrap().unwrap());
    assert_eq!(
        files["main.wll"].iter().map(|e| e.range).collect::<Vec<_>>(),
        vec![range(0, 0, 1), range(1, 6, 7)]
    );
}

#[test]
fn test_rename_rejections() {
    let main = "x = 1\nprint(len(x))\n";
    let project = Project::new(&[("main.wll", main)]);
    let ws = project.workspace();
    let uri = project.uri("main.wll");

    let err = rename(&ws, &uri, main, at(0, 0), "while").unwrap_err();
    assert_eq!(err.to_string(), "cannot rename to keyword");
    let err = rename(&ws, &uri, main, at(0, 0), "len").unwrap_err();
    assert_eq!(err.to_string(), "cannot rename to builtin");
    let err = rename(&ws, &uri, main, at(1, 7), "size").unwrap_err();
    assert_eq!(err.to_string(), "cannot rename builtin");

    // Nothing under the cursor.
    assert!(rename(&ws, &uri, main, at(0, 3), "y").unwrap().is_none());
}

#[test]
fn test_unresolved_module_is_an_error() {
    let main = "import \"./missing\" as m\nm.run()\n";
    let project = Project::new(&[("main.wll", main)]);
    let ws = project.workspace();

    let err = rename(&ws, &project.uri("main.wll"), main, at(1, 3), "go").unwrap_err();
    assert_eq!(err.to_string(), "cannot resolve module import");
}
