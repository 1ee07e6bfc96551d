mod common;

use common::{at, Project};
use tower_lsp::lsp_types::Range;
use welle_lsp::definition_at;

const LIB: &str = "export func greet(name) {\n  return \"hi \" + name\n}\nfunc helper() {}\n";

#[test]
fn test_local_definition() {
    let main = "x = 1\nfunc f(x) {\n  return x\n}\nprint(x)\n";
    let project = Project::new(&[("main.wll", main)]);
    let ws = project.workspace();
    let uri = project.uri("main.wll");

    let top = definition_at(&ws, &uri, main, at(4, 6)).unwrap();
    assert_eq!(top.uri, uri);
    assert_eq!(top.range, Range::new(at(0, 0), at(0, 1)));

    let param = definition_at(&ws, &uri, main, at(2, 9)).unwrap();
    assert_eq!(param.range, Range::new(at(1, 7), at(1, 8)));
}

#[test]
fn test_definition_across_modules() {
    let a = "from \"./lib\" import greet\ngreet()\n";
    let b = "import \"./lib\" as m\nm.greet()\nm.helper()\nm.nothing()\n";
    let project = Project::new(&[("lib.wll", LIB), ("a.wll", a), ("b.wll", b)]);
    let ws = project.workspace();
    let lib = project.uri("lib.wll");

    let from_import = definition_at(&ws, &project.uri("a.wll"), a, at(1, 0)).unwrap();
    assert_eq!(from_import.uri, lib);
    assert_eq!(from_import.range, Range::new(at(0, 12), at(0, 17)));

    let member = definition_at(&ws, &project.uri("b.wll"), b, at(1, 3)).unwrap();
    assert_eq!(member.uri, lib);
    assert_eq!(member.range.start, at(0, 12));

    // Unexported top-level declarations are still found.
    let helper = definition_at(&ws, &project.uri("b.wll"), b, at(2, 3)).unwrap();
    assert_eq!(helper.range.start, at(3, 5));

    assert!(definition_at(&ws, &project.uri("b.wll"), b, at(3, 3)).is_none());
}

#[test]
fn test_definition_of_builtin_is_none() {
    let main = "print(1)\n";
    let project = Project::new(&[("main.wll", main)]);
    let ws = project.workspace();
    assert!(definition_at(&ws, &project.uri("main.wll"), main, at(0, 2)).is_none());
}
