mod common;

use common::{at, file_name, Project};
use tower_lsp::lsp_types::Location;
use welle_lsp::references;

const LIB: &str = "export func greet(name) {\n  return \"hi \" + name\n}\n";
const A: &str = "from \"./lib\" import greet\nprint(greet(\"a\"))\n";
const B: &str = "import \"./lib\" as m\nm.greet(\"b\")\n";

fn summary(mut locations: Vec<Location>) -> Vec<(String, u32, u32)> {
    locations.sort_by_key(|l| (l.uri.to_string(), l.range.start.line, l.range.start.character));
    locations
        .into_iter()
        .map(|l| (file_name(&l.uri), l.range.start.line, l.range.start.character))
        .collect()
}

#[test]
fn test_export_references_across_files() {
    let project = Project::new(&[("lib.wll", LIB), ("a.wll", A), ("b.wll", B)]);
    let ws = project.workspace();

    let all = summary(references(&ws, &project.uri("b.wll"), B, at(1, 4), true).unwrap());
    assert_eq!(
        all,
        vec![
            ("a.wll".to_string(), 0, 20),
            ("a.wll".to_string(), 1, 6),
            ("b.wll".to_string(), 1, 2),
            ("lib.wll".to_string(), 0, 12),
        ]
    );

    let uses = summary(references(&ws, &project.uri("b.wll"), B, at(1, 4), false).unwrap());
    assert_eq!(uses.len(), 3);
    assert!(!uses.contains(&("lib.wll".to_string(), 0, 12)));
}

#[test]
fn test_alias_uses_are_references() {
    let c = "from \"./lib\" import greet as hello\nhello()\nhello()\n";
    let project = Project::new(&[("lib.wll", LIB), ("c.wll", c)]);
    let ws = project.workspace();

    let found = summary(references(&ws, &project.uri("c.wll"), c, at(2, 1), true).unwrap());
    assert!(found.contains(&("lib.wll".to_string(), 0, 12)));
    assert!(found.contains(&("c.wll".to_string(), 0, 20)));
    assert!(found.contains(&("c.wll".to_string(), 1, 0)));
    assert!(found.contains(&("c.wll".to_string(), 2, 0)));
}

#[test]
fn test_local_references() {
    let main = "total := 0\nfunc add(n) {\n  total = total + n\n}\nadd(total)\n";
    let project = Project::new(&[("main.wll", main)]);
    let ws = project.workspace();
    let uri = project.uri("main.wll");

    let found = summary(references(&ws, &uri, main, at(0, 1), true).unwrap());
    assert_eq!(found.first(), Some(&("main.wll".to_string(), 0, 0)));
    assert!(found.contains(&("main.wll".to_string(), 2, 10)));
    assert!(found.contains(&("main.wll".to_string(), 4, 4)));

    let without_decl = references(&ws, &uri, main, at(0, 1), false).unwrap();
    assert_eq!(without_decl.len(), found.len() - 1);
}

#[test]
fn test_unresolved_module_falls_back_to_file() {
    let main = "import \"./gone\" as g\ng.run()\ng.run()\n";
    let project = Project::new(&[("main.wll", main)]);
    let ws = project.workspace();

    let found = summary(references(&ws, &project.uri("main.wll"), main, at(1, 3), true).unwrap());
    assert_eq!(
        found,
        vec![("main.wll".to_string(), 1, 2), ("main.wll".to_string(), 2, 2)]
    );
}

#[test]
fn test_nothing_under_cursor() {
    let main = "x = 1\n";
    let project = Project::new(&[("main.wll", main)]);
    let ws = project.workspace();
    assert!(references(&ws, &project.uri("main.wll"), main, at(0, 4), true)
        .unwrap()
        .is_empty());
}

#[test]
fn test_param_references_exclude_declaration() {
    let main = "func f(a) {\n  return a\n}\n";
    let project = Project::new(&[("main.wll", main)]);
    let ws = project.workspace();
    let uri = project.uri("main.wll");

    let uses = summary(references(&ws, &uri, main, at(1, 10), false).unwrap());
    assert_eq!(uses, vec![("main.wll".to_string(), 1, 9)]);

    let all = summary(references(&ws, &uri, main, at(1, 10), true).unwrap());
    assert_eq!(
        all,
        vec![("main.wll".to_string(), 0, 7), ("main.wll".to_string(), 1, 9)]
    );
}
