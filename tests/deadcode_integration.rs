//! Dead-code analysis over real JavaScript and Python trees.

use std::path::PathBuf;

use cstscope::deadcode::DeadCodeAnalyzer;
use cstscope::{
    grammars, profile, DeadCodeReport, Extractor, FilterOptions, LanguageProfile, ProjectScan,
    SourceFile,
};

fn analyze(id: &str, source: &str, options: FilterOptions) -> DeadCodeReport {
    let grammar = grammars::by_id(id).expect("bundled grammar");
    let schema = grammar.schema().expect("schema loads");
    let parsed = grammar.parse(source).expect("source parses");
    let profile = profile::builtin(id).expect("built-in profile");

    let mut analyzer = DeadCodeAnalyzer::new(Extractor::new(&schema), profile, options);
    analyzer
        .add_file(&parsed.root(), Some("input"))
        .expect("indexing succeeds");
    analyzer.report()
}

fn unused_names(report: &DeadCodeReport) -> Vec<&str> {
    report.unused.iter().map(|u| u.identifier.as_str()).collect()
}

fn excluded(report: &DeadCodeReport) -> Vec<(&str, &str)> {
    report
        .excluded
        .iter()
        .map(|e| (e.definition.identifier.as_str(), e.definition.reason.as_str()))
        .collect()
}

fn testdata(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(path)
}

#[test]
fn test_unused_functions_javascript() {
    let report = analyze(
        "javascript",
        "function used() {}\nfunction unused() {}\nfunction alsoUnused() {}\nused();\n",
        FilterOptions::default(),
    );

    assert_eq!(unused_names(&report), vec!["unused", "alsoUnused"]);
    assert_eq!(report.definitions, 3);
    assert_eq!(report.call_sites, 1);
    assert!(report
        .unused
        .iter()
        .all(|u| u.reason == "No call sites found" && u.source_file.as_deref() == Some("input")));
    assert_eq!(report.unused[0].start_line, 2);
}

#[test]
fn test_unused_functions_python() {
    let report = analyze(
        "python",
        "def used():\n    pass\n\ndef unused():\n    pass\n\ndef alsoUnused():\n    pass\n\nused()\n",
        FilterOptions::default(),
    );
    assert_eq!(unused_names(&report), vec!["unused", "alsoUnused"]);
}

#[test]
fn test_entry_point_excluded() {
    let source = "function main() {}\nfunction test_parse() {}\nfunction orphan() {}\n";

    let report = analyze("javascript", source, FilterOptions::default());
    assert_eq!(unused_names(&report), vec!["orphan"]);
    assert_eq!(
        excluded(&report),
        vec![("main", "entry point"), ("test_parse", "test function")]
    );

    let report = analyze(
        "javascript",
        source,
        FilterOptions {
            exclude_entry_points: false,
            ..FilterOptions::default()
        },
    );
    assert_eq!(unused_names(&report), vec!["main", "test_parse", "orphan"]);
}

#[test]
fn test_python_dunder_excluded() {
    let source = "class Point:\n    def __str__(self):\n        return \"p\"\n\n    def setUp(self):\n        pass\n\np = Point()\n";

    let report = analyze("python", source, FilterOptions::default());
    assert!(unused_names(&report).is_empty());
    assert_eq!(
        excluded(&report),
        vec![("__str__", "dunder method"), ("setUp", "framework hook")]
    );

    let report = analyze(
        "python",
        source,
        FilterOptions {
            exclude_framework_hooks: false,
            ..FilterOptions::default()
        },
    );
    assert_eq!(unused_names(&report), vec!["__str__", "setUp"]);
}

#[test]
fn test_go_entry_points_are_per_language() {
    let source = "package main\n\nfunc main() {}\nfunc run() {}\nfunc handler() {}\nfunc setup() {}\n";

    let report = analyze("go", source, FilterOptions::default());
    assert_eq!(unused_names(&report), vec!["run", "handler", "setup"]);
    assert_eq!(excluded(&report), vec![("main", "entry point")]);
}

#[test]
fn test_yaml_profile_replaces_entry_points() {
    let profile = LanguageProfile::from_yaml_str(
        "id: go\ndefinition_types: [function_declaration]\ncall_types: [call_expression]\nentry_points: [run]\n",
    )
    .unwrap();

    let grammar = grammars::by_id("go").unwrap();
    let schema = grammar.schema().unwrap();
    let parsed = grammar
        .parse("package main\n\nfunc main() {}\nfunc run() {}\n")
        .unwrap();

    let mut analyzer =
        DeadCodeAnalyzer::new(Extractor::new(&schema), &profile, FilterOptions::default());
    analyzer.add_file(&parsed.root(), None).unwrap();
    let report = analyzer.report();

    assert_eq!(unused_names(&report), vec!["main"]);
    assert_eq!(excluded(&report), vec![("run", "entry point")]);
}

#[test]
fn test_decorated_excluded_only_when_enabled() {
    let source = "@app.route(\"/\")\ndef index():\n    return \"hi\"\n";

    let report = analyze("python", source, FilterOptions::default());
    assert!(report.is_clean());
    assert_eq!(excluded(&report), vec![("index", "decorated")]);

    let report = analyze(
        "python",
        source,
        FilterOptions {
            exclude_decorated: false,
            ..FilterOptions::default()
        },
    );
    assert_eq!(unused_names(&report), vec!["index"]);
    assert_eq!(
        report.unused[0].parent_node_type.as_deref(),
        Some("decorated_definition")
    );
}

#[test]
fn test_constructor_call_marks_class_used() {
    let report = analyze(
        "javascript",
        "class Cache {}\nclass Orphan {}\nconst c = new Cache();\n",
        FilterOptions::default(),
    );
    assert_eq!(unused_names(&report), vec!["Orphan"]);
}

#[test]
fn test_project_scan_python() {
    let grammar = grammars::by_id("python").unwrap();
    let schema = grammar.schema().unwrap();
    let profile = profile::builtin("python").unwrap();
    let sources = vec![
        SourceFile::new("util.py", "def helper():\n    pass\n\ndef stale():\n    pass\n"),
        SourceFile::new("app.py", "from util import helper\n\nhelper()\n"),
    ];

    let report = ProjectScan::new(grammar.language(), &schema, profile, FilterOptions::default())
        .scan(&sources)
        .unwrap();

    assert_eq!(report.files, 2);
    assert_eq!(unused_names(&report), vec!["stale"]);
    assert_eq!(report.unused[0].source_file.as_deref(), Some("util.py"));
}

#[test]
fn test_custom_profile_from_yaml() {
    let profile = LanguageProfile::parse_file(testdata("profiles/python-django.yaml")).unwrap();
    assert_eq!(profile.id, "python");

    let grammar = grammars::by_id("python").unwrap();
    let schema = grammar.schema().unwrap();
    let parsed = grammar
        .parse("class Index:\n    def get_context_data(self):\n        pass\n\n    def build(self):\n        pass\n")
        .unwrap();

    let mut analyzer =
        DeadCodeAnalyzer::new(Extractor::new(&schema), &profile, FilterOptions::default());
    analyzer.add_file(&parsed.root(), None).unwrap();
    let report = analyzer.report();

    // The profile indexes functions only, and lists get_context_data as a hook.
    assert_eq!(unused_names(&report), vec!["build"]);
    assert_eq!(excluded(&report), vec![("get_context_data", "framework hook")]);
}

#[test]
fn test_profile_for_unbundled_grammar() {
    let kotlin = LanguageProfile::parse_file(testdata("profiles/kotlin.yaml")).unwrap();
    assert_eq!(kotlin.callee_key, "callable");
    assert_eq!(kotlin.declaration_types.as_deref().map(<[String]>::len), Some(4));
    assert!(profile::builtin(&kotlin.id).is_none());
    assert!(grammars::by_id(&kotlin.id).is_none());
}
