//! Built-in language profiles.

use once_cell::sync::Lazy;

use super::LanguageProfile;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn profile(
    id: &str,
    definition_types: &[&str],
    call_types: &[&str],
    decorator_containers: &[&str],
    entry_points: &[&str],
    framework_hooks: &[&str],
) -> LanguageProfile {
    LanguageProfile {
        definition_types: strings(definition_types),
        call_types: strings(call_types),
        decorator_containers: strings(decorator_containers),
        entry_points: strings(entry_points),
        framework_hooks: strings(framework_hooks),
        ..LanguageProfile::new(id)
    }
}

const JS_DEFINITIONS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "method_definition",
    "class_declaration",
];

const JS_CALLS: &[&str] = &["call_expression", "new_expression"];

// `handler` is the default export name for Node.js serverless functions.
const JS_ENTRY_POINTS: &[&str] = &["main", "handler"];

const JS_HOOKS: &[&str] = &[
    "constructor",
    "render",
    "componentDidMount",
    "componentDidUpdate",
    "componentWillUnmount",
    "shouldComponentUpdate",
    "getSnapshotBeforeUpdate",
    "componentDidCatch",
    "getDerivedStateFromProps",
    "getDerivedStateFromError",
    "connectedCallback",
    "disconnectedCallback",
    "adoptedCallback",
    "attributeChangedCallback",
    "toString",
    "toJSON",
    "valueOf",
];

const TS_EXTRA_HOOKS: &[&str] = &[
    "ngOnInit",
    "ngOnDestroy",
    "ngOnChanges",
    "ngDoCheck",
    "ngAfterContentInit",
    "ngAfterContentChecked",
    "ngAfterViewInit",
    "ngAfterViewChecked",
];

fn typescript(id: &str) -> LanguageProfile {
    let mut definitions = JS_DEFINITIONS.to_vec();
    definitions.push("abstract_class_declaration");
    let hooks: Vec<&str> = JS_HOOKS.iter().chain(TS_EXTRA_HOOKS).copied().collect();
    profile(id, &definitions, JS_CALLS, &[], JS_ENTRY_POINTS, &hooks)
}

static BUILTIN: Lazy<Vec<LanguageProfile>> = Lazy::new(|| {
    vec![
        profile(
            "python",
            &["function_definition", "class_definition"],
            &["call"],
            &["decorated_definition"],
            &["main", "lambda_handler", "handler"],
            &[
                "setUp",
                "tearDown",
                "setUpClass",
                "tearDownClass",
                "setUpModule",
                "tearDownModule",
                "asyncSetUp",
                "asyncTearDown",
                "get_queryset",
                "get_context_data",
                "get_object",
                "dispatch",
                "ready",
                "handle",
                "save",
                "clean",
            ],
        ),
        profile(
            "javascript",
            JS_DEFINITIONS,
            JS_CALLS,
            &[],
            JS_ENTRY_POINTS,
            JS_HOOKS,
        ),
        typescript("typescript"),
        typescript("tsx"),
        profile(
            "go",
            &["function_declaration", "method_declaration"],
            &["call_expression"],
            &[],
            &["main"],
            &[
                "init",
                "ServeHTTP",
                "String",
                "Error",
                "Len",
                "Less",
                "Swap",
                "MarshalJSON",
                "UnmarshalJSON",
                "Read",
                "Write",
                "Close",
            ],
        ),
        profile(
            "rust",
            &["function_item"],
            &["call_expression"],
            &[],
            &["main"],
            &[
                "fmt",
                "drop",
                "from",
                "into",
                "default",
                "clone",
                "deref",
                "deref_mut",
                "eq",
                "cmp",
                "partial_cmp",
                "hash",
                "next",
                "poll",
                "try_from",
                "from_str",
                "as_ref",
                "index",
            ],
        ),
        profile(
            "java",
            &["method_declaration"],
            &["method_invocation"],
            &[],
            &["main"],
            &[
                "toString",
                "equals",
                "hashCode",
                "compareTo",
                "run",
                "call",
                "close",
                "onCreate",
                "onStart",
                "onResume",
                "onPause",
                "onStop",
                "onDestroy",
                "doGet",
                "doPost",
                "setUp",
                "tearDown",
            ],
        ),
    ]
});

/// A built-in profile by language id.
pub fn builtin(id: &str) -> Option<&'static LanguageProfile> {
    BUILTIN.iter().find(|p| p.id == id)
}

/// Ids of all built-in profiles.
pub fn builtin_ids() -> Vec<&'static str> {
    BUILTIN.iter().map(|p| p.id.as_str()).collect()
}
