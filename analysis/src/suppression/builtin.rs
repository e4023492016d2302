//! Accepted noise from typechecking the Django test suite.
//!
//! These errors come from the test suite itself and cannot be fixed through
//! the stubs. `StubGap` entries are expected to go away as the stubs mature.

use crate::suppression::model::RuleLifetime::{self, Dynamic, StubGap};
use crate::suppression::model::RuleSpec;

const LITERALS: &[(&str, RuleLifetime)] = &[
    ("Need type annotation for", Dynamic),
    ("already defined on", Dynamic),
    ("Cannot assign to a", Dynamic),
    ("cannot perform relative import", Dynamic),
    ("broken_app", Dynamic),
    ("cache_clear", Dynamic),
    ("call_count", Dynamic),
    ("call_args_list", Dynamic),
    ("call_args", Dynamic),
    (r#""password_changed" does not return a value"#, StubGap),
    (r#""validate_password" does not return a value"#, StubGap),
    ("LazySettings", Dynamic),
    ("Cannot infer type of lambda", Dynamic),
    (r#""refresh_from_db" of "Model""#, StubGap),
    (r#""as_sql" undefined in superclass"#, StubGap),
    (
        r#"Incompatible types in assignment (expression has type "str", target has type "type")"#,
        Dynamic,
    ),
    (
        r#"Incompatible types in assignment (expression has type "Callable["#,
        Dynamic,
    ),
    ("Invalid value for a to= parameter", StubGap),
    (
        r#"Incompatible types in assignment (expression has type "FilteredChildAdmin", variable has type "ChildAdmin")"#,
        Dynamic,
    ),
    (
        r#"Incompatible types in assignment (expression has type "RelatedFieldWidgetWrapper", variable has type "AdminRadioSelect")"#,
        Dynamic,
    ),
    (
        r#"has incompatible type "MockRequest"; expected "WSGIRequest""#,
        Dynamic,
    ),
    (r#""NullTranslations" has no attribute "_catalog""#, Dynamic),
    (r#"Definition of "as_sql" in base class"#, StubGap),
    (r#"expression has type "property""#, Dynamic),
    (r#""object" has no attribute "__iter__""#, StubGap),
    (r#"Too few arguments for "dates" of "QuerySet""#, StubGap),
];

/// Built-in rules in registration order: literals first, then patterns.
pub fn builtin_rule_specs() -> Vec<RuleSpec> {
    let mut specs: Vec<RuleSpec> = LITERALS
        .iter()
        .map(|(text, lifetime)| RuleSpec::literal(*text, *lifetime))
        .collect();

    specs.extend([
        RuleSpec::pattern(r#""Callable\[\[(Any(, )?)+\], Any\]" has no attribute"#, Dynamic)
            .with_note("attributes attached to plain functions"),
        RuleSpec::pattern(r#""HttpResponseBase" has no attribute "[A-Za-z_]+""#, StubGap),
        RuleSpec::pattern(
            r#"Incompatible types in assignment \(expression has type "Tuple\[\]", variable has type "Tuple\[[A-Za-z, ]+\]""#,
            Dynamic,
        ),
        RuleSpec::pattern(r#""validate" of "[A-Za-z]+" does not return a value"#, StubGap),
        RuleSpec::pattern(r#"Module has no attribute "[A-Za-z_]+""#, Dynamic),
        RuleSpec::pattern(r#""[A-Za-z\[\]]+" has no attribute "getvalue""#, StubGap),
        RuleSpec::pattern(
            r#"Incompatible types in assignment \(expression has type "(QuerySet|List){1}\[[A-Za-z, ]+\]", variable has type "(QuerySet|List){1}\[[A-Za-z, ]+\]"\)"#,
            StubGap,
        )
        .with_note("drop once the checker accepts redefinition with a different element type"),
        RuleSpec::pattern(
            r#""(MockRequest|DummyRequest|DummyUser)" has no attribute "[a-zA-Z_]+""#,
            Dynamic,
        )
        .with_note("test doubles with ad-hoc attributes"),
    ]);

    specs
}
