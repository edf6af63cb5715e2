//! Built-in regression corpus
//!
//! Every invocation runs these literal cases before touching any file. A
//! single mismatch means the classification rules are broken, so the whole
//! run stops.

use anyhow::Result;
use tracing::{debug, info};

use crate::restyle::process_line;

/// `(input, expected)` pairs checked on every run.
pub const CASES: &[(&str, &str)] = &[
    // Simple cases.
    ("A *a", "A* a"),
    ("char ****p", "char**** p"),
    ("A &b", "A& b"),
    ("Foo *&x = y", "Foo*& x = y"),
    ("A<B *>", "A<B*>"),
    ("A *", "A*"),
    ("A ***\n", "A***\n"),
    ("A &", "A&"),
    ("sizeof(A *)", "sizeof(A*)"),
    // Multiplication and bitwise AND.
    ("Xa * y", "Xa * y"),
    ("Xa & z", "Xa & z"),
    // Whitespace is preserved as far as possible.
    ("AA     *foo", "AA*    foo"),
    ("AA    ***foo", "AA*** foo"),
    ("// a *or* b", "// a *or* b"),
    ("return *foo", "return *foo"),
    ("sizeof *n", "sizeof *n"),
    ("  *x = y;", "  *x = y;"),
    ("x > 0 &&", "x > 0 &&"),
    ("x > 0 && yy", "x > 0 && yy"),
    ("a &= b", "a &= b"),
    ("a *= b", "a *= b"),
    ("foo > bar &&", "foo > bar &&"),
    ("foo > bar &&\n", "foo > bar &&\n"),
    ("Foo<Bar *> *foo", "Foo<Bar*>* foo"),
    ("Foo<Bar *> &foo", "Foo<Bar*>& foo"),
    ("Foo<Bar ***> &foo", "Foo<Bar***>& foo"),
    ("Foo<Bar ***> *&foo", "Foo<Bar***>*& foo"),
    ("Foo > *bar", "Foo > *bar"),
    ("Foo<Bar<T> > *foo", "Foo<Bar<T> >* foo"),
    ("Foo<Bar<T> > &&foo", "Foo<Bar<T> >&& foo"),
    ("// store in *foo.", "// store in *foo."),
    ("A *(*F)(B *b)", "A* (*F)(B* b)"),
    ("operator T *()", "operator T*()"),
    ("operator Foo &()", "operator Foo&()"),
    ("A &operator*() {}", "A& operator*() {}"),
    ("A *operator*() {}", "A* operator*() {}"),
    ("* described by *reportp", "* described by *reportp"),
    ("// I have *no idea* whether", "// I have *no idea* whether"),
    ("else *p++ = '0';", "else *p++ = '0';"),
    ("Foo_ *bar;", "Foo_* bar;"),
    ("Foo_ &&bar;", "Foo_&& bar;"),
    (r#"printf("call      *%s")"#, r#"printf("call      *%s")"#),
    (r#"printf("call      &%s")"#, r#"printf("call      &%s")"#),
    (
        r#"// "/\* //# sourceURL=<url> *\/"#,
        r#"// "/\* //# sourceURL=<url> *\/"#,
    ),
    ("// which |static *(| can", "// which |static *(| can"),
    (
        "* ***** BEGIN LICENSE BLOCK *****",
        "* ***** BEGIN LICENSE BLOCK *****",
    ),
];

/// Run every case in [`CASES`].
///
/// Returns the number of cases checked, or an error naming the first case
/// whose output differs.
pub fn run_regression_suite() -> Result<usize> {
    info!("Running {} regression cases", CASES.len());

    for (input, expected) in CASES {
        let actual = process_line(input);
        debug!(input, actual = actual.as_str(), "regression case");
        if actual != *expected {
            anyhow::bail!(
                "Failed: |{}| -> |{}| (expected |{}|)",
                input,
                actual,
                expected
            );
        }
    }

    info!("Regression cases passed");
    Ok(CASES.len())
}
