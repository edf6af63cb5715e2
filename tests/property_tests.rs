//! Property-based tests for ptrstyle
//!
//! This module uses proptest to verify the invariants of the line restyler:
//! only spaces move, the rewrite is a fixed point, and lines without a
//! space-before-sigil come back untouched.

use std::fs;
use tempfile::TempDir;

use ptrstyle::{FileProcessor, process_line, restyle_text};

// Import proptest macro
use proptest::prelude::*;

/// C-ish characters, heavy on the ones the guards look at
const CODE_CHARS: &str = "[a-zA-Z0-9_ *&<>(),;=/%\"'\\-]{0,48}";

fn without_spaces(s: &str) -> String {
    s.chars().filter(|c| *c != ' ').collect()
}

// ============================================================================
// Property 1: Only spaces move
// ============================================================================

proptest! {
    /// Removing every space from input and output gives the same text
    #[test]
    fn prop_non_space_characters_preserved(line in CODE_CHARS) {
        let output = process_line(&line);
        prop_assert_eq!(without_spaces(&output), without_spaces(&line));
    }

    /// Moving a run never widens the line
    #[test]
    fn prop_output_never_longer(line in CODE_CHARS) {
        let output = process_line(&line);
        prop_assert!(output.chars().count() <= line.chars().count());
    }

    /// Declarations built from identifiers always get the marker attached
    #[test]
    fn prop_simple_declaration_moves(
        ty in "[A-Z][A-Z0-9_]{0,10}",
        sigils in "[*&]{1,4}",
        spaces in 1usize..6,
        name in "[a-z_][a-z0-9_]{0,10}",
    ) {
        let line = format!("{}{}{}{};", ty, " ".repeat(spaces), sigils, name);
        let expected_spaces = if spaces > 1 {
            spaces.saturating_sub(sigils.len()).max(1)
        } else {
            1
        };
        let expected = format!("{}{}{}{};", ty, sigils, " ".repeat(expected_spaces), name);
        prop_assert_eq!(process_line(&line), expected);
    }
}

// ============================================================================
// Property 2: Idempotence
// ============================================================================

proptest! {
    /// Restyling restyled text changes nothing
    #[test]
    fn prop_process_line_is_idempotent(line in CODE_CHARS) {
        let once = process_line(&line);
        let twice = process_line(&once);
        prop_assert_eq!(once, twice);
    }

    /// Same holds for whole multi-line buffers
    #[test]
    fn prop_restyle_text_is_idempotent(
        lines in prop::collection::vec(CODE_CHARS, 0..20)
    ) {
        let text = lines.join("\n");
        let once = restyle_text(&text);
        prop_assert_eq!(restyle_text(&once), once);
    }
}

// ============================================================================
// Property 3: Conservativeness
// ============================================================================

proptest! {
    /// Lines without sigils are returned unchanged
    #[test]
    fn prop_lines_without_sigils_unchanged(line in "[a-zA-Z0-9_ <>(),;=/%\"'\\-]{0,60}") {
        prop_assert_eq!(process_line(&line), line);
    }

    /// Lines without any space are returned unchanged
    #[test]
    fn prop_lines_without_spaces_unchanged(line in "[a-zA-Z0-9_*&<>(),;=/%\"'\\-]{0,60}") {
        prop_assert_eq!(process_line(&line), line);
    }

    /// Unary contexts are never rewritten
    #[test]
    fn prop_unary_keywords_untouched(
        keyword in "(return|sizeof|else)",
        sigils in "[*&]{1,3}",
        name in "[a-z_][a-z0-9_]{0,10}",
    ) {
        let line = format!("    {} {}{};", keyword, sigils, name);
        prop_assert_eq!(process_line(&line), line);
    }

    /// Compound assignment is never split
    #[test]
    fn prop_compound_assignment_untouched(
        lhs in "[a-z_][a-z0-9_]{0,10}",
        op in "[*&]",
        rhs in "[a-z0-9_]{1,10}",
    ) {
        let line = format!("{} {}= {};", lhs, op, rhs);
        prop_assert_eq!(process_line(&line), line);
    }
}

// ============================================================================
// Property 4: Whole-text and file round trips
// ============================================================================

proptest! {
    /// Line count and terminators survive restyling
    #[test]
    fn prop_restyle_text_preserves_line_structure(
        lines in prop::collection::vec(CODE_CHARS, 0..30),
        crlf in any::<bool>(),
        trailing_newline in any::<bool>(),
    ) {
        let sep = if crlf { "\r\n" } else { "\n" };
        let mut text = lines.join(sep);
        if trailing_newline {
            text.push_str(sep);
        }

        let output = restyle_text(&text);
        prop_assert_eq!(output.matches('\n').count(), text.matches('\n').count());
        prop_assert_eq!(output.matches('\r').count(), text.matches('\r').count());
        prop_assert_eq!(output.ends_with('\n'), text.ends_with('\n'));
    }

    /// Dry run never modifies the file on disk
    #[test]
    fn prop_dry_run_never_writes(
        lines in prop::collection::vec(CODE_CHARS, 1..20)
    ) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.cpp");
        let text = lines.join("\n");
        fs::write(&file_path, &text).unwrap();

        let report = FileProcessor::new(true).restyle_file(&file_path).unwrap();
        prop_assert!(!report.written);
        prop_assert_eq!(fs::read_to_string(&file_path).unwrap(), text);
    }

    /// Writing the file produces exactly the in-memory restyle
    #[test]
    fn prop_written_file_matches_restyle_text(
        lines in prop::collection::vec(CODE_CHARS, 1..20)
    ) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.h");
        let text = lines.join("\n") + "\n";
        fs::write(&file_path, &text).unwrap();

        let report = FileProcessor::new(false).restyle_file(&file_path).unwrap();
        prop_assert_eq!(report.written, report.is_changed());
        prop_assert_eq!(fs::read_to_string(&file_path).unwrap(), restyle_text(&text));
    }
}

// ============================================================================
// Known rewrites
// ============================================================================

#[test]
fn test_spidermonkey_style_declarations() {
    let text = "\
static bool
js_Foo(JSContext *cx, unsigned argc, Value *vp)
{
    JSObject *obj = &vp[0].toObject();
    RootedObject &holder = *obj;
    return *vp == NullValue() && argc * 2 > 1;
}
";
    let expected = "\
static bool
js_Foo(JSContext* cx, unsigned argc, Value* vp)
{
    JSObject* obj = &vp[0].toObject();
    RootedObject& holder = *obj;
    return *vp == NullValue() && argc * 2 > 1;
}
";
    assert_eq!(restyle_text(text), expected);
}

#[test]
fn test_license_block_untouched() {
    let text = "\
/* -*- Mode: C++; tab-width: 8; indent-tabs-mode: nil; c-basic-offset: 4 -*-
 * ***** BEGIN LICENSE BLOCK *****
 * This Source Code Form is subject to the terms of the Mozilla Public
 * ***** END LICENSE BLOCK ***** */
";
    assert_eq!(restyle_text(text), text);
}
