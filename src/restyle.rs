//! Pointer and reference sigil placement
//!
//! `process_line` turns `Type *name` into `Type* name` with a single forward
//! scan. Every space followed by a run of `*`/`&` runs through an ordered
//! chain of guards; the first guard that fires leaves the text untouched.
//! Only when no guard fires is the run pulled left onto the preceding token.

use crate::comment_words::comment_words;

/// Keywords after which a sigil is a unary operator (`return *a`, `sizeof *n`).
const UNARY_KEYWORDS: [&str; 3] = ["return", "sizeof", "else"];

/// Words that may sit between two `*` without making it prose emphasis.
const EMPHASIS_EXEMPT: [&str; 2] = ["operator", "const"];

fn is_sigil(c: char) -> bool {
    c == '*' || c == '&'
}

/// A run of sigils found right after a space, as `chars[start..end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SigilRun {
    start: usize,
    end: usize,
}

impl SigilRun {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Restyle one line of C/C++ source.
///
/// Never fails: anything that does not look like a type marker comes back
/// unchanged. Only spaces move; every other character keeps its order.
///
/// ```
/// use ptrstyle::restyle::process_line;
///
/// assert_eq!(process_line("char **argv"), "char** argv");
/// assert_eq!(process_line("a *= b"), "a *= b");
/// ```
pub fn process_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut pending_spaces = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != ' ' {
            push_spaces(&mut out, pending_spaces);
            pending_spaces = 0;
            out.push(c);
            i += 1;
            continue;
        }

        pending_spaces += 1;

        let Some(run) = find_type_marker(&chars, i, out.trim()) else {
            i += 1;
            continue;
        };

        out.extend(&chars[run.start..run.end]);

        if wants_space_after(&chars, run.end) {
            let num_sigils = run.len();
            assert!(num_sigils > 0, "matched an empty sigil run at column {i} of {line:?}");

            // Keep column alignment of tabular declarations:
            //     int     foo;
            //     char    **bar;   ->   char**  bar;
            let spaces = if pending_spaces > 1 {
                pending_spaces.saturating_sub(num_sigils).max(1)
            } else {
                1
            };
            push_spaces(&mut out, spaces);
        }

        i = run.end;
        pending_spaces = 0;
    }

    push_spaces(&mut out, pending_spaces);
    out
}

/// Restyle a whole buffer line by line, keeping every line terminator.
pub fn restyle_text(text: &str) -> String {
    text.split_inclusive('\n').map(process_line).collect()
}

fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(' ', count));
}

/// Run the guard chain for the space at `space`.
///
/// `trailing` is the already-emitted output with surrounding whitespace
/// trimmed. Returns the sigil run to move, or `None` when any guard fires.
fn find_type_marker(chars: &[char], space: usize, trailing: &str) -> Option<SigilRun> {
    let at = |idx: usize| chars.get(idx).copied();

    // `*x = y;` at line start, or after punctuation as in `int *a, *b`.
    // `Foo<Bar> *x` and `Foo<Bar<T> > *x` qualify, `Foo > *bar` does not.
    let last = trailing.chars().next_back()?;
    let follows_token = last.is_alphanumeric()
        || last == '_'
        || (last == '>' && (trailing.ends_with("> >") || !trailing.ends_with(" >")));
    if !follows_token {
        return None;
    }

    if UNARY_KEYWORDS.iter().any(|kw| trailing.ends_with(kw)) {
        return None;
    }

    let start = space + 1;
    let mut end = start;
    while at(end).is_some_and(is_sigil) {
        end += 1;
    }
    if end == start {
        return None;
    }
    let run = SigilRun { start, end };
    let sigils: String = chars[start..end].iter().collect();
    let next = at(end);

    // `*/`, `a * b`, printf's `*%s`, and `"...*"`.
    if matches!(next, Some('/' | ' ' | '%' | '"')) {
        return None;
    }

    // Comment banners such as `***** BEGIN LICENSE BLOCK *****`.
    if sigils.len() > 4 && sigils.starts_with("****") {
        return None;
    }

    // Prose emphasis: `Foo *or* bar`, `I have *no idea*`.
    if sigils == "*" {
        let mut j = end;
        while at(j).is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '\'') {
            j += 1;
        }
        let word: String = chars[end..j].iter().collect();
        if at(j) == Some('*') && !EMPHASIS_EXEMPT.contains(&word.as_str()) {
            return None;
        }
    }

    // `x > Y &&` continued on the next line.
    if sigils == "&&" && chars[end..].iter().all(|c| c.is_whitespace()) {
        return None;
    }

    // `a *= b`, `a &= b`.
    if (sigils == "*" || sigils == "&") && next == Some('=') {
        return None;
    }

    // "store in *foo"
    if let Some((_, last_word)) = trailing.rsplit_once(' ') {
        if comment_words().contains(last_word) {
            return None;
        }
    }

    Some(run)
}

/// Spacing goes after the run only before an identifier or a
/// function-pointer declarator, so `Foo *` -> `Foo*`, `A<B *>` -> `A<B*>`,
/// `f(Foo *, Bar &)` -> `f(Foo*, Bar&)` but `A *(*F)()` -> `A* (*F)()`.
fn wants_space_after(chars: &[char], run_end: usize) -> bool {
    match chars.get(run_end) {
        Some(&c) if c.is_alphabetic() || c == '_' => true,
        Some('(') => chars.get(run_end + 1) == Some(&'*'),
        _ => false,
    }
}
