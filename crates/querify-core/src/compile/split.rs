//! Byte-bounded repacking of a generated script.

use crate::generate::SET_DEFINE_OFF;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

///
/// SplitOutput
///
/// chunks     : self-contained scripts, each `SET DEFINE OFF;` + body +
///              verification SELECTs
/// oversized  : statements that alone exceed the budget (each kept whole
///              in its own chunk)
/// statements : body statements packed across all chunks
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SplitOutput {
    pub chunks: Vec<String>,
    pub oversized: usize,
    pub statements: usize,
}

/// Split on `;` outside quoted literals and identifiers. Statements come
/// back trimmed, without their terminator; blank ones are dropped.
#[must_use]
pub fn split_statements(text: &str) -> Vec<&str> {
    #[derive(Clone, Copy, Eq, PartialEq)]
    enum State {
        Code,
        Literal,
        Identifier,
    }

    let mut statements = Vec::new();
    let mut state = State::Code;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        state = match (state, c) {
            (State::Code, '\'') => State::Literal,
            (State::Literal, '\'') => State::Code,
            (State::Code, '"') => State::Identifier,
            (State::Identifier, '"') => State::Code,
            (State::Code, ';') => {
                statements.push(&text[start..i]);
                start = i + c.len_utf8();
                State::Code
            }
            (s, _) => s,
        };
    }
    statements.push(&text[start..]);

    statements
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Repack `text` into chunks of at most `budget` bytes.
#[must_use]
pub fn split(text: &str, budget: usize) -> SplitOutput {
    let mut body = Vec::new();
    let mut selects = Vec::new();

    for statement in split_statements(text) {
        if is_set_define_off(statement) {
            continue;
        }

        if is_select(statement) {
            selects.push(statement);
        } else {
            body.push(statement);
        }
    }

    let suffix: String = selects.iter().map(|s| format!("\n{s};")).collect();
    let overhead = chunk_len(&[], &suffix);

    let mut output = SplitOutput {
        statements: body.len(),
        ..SplitOutput::default()
    };
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = overhead;

    for statement in body {
        // statement + ";" + separating newline
        let added = statement.len() + 2;

        if !current.is_empty() && current_len + added > budget {
            output.chunks.push(render(&current, &suffix));
            current.clear();
            current_len = overhead;
        }

        if current.is_empty() && overhead + added > budget {
            warn!(
                bytes = statement.len(),
                budget, "statement exceeds chunk budget, emitted whole"
            );
            output.oversized += 1;
            output.chunks.push(render(&[statement], &suffix));
            continue;
        }

        current.push(statement);
        current_len += added;
    }

    if !current.is_empty() {
        output.chunks.push(render(&current, &suffix));
    }

    debug!(
        chunks = output.chunks.len(),
        oversized = output.oversized,
        statements = output.statements,
        budget,
        "split script"
    );

    output
}

fn render(body: &[&str], suffix: &str) -> String {
    let mut chunk = String::with_capacity(chunk_len(body, suffix));
    chunk.push_str(SET_DEFINE_OFF);
    chunk.push('\n');

    for statement in body {
        chunk.push('\n');
        chunk.push_str(statement);
        chunk.push(';');
    }

    if !suffix.is_empty() {
        chunk.push('\n');
        chunk.push_str(suffix);
    }
    chunk.push('\n');

    chunk
}

// Exact byte length of `render(body, suffix)`.
fn chunk_len(body: &[&str], suffix: &str) -> usize {
    let body_len: usize = body.iter().map(|s| s.len() + 2).sum();
    let suffix_len = if suffix.is_empty() { 0 } else { suffix.len() + 1 };

    SET_DEFINE_OFF.len() + 1 + body_len + suffix_len + 1
}

fn is_set_define_off(statement: &str) -> bool {
    statement
        .split_whitespace()
        .map(str::to_ascii_uppercase)
        .eq(["SET", "DEFINE", "OFF"])
}

fn is_select(statement: &str) -> bool {
    statement
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("SELECT"))
}
