//! Llama-2 chat prompt rendering.
//!
//! A dialogue is flattened into the markup Llama-2 chat models were tuned on:
//!
//! ```text
//! <s>[INST] <<SYS>>
//! {system}
//! <</SYS>>
//!
//! {user_1} [/INST] {assistant_1} </s><s>[INST] {user_2} [/INST]
//! ```
//!
//! The system prompt is folded into the first user turn, turns are then
//! paired as (prompt, answer), and a trailing unanswered turn becomes an open
//! `[INST]` block for the model to complete.

use std::borrow::Cow;
use std::iter;

use tracing::debug;

use crate::conversation::{Role, Turn};
use crate::error::DialogError;
use crate::markup::{BOS, B_INST, B_SYS, DEFAULT_SYSTEM_PROMPT, EOS, E_INST, E_SYS};

/// Renders a dialogue into a flat completion prompt.
pub trait DialogTemplate: Send + Sync {
    fn render(&self, turns: &[Turn]) -> Result<String, DialogError>;
}

/// The Llama-2 chat template.
#[derive(Clone, Debug)]
pub struct Llama2Template {
    default_system: Cow<'static, str>,
}

impl Default for Llama2Template {
    fn default() -> Self {
        Self {
            default_system: Cow::Borrowed(DEFAULT_SYSTEM_PROMPT),
        }
    }
}

impl Llama2Template {
    /// Use `text` instead of [`DEFAULT_SYSTEM_PROMPT`] for dialogues that do
    /// not open with a system turn.
    pub fn with_default_system(text: impl Into<String>) -> Self {
        Self {
            default_system: Cow::Owned(text.into()),
        }
    }

    pub fn default_system(&self) -> &str {
        &self.default_system
    }
}

impl DialogTemplate for Llama2Template {
    fn render(&self, turns: &[Turn]) -> Result<String, DialogError> {
        let (system, rest) = match turns.split_first() {
            None => return Err(DialogError::InvalidInput("dialogue is empty".into())),
            Some((first, rest)) if first.role == Role::System => (first.content.as_str(), rest),
            Some(_) => (self.default_system(), turns),
        };
        let Some((follower, rest)) = rest.split_first() else {
            return Err(DialogError::InvalidInput(
                "system turn has no following turn to merge with".into(),
            ));
        };

        // System content goes in untrimmed; only paired contents are trimmed.
        let merged = format!("{B_SYS}{system}{E_SYS}{}", follower.content);
        let contents: Vec<&str> = iter::once(merged.as_str())
            .chain(rest.iter().map(|t| t.content.as_str()))
            .collect();

        let mut out = String::new();
        let mut cursor = 0;
        while cursor + 1 < contents.len() {
            push_answered(&mut out, contents[cursor], contents[cursor + 1]);
            cursor += 2;
        }
        let pending = cursor < contents.len();
        if pending {
            push_pending(&mut out, contents[cursor]);
        }

        debug!(
            turns = turns.len(),
            blocks = contents.len().div_ceil(2),
            pending,
            "rendered llama2 prompt"
        );
        Ok(out)
    }
}

fn push_answered(out: &mut String, prompt: &str, answer: &str) {
    out.push_str(&format!(
        "{BOS}{B_INST} {} {E_INST} {} {EOS}",
        strip(prompt),
        strip(answer)
    ));
}

fn push_pending(out: &mut String, prompt: &str) {
    out.push_str(&format!("{BOS}{B_INST} {} {E_INST}", strip(prompt)));
}

/// Trim Unicode whitespace and the information separators U+001C..=U+001F.
fn strip(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Render `turns` with the stock Llama-2 template.
pub fn format_dialog(turns: &[Turn]) -> Result<String, DialogError> {
    Llama2Template::default().render(turns)
}
