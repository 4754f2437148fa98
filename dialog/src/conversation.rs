use serde::{Deserialize, Serialize};

use crate::error::DialogError;

/// Speaker roles for a dialogue turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a dialogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Parse a dialogue from a JSON array of `{"role", "content"}` objects.
pub fn dialog_from_json(json: &str) -> Result<Vec<Turn>, DialogError> {
    Ok(serde_json::from_str(json)?)
}

/// Bounded chat history with an optional system prompt.
///
/// The history never opens on an assistant turn, so [`Conversation::dialog`]
/// can be handed straight to a template. `max_len` is at least 1, so the
/// latest user turn is always kept. The history is still empty before the
/// first user turn, or after an assistant turn pushed into a
/// one-turn history; a template then rejects the lone system turn.
pub struct Conversation {
    system: Option<String>,
    turns: Vec<Turn>,
    max_len: usize,
}

impl Conversation {
    pub fn new(max_len: usize) -> Self {
        Self {
            system: None,
            turns: Vec::new(),
            max_len: max_len.max(1),
        }
    }

    pub fn with_system(mut self, text: impl Into<String>) -> Self {
        self.system = Some(text.into());
        self
    }

    /// Append a turn. A system turn replaces the system prompt.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        if role == Role::System {
            self.system = Some(content.into());
            return;
        }
        self.turns.push(Turn::new(role, content));
        if self.turns.len() > self.max_len {
            let excess = self.turns.len() - self.max_len;
            self.turns.drain(0..excess);
        }
        while self
            .turns
            .first()
            .is_some_and(|t| t.role == Role::Assistant)
        {
            self.turns.remove(0);
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content);
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content);
    }

    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    pub fn tail(&self) -> &[Turn] {
        &self.turns
    }

    /// Full dialogue: the system turn (if any) followed by the history.
    pub fn dialog(&self) -> Vec<Turn> {
        let mut out = Vec::with_capacity(self.turns.len() + 1);
        if let Some(system) = &self.system {
            out.push(Turn::system(system.clone()));
        }
        out.extend(self.turns.iter().cloned());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_truncates() {
        let mut c = Conversation::new(3);
        c.push_user("hi");
        c.push_assistant("yo");
        c.push_user("bye");
        c.push_assistant("later");
        assert_eq!(c.tail().len(), 2);
        assert_eq!(c.tail()[0].content, "bye");
        assert_eq!(c.tail()[0].role, Role::User);
    }

    #[test]
    fn zero_capacity_keeps_latest_user_turn() {
        let mut c = Conversation::new(0).with_system("SP");
        c.push_user("first");
        c.push_user("second");
        assert_eq!(c.dialog(), vec![Turn::system("SP"), Turn::user("second")]);
        assert!(crate::format_dialog(&c.dialog()).is_ok());
    }

    #[test]
    fn system_push_replaces_prompt() {
        let mut c = Conversation::new(4).with_system("first");
        c.push(Role::System, "second");
        c.push_user("hi");
        assert_eq!(c.system(), Some("second"));
        assert_eq!(c.tail().len(), 1);
        assert_eq!(c.dialog(), vec![Turn::system("second"), Turn::user("hi")]);
    }

    #[test]
    fn dialog_without_system() {
        let mut c = Conversation::new(4);
        c.push_user("hi");
        assert_eq!(c.dialog(), vec![Turn::user("hi")]);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&Turn::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"ok"}"#);
    }

    #[test]
    fn parses_dialog_json() {
        let turns =
            dialog_from_json(r#"[{"role":"system","content":"SP"},{"role":"user","content":"Hi"}]"#)
                .unwrap();
        assert_eq!(turns, vec![Turn::system("SP"), Turn::user("Hi")]);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = dialog_from_json(r#"[{"role":"tool","content":"x"}]"#).unwrap_err();
        assert!(matches!(err, DialogError::Json(_)));
    }
}
