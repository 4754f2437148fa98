//! Literal delimiters of the Llama-2 chat markup.

/// Begin-of-sequence token opening every block.
pub const BOS: &str = "<s>";
/// End-of-sequence token closing an answered block.
pub const EOS: &str = "</s>";
pub const B_INST: &str = "[INST]";
pub const E_INST: &str = "[/INST]";
pub const B_SYS: &str = "<<SYS>>\n";
pub const E_SYS: &str = "\n<</SYS>>\n\n";

/// System prompt used when a dialogue does not open with a system turn.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("default_prompt.txt");
