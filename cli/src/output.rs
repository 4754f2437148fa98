use llm::Usage;

/// Wrap `text` in a collapsible HTML block titled `summary`.
pub fn render_details(text: &str, summary: &str) -> String {
    format!("<details><summary>{summary}</summary><pre>{text}</pre></details>")
}

pub fn render_usage(usage: &Usage) -> serde_json::Result<String> {
    serde_json::to_string(usage)
}
