// Shared prompt fragments. Each service that calls the LLM defines its own
// prompts.rs alongside it and composes these where needed.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment for free-form Markdown output.
pub const MARKDOWN_ONLY_SYSTEM: &str = "Output the document directly as Markdown. \
    Do NOT wrap it in ```markdown code fences. \
    Do NOT add commentary before or after the document.";
