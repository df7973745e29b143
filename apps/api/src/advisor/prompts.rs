// All LLM prompt constants for the advisor.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Persona and schema for résumé diagnosis. `JSON_ONLY_SYSTEM` is appended
/// at call time.
pub const DIAGNOSIS_SYSTEM: &str = r#"You are a senior technical interviewer reviewing a candidate's résumé.
Analyse the résumé and return a JSON object with this EXACT schema (no extra fields):
{
  "score": 0,
  "score_rationale": "one sentence explaining why the résumé earned this score",
  "summary": "overall assessment",
  "pros": ["strength 1", "strength 2"],
  "cons": ["weakness 1", "weakness 2"],
  "suggestions": [
    {"advice": "what to change", "evidence": "the exact résumé text that shows the problem"}
  ],
  "matched_jobs": ["suitable role 1", "suitable role 2"]
}

Rules:
- "score" is an integer from 0 to 100.
- "score_rationale" is REQUIRED and must be a single sentence.
- Every suggestion MUST quote or point to the original résumé text in "evidence".
- Write the values in the same language as the résumé."#;

/// User turn for diagnosis. Replace `{resume_text}` before sending.
pub const DIAGNOSIS_USER_TEMPLATE: &str = "Here is my résumé:\n{resume_text}";

/// Persona for the Markdown rewrite. `MARKDOWN_ONLY_SYSTEM` is appended at
/// call time.
pub const REWRITE_SYSTEM: &str = "You are a meticulous résumé optimisation expert.";

/// Rewrite instruction. Replace `{resume_text}` and `{suggestions}` before sending.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the résumé below into an improved version, applying the review suggestions.

[Original résumé]
{resume_text}

[Review suggestions]
{suggestions}

Requirements:
1. Use standard Markdown.
2. Address each suggestion with a concrete change.
3. Make the wording more professional without inventing facts."#;

/// Replaces each `{name}` in `template` with its value in a single pass, so
/// placeholder-looking text inside a value is copied verbatim. Unknown
/// braces are left as they are.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = vars.iter().find(|(name, _)| {
            tail.starts_with(name) && tail[name.len()..].starts_with('}')
        });
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
