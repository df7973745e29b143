// Session-scoped résumé analysis: upload → extract → diagnose → report,
// then rewrite → download. All LLM calls go through advisor.

pub mod handlers;
pub mod pipeline;
