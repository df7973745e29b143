//! Fixed demo content served when `DEMO_MODE` is on and the AI backend is
//! unavailable. The diagnosis is raw JSON on purpose: it goes through
//! `presentation::normalize` like any other producer, including the legacy
//! bare-string suggestion shape.

use serde_json::{json, Value};

use crate::models::diagnosis::GeneratedResume;

pub fn demo_diagnosis() -> Value {
    json!({
        "score": 82,
        "score_rationale": "Base 70; clear structure +8; relevant stack +4; missing quantified results (demo data).",
        "summary": "This is a demo result: the pipeline works end to end, but the AI diagnosis is not connected.",
        "pros": ["Clear section structure", "Relevant technical stack"],
        "cons": ["Experience is described as duties rather than results"],
        "suggestions": [
            {
                "advice": "Add metrics to every role (latency gained, cost saved)",
                "evidence": "Descriptions list responsibilities without outcome data"
            },
            {
                "advice": "Link a portfolio or GitHub profile with project screenshots",
                "evidence": "No external proof of work is referenced"
            },
            "Use the STAR method (situation, task, action, result) for project entries"
        ],
        "matched_jobs": ["Backend Developer", "Full-stack Developer", "Data Engineer"]
    })
}

pub fn demo_resume() -> GeneratedResume {
    GeneratedResume::new(
        "# Optimised Résumé (Demo)\n\n\
         ## Contact\n\
         - Name: Your Name\n\
         - Email: you@example.com\n\
         - Phone: +1 555 0100\n\n\
         ## Skills\n\
         - Rust / Axum / PostgreSQL\n\
         - TypeScript / React\n\n\
         ## Projects (example)\n\
         - Describe each project with the STAR method: situation, task, action, result.\n",
    )
}
