//! Investigation tests against the live Gemini API.
//!
//! Excluded from regular runs because they need network access and an API key
//! in `API_KEY`.
//!
//! Run with: `cargo test -p reasoner --test investigation_gemini -- --ignored`

use reasoner::agents::reasoning::{AgentSettings, ReasoningAgent};
use reasoner::agents::roster::standard_roster;
use reasoner::core::parser::parse_step;
use reasoner::io::config::GeminiConfig;
use reasoner::io::credentials::api_key_from_env;
use reasoner::io::gemini::GeminiGenerator;
use reasoner::io::generator::Generator;

fn generator() -> GeminiGenerator {
    let key = api_key_from_env("API_KEY").expect("API_KEY must be set");
    GeminiGenerator::new(key, &GeminiConfig::default()).expect("client")
}

#[test]
#[ignore]
fn gemini_replies_with_a_parseable_step() {
    let prompt = "System: Reply with exactly one JSON object with keys title, content and \
                  next_action (\"continue\" or \"final_answer\"), wrapped in a ```json fence.\n\n\
                  User: What is 17 * 23?\n\n";
    let raw = generator().generate(prompt).expect("generate");
    let step = parse_step(&raw).expect("parse step");
    assert!(!step.title.is_empty());
}

#[test]
#[ignore]
fn initial_solver_reaches_a_final_answer() {
    let spec = standard_roster().into_iter().next().expect("roster");
    let agent = ReasoningAgent::new(spec, AgentSettings { max_steps: Some(12) });
    let run = agent
        .run(&generator(), "What is 17 * 23?", None, &mut |_| {})
        .expect("run");
    assert!(run.stop.is_done(), "stopped with {}", run.stop);
    assert!(run.compiled.contains("391"));
}
