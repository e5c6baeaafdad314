//! AI deal analysis
//!
//! Bundles the facts of a simulated trade into an analyst prompt and sends
//! it to the Gemini API. The simulator never depends on this succeeding;
//! every failure path degrades to a displayable string.

mod gemini;
mod prompt;

pub use gemini::{analyze_from_env, GeminiClient, DEFAULT_MODEL};
pub use prompt::{build_prompt, DealFacts};
