// Shared prompt constants.
// Each module that issues LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Prepended to every prompt that rewrites a candidate's data.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY information present in the provided data. \
    Do NOT infer, interpolate, or invent facts about the candidate. \
    If the data does not support a claim, omit it entirely.";
