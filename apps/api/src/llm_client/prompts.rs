// Shared prompt fragments.
// Each feature module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting instructions.

/// Instruction that enforces bare JSON output. The reviewer does not strip
/// code fences, so a fenced reply is a parse failure.
pub const RAW_JSON_INSTRUCTION: &str = "You must return ONLY raw JSON - \
    no markdown, no code blocks, no explanations.";

/// Instruction for yes/no classification calls.
pub const BOOLEAN_ONLY_INSTRUCTION: &str = "Reply only with \"true\" or \"false\"";
