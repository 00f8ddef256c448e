//! Prompt construction for the remote text-generation backend.

/// Persona preamble prepended to every prompt.
pub const PERSONA_PREAMBLE: &str = "You are Pixel, a cheerful pixel-art guide who lives inside \
this developer's portfolio. You greet visitors as fellow adventurers, answer questions about \
the developer's experience, projects, skills and certifications, and keep every reply short, \
friendly and honest.";

/// Context label used when the UI does not report a section.
pub const DEFAULT_CONTEXT: &str = "general";

/// Resolve the context label, substituting [`DEFAULT_CONTEXT`] for blank input.
pub fn resolve_context(context: Option<&str>) -> &str {
    context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CONTEXT)
}

/// Build the single textual prompt sent to the backend.
pub fn build_prompt(message: &str, context: Option<&str>) -> String {
    format!(
        "{PERSONA_PREAMBLE}\n\nCurrent section: {}\nVisitor: {}\nPixel:",
        resolve_context(context),
        message.trim()
    )
}

/// Remove a leading echo of `prompt` from `generated` and trim the rest.
///
/// Text-generation models commonly return the input followed by the
/// continuation.
pub fn strip_prompt_echo<'a>(generated: &'a str, prompt: &str) -> &'a str {
    generated
        .strip_prefix(prompt)
        .unwrap_or(generated)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_context_and_message() {
        let prompt = build_prompt("  What do you build? ", Some("projects"));
        assert!(prompt.starts_with(PERSONA_PREAMBLE));
        assert!(prompt.contains("Current section: projects\n"));
        assert!(prompt.contains("Visitor: What do you build?\n"));
        assert!(prompt.ends_with("Pixel:"));
    }

    #[test]
    fn blank_context_uses_default() {
        assert_eq!(resolve_context(None), DEFAULT_CONTEXT);
        assert_eq!(resolve_context(Some("  ")), DEFAULT_CONTEXT);
        assert!(build_prompt("hi", None).contains("Current section: general\n"));
    }

    #[test]
    fn strips_echoed_prompt() {
        let prompt = build_prompt("hi", None);
        let generated = format!("{prompt} Hello, adventurer!  ");
        assert_eq!(strip_prompt_echo(&generated, &prompt), "Hello, adventurer!");
    }

    #[test]
    fn leaves_unechoed_text_trimmed() {
        assert_eq!(strip_prompt_echo("\n Hello! ", "prompt"), "Hello!");
    }
}
