pub mod instruction;
pub mod post;

use anyhow::{Context, Result};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "resources/"]
struct Asset;

/// System instruction for the post composer.
pub const POST_SYSTEM: &str = "prompts/linkedin_post.md";

/// Fixed classification-then-generation template for the instruction wizard.
pub const INSTRUCTION_TEMPLATE: &str = "prompts/instruction_architect.md";

pub fn template(name: &str) -> Result<String> {
    let file = Asset::get(name).context(format!(
        "Could not find embedded prompt template: {}",
        name
    ))?;
    Ok(std::str::from_utf8(file.data.as_ref())?.to_string())
}

/// Trimmed value, or the fallback when nothing is left after trimming.
pub(crate) fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_embedded() {
        let system = template(POST_SYSTEM).unwrap();
        assert!(system.contains("LinkedIn content strategist"));

        let architect = template(INSTRUCTION_TEMPLATE).unwrap();
        for marker in [
            "{{PRIMARY_OBJECTIVE}}",
            "{{TARGET_AUDIENCE}}",
            "{{OUTPUT_FORMAT}}",
            "{{MUST_DO}}",
            "{{MUST_NOT}}",
        ] {
            assert!(architect.contains(marker), "missing marker {}", marker);
        }
    }

    #[test]
    fn test_missing_template_is_an_error() {
        assert!(template("prompts/nope.md").is_err());
    }

    #[test]
    fn test_non_empty_or() {
        assert_eq!(non_empty_or("", "fallback"), "fallback");
        assert_eq!(non_empty_or("   ", "fallback"), "fallback");
        assert_eq!(non_empty_or(" value ", "fallback"), "value");
    }
}
