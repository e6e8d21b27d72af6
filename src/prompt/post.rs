use super::non_empty_or;
use crate::models::PostForm;

/// Builds the user prompt for the post composer. Pure and total: every form
/// state maps to a prompt. Optional sections are omitted entirely when blank
/// rather than emitted with an empty label.
pub fn build(form: &PostForm) -> String {
    let mut prompt = format!(
        "Generate a LinkedIn post with the following requirements:\n\n\
         **Topic**: {}\n\n\
         **Target Audience**: {}\n\n\
         **Key Message**: {}",
        form.topic.trim(),
        non_empty_or(&form.target_audience, "General professional audience"),
        non_empty_or(&form.key_message, "Based on the topic above"),
    );

    let experience = form.personal_experience.trim();
    if !experience.is_empty() {
        prompt.push_str(&format!("\n\n**Personal Experience**: {}", experience));
    }

    let industry = form.industry_context.trim();
    if !industry.is_empty() {
        prompt.push_str(&format!("\n\n**Industry Context**: {}", industry));
    }

    prompt.push_str(&format!(
        "\n\n**Tone**: {}\n**Length**: {} ({} characters)\n**Engagement Style**: {}",
        form.tone.as_str(),
        form.length.as_str(),
        form.length.char_range(),
        form.style.as_str(),
    ));

    prompt.push_str(
        "\n\nPlease generate a compelling LinkedIn post following all the guidelines \
         in your system instructions.",
    );

    prompt
}
