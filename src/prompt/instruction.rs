use super::non_empty_or;
use crate::models::InstructionForm;

/// Builds the wizard's user prompt by splicing the form into the fixed
/// instruction-architect template. Pure and total; the template is data
/// loaded once at startup and passed in.
pub fn build(form: &InstructionForm, template: &str) -> String {
    template
        .replace("{{PRIMARY_OBJECTIVE}}", form.primary_objective.trim())
        .replace(
            "{{TARGET_AUDIENCE}}",
            non_empty_or(&form.target_audience, "Not specified - infer from the objective"),
        )
        .replace(
            "{{OUTPUT_FORMAT}}",
            non_empty_or(&form.output_format, "Not specified - choose the most suitable format"),
        )
        .replace("{{MUST_DO}}", &numbered_or_none(&form.must_do))
        .replace("{{MUST_NOT}}", &numbered_or_none(&form.must_not))
}

/// Non-empty entries as 1-indexed lines, renumbered contiguously. Order is
/// preserved; blank entries anywhere in the list simply vanish.
fn numbered_or_none(entries: &[String]) -> String {
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, entry))
        .collect();

    if lines.is_empty() {
        "(none specified)".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt;

    fn filled_form() -> InstructionForm {
        InstructionForm {
            primary_objective: "Review pull requests for security issues".to_string(),
            target_audience: "Senior backend engineers".to_string(),
            output_format: "Markdown report".to_string(),
            must_do: [
                "Cite the affected line".to_string(),
                String::new(),
                "Rank findings by severity".to_string(),
            ],
            must_not: [
                String::new(),
                "Suggest rewrites outside the diff".to_string(),
                String::new(),
            ],
        }
    }

    #[test]
    fn test_fields_are_spliced_into_template() {
        let template = prompt::template(prompt::INSTRUCTION_TEMPLATE).unwrap();
        let built = build(&filled_form(), &template);
        assert!(built.contains("Review pull requests for security issues"));
        assert!(built.contains("Senior backend engineers"));
        assert!(built.contains("Markdown report"));
        assert!(!built.contains("{{"));
    }

    #[test]
    fn test_mixed_entries_renumber_contiguously() {
        let template = prompt::template(prompt::INSTRUCTION_TEMPLATE).unwrap();
        let built = build(&filled_form(), &template);
        assert!(built.contains("1. Cite the affected line"));
        assert!(built.contains("2. Rank findings by severity"));
        assert!(!built.contains("3. "));
        assert!(built.contains("1. Suggest rewrites outside the diff"));
    }

    #[test]
    fn test_all_blank_lists_render_placeholder() {
        let form = InstructionForm {
            primary_objective: "Summarize meeting notes".to_string(),
            ..InstructionForm::default()
        };
        let built = build(&form, "{{MUST_DO}}|{{MUST_NOT}}");
        assert_eq!(built, "(none specified)|(none specified)");
    }

    #[test]
    fn test_optional_fields_fall_back() {
        let form = InstructionForm {
            primary_objective: "Summarize meeting notes".to_string(),
            ..InstructionForm::default()
        };
        let built = build(&form, "{{TARGET_AUDIENCE}}|{{OUTPUT_FORMAT}}");
        assert_eq!(
            built,
            "Not specified - infer from the objective|Not specified - choose the most suitable format"
        );
    }

    #[test]
    fn test_entries_keep_their_order() {
        let entries = [
            "  second thing  ".to_string(),
            "first thing".to_string(),
            String::new(),
        ];
        assert_eq!(numbered_or_none(&entries), "1. second thing\n2. first thing");
    }
}
