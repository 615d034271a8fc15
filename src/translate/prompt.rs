use super::TargetLanguage;

/// Build the chat prompt for one file: the file content, followed by the
/// instruction to translate only natural-language text.
pub fn build_prompt(content: &str, language: &TargetLanguage) -> String {
    let language_name = language.name();
    let language_line = match language.code() {
        Some(code) => format!("{} (language code: {})", language_name, code),
        None => language_name.to_string(),
    };

    format!(
        "{content}\n\
         You are a professional translation AI with expertise in technical texts and code files.\n\
         Translate the above content into {language_line}, preserving its exact formatting \
         (line breaks, indentation, and spacing).\n\
         Important:\n\
         - Translate only user-facing strings, labels, messages, comments, and display text.\n\
         - Do not change code syntax, identifiers, keys, import statements, or file paths.\n\
         - Ensure the translated output remains a valid file of the same type.\n\
         - Do not include additional commentary or explanations.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_content_before_instruction() {
        let lang = TargetLanguage::parse("es").unwrap();
        let prompt = build_prompt("label = \"Save\"", &lang);

        assert!(prompt.starts_with("label = \"Save\"\n"));
        assert!(prompt.contains("into Spanish (language code: es)"));
        assert!(prompt.contains("Translate only user-facing strings"));
        assert!(prompt.contains("Do not change code syntax"));
    }

    #[test]
    fn test_prompt_for_unlisted_language() {
        let lang = TargetLanguage::parse("Brazilian Portuguese").unwrap();
        let prompt = build_prompt("x", &lang);
        assert!(prompt.contains("into Brazilian Portuguese, preserving"));
    }

    #[test]
    fn test_equivalent_designators_build_same_prompt() {
        let a = build_prompt("hello", &TargetLanguage::parse("it").unwrap());
        let b = build_prompt("hello", &TargetLanguage::parse("Italian").unwrap());
        assert_eq!(a, b);
    }
}
