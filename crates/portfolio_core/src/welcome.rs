//! Greeting text shown once the health probe settles.

const GREETING: &str = "Hi! I'm the virtual version of Jorge.";
const INVITATION: &str = "Ask me about my education, experience, how I work or my projects.";

/// Display form of a backend context section file name.
///
/// `01_work_experience.txt` becomes `work experience`: a leading number and its
/// underscore are dropped, everything from the first dot on is dropped, and
/// the remaining underscores become spaces.
pub fn display_section_name(raw: &str) -> String {
    let digits = raw.bytes().take_while(u8::is_ascii_digit).count();
    let name = match raw[digits..].strip_prefix('_') {
        Some(rest) if digits > 0 => rest,
        _ => raw,
    };
    let name = match name.find('.') {
        Some(idx) => &name[..idx],
        None => name,
    };
    name.replace('_', " ")
}

/// Welcome message listing the sections the backend answers from.
pub fn welcome_message(sections: &[String]) -> String {
    let nice = sections
        .iter()
        .map(|s| display_section_name(s))
        .collect::<Vec<_>>()
        .join(", ");
    if nice.is_empty() {
        return fallback_welcome();
    }
    format!("{GREETING} My context is limited to: {nice}. {INVITATION}")
}

/// Welcome message without section context.
pub fn fallback_welcome() -> String {
    format!("{GREETING} {INVITATION}")
}

/// Diagnostic shown when the health probe fails.
pub fn unreachable_backend(reason: &str) -> String {
    format!("Cannot reach the backend ({reason}). Check the backend URL or the deployment.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_names_are_normalized() {
        assert_eq!(display_section_name("01_education.md"), "education");
        assert_eq!(
            display_section_name("02_work_experience.txt"),
            "work experience"
        );
        assert_eq!(display_section_name("projects"), "projects");
        assert_eq!(display_section_name("2024.notes.txt"), "2024");
        assert_eq!(display_section_name("how_i_work.v2.md"), "how i work");
        // Only an underscore ends a numeric prefix.
        assert_eq!(display_section_name("03-skills.md"), "03-skills");
        assert_eq!(display_section_name("04 hobbies.md"), "04 hobbies");
    }

    #[test]
    fn welcome_lists_sections_in_order() {
        let sections = vec![
            "01_education.md".to_string(),
            "02_work_experience.txt".to_string(),
        ];
        let msg = welcome_message(&sections);
        assert!(msg.contains("education, work experience"), "{msg}");
    }

    #[test]
    fn no_sections_falls_back() {
        assert_eq!(welcome_message(&[]), fallback_welcome());
        assert!(!fallback_welcome().contains("limited to"));
    }
}
