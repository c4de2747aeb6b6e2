use super::classifier::Category;

/// Opening message seeded into a fresh conversation.
pub const GREETING: &str = "Hello! I'm your AI health assistant. I can help you with health questions, symptom analysis, and general medical guidance. How can I assist you today?";

const PAIN_PROMPT: &str = "I understand you're experiencing pain. Can you describe the location and intensity of your headache on a scale of 1-10? Also, when did it start and have you taken any medication for it?";

const FEVER_PROMPT: &str = "A fever can indicate various conditions. Have you measured your temperature? If it's above 100.4°F (38°C), you should monitor it closely. Are you experiencing any other symptoms like chills, body aches, or fatigue?";

const RESPIRATORY_PROMPT: &str = "Coughs can be caused by various factors. Is it a dry cough or are you producing mucus? How long have you had this cough? Are you experiencing any shortness of breath or chest pain?";

const GASTROINTESTINAL_PROMPT: &str = "Stomach issues can have various causes. Are you experiencing nausea, vomiting, or diarrhea? When did these symptoms start? Have you eaten anything unusual recently?";

const GENERAL_PROMPT: &str = "Thank you for sharing that information. Based on what you've told me, I'd recommend monitoring your symptoms closely. If they persist or worsen, please consider consulting with a healthcare professional. Is there anything specific about your symptoms you'd like me to help clarify?";

/// The clarifying question the assistant asks for a category.
pub fn respond(category: Category) -> &'static str {
    match category {
        Category::Pain => PAIN_PROMPT,
        Category::Fever => FEVER_PROMPT,
        Category::Respiratory => RESPIRATORY_PROMPT,
        Category::Gastrointestinal => GASTROINTESTINAL_PROMPT,
        Category::General => GENERAL_PROMPT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_category_has_distinct_prompt() {
        let prompts: HashSet<&str> = Category::ALL.iter().map(|c| respond(*c)).collect();
        assert_eq!(prompts.len(), Category::ALL.len());
        assert!(!prompts.contains(GREETING));
    }

    #[test]
    fn test_deterministic() {
        for category in Category::ALL {
            assert_eq!(respond(category), respond(category));
        }
    }

    #[test]
    fn test_general_prompt_escalates() {
        assert!(respond(Category::General).contains("healthcare professional"));
    }
}
