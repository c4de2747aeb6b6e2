use serde::{Deserialize, Serialize};

/// Triage label used to pick a canned clarifying response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pain,
    Fever,
    Respiratory,
    Gastrointestinal,
    General,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Pain,
        Category::Fever,
        Category::Respiratory,
        Category::Gastrointestinal,
        Category::General,
    ];
}

/// A keyword set and the category it routes to.
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub category: Category,
}

/// Ordered rule table. Evaluation stops at the first rule with a keyword hit,
/// so "chest pain with a cough" is `Pain`, not `Respiratory`.
/// Keywords must be lowercase.
pub const RULES: &[Rule] = &[
    Rule {
        keywords: &["headache", "pain"],
        category: Category::Pain,
    },
    Rule {
        keywords: &["fever", "temperature"],
        category: Category::Fever,
    },
    Rule {
        keywords: &["cough", "cold"],
        category: Category::Respiratory,
    },
    Rule {
        keywords: &["stomach", "nausea"],
        category: Category::Gastrointestinal,
    },
];

/// Classify free text with case-insensitive substring matching.
///
/// Text that matches no rule (including empty text) falls through to
/// [`Category::General`].
pub fn classify(text: &str) -> Category {
    let text = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|rule| rule.category)
        .unwrap_or(Category::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pain_keywords_any_case() {
        assert_eq!(classify("I have a HEADACHE"), Category::Pain);
        assert_eq!(classify("sharp Pain in my knee"), Category::Pain);
        assert_eq!(classify("painful"), Category::Pain);
    }

    #[test]
    fn test_each_rule() {
        assert_eq!(classify("running a fever"), Category::Fever);
        assert_eq!(classify("high Temperature"), Category::Fever);
        assert_eq!(classify("dry cough"), Category::Respiratory);
        assert_eq!(classify("caught a cold"), Category::Respiratory);
        assert_eq!(classify("upset stomach"), Category::Gastrointestinal);
        assert_eq!(classify("constant nausea"), Category::Gastrointestinal);
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(classify("fever and a headache"), Category::Pain);
        assert_eq!(classify("cough with a temperature"), Category::Fever);
        assert_eq!(classify("cold and stomach cramps"), Category::Respiratory);
    }

    #[test]
    fn test_fallback_to_general() {
        assert_eq!(classify("I feel dizzy"), Category::General);
        assert_eq!(classify(""), Category::General);
    }

    #[test]
    fn test_rule_keywords_are_lowercase() {
        for rule in RULES {
            for keyword in rule.keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }
}
