/// Suggestion chips shown above the composer. Picking one only pre-fills the
/// input; the text is submitted like anything the user typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickAction {
    SymptomCheck,
    MedicationInfo,
    HealthTips,
    Emergency,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        QuickAction::SymptomCheck,
        QuickAction::MedicationInfo,
        QuickAction::HealthTips,
        QuickAction::Emergency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuickAction::SymptomCheck => "Symptom Check",
            QuickAction::MedicationInfo => "Medication Info",
            QuickAction::HealthTips => "Health Tips",
            QuickAction::Emergency => "Emergency",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{Category, classify};

    #[test]
    fn test_labels_are_plain_prompts() {
        for action in QuickAction::ALL {
            assert!(!action.label().trim().is_empty());
            assert_eq!(classify(action.label()), Category::General);
        }
    }
}
