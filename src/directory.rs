//! Emergency directory shown on the Emergency tab.
//!
//! Records are plain data. The `kind` tags are resolved to a glyph and colour
//! by the view, and dialing is left to the platform through [`tel_uri`].

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceKind {
    EmergencyCall,
    PoisonControl,
    CrisisLine,
    NurseLine,
    Ambulance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactKind {
    Personal,
    Medical,
    Emergency,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmergencyService {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub phone: &'static str,
    pub kind: ServiceKind,
    pub urgent: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmergencyContact {
    pub id: &'static str,
    pub name: &'static str,
    pub relationship: &'static str,
    pub phone: &'static str,
    pub kind: ContactKind,
}

pub const EMERGENCY_SERVICES: &[EmergencyService] = &[
    EmergencyService {
        id: "emergency-call",
        name: "Call 911",
        description: "Life-threatening emergencies",
        phone: "911",
        kind: ServiceKind::EmergencyCall,
        urgent: true,
    },
    EmergencyService {
        id: "poison-control",
        name: "Poison Control",
        description: "Poisoning emergencies 24/7",
        phone: "1-800-222-1222",
        kind: ServiceKind::PoisonControl,
        urgent: true,
    },
    EmergencyService {
        id: "crisis-line",
        name: "Crisis Hotline",
        description: "Mental health crisis support",
        phone: "988",
        kind: ServiceKind::CrisisLine,
        urgent: true,
    },
    EmergencyService {
        id: "nurse-line",
        name: "Nurse Hotline",
        description: "24/7 medical advice line",
        phone: "1-800-NURSE-24",
        kind: ServiceKind::NurseLine,
        urgent: false,
    },
    EmergencyService {
        id: "ambulance",
        name: "Ambulance",
        description: "Non-emergency transport",
        phone: "1-800-AMBULANCE",
        kind: ServiceKind::Ambulance,
        urgent: false,
    },
];

pub const EMERGENCY_CONTACTS: &[EmergencyContact] = &[
    EmergencyContact {
        id: "spouse",
        name: "Jane Doe",
        relationship: "Spouse",
        phone: "+1 (555) 987-6543",
        kind: ContactKind::Personal,
    },
    EmergencyContact {
        id: "physician",
        name: "Dr. Smith",
        relationship: "Primary Care Physician",
        phone: "+1 (555) 123-7890",
        kind: ContactKind::Medical,
    },
    EmergencyContact {
        id: "local-emergency",
        name: "Emergency Services",
        relationship: "Local Emergency",
        phone: "911",
        kind: ContactKind::Emergency,
    },
    EmergencyContact {
        id: "mother",
        name: "Mom",
        relationship: "Mother",
        phone: "+1 (555) 456-7890",
        kind: ContactKind::Personal,
    },
];

pub fn urgent_services() -> impl Iterator<Item = &'static EmergencyService> {
    EMERGENCY_SERVICES.iter().filter(|service| service.urgent)
}

pub fn routine_services() -> impl Iterator<Item = &'static EmergencyService> {
    EMERGENCY_SERVICES.iter().filter(|service| !service.urgent)
}

/// Dial target for a directory number.
///
/// Keypad letters are mapped to digits ("1-800-NURSE-24" dials 18006877324)
/// and every other punctuation character except a leading `+` is dropped.
pub fn tel_uri(phone: &str) -> String {
    let mut digits = String::with_capacity(phone.len());
    for c in phone.chars() {
        match c {
            '+' if digits.is_empty() => digits.push('+'),
            '0'..='9' => digits.push(c),
            c if c.is_ascii_alphabetic() => digits.push(keypad_digit(c)),
            _ => {}
        }
    }
    format!("tel:{digits}")
}

fn keypad_digit(letter: char) -> char {
    match letter.to_ascii_uppercase() {
        'A'..='C' => '2',
        'D'..='F' => '3',
        'G'..='I' => '4',
        'J'..='L' => '5',
        'M'..='O' => '6',
        'P'..='S' => '7',
        'T'..='V' => '8',
        _ => '9',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique() {
        let services: HashSet<_> = EMERGENCY_SERVICES.iter().map(|s| s.id).collect();
        assert_eq!(services.len(), EMERGENCY_SERVICES.len());
        let contacts: HashSet<_> = EMERGENCY_CONTACTS.iter().map(|c| c.id).collect();
        assert_eq!(contacts.len(), EMERGENCY_CONTACTS.len());
    }

    #[test]
    fn test_urgent_services() {
        let names: Vec<_> = urgent_services().map(|s| s.name).collect();
        assert_eq!(names, vec!["Call 911", "Poison Control", "Crisis Hotline"]);
    }

    #[test]
    fn test_routine_services_complement_urgent() {
        let names: Vec<_> = routine_services().map(|s| s.name).collect();
        assert_eq!(names, vec!["Nurse Hotline", "Ambulance"]);
        assert_eq!(
            urgent_services().count() + routine_services().count(),
            EMERGENCY_SERVICES.len()
        );
    }

    #[test]
    fn test_tel_uri() {
        assert_eq!(tel_uri("911"), "tel:911");
        assert_eq!(tel_uri("+1 (555) 987-6543"), "tel:+15559876543");
        assert_eq!(tel_uri("1-800-222-1222"), "tel:18002221222");
        assert_eq!(tel_uri("1-800-NURSE-24"), "tel:18006877324");
        assert_eq!(tel_uri("1-800-AMBULANCE"), "tel:1800262852623");
    }
}
