use crate::directory::{
    ContactKind, EMERGENCY_CONTACTS, EmergencyContact, EmergencyService, ServiceKind,
    routine_services, tel_uri, urgent_services,
};
use dioxus::prelude::*;

struct Badge {
    glyph: &'static str,
    color: &'static str,
}

fn service_badge(kind: ServiceKind) -> Badge {
    match kind {
        ServiceKind::EmergencyCall => Badge {
            glyph: "☎",
            color: "#EF4444",
        },
        ServiceKind::PoisonControl => Badge {
            glyph: "⚠",
            color: "#F59E0B",
        },
        ServiceKind::CrisisLine => Badge {
            glyph: "♥",
            color: "#8B5CF6",
        },
        ServiceKind::NurseLine => Badge {
            glyph: "✚",
            color: "#0066CC",
        },
        ServiceKind::Ambulance => Badge {
            glyph: "🚑",
            color: "#10B981",
        },
    }
}

fn contact_color(kind: ContactKind) -> &'static str {
    match kind {
        ContactKind::Emergency => "#EF4444",
        ContactKind::Medical => "#0066CC",
        ContactKind::Personal => "#10B981",
    }
}

#[component]
pub fn EmergencyView() -> Element {
    rsx! {
        div { class: "main-container emergency",
            section { class: "directory-section",
                h2 { "Urgent Help" }
                for service in urgent_services() {
                    ServiceCard { key: "{service.id}", service: *service }
                }
            }
            section { class: "directory-section",
                h2 { "Other Services" }
                for service in routine_services() {
                    ServiceCard { key: "{service.id}", service: *service }
                }
            }
            section { class: "directory-section",
                h2 { "Emergency Contacts" }
                for contact in EMERGENCY_CONTACTS.iter() {
                    ContactCard { key: "{contact.id}", contact: *contact }
                }
            }
        }
    }
}

#[component]
fn ServiceCard(service: EmergencyService) -> Element {
    let badge = service_badge(service.kind);
    let class = if service.urgent {
        "directory-card urgent"
    } else {
        "directory-card"
    };
    rsx! {
        a { class: class, href: tel_uri(service.phone),
            span { class: "card-icon", style: "color: {badge.color};", "{badge.glyph}" }
            div { class: "card-body",
                div { class: "card-title", "{service.name}" }
                div { class: "card-subtitle", "{service.description}" }
                div { class: "card-phone", "{service.phone}" }
            }
            if service.urgent {
                span { class: "urgent-badge", "Urgent" }
            }
        }
    }
}

#[component]
fn ContactCard(contact: EmergencyContact) -> Element {
    let color = contact_color(contact.kind);
    rsx! {
        a { class: "directory-card", href: tel_uri(contact.phone),
            span { class: "card-icon", style: "color: {color};", "●" }
            div { class: "card-body",
                div { class: "card-title", "{contact.name}" }
                div { class: "card-subtitle", "{contact.relationship}" }
                div { class: "card-phone", "{contact.phone}" }
            }
        }
    }
}
