use crate::config::AppConfig;
use crate::intake::{IntakeError, QuickAction, TurnController};
use crate::types::{Message, Sender};
use dioxus::events::Key;
use dioxus::prelude::*;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing::{debug, warn};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

const INPUT_MAX_CHARS: usize = 500;

fn format_message_timestamp(timestamp: OffsetDateTime) -> Option<String> {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

fn sender_class(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user",
        Sender::Assistant => "assistant",
    }
}

fn sender_name(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "You",
        Sender::Assistant => "AI Assistant",
    }
}

fn clamp_input(text: String) -> String {
    if text.chars().count() > INPUT_MAX_CHARS {
        text.chars().take(INPUT_MAX_CHARS).collect()
    } else {
        text
    }
}

#[component]
pub fn ChatView() -> Element {
    let controller = use_signal(|| TurnController::new(&AppConfig::from_env_or_default()));
    let messages = use_signal(|| controller.peek().snapshot());
    let busy = use_signal(|| false);
    let mut input = use_signal(String::new);

    let mut send_message = {
        let mut messages = messages;
        let mut busy = busy;
        let mut input_signal = input;
        move |text: String| {
            let turn_controller = controller.peek().clone();
            match turn_controller.submit(&text) {
                Ok(reply) => {
                    input_signal.set(String::new());
                    messages.set(turn_controller.snapshot());
                    busy.set(true);
                    spawn(async move {
                        if let Err(err) = reply.run().await {
                            warn!("reply not delivered: {}", err);
                        }
                        messages.set(turn_controller.snapshot());
                        busy.set(turn_controller.is_busy());
                    });
                }
                Err(IntakeError::TurnInProgress) => {
                    debug!("send ignored, reply pending");
                    input_signal.set(String::new());
                }
                Err(err) => debug!("send ignored: {}", err),
            }
        }
    };

    let messages_snapshot = messages();

    rsx! {
        div { class: "main-container",
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    for msg in messages_snapshot.iter() {
                        MessageRow { key: "{msg.id()}", message: msg.clone() }
                    }
                    if busy() {
                        TypingIndicator {}
                    }
                }
            }

            div { class: "quick-actions",
                for action in QuickAction::ALL {
                    button {
                        class: "quick-action", r#type: "button",
                        onclick: move |_| input.set(action.label().to_string()),
                        "{action.label()}"
                    }
                }
            }

            form { class: "composer",
                div { class: "composer-inner",
                    div { class: "hstack",
                        textarea {
                            rows: "1", maxlength: "500",
                            placeholder: "Describe your symptoms or ask a question...",
                            value: "{input}", oninput: move |ev| input.set(clamp_input(ev.value())),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                    ev.prevent_default();
                                    let text = input();
                                    send_message(text);
                                }
                            },
                            disabled: busy(), autofocus: true,
                        }
                        button {
                            class: "btn btn-primary", r#type: "button",
                            disabled: busy() || input().trim().is_empty(),
                            onclick: move |_| {
                                let text = input();
                                send_message(text);
                            },
                            "Send"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: Message) -> Element {
    let sender = message.sender();
    let class = sender_class(sender);
    rsx! {
        div { class: format_args!("message-row {}", class),
            div { class: format_args!("bubble {}", class),
                div { class: "message-header", "{sender_name(sender)}" }
                div { class: "message-text", "{message.text()}" }
                if matches!(sender, Sender::Assistant) {
                    CopyButton { content: message.text().to_string() }
                }
            }
            if let Some(ts) = format_message_timestamp(message.timestamp()) {
                div { class: format_args!("message-meta {}", class),
                    span { class: "message-timestamp", "{ts}" }
                }
            }
        }
    }
}

#[component]
fn CopyButton(content: String) -> Element {
    let on_copy = move |_| {
        let raw = content.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            let _ = raw;
        });
    };

    rsx! {
        div { class: "bubble-controls",
            button { class: "action-btn", title: "Copy message", onclick: on_copy, "Copy" }
        }
    }
}

#[component]
fn TypingIndicator() -> Element {
    rsx! {
        div { class: "message-row assistant",
            div { class: "bubble assistant",
                div { class: "message-header", "AI Assistant" }
                div { class: "typing-indicator", aria_label: "Assistant is typing",
                    span { class: "dot" }
                    span { class: "dot" }
                    span { class: "dot" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_input() {
        assert_eq!(clamp_input("short".into()), "short");
        let long = "é".repeat(INPUT_MAX_CHARS + 20);
        assert_eq!(clamp_input(long).chars().count(), INPUT_MAX_CHARS);
    }

    #[test]
    fn test_sender_labels() {
        assert_eq!(sender_name(Sender::User), "You");
        assert_eq!(sender_class(Sender::Assistant), "assistant");
    }
}
