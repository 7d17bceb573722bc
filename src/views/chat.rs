use crate::api::{ApiClient, Dashboard};
use crate::conversations::ConversationList;
use crate::storage::KvStore;
use crate::types::Role;
use crate::views::shared::markdown_to_html;
use dioxus::events::Key;
use dioxus::prelude::*;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");
const UPLOAD_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

const MISSING_REPLY: &str = "Could not process the response";

fn chat_failure_message(base_url: &str) -> String {
    format!(
        "Sorry, something went wrong while handling your request. \
         Check that the server is running at {base_url}"
    )
}

fn format_message_timestamp(timestamp: OffsetDateTime) -> Option<String> {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

fn format_upload_date(timestamp: OffsetDateTime) -> Option<String> {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(UPLOAD_DATE_FORMAT).ok()
}

#[component]
pub fn ChatView(conversations: Signal<ConversationList>) -> Element {
    let api = use_context::<ApiClient>();
    let store = use_context::<KvStore>();
    let mut conversations = conversations;

    // One read at mount; a dataset uploaded later arrives via a remount.
    let dataset = use_signal(move || store.load_upload());
    let mut input = use_signal(String::new);
    let sending = use_signal(|| false);
    let dashboard = use_signal(|| Option::<Dashboard>::None);

    let mut send_message = {
        let api = api.clone();
        let mut conversations = conversations;
        let mut input = input;
        let mut sending = sending;
        let mut dashboard = dashboard;
        move |text: String| {
            let trimmed = text.trim();
            if trimmed.is_empty() || sending() {
                return;
            }
            // The reply must land where the question was asked, not where
            // the user happens to be when it arrives.
            let Some(target_id) = conversations.with(|list| list.active_id().map(String::from))
            else {
                return;
            };

            let prompt = trimmed.to_string();
            conversations.with_mut(|list| {
                list.push_message(&target_id, Role::User, prompt.clone());
            });
            input.set(String::new());
            sending.set(true);

            let api = api.clone();
            spawn(async move {
                let reply = match api.send_chat(&prompt).await {
                    Ok(reply) => {
                        if let Some(update) = reply.dashboard {
                            dashboard.set(Some(update));
                        }
                        reply.reply.unwrap_or_else(|| MISSING_REPLY.to_string())
                    }
                    Err(err) => {
                        tracing::error!("chat request failed: {err}");
                        chat_failure_message(api.base_url())
                    }
                };
                conversations.with_mut(|list| {
                    list.push_message(&target_id, Role::Assistant, reply);
                });
                sending.set(false);
            });
        }
    };
    let mut send_on_click = send_message.clone();

    let fetch_dashboard = {
        let api = api.clone();
        let input = input;
        let mut dashboard = dashboard;
        move |_: MouseEvent| {
            let api = api.clone();
            let prompt = input();
            spawn(async move {
                match api.fetch_dashboard(&prompt).await {
                    Ok(update) => dashboard.set(Some(update)),
                    Err(err) => tracing::warn!("dashboard request failed: {err}"),
                }
            });
        }
    };

    let dataset_name = dataset.read().as_ref().map(|record| record.name.clone());
    let dataset_card = match dataset.read().as_ref() {
        Some(record) => rsx! {
            DatasetCard {
                name: record.name.clone(),
                columns: record.columns.clone().unwrap_or_default(),
                uploaded_at: record.uploaded_at,
            }
        },
        None => rsx! {
            div { class: "dataset-card",
                p { class: "text-muted", "No CSV loaded. Upload one from the Home page." }
            }
        },
    };

    let conversation_rows = conversations.with(|list| {
        list.conversations()
            .iter()
            .map(|conversation| (conversation.id.clone(), conversation.title.clone()))
            .collect::<Vec<_>>()
    });
    let active_id = conversations.with(|list| list.active_id().map(String::from));
    let active_snapshot = conversations.with(|list| list.active().cloned());
    let no_conversation = active_snapshot.is_none();
    let toolbar_title = active_snapshot
        .as_ref()
        .map(|conversation| conversation.title.clone())
        .unwrap_or_else(|| "CSV Analyzer".to_string());
    let dashboard_panel = dashboard().filter(|d| d.available);

    let chat_list_body = match &active_snapshot {
        Some(conversation) if conversation.messages.is_empty() => rsx! {
            EmptyState { dataset_name: dataset_name.clone() }
        },
        Some(conversation) => rsx! {
            for msg in conversation.messages.iter() {
                div {
                    key: "{msg.id}",
                    class: format_args!("message-row {}", match msg.role {
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    }),
                    if matches!(msg.role, Role::Assistant) {
                        div { class: "avatar assistant", "A" }
                    }
                    div { class: "message-stack",
                        div {
                            class: format_args!("bubble {}", match msg.role {
                                Role::User => "user",
                                Role::Assistant => "assistant",
                            }),
                            if matches!(msg.role, Role::Assistant) {
                                AssistantBubble { content: msg.content.clone() }
                            } else {
                                "{msg.content}"
                            }
                        }
                        if let Some(ts) = format_message_timestamp(msg.timestamp) {
                            div {
                                class: format_args!("message-meta {}", match msg.role {
                                    Role::User => "align-end",
                                    Role::Assistant => "align-start",
                                }),
                                span { class: "message-timestamp", "{ts}" }
                            }
                        }
                    }
                }
            }
            if sending() {
                div { class: "message-row assistant",
                    div { class: "avatar assistant", "A" }
                    div { class: "message-stack",
                        div { class: "shimmer-line",
                            span { class: "shimmer-text", "Analyzing…" }
                        }
                    }
                }
            }
        },
        None => rsx! {
            div { class: "chat-empty",
                p { class: "text-muted", "No conversation. Create one from the sidebar." }
            }
        },
    };

    rsx! {
        div { class: "chat-layout",
            div { class: "chat-sidebar",
                {dataset_card}
                button {
                    class: "btn btn-primary new-conversation",
                    onclick: move |_| {
                        conversations.with_mut(|list| {
                            list.create();
                        });
                    },
                    "Start a new analysis"
                }
                div { class: "conversation-list",
                    for (id, title) in conversation_rows {
                        ConversationRow {
                            key: "{id}",
                            active: active_id.as_deref() == Some(id.as_str()),
                            id: id.clone(),
                            title,
                            conversations,
                        }
                    }
                }
            }
            div { class: "chat-main",
                div { class: "chat-toolbar",
                    h3 { "{toolbar_title}" }
                }
                if let Some(d) = dashboard_panel {
                    DashboardPanel { dashboard: d }
                }
                div { class: "chat-wrap",
                    div { id: "chat-list", class: "chat-list", {chat_list_body} }
                }
                form { class: "composer",
                    div { class: "composer-inner",
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            disabled: no_conversation,
                            onclick: fetch_dashboard,
                            "View analyses"
                        }
                        textarea {
                            rows: "1",
                            placeholder: "Ask a question about your CSV…",
                            value: "{input}",
                            oninput: move |ev| input.set(ev.value()),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                    ev.prevent_default();
                                    let text = input();
                                    send_message(text);
                                }
                            },
                            disabled: sending() || no_conversation,
                            autofocus: true,
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: sending() || no_conversation || input().trim().is_empty(),
                            onclick: move |_| {
                                let text = input();
                                send_on_click(text);
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
fn ConversationRow(
    id: String,
    title: String,
    active: bool,
    conversations: Signal<ConversationList>,
) -> Element {
    let mut conversations = conversations;
    let select_id = id.clone();
    let delete_id = id;
    rsx! {
        div {
            class: format_args!("conversation-row {}", if active { "active" } else { "" }),
            onclick: move |_| conversations.with_mut(|list| list.select(&select_id)),
            span { class: "conversation-title", "{title}" }
            button {
                class: "conversation-delete",
                title: "Delete conversation",
                onclick: move |evt| {
                    evt.stop_propagation();
                    conversations.with_mut(|list| list.delete(&delete_id));
                },
                "✕"
            }
        }
    }
}

#[component]
fn DatasetCard(name: String, columns: Vec<String>, uploaded_at: OffsetDateTime) -> Element {
    let column_line = if columns.is_empty() {
        "Ready for analysis".to_string()
    } else {
        format!("{} columns", columns.len())
    };
    let uploaded = format_upload_date(uploaded_at);
    let shown: Vec<String> = columns.iter().take(4).cloned().collect();
    let hidden = columns.len().saturating_sub(shown.len());
    rsx! {
        div { class: "dataset-card",
            span { class: "dataset-icon", "📄" }
            div { class: "dataset-info",
                p { class: "dataset-name", "{name}" }
                p { class: "text-muted dataset-meta", "{column_line}" }
                if let Some(date) = uploaded {
                    p { class: "text-muted dataset-meta", "Uploaded {date}" }
                }
                if !shown.is_empty() {
                    div { class: "column-chips",
                        for column in shown.iter() {
                            span { class: "column-chip", "{column}" }
                        }
                        if hidden > 0 {
                            span { class: "column-chip more", "+{hidden}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn EmptyState(dataset_name: Option<String>) -> Element {
    rsx! {
        div { class: "chat-empty",
            span { class: "chat-empty-icon", "💬" }
            if let Some(name) = dataset_name {
                p { "Ask a question about {name}." }
                p { class: "text-muted", "Try asking about averages or trends." }
            } else {
                p { "No CSV loaded." }
                p { class: "text-muted", "Upload one from the Home page to get started." }
            }
        }
    }
}

#[component]
fn DashboardPanel(dashboard: Dashboard) -> Element {
    let data_line = dashboard
        .data_info
        .as_ref()
        .map(|info| format!("{} rows • {} columns", info.rows, info.columns));
    rsx! {
        div { class: "dashboard-panel",
            div { class: "dashboard-head",
                h4 { "Available analyses" }
                if let Some(line) = data_line {
                    span { class: "text-muted", "{line}" }
                }
            }
            div { class: "analysis-grid",
                for analysis in dashboard.analyses.iter() {
                    div { key: "{analysis.id}", class: "analysis-card",
                        div { class: "analysis-title",
                            h5 { "{analysis.name}" }
                            if analysis.relevant {
                                span { class: "analysis-badge", "Relevant" }
                            }
                        }
                        p { class: "text-muted", "{analysis.description}" }
                    }
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(content: String) -> Element {
    let content_html = markdown_to_html(&content);
    rsx! {
        div { class: "md", dangerous_inner_html: "{content_html}" }
    }
}
