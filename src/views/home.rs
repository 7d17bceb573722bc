use crate::storage::KvStore;
use crate::types::{PersistedUpload, UploadComplete};
use crate::ui::AppView;
use crate::views::UploadPanel;
use dioxus::prelude::*;
use time::OffsetDateTime;

const HANDOFF_FAILURE: &str = "Could not save the file locally. Try again.";

#[component]
pub fn HomeView(active_view: Signal<AppView>) -> Element {
    let store = use_context::<KvStore>();
    let mut handoff_error = use_signal(|| None::<&'static str>);
    let mut active_view = active_view;

    // Navigation only happens once the dataset is safely on disk; a failed
    // save keeps the user here with the widget's success banner still up.
    let on_complete = move |complete: UploadComplete| {
        let record = PersistedUpload {
            name: complete.candidate.file_name,
            content: complete.candidate.raw_content,
            columns: complete.columns,
            uploaded_at: OffsetDateTime::now_utc(),
        };
        match store.save_upload(&record) {
            Ok(()) => {
                handoff_error.set(None);
                active_view.set(AppView::Chat);
            }
            Err(err) => {
                tracing::error!("could not persist the uploaded dataset: {err}");
                handoff_error.set(Some(HANDOFF_FAILURE));
            }
        }
    };

    rsx! {
        div { class: "home",
            section { class: "hero",
                h2 { class: "hero-title", "Analyze your CSV data with AI" }
                p { class: "hero-subtitle text-muted",
                    "Upload a spreadsheet and get answers about it in plain language."
                }
                div { class: "hero-actions",
                    a { class: "btn btn-primary", href: "#upload-section", "Get Started" }
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| active_view.set(AppView::Chat),
                        "Open Chat"
                    }
                }
            }
            section { class: "upload-section", id: "upload-section",
                h3 { "Upload your CSV" }
                UploadPanel { on_complete }
                if let Some(message) = handoff_error() {
                    p { class: "handoff-error", "{message}" }
                }
            }
            section { class: "features",
                FeatureCard {
                    icon: "📊",
                    title: "Deep Analysis",
                    description: "Statistics and trends pulled straight from your data.",
                }
                FeatureCard {
                    icon: "✨",
                    title: "Contextual Answers",
                    description: "Ask in plain language and get answers grounded in your file.",
                }
                FeatureCard {
                    icon: "🔒",
                    title: "Fast and Private",
                    description: "Your file is processed by your own backend, nowhere else.",
                }
            }
            section { class: "steps-section",
                h3 { "How it works" }
                div { class: "steps",
                    Step {
                        number: "1",
                        icon: "⬆",
                        title: "Upload",
                        description: "Choose or drag a CSV file.",
                    }
                    Step {
                        number: "2",
                        icon: "📈",
                        title: "Process",
                        description: "The backend reads and profiles your data.",
                    }
                    Step {
                        number: "3",
                        icon: "💬",
                        title: "Ask",
                        description: "Pose questions in the chat.",
                    }
                    Step {
                        number: "4",
                        icon: "💡",
                        title: "Learn",
                        description: "Get insights and suggested analyses.",
                    }
                }
            }
            footer { class: "home-footer text-muted",
                "CSV Analyzer · chat with your spreadsheet"
            }
        }
    }
}

#[component]
fn FeatureCard(icon: &'static str, title: &'static str, description: &'static str) -> Element {
    rsx! {
        div { class: "feature-card",
            span { class: "feature-icon", "{icon}" }
            h4 { "{title}" }
            p { class: "text-muted", "{description}" }
        }
    }
}

#[component]
fn Step(
    number: &'static str,
    icon: &'static str,
    title: &'static str,
    description: &'static str,
) -> Element {
    rsx! {
        div { class: "step",
            span { class: "step-number", "{number}" }
            span { class: "step-icon", "{icon}" }
            h4 { "{title}" }
            p { class: "text-muted", "{description}" }
        }
    }
}
