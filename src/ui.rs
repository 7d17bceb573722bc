use crate::api::ApiClient;
use crate::conversations::ConversationList;
use crate::storage::KvStore;
use crate::theme::theme_css;
use crate::types::ThemeMode;
use crate::views::{ChatView, HomeView};
use dioxus::prelude::*;

const APP_CSS: Asset = asset!("/assets/app.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Home,
    Chat,
}

#[component]
pub fn App() -> Element {
    use_context_provider(ApiClient::from_env);
    use_context_provider(KvStore::open_default);

    // Conversations outlive view switches; the chat view re-reads the
    // persisted dataset each time it mounts.
    let conversations = use_signal(ConversationList::seeded);
    let active_view = use_signal(|| AppView::Home);
    let theme = use_signal(|| ThemeMode::Dark);

    rsx! {
        ThemeStyles { theme }
        AppHeader { active_view, theme }
        div { class: "view-panels",
            if active_view() == AppView::Home {
                HomeView { active_view }
            } else {
                ChatView { conversations }
            }
        }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let css = theme_css(theme());
    rsx! {
        document::Link { rel: "stylesheet", href: APP_CSS }
        style { dangerous_inner_html: "{css}" }
    }
}

#[component]
fn AppHeader(active_view: Signal<AppView>, theme: Signal<ThemeMode>) -> Element {
    let mut theme = theme;
    let toggle_label = match theme() {
        ThemeMode::Dark => "Light",
        ThemeMode::Light => "Dark",
    };
    rsx! {
        div { class: "header",
            div { class: "header-content",
                div { class: "brand",
                    span { class: "brand-mark", "CSV" }
                    span { class: "brand-name", "Analyzer" }
                }
                ViewNavigation { active_view }
                button {
                    class: "btn btn-ghost theme-toggle",
                    onclick: move |_| {
                        let next = match theme() {
                            ThemeMode::Dark => ThemeMode::Light,
                            ThemeMode::Light => ThemeMode::Dark,
                        };
                        theme.set(next);
                    },
                    "{toggle_label}"
                }
            }
        }
    }
}

#[component]
fn ViewNavigation(active_view: Signal<AppView>) -> Element {
    rsx! {
        div { class: "tabs",
            ViewTab { active_view, view: AppView::Home, label: "Home" }
            ViewTab { active_view, view: AppView::Chat, label: "Chat" }
        }
    }
}

#[component]
fn ViewTab(active_view: Signal<AppView>, view: AppView, label: &'static str) -> Element {
    let mut active_view = active_view;
    let class = if active_view() == view {
        "tab active"
    } else {
        "tab"
    };
    rsx! {
        h1 {
            class: class,
            onclick: move |_| active_view.set(view),
            "{label}"
        }
    }
}
