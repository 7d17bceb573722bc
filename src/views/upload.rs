use crate::api::ApiClient;
use crate::types::{UploadCandidate, UploadComplete};
use crate::upload;
use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;
use std::sync::Arc;
use std::time::Duration;

const SUCCESS_FLASH: Duration = Duration::from_secs(3);
const READ_FAILURE: &str = "Could not read the selected file";

/// Signals behind the upload widget, bundled so handlers can carry one
/// `Copy` value instead of five.
#[derive(Clone, Copy)]
struct UploadState {
    file_name: Signal<Option<String>>,
    error: Signal<Option<String>>,
    success: Signal<bool>,
    uploading: Signal<bool>,
    drag_active: Signal<bool>,
}

fn use_upload_state() -> UploadState {
    UploadState {
        file_name: use_signal(|| None),
        error: use_signal(|| None),
        success: use_signal(|| false),
        uploading: use_signal(|| false),
        drag_active: use_signal(|| false),
    }
}

impl UploadState {
    /// Takes the first selected file through validation and the upload POST.
    /// The success flash clears itself after [`SUCCESS_FLASH`]; the future
    /// is owned by the widget's scope, so a late flash never touches a
    /// dead signal.
    async fn begin(
        self,
        api: ApiClient,
        on_complete: EventHandler<UploadComplete>,
        engine: Arc<dyn FileEngine>,
    ) {
        let UploadState {
            mut file_name,
            mut error,
            mut success,
            mut uploading,
            ..
        } = self;

        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        file_name.set(Some(name.clone()));
        error.set(None);
        success.set(false);

        // Judge the name and reported size before touching the contents.
        let reported_size = engine.file_size(&name).await.unwrap_or(0);
        if let Err(err) = upload::validate(&name, reported_size) {
            error.set(Some(err.to_string()));
            return;
        }

        uploading.set(true);
        let outcome = match engine.read_file_to_string(&name).await {
            Some(raw_content) => {
                let candidate = UploadCandidate {
                    file_name: name,
                    size_bytes: raw_content.len() as u64,
                    raw_content,
                };
                upload::run_upload(&api, candidate)
                    .await
                    .map_err(|err| err.to_string())
            }
            None => Err(READ_FAILURE.to_string()),
        };
        uploading.set(false);

        match outcome {
            Ok(complete) => {
                success.set(true);
                on_complete.call(complete);
                tokio::time::sleep(SUCCESS_FLASH).await;
                success.set(false);
            }
            Err(message) => error.set(Some(message)),
        }
    }
}

#[component]
pub fn UploadPanel(on_complete: EventHandler<UploadComplete>) -> Element {
    let api = use_context::<ApiClient>();
    let state = use_upload_state();
    let UploadState {
        file_name,
        error,
        success,
        uploading,
        mut drag_active,
    } = state;

    let begin_upload = move |engine: Arc<dyn FileEngine>| {
        let api = api.clone();
        spawn(async move {
            state.begin(api, on_complete, engine).await;
        });
    };
    let drop_upload = begin_upload.clone();

    let is_uploading = uploading();
    let trigger_label = if is_uploading { "Uploading…" } else { "Choose File" };
    let ready_name = file_name().filter(|_| !success() && error().is_none() && !is_uploading);

    rsx! {
        div { class: "upload-panel",
            div {
                class: format_args!(
                    "dropzone {}",
                    if drag_active() { "drag-active" } else { "" }
                ),
                ondragover: move |evt| {
                    evt.prevent_default();
                    drag_active.set(true);
                },
                ondragleave: move |_| drag_active.set(false),
                ondrop: move |evt| {
                    evt.prevent_default();
                    drag_active.set(false);
                    if let Some(engine) = evt.files() {
                        drop_upload(engine);
                    }
                },
                input {
                    class: "dropzone-input",
                    r#type: "file",
                    accept: ".csv",
                    disabled: is_uploading,
                    onchange: move |evt| {
                        if let Some(engine) = evt.files() {
                            begin_upload(engine);
                        }
                    },
                }
                div { class: "dropzone-body",
                    span { class: "dropzone-icon", "📄" }
                    p { class: "dropzone-title", "Drag your CSV file here" }
                    p { class: "text-muted", "or click to choose a file" }
                    span { class: "btn btn-primary", "{trigger_label}" }
                    p { class: "dropzone-hint text-muted", "CSV files only, up to 10MB" }
                }
            }
            if success() {
                div { class: "upload-banner success", "✓ File uploaded successfully!" }
            }
            if let Some(message) = error() {
                div { class: "upload-banner error", "⚠ {message}" }
            }
            if let Some(name) = ready_name {
                div { class: "upload-banner ready", "✓ {name} ready for analysis" }
            }
        }
    }
}
