use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One chat bubble. Held in memory only; conversations do not survive a
/// restart.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: OffsetDateTime,
}

/// A file the user picked or dropped, decoded and ready for validation.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadCandidate {
    pub file_name: String,
    pub size_bytes: u64,
    pub raw_content: String,
}

/// Payload of the upload widget's completion callback. `columns` comes from
/// the server response and is never filled in client-side.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadComplete {
    pub candidate: UploadCandidate,
    pub columns: Option<Vec<String>>,
}

/// The record the landing page writes and the chat view reads back.
///
/// Serialized with camelCase keys: `uploadedAt` is RFC 3339, and `columns`
/// is omitted entirely when the server returned none.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedUpload {
    pub name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(rename = "uploadedAt", with = "time::serde::rfc3339")]
    pub uploaded_at: OffsetDateTime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}
