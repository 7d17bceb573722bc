//! CSV Analyzer - chat with your spreadsheet
//!
//! Front-end for a CSV analysis backend:
//! - upload a CSV file and hand it off to the chat view
//! - ask questions about the data over plain HTTP
//!
//! The UI modules need one of the `web`, `desktop`, or `mobile` features;
//! everything else builds and tests headless.

pub mod api;
pub mod conversations;
pub mod storage;
pub mod types;
pub mod upload;

#[cfg(any(feature = "web", feature = "desktop", feature = "mobile"))]
pub mod theme;
#[cfg(any(feature = "web", feature = "desktop", feature = "mobile"))]
pub mod ui;
#[cfg(any(feature = "web", feature = "desktop", feature = "mobile"))]
pub mod views;
