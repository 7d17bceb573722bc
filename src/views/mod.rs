pub mod chat;
pub mod home;
pub mod shared;
pub mod upload;

pub use chat::ChatView;
pub use home::HomeView;
pub use upload::UploadPanel;
