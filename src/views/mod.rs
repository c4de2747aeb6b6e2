pub mod chat;
pub mod emergency;

pub use chat::ChatView;
pub use emergency::EmergencyView;
