mod conversation;

pub use conversation::{Conversation, Role, Turn, render_transcript};
