pub mod handler;
pub mod intent;

pub use handler::{handle_intent, handle_line, Flow, Prompter};
pub use intent::Intent;
