pub mod intents;
pub mod location;
pub mod photo;
pub mod start;

pub use intents::{ask, ask_from_text, run_request, send_intent};
pub use location::{active_location, save_shared_location, set_place, show_location};
pub use photo::explain_photo;
pub use start::{help, mark_reviewed, should_ask_for_review, start};
