//! Shared text sent by the bot.
//!
//! Keep all user-facing strings in this module so they stay in one place and are
//! easy to update or translate.

pub const HELP_TEXT: &str =
    "Share your location (📎 → Location) or name a place, then ask me about it.\n\
             Send a photo to learn what is in it. Any other text is a question about your location.\n\n\
             <b>Commands:</b>\n\
             /explore - Interesting things about this place.\n\
             /history - History of this place.\n\
             /restaurants - Restaurants within walking distance.\n\
             /spots - The most famous tourist attractions nearby.\n\
             /safety - How to stay safe and not offend locals.\n\
             /ask - Ask anything about this place.\n\
             /place - Use another place instead of your location (empty to reset).\n\
             /where - Show the location I will use.";

pub const WELCOME_TEXT: &str = "Hi! I am your AI travel guide. 🧭";

pub const PENDING_TEXT: &str = "Looking it up, one moment...";

// Request outcomes.
pub const LOCATION_NOT_FOUND: &str = "Location not found.";
pub const PICTURE_TAKING_ERROR: &str = "Picture taking error.";
pub const EMPTY_RESPONSE: &str = "Error (received prompt is empty).";
pub const SERVER_PROBLEM: &str = "Problem with the server.";
pub const SENDING_PROMPT_ERROR: &str = "Sending prompt error.";

pub const NO_LOCATION_YET: &str =
    "I don't know where you are yet. Share your location or set a place with /place.";
pub const PLACE_CLEARED: &str = "Manual place cleared. I'll use your shared location.";
pub const ASK_NEEDS_QUESTION: &str = "Please add a question, e.g. /ask Is tap water safe?";

pub fn location_saved_text(latitude: f64, longitude: f64) -> String {
    format!("Got it! Your location: {latitude}, {longitude}")
}

pub fn place_set_text(place: &str) -> String {
    format!("I'll answer about {place} until you reset it with /place.")
}

pub fn current_location_text(location: &str) -> String {
    format!("Your location: {location}")
}

pub const REVIEW_INVITE: &str = "Would you like to leave a review? If you have any idea about \
how I could improve, please share it. Send /review once you're done. Thank you for travelling with me!";
pub const REVIEW_THANKS: &str = "Thank you! I won't ask again.";
