//! Prompt templates for every kind of travel question.
//!
//! Each [`MessageIntent`] owns a fixed template. Templates may reference the
//! `{location}` and `{prompt}` placeholders; [`MessageIntent::render`] fills
//! them in a single pass so user supplied text is never expanded again.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

use crate::location::LocationDescriptor;

const LOCATION_PLACEHOLDER: &str = "{location}";
const PROMPT_PLACEHOLDER: &str = "{prompt}";

const INITIAL_TEMPLATE: &str = "Tell me interesting things about this location: {location} \
Do not mention these values in response. Don't confirm you understand me. \
Behave like a tourist guide. Tell me about history, tourist spots, restaurants, etc.";

const HISTORY_TEMPLATE: &str = "Tell me about history of this location: {location} \
Do not mention these values in response. Don't confirm you understand me. \
Behave like a tourist guide.";

const RESTAURANTS_TEMPLATE: &str = "Tell me about restaurants and interesting food spots \
in a walking distance from this location: {location} \
Do not mention these values in response. Don't confirm you understand me. \
Mention restaurants' names!";

const TOURIST_SPOTS_TEMPLATE: &str = "Tell me about 5-6 most famous and important tourist \
spots/ attractions around this location that are worth to visit: {location} \
Do not mention these values in response. Don't confirm you understand me. \
Behave like a tourist guide.";

const SAFETY_TEMPLATE: &str = "Tell me about risks I should be careful on, and behaviours \
should avoid as a tourist to stay safe in this location. Be specific. You can tell me also \
what behaviours should I avoid not to offend locals. Refer to this place specifically: \
{location} Do not mention these values in response. Don't confirm you understand me. \
Behave like a tourist guide.";

const CUSTOM_TEMPLATE: &str = "{prompt}. Please answer in relation to the place: {location} \
Do not mention these values in response. Don't confirm you understand me.";

// No space after "picture." or "place:".
const PHOTO_TEMPLATE: &str = "{prompt}. Please tell me what is in the picture.\
Please answer in relation to the place:{location} \
Do not mention these values in response. Don't confirm you understand me.";

/// The fixed set of travel questions the bot knows how to ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageIntent {
    #[default]
    Initial,
    History,
    Restaurants,
    TouristSpots,
    Safety,
    Custom,
    Photo,
}

impl MessageIntent {
    pub const ALL: [MessageIntent; 7] = [
        MessageIntent::Initial,
        MessageIntent::History,
        MessageIntent::Restaurants,
        MessageIntent::TouristSpots,
        MessageIntent::Safety,
        MessageIntent::Custom,
        MessageIntent::Photo,
    ];

    pub fn template(self) -> &'static str {
        match self {
            MessageIntent::Initial => INITIAL_TEMPLATE,
            MessageIntent::History => HISTORY_TEMPLATE,
            MessageIntent::Restaurants => RESTAURANTS_TEMPLATE,
            MessageIntent::TouristSpots => TOURIST_SPOTS_TEMPLATE,
            MessageIntent::Safety => SAFETY_TEMPLATE,
            MessageIntent::Custom => CUSTOM_TEMPLATE,
            MessageIntent::Photo => PHOTO_TEMPLATE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageIntent::Initial => "initial",
            MessageIntent::History => "history",
            MessageIntent::Restaurants => "restaurants",
            MessageIntent::TouristSpots => "tourist_spots",
            MessageIntent::Safety => "safety",
            MessageIntent::Custom => "custom",
            MessageIntent::Photo => "photo",
        }
    }

    /// Whether a request of this kind is meaningless without a picture.
    pub fn requires_image(self) -> bool {
        matches!(self, MessageIntent::Photo)
    }

    /// Render the final prompt for `location`.
    ///
    /// A missing `prompt` renders as an empty string. Placeholders other than
    /// `{location}` and `{prompt}` are copied through untouched.
    pub fn render(self, location: &LocationDescriptor, prompt: Option<&str>) -> String {
        let template = self.template();
        let location = location.to_string();
        let prompt = prompt.unwrap_or("");

        let mut out = String::with_capacity(template.len() + location.len() + prompt.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix(LOCATION_PLACEHOLDER) {
                out.push_str(&location);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(PROMPT_PLACEHOLDER) {
                out.push_str(prompt);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for MessageIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MessageIntent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initial" | "explore" => Ok(MessageIntent::Initial),
            "history" => Ok(MessageIntent::History),
            "restaurants" | "food" => Ok(MessageIntent::Restaurants),
            "tourist_spots" | "spots" => Ok(MessageIntent::TouristSpots),
            "safety" => Ok(MessageIntent::Safety),
            "custom" | "ask" => Ok(MessageIntent::Custom),
            "photo" => Ok(MessageIntent::Photo),
            other => Err(anyhow!("unknown message intent: {other}")),
        }
    }
}
