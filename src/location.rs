use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use teloxide::types::ChatId;

use crate::db::Database;

/// A latitude/longitude pair in signed degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Where a request is about: device coordinates or a place typed by the user.
///
/// No geocoding happens between the two; a place name is passed to the model
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationDescriptor {
    Coordinates(Coordinates),
    Place(String),
}

impl From<Coordinates> for LocationDescriptor {
    fn from(c: Coordinates) -> Self {
        LocationDescriptor::Coordinates(c)
    }
}

impl fmt::Display for LocationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps the trailing `.0` on whole degrees and never rounds.
            LocationDescriptor::Coordinates(c) => {
                write!(f, "Latitude: {:?}, Longitude: {:?}.", c.latitude, c.longitude)
            }
            LocationDescriptor::Place(place) => f.write_str(place),
        }
    }
}

/// Source of the user's current position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Returns `Ok(None)` when no position is known.
    async fn current_location(&self) -> Result<Option<Coordinates>>;
}

/// Reads the last location a chat shared with the bot.
pub struct ChatLocationProvider {
    db: Database,
    chat_id: ChatId,
}

impl ChatLocationProvider {
    pub fn new(db: Database, chat_id: ChatId) -> Self {
        Self { db, chat_id }
    }
}

#[async_trait]
impl LocationProvider for ChatLocationProvider {
    async fn current_location(&self) -> Result<Option<Coordinates>> {
        let location = self.db.get_device_location(self.chat_id).await?;
        tracing::trace!(chat_id = self.chat_id.0, ?location, "Resolved chat location");
        Ok(location)
    }
}
