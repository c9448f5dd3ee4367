use super::Database;
use anyhow::Result;
use teloxide::types::ChatId;

use crate::location::Coordinates;

#[derive(sqlx::FromRow)]
struct DeviceLocation {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl Database {
    /// Store the last location the chat shared with the bot.
    pub async fn set_device_location(&self, chat_id: ChatId, location: Coordinates) -> Result<()> {
        tracing::debug!(
            chat_id = chat_id.0,
            latitude = location.latitude,
            longitude = location.longitude,
            "Storing device location",
        );
        sqlx::query(
            "INSERT INTO chat_location (chat_id, latitude, longitude) VALUES (?, ?, ?) \
             ON CONFLICT(chat_id) DO UPDATE SET latitude = excluded.latitude, longitude = excluded.longitude",
        )
        .bind(chat_id.0)
        .bind(location.latitude)
        .bind(location.longitude)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn get_device_location(&self, chat_id: ChatId) -> Result<Option<Coordinates>> {
        tracing::trace!(chat_id = chat_id.0, "Fetching device location");
        let row = sqlx::query_as::<_, DeviceLocation>(
            "SELECT latitude, longitude FROM chat_location WHERE chat_id = ?",
        )
        .bind(chat_id.0)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.and_then(|r| match (r.latitude, r.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }))
    }

    /// Set or clear (`None`) the manual place that overrides the device location.
    pub async fn set_manual_place(&self, chat_id: ChatId, place: Option<&str>) -> Result<()> {
        tracing::debug!(chat_id = chat_id.0, ?place, "Updating manual place");
        sqlx::query(
            "INSERT INTO chat_location (chat_id, place) VALUES (?, ?) \
             ON CONFLICT(chat_id) DO UPDATE SET place = excluded.place",
        )
        .bind(chat_id.0)
        .bind(place)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn get_manual_place(&self, chat_id: ChatId) -> Result<Option<String>> {
        let place: Option<Option<String>> =
            sqlx::query_scalar("SELECT place FROM chat_location WHERE chat_id = ?")
                .bind(chat_id.0)
                .fetch_optional(self.pool())
                .await?;
        Ok(place.flatten())
    }
}
