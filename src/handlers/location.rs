use anyhow::Result;
use teloxide::prelude::*;

use crate::db::Database;
use crate::location::{Coordinates, LocationDescriptor};
use crate::messages::{
    current_location_text, location_saved_text, place_set_text, NO_LOCATION_YET, PLACE_CLEARED,
};

/// Remember a location shared through Telegram's attachment menu.
pub async fn save_shared_location(bot: Bot, msg: Message, db: Database) -> Result<()> {
    let Some(shared) = msg.location() else {
        return Ok(());
    };
    let coords = Coordinates::new(shared.latitude, shared.longitude);
    db.set_device_location(msg.chat.id, coords).await?;
    tracing::info!(chat_id = msg.chat.id.0, "Stored shared location");

    bot.send_message(
        msg.chat.id,
        location_saved_text(coords.latitude, coords.longitude),
    )
    .await?;
    Ok(())
}

/// `/place <name>` overrides the shared location; `/place` alone resets it.
pub async fn set_place(bot: Bot, msg: Message, db: Database, place: String) -> Result<()> {
    let place = place.trim();
    if place.is_empty() {
        db.set_manual_place(msg.chat.id, None).await?;
        bot.send_message(msg.chat.id, PLACE_CLEARED).await?;
    } else {
        db.set_manual_place(msg.chat.id, Some(place)).await?;
        bot.send_message(msg.chat.id, place_set_text(place)).await?;
    }
    Ok(())
}

/// The location a request would use right now, manual place first.
pub async fn active_location(db: &Database, chat_id: ChatId) -> Result<Option<LocationDescriptor>> {
    if let Some(place) = db.get_manual_place(chat_id).await? {
        return Ok(Some(LocationDescriptor::Place(place)));
    }
    Ok(db
        .get_device_location(chat_id)
        .await?
        .map(LocationDescriptor::Coordinates))
}

pub async fn show_location(bot: Bot, msg: Message, db: Database) -> Result<()> {
    let text = match active_location(&db, msg.chat.id).await? {
        Some(LocationDescriptor::Coordinates(c)) => {
            current_location_text(&format!("{}, {}", c.latitude, c.longitude))
        }
        Some(LocationDescriptor::Place(place)) => current_location_text(&place),
        None => NO_LOCATION_YET.to_string(),
    };
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}
