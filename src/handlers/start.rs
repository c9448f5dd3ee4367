use anyhow::Result;
use teloxide::prelude::*;

use crate::db::Database;
use crate::messages::{HELP_TEXT, REVIEW_INVITE, REVIEW_THANKS, WELCOME_TEXT};

/// The review invitation goes out on the second and fourth opening only.
pub fn should_ask_for_review(open_count: i64, has_reviewed: bool) -> bool {
    matches!(open_count, 2 | 4) && !has_reviewed
}

pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, HELP_TEXT)
        .parse_mode(teloxide::types::ParseMode::Html)
        .await?;
    Ok(())
}

/// `/start` counts as opening the app.
pub async fn start(bot: Bot, msg: Message, db: Database) -> Result<()> {
    let count = db.increment_open_count(msg.chat.id).await?;
    bot.send_message(msg.chat.id, WELCOME_TEXT).await?;
    help(bot.clone(), msg.clone()).await?;

    if should_ask_for_review(count, db.has_reviewed(msg.chat.id).await?) {
        tracing::info!(chat_id = msg.chat.id.0, count, "Asking for a review");
        bot.send_message(msg.chat.id, REVIEW_INVITE).await?;
    }
    Ok(())
}

pub async fn mark_reviewed(bot: Bot, msg: Message, db: Database) -> Result<()> {
    db.mark_reviewed(msg.chat.id).await?;
    bot.send_message(msg.chat.id, REVIEW_THANKS).await?;
    Ok(())
}
