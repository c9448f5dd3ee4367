use anyhow::Result;
use teloxide::prelude::*;

use crate::ai::image::ImageData;
use crate::ai::prompts::MessageIntent;
use crate::db::Database;
use crate::orchestrator::GenerationRequest;
use crate::session::Sessions;
use crate::utils::download_telegram_file;

use super::intents::run_request;

/// Ask what is in a photo; the caption, if any, is the question.
pub async fn explain_photo(bot: Bot, msg: Message, db: Database, sessions: Sessions) -> Result<()> {
    let mut request = GenerationRequest::new(MessageIntent::Photo);
    if let Some(caption) = msg.caption().map(str::trim).filter(|c| !c.is_empty()) {
        request = request.with_prompt(caption);
    }

    let largest = msg
        .photo()
        .and_then(|sizes| sizes.iter().max_by_key(|p| p.file.size));
    match largest {
        Some(photo) => match download_telegram_file(&bot, &photo.file.id).await {
            Ok(bytes) => {
                tracing::trace!(size = bytes.len(), "downloaded photo bytes");
                request = request.with_image(ImageData::new(bytes));
            }
            Err(err) => tracing::warn!("photo download failed: {}", err),
        },
        None => tracing::debug!("photo had no usable sizes"),
    }

    // Without an image the request settles as a picture error.
    run_request(bot, msg.chat.id, &db, &sessions, request).await
}
