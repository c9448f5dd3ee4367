use std::time::Duration;

use anyhow::Result;
use futures_util::StreamExt;
use teloxide::{
    net::Download,
    prelude::*,
    types::ChatAction,
    RequestError,
};
use tokio::sync::watch;

use crate::orchestrator::ResultState;

/// Telegram shows a chat action for about five seconds.
pub const TYPING_REFRESH: Duration = Duration::from_secs(4);

/// Download a file from Telegram and return the raw bytes.
pub async fn download_file(bot: &Bot, path: &str) -> Result<Vec<u8>, RequestError> {
    let mut data = Vec::new();
    let mut stream = bot.download_file_stream(path);
    while let Some(chunk) = stream.next().await {
        data.extend_from_slice(&chunk?);
    }
    tracing::trace!(size = data.len(), "downloaded file bytes");
    Ok(data)
}

/// Fetch a Telegram file by its `file_id` and return the raw bytes.
pub async fn download_telegram_file(bot: &Bot, file_id: &str) -> Result<Vec<u8>> {
    let file = bot.get_file(file_id).await?;
    tracing::debug!(path = %file.path, "Downloading Telegram file");
    let bytes = download_file(bot, &file.path).await?;
    tracing::debug!(path = %file.path, size = bytes.len(), "Finished download");
    Ok(bytes)
}

/// Show "typing…" in the chat until the observed state settles.
pub fn show_typing_while_pending(
    bot: Bot,
    chat_id: ChatId,
    mut state: watch::Receiver<ResultState>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if state.borrow_and_update().is_settled() {
                break;
            }
            if let Err(err) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
                tracing::warn!(error = %err, chat_id = chat_id.0, "Failed to send chat action");
            }
            tokio::select! {
                changed = state.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tokio::time::sleep(TYPING_REFRESH) => {}
            }
        }
        tracing::trace!(chat_id = chat_id.0, "Stopped typing indicator");
    })
}
