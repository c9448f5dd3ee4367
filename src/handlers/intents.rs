use anyhow::Result;
use teloxide::prelude::*;

use crate::ai::prompts::MessageIntent;
use crate::db::Database;
use crate::messages::{ASK_NEEDS_QUESTION, PENDING_TEXT};
use crate::orchestrator::{GenerationRequest, ResultState};
use crate::session::Sessions;
use crate::text_utils::{split_message, TELEGRAM_MESSAGE_LIMIT};
use crate::utils::show_typing_while_pending;

/// Run `request` for the chat and send back whatever it settles into.
pub async fn run_request(
    bot: Bot,
    chat_id: ChatId,
    db: &Database,
    sessions: &Sessions,
    request: GenerationRequest,
) -> Result<()> {
    let manual = db.get_manual_place(chat_id).await?;
    let request = request.with_manual_location(manual);
    tracing::info!(chat_id = chat_id.0, intent = %request.intent, "Sending prompt");

    let orchestrator = sessions.orchestrator(chat_id).await;
    let handle = orchestrator.send_prompt(request);
    let _typing = show_typing_while_pending(bot.clone(), chat_id, orchestrator.subscribe());
    if let Err(err) = bot.send_message(chat_id, PENDING_TEXT).await {
        tracing::warn!(error = %err, chat_id = chat_id.0, "Failed to send pending note");
    }

    let outcome = handle.await?;
    deliver(&bot, chat_id, outcome).await?;
    Ok(())
}

async fn deliver(bot: &Bot, chat_id: ChatId, outcome: ResultState) -> Result<()> {
    match outcome {
        ResultState::Succeeded(text) => {
            for chunk in split_message(&text, TELEGRAM_MESSAGE_LIMIT) {
                bot.send_message(chat_id, chunk).await?;
            }
        }
        ResultState::Failed(message) => {
            tracing::info!(chat_id = chat_id.0, %message, "Request failed");
            bot.send_message(chat_id, message).await?;
        }
        ResultState::Idle | ResultState::Pending => {}
    }
    Ok(())
}

/// Handle one of the fixed-template commands.
pub async fn send_intent(
    bot: Bot,
    msg: Message,
    db: Database,
    sessions: Sessions,
    intent: MessageIntent,
) -> Result<()> {
    run_request(bot, msg.chat.id, &db, &sessions, GenerationRequest::new(intent)).await
}

/// `/ask <question>`.
pub async fn ask(
    bot: Bot,
    msg: Message,
    db: Database,
    sessions: Sessions,
    question: String,
) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        bot.send_message(msg.chat.id, ASK_NEEDS_QUESTION).await?;
        return Ok(());
    }
    let request = GenerationRequest::new(MessageIntent::Custom).with_prompt(question);
    run_request(bot, msg.chat.id, &db, &sessions, request).await
}

/// Plain text is a free-form question about the current location.
pub async fn ask_from_text(bot: Bot, msg: Message, db: Database, sessions: Sessions) -> Result<()> {
    let Some(text) = msg.text().map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(());
    };
    let request = GenerationRequest::new(MessageIntent::Custom).with_prompt(text);
    run_request(bot, msg.chat.id, &db, &sessions, request).await
}
