use super::Database;
use anyhow::Result;
use teloxide::types::ChatId;

impl Database {
    /// Count one more opening of the bot in this chat and return the new total.
    pub async fn increment_open_count(&self, chat_id: ChatId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "INSERT INTO chat_stats (chat_id, open_count) VALUES (?, 1) \
             ON CONFLICT(chat_id) DO UPDATE SET open_count = open_count + 1 \
             RETURNING open_count",
        )
        .bind(chat_id.0)
        .fetch_one(self.pool())
        .await?;
        tracing::debug!(chat_id = chat_id.0, count, "Incremented open count");
        Ok(count)
    }

    pub async fn has_reviewed(&self, chat_id: ChatId) -> Result<bool> {
        let reviewed: Option<bool> =
            sqlx::query_scalar("SELECT has_reviewed FROM chat_stats WHERE chat_id = ?")
                .bind(chat_id.0)
                .fetch_optional(self.pool())
                .await?;
        Ok(reviewed.unwrap_or(false))
    }

    pub async fn mark_reviewed(&self, chat_id: ChatId) -> Result<()> {
        tracing::debug!(chat_id = chat_id.0, "Marking chat as reviewed");
        sqlx::query(
            "INSERT INTO chat_stats (chat_id, has_reviewed) VALUES (?, 1) \
             ON CONFLICT(chat_id) DO UPDATE SET has_reviewed = 1",
        )
        .bind(chat_id.0)
        .execute(self.pool())
        .await?;
        Ok(())
    }
}
