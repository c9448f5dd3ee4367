use anyhow::Result;
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::ai::prompts::MessageIntent;
use crate::db::Database;
use crate::handlers::{ask, help, mark_reviewed, send_intent, set_place, show_location, start};
use crate::session::Sessions;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "start the travel guide.")]
    Start,
    #[command(description = "display this text.")]
    Help,
    #[command(description = "interesting things about this place.")]
    Explore,
    #[command(description = "history of this place.")]
    History,
    #[command(description = "restaurants within walking distance.")]
    Restaurants,
    #[command(description = "the most famous tourist attractions nearby.")]
    Spots,
    #[command(description = "how to stay safe and not offend locals.")]
    Safety,
    #[command(description = "ask anything about this place.")]
    Ask(String),
    #[command(description = "use another place instead of your location.")]
    Place(String),
    #[command(description = "show the location in use.")]
    Where,
    #[command(description = "tell me you left a review.")]
    Review,
}

impl Command {
    pub async fn dispatch(
        self,
        bot: Bot,
        msg: Message,
        db: Database,
        sessions: Sessions,
    ) -> Result<()> {
        match self {
            Command::Start => start(bot, msg, db).await?,
            Command::Help => help(bot, msg).await?,
            Command::Explore => send_intent(bot, msg, db, sessions, MessageIntent::Initial).await?,
            Command::History => send_intent(bot, msg, db, sessions, MessageIntent::History).await?,
            Command::Restaurants => {
                send_intent(bot, msg, db, sessions, MessageIntent::Restaurants).await?
            }
            Command::Spots => {
                send_intent(bot, msg, db, sessions, MessageIntent::TouristSpots).await?
            }
            Command::Safety => send_intent(bot, msg, db, sessions, MessageIntent::Safety).await?,
            Command::Ask(question) => ask(bot, msg, db, sessions, question).await?,
            Command::Place(place) => set_place(bot, msg, db, place).await?,
            Command::Where => show_location(bot, msg, db).await?,
            Command::Review => mark_reviewed(bot, msg, db).await?,
        }
        Ok(())
    }
}
