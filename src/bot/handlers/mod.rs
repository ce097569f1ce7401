pub mod callback;
pub mod general_message;
pub mod message;

use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::bot::commands::Command;
use crate::services::reminder::ReminderScheduler;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

pub struct BotHandler {
    pub reminders: ReminderScheduler,
}

impl BotHandler {
    pub fn new(reminders: ReminderScheduler) -> Self {
        Self { reminders }
    }

    /// Commands first, then any other message, then inline button presses.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let commands = self.reminders.clone();
        let callbacks = self.reminders.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let reminders = commands.clone();
                        async move { message::command_handler(bot, msg, cmd, reminders).await }
                    }),
            )
            .branch(
                Update::filter_message().endpoint(|bot: Bot, msg: Message| async move {
                    general_message::handle_general_message(bot, msg).await
                }),
            )
            .branch(
                Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                    let reminders = callbacks.clone();
                    async move { callback::callback_handler(bot, q, reminders).await }
                }),
            )
    }
}
