//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::clock::Clock,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" and the current time to check the bot is up.
    ///
    /// This is a health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let now = ctx.data().clock.now();
        ctx.say(format!("Pong! ({})", now.to_rfc3339())).await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Gallon Quota Help**\n\
        Every employee can take up to 10 gallons of water per month. \
        The quota resets on the first scan of each new month.\n\n\
        **Scan Station**\n\
        • `/scan <employee_id>` - Shows an employee's remaining quota.\n\
        • `/take <employee_id> <quantity>` - Takes 1-10 gallons from the quota.\n\n\
        **Administration** (requires Manage Server)\n\
        • `/employee_manage add|edit|delete|show|list` - Manage employees and view their history.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
