//! Scan station commands - `scan` and `take`.
//!
//! `scan` looks an employee up by badge code and shows their remaining quota.
//! `take` withdraws gallons for the scanned badge.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, format, handlers::autocomplete},
        core::lookup,
        errors::{Error, Result},
    };

    /// Looks up an employee by their badge scan code.
    ///
    /// Applies the monthly reset if this is the first scan of a new month, then
    /// shows the employee's remaining quota.
    #[poise::command(slash_command, prefix_command)]
    pub async fn scan(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Employee ID from the badge (e.g. TI001)"]
        #[autocomplete = "autocomplete::autocomplete_scan_code"]
        scan_code: String,
    ) -> Result<()> {
        let data = ctx.data();

        match lookup::lookup(&data.database, &scan_code, data.clock.as_ref()).await {
            Ok(view) => {
                ctx.say(format::format_ledger_view(&view)).await?;
            }
            Err(e) if e.is_user_facing() => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Takes gallons from an employee's monthly quota.
    ///
    /// The badge is looked up first, then the withdrawal is applied and recorded.
    /// Requests above the remaining quota are refused without changing anything.
    #[poise::command(slash_command, prefix_command)]
    pub async fn take(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Employee ID from the badge (e.g. TI001)"]
        #[autocomplete = "autocomplete::autocomplete_scan_code"]
        scan_code: String,
        #[description = "Number of gallons to take (1-10)"]
        #[min = 1]
        #[max = 10]
        quantity: i32,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;
        let clock = data.clock.as_ref();

        let view = match lookup::lookup(db, &scan_code, clock).await {
            Ok(view) => view,
            Err(e) if e.is_user_facing() => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match lookup::withdraw(db, view.id, quantity, clock).await {
            Ok(outcome) => {
                ctx.say(format!(
                    "✅ {}\n{}",
                    outcome.success_message(),
                    format::format_ledger_view(&outcome.view)
                ))
                .await?;
            }
            Err(Error::InsufficientQuota {
                remaining,
                requested,
            }) => {
                let current = lookup::LedgerView {
                    remaining_quota: remaining,
                    ..view
                };
                ctx.say(format!(
                    "❌ {}\n{}",
                    Error::InsufficientQuota {
                        remaining,
                        requested
                    },
                    format::format_ledger_view(&current)
                ))
                .await?;
            }
            Err(e) if e.is_user_facing() => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
