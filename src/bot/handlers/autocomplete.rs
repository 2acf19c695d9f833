//! Autocomplete handlers for Discord slash command parameters.

use crate::{bot::BotData, core::employee, errors::Error};

/// Provides autocomplete suggestions for employee scan codes.
///
/// Returns up to 25 registered scan codes that start with what the user has typed.
/// Lookup failures produce no suggestions rather than an error.
pub async fn autocomplete_scan_code(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    employee::suggest_scan_codes(db, partial)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Scan code autocomplete failed: {e}");
            Vec::new()
        })
}
