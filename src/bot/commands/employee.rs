//! Employee administration Discord commands - `employee_manage` and its subcommands.
//!
//! All subcommands require the Manage Server permission.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, format, handlers::autocomplete},
        core::employee::{self, EmployeeUpdate, NewEmployee},
        entities::employee as employee_entity,
        errors::{Error, Result},
    };

    /// Resolves a scan code for an admin command, replying with the not-found message if absent.
    async fn resolve_employee(
        ctx: poise::Context<'_, BotData, Error>,
        scan_code: &str,
    ) -> Result<Option<employee_entity::Model>> {
        let found = employee::get_employee_by_scan_code(&ctx.data().database, scan_code.trim())
            .await?;
        if found.is_none() {
            ctx.say(format!(
                "❌ {}",
                Error::EmployeeNotFound {
                    identifier: scan_code.to_string()
                }
            ))
            .await?;
        }
        Ok(found)
    }

    /// Parent command for managing employees.
    ///
    /// Groups subcommands for registering, editing, deleting, inspecting, and listing employees.
    #[poise::command(
        slash_command,
        default_member_permissions = "MANAGE_GUILD",
        required_permissions = "MANAGE_GUILD",
        subcommands(
            "employee_add",
            "employee_edit",
            "employee_delete",
            "employee_show",
            "employee_list"
        )
    )]
    pub async fn employee_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Employee management command. Available subcommands:\n\
            `/employee_manage add` - Register a new employee\n\
            `/employee_manage edit` - Change an employee's ID, name, or quota\n\
            `/employee_manage delete` - Delete an employee and their history\n\
            `/employee_manage show` - Show an employee with recent withdrawals\n\
            `/employee_manage list` - List employees, 20 per page";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Registers a new employee with a fresh monthly quota.
    #[poise::command(slash_command, rename = "add", required_permissions = "MANAGE_GUILD")]
    pub async fn employee_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Unique employee ID printed on the badge (e.g. TI001)"] scan_code: String,
        #[description = "Employee full name"] name: String,
        #[description = "Starting quota (0-50). Defaults to 10."]
        #[min = 0]
        #[max = 50]
        remaining_quota: Option<i32>,
    ) -> Result<()> {
        let data = ctx.data();
        let new_employee = NewEmployee {
            scan_code,
            name,
            remaining_quota,
        };

        match employee::create_employee(&data.database, new_employee, data.clock.as_ref()).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Employee created successfully.\n{}",
                    format::format_employee_line(&created)
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

    /// Edits an employee. Omitted fields keep their current value.
    #[poise::command(slash_command, rename = "edit", required_permissions = "MANAGE_GUILD")]
    pub async fn employee_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Current employee ID"]
        #[autocomplete = "autocomplete::autocomplete_scan_code"]
        scan_code: String,
        #[description = "New employee ID"] new_scan_code: Option<String>,
        #[description = "New name"] name: Option<String>,
        #[description = "New remaining quota (0-50)"]
        #[min = 0]
        #[max = 50]
        remaining_quota: Option<i32>,
    ) -> Result<()> {
        let Some(existing) = resolve_employee(ctx, &scan_code).await? else {
            return Ok(());
        };

        let data = ctx.data();
        // Reset first so an omitted quota keeps this month's balance, not last month's
        let existing =
            employee::get_employee(&data.database, existing.id, data.clock.as_ref()).await?;

        let update = EmployeeUpdate {
            scan_code: new_scan_code.unwrap_or(existing.scan_code),
            name: name.unwrap_or(existing.name),
            remaining_quota: remaining_quota.unwrap_or(existing.remaining_quota),
        };

        match employee::update_employee(&data.database, existing.id, update, data.clock.as_ref())
            .await
        {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ Employee updated successfully.\n{}",
                    format::format_employee_line(&updated)
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

    /// Deletes an employee together with their withdrawal history.
    #[poise::command(slash_command, rename = "delete", required_permissions = "MANAGE_GUILD")]
    pub async fn employee_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Employee ID to delete"]
        #[autocomplete = "autocomplete::autocomplete_scan_code"]
        scan_code: String,
    ) -> Result<()> {
        let Some(existing) = resolve_employee(ctx, &scan_code).await? else {
            return Ok(());
        };

        let deleted = employee::delete_employee(&ctx.data().database, existing.id).await?;
        ctx.say(format!(
            "✅ Employee deleted successfully: `{}` {}",
            deleted.scan_code, deleted.name
        ))
        .await?;
        Ok(())
    }

    /// Shows an employee's quota and their ten most recent withdrawals.
    #[poise::command(slash_command, rename = "show", required_permissions = "MANAGE_GUILD")]
    pub async fn employee_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Employee ID to show"]
        #[autocomplete = "autocomplete::autocomplete_scan_code"]
        scan_code: String,
    ) -> Result<()> {
        let Some(existing) = resolve_employee(ctx, &scan_code).await? else {
            return Ok(());
        };

        let data = ctx.data();
        let details =
            employee::get_employee_details(&data.database, existing.id, data.clock.as_ref())
                .await?;
        ctx.say(format::format_employee_details(&details)?).await?;
        Ok(())
    }

    /// Lists employees, most recently registered first.
    #[poise::command(slash_command, rename = "list", required_permissions = "MANAGE_GUILD")]
    pub async fn employee_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Page number (defaults to 1)"]
        #[min = 1]
        page: Option<u64>,
    ) -> Result<()> {
        let data = ctx.data();
        let page = employee::list_employees(
            &data.database,
            page.unwrap_or(1),
            data.clock.as_ref(),
        )
        .await?;
        ctx.say(format::format_employee_page(&page)?).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
