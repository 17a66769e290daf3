use clap::Subcommand;
use habitual_core::{PreferencesUpdate, Theme};

use crate::context::Context;

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show current preferences
    Show,
    /// Change one or more preferences
    Set {
        /// light, dark or system
        #[arg(long)]
        theme: Option<Theme>,
        /// 0 = Sunday .. 6 = Saturday
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
        week_starts_on: Option<u8>,
        #[arg(long)]
        show_completed: Option<bool>,
        /// Reminder time as HH:MM
        #[arg(long)]
        reminder_time: Option<String>,
    },
}

pub fn run(action: PrefsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = Context::open()?;

    match action {
        PrefsAction::Show => {
            println!("{}", serde_json::to_string_pretty(ctx.repo.preferences())?);
            Ok(())
        }
        PrefsAction::Set {
            theme,
            week_starts_on,
            show_completed,
            reminder_time,
        } => {
            ctx.repo.update_preferences(&PreferencesUpdate {
                theme,
                week_starts_on,
                show_completed_habits: show_completed,
                reminder_time,
            });
            println!("{}", serde_json::to_string_pretty(ctx.repo.preferences())?);
            ctx.save()
        }
    }
}
