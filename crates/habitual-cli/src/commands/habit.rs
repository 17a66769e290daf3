//! Habit management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use habitual_core::habit::resolve_icon;
use habitual_core::{Frequency, HabitDraft, HabitUpdate};

use crate::context::{parse_day, Context};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// daily, weekly or monthly
        #[arg(long)]
        frequency: Option<Frequency>,
        /// Icon key (activity, book, flame, ...)
        #[arg(long)]
        icon: Option<String>,
        /// Hex color, e.g. #6366F1
        #[arg(long)]
        color: Option<String>,
    },
    /// Edit an existing habit
    Edit {
        /// Habit id or name
        habit: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        frequency: Option<Frequency>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a habit
    Delete {
        /// Habit id or name
        habit: String,
    },
    /// List habits
    List,
    /// Show one habit
    Show {
        /// Habit id or name
        habit: String,
    },
    /// Mark a habit done for a day (default today)
    Complete {
        /// Habit id or name
        habit: String,
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    /// Undo a completion for a day (default today)
    Uncomplete {
        /// Habit id or name
        habit: String,
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    /// Replace local habits with the remote listing
    Sync,
}

pub async fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = Context::open()?;

    match action {
        HabitAction::Add {
            name,
            description,
            frequency,
            icon,
            color,
        } => {
            let defaults = &ctx.config.defaults;
            let draft = HabitDraft {
                name,
                description,
                frequency: frequency.unwrap_or(defaults.frequency),
                icon: icon.unwrap_or_else(|| defaults.icon.clone()),
                color: color.unwrap_or_else(|| defaults.color.clone()),
            };
            let user = ctx.require_user()?.clone();
            ctx.repo.add_habit(&user, draft).await?;
            println!("{}", serde_json::to_string_pretty(ctx.repo.habits())?);
        }
        HabitAction::Edit {
            habit,
            name,
            description,
            frequency,
            icon,
            color,
        } => {
            let id = ctx.resolve_habit(&habit)?.id.clone();
            let update = HabitUpdate {
                name,
                description,
                frequency,
                icon,
                color,
            };
            if update.is_empty() {
                return Err("nothing to change; pass at least one field".into());
            }
            let user = ctx.require_user()?.clone();
            ctx.repo.edit_habit(&user, &id, update).await?;
            println!("Habit updated: {id}");
        }
        HabitAction::Delete { habit } => {
            let id = ctx.resolve_habit(&habit)?.id.clone();
            let user = ctx.require_user()?.clone();
            ctx.repo.delete_habit(&user, &id).await?;
            println!("Habit deleted: {id}");
        }
        HabitAction::List => {
            let today = ctx.repo.today();
            let show_completed = ctx.repo.preferences().show_completed_habits;
            for habit in ctx.repo.habits() {
                let done = habit.is_completed_on(today);
                if done && !show_completed {
                    continue;
                }
                println!(
                    "{} [{}] {:<24} {:>3} day streak (best {}){}",
                    if done { "✔" } else { " " },
                    resolve_icon(&habit.icon),
                    habit.name,
                    habit.streak,
                    habit.longest_streak,
                    if done { "" } else { "  - not done today" },
                );
            }
            return Ok(());
        }
        HabitAction::Show { habit } => {
            let habit = ctx.resolve_habit(&habit)?;
            println!("{}", serde_json::to_string_pretty(habit)?);
            return Ok(());
        }
        HabitAction::Complete { habit, date } => {
            let id = ctx.resolve_habit(&habit)?.id.clone();
            let day = date.unwrap_or_else(|| ctx.repo.today());
            let before = ctx.repo.notifications().len();
            if ctx.repo.complete_habit(&id, day) {
                for notification in &ctx.repo.notifications()[before..] {
                    println!("{}", notification.message);
                }
            }
            if let Some(habit) = ctx.repo.habit(&id) {
                println!("{}: {} day streak", habit.name, habit.streak);
            }
        }
        HabitAction::Uncomplete { habit, date } => {
            let id = ctx.resolve_habit(&habit)?.id.clone();
            let day = date.unwrap_or_else(|| ctx.repo.today());
            ctx.repo.uncomplete_habit(&id, day);
            if let Some(habit) = ctx.repo.habit(&id) {
                println!("{}: {} day streak", habit.name, habit.streak);
            }
        }
        HabitAction::Sync => {
            let user = ctx.user.clone();
            ctx.repo.fetch_habits(user.as_ref()).await?;
            println!("{} habits", ctx.repo.habits().len());
        }
    }

    ctx.save()
}
