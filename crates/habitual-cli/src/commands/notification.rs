use clap::Subcommand;

use crate::context::Context;

#[derive(Subcommand)]
pub enum NotificationAction {
    /// List notifications, newest last
    List {
        /// Only unread ones
        #[arg(long)]
        unread: bool,
    },
    /// Mark a notification as read
    Read {
        /// Notification id
        id: String,
    },
    /// Drop every read notification
    Clear,
}

pub fn run(action: NotificationAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = Context::open()?;

    match action {
        NotificationAction::List { unread } => {
            for n in ctx.repo.notifications() {
                if unread && n.read {
                    continue;
                }
                let mark = if n.read { " " } else { "*" };
                println!(
                    "{mark} {}  {}  {}",
                    n.id,
                    n.created_at.format("%Y-%m-%d %H:%M"),
                    n.message
                );
            }
            println!("{} unread", ctx.repo.unread_count());
            return Ok(());
        }
        NotificationAction::Read { id } => {
            ctx.repo.mark_notification_read(&id);
        }
        NotificationAction::Clear => {
            let removed = ctx.repo.clear_read_notifications();
            println!("removed {removed}");
        }
    }

    ctx.save()
}
