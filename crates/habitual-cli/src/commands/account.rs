use clap::Subcommand;
use habitual_core::User;

use crate::context::Context;

#[derive(Subcommand)]
pub enum AccountAction {
    /// Sign in as a user
    Login {
        /// User id issued by the backend
        id: String,
        /// Account email
        email: String,
    },
    /// Sign out and drop local habits and notifications
    Logout,
    /// Show the signed-in user
    Whoami,
}

pub async fn run(action: AccountAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = Context::open()?;

    match action {
        AccountAction::Login { id, email } => {
            let user = User::new(id, email);
            ctx.db.set_session_user(Some(&user))?;
            if ctx.config.remote.is_online() {
                ctx.repo.fetch_habits(Some(&user)).await?;
            }
            tracing::info!(user = %user.id, "signed in");
            println!("signed in as {}", user.email);
        }
        AccountAction::Logout => {
            ctx.db.set_session_user(None)?;
            ctx.repo.end_session();
            println!("signed out");
        }
        AccountAction::Whoami => {
            match &ctx.user {
                Some(user) => println!("{} ({})", user.email, user.id),
                None => println!("not signed in"),
            }
            return Ok(());
        }
    }

    ctx.save()
}
