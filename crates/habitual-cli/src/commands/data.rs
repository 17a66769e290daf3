use std::path::PathBuf;

use clap::Subcommand;

use crate::context::Context;

#[derive(Subcommand)]
pub enum DataAction {
    /// Write habits and preferences as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace habits and preferences from an export file
    Import {
        /// Export file to read
        file: PathBuf,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = Context::open()?;

    match action {
        DataAction::Export { output } => {
            let text = ctx.repo.export_user_data()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    println!("exported to {}", path.display());
                }
                None => println!("{text}"),
            }
            Ok(())
        }
        DataAction::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            if !ctx.repo.import_user_data(&text) {
                return Err(format!("{} is not a valid export", file.display()).into());
            }
            println!("imported {} habits", ctx.repo.habits().len());
            ctx.save()
        }
    }
}
