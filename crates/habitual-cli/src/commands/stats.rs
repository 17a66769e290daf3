use clap::Args;

use crate::context::Context;

#[derive(Args)]
pub struct StatsArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open()?;
    let stats = ctx.repo.stats();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Habits:          {}", stats.total_habits);
    println!(
        "Done today:      {} ({}%)",
        stats.completed_today,
        stats.completion_rate()
    );
    println!("Top streak:      {}", stats.top_streak());
    let leader = stats
        .most_consistent
        .as_deref()
        .and_then(|id| ctx.repo.habit(id))
        .map(|h| h.name.as_str())
        .unwrap_or("-");
    println!("Most consistent: {leader}");
    Ok(())
}
