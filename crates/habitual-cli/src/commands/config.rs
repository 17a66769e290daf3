//! Backend location and habit defaults stored in `config.toml`.

use clap::Subcommand;
use habitual_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get {
        /// remote.base_url, remote.timeout_secs, defaults.icon, defaults.color or defaults.frequency
        key: String,
    },
    /// Change one setting; the value is checked before it is saved
    Set {
        key: String,
        value: String,
    },
    /// Print every setting as `key = value`
    List {
        /// Print the whole config as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Go back offline with the stock habit defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key).ok_or_else(|| {
                format!("unknown key '{key}' (known: {})", Config::KEYS.join(", "))
            })?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, "config updated");
            println!("{key} = {}", config.get(&key).unwrap_or_default());
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }
            for (key, value) in config.entries() {
                println!("{key} = {value}");
            }
            let mode = if config.remote.is_online() {
                "online"
            } else {
                "offline"
            };
            println!("# mode: {mode}");
        }
        // No load here, so a config file that no longer parses can still be reset.
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset: offline, default habit icon/color/frequency");
        }
    }
    Ok(())
}
