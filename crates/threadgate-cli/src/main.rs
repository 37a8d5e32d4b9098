mod keepalive;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "threadgate", about = "Scheduled publication of private Discord threads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and run the scheduler
    Run {
        /// Scheduler tick in seconds (overrides TICK_INTERVAL_SECS)
        #[arg(short, long)]
        tick: Option<u64>,
    },
    /// Load and print the configuration without connecting
    Health,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { tick } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                let mut config = threadgate_config::load()?;
                if let Some(secs) = tick {
                    config.tick_interval = std::time::Duration::from_secs(secs);
                }

                keepalive::spawn(config.keep_alive_port);

                threadgate_discord::DiscordBot::new(config).run().await
            })?;
        }
        Commands::Health => {
            let config = threadgate_config::load()?;
            println!("threadgate configuration OK");
            println!("  intake channel:  {}", config.schedule_channel_id);
            println!("  thread channel:  {}", config.thread_channel_id);
            println!("  tick interval:   {:?}", config.tick_interval);
            println!("  audience roles:  {}", config.subscription_roles.len());
            println!("  keep-alive port: {}", config.keep_alive_port);
        }
    }

    Ok(())
}
