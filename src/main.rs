use anyhow::Result;
use clap::Parser;
use pig_dice_game::config::CliConfig;
use pig_dice_game::{Config, GameInterface, GameRng, VERSION};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pig-dice")]
#[command(about = "The classic press-your-luck dice game")]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Banked score a player must reach to win
    #[arg(short, long)]
    goal: Option<u32>,

    /// Dice seed for reproducible games
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("pig_dice_game={},warn", log_level))
        .init();

    info!("Starting Pig Dice v{}", VERSION);

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => Config::from_file(&config_path)?,
        None => Config::default(),
    };
    config.merge_with_cli(CliConfig {
        goal: cli.goal,
        debug: cli.debug,
        ..Default::default()
    });
    config.validate()?;

    // Seed the dice once for the whole session
    let rng = match cli.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    info!("Dice seed: {}", rng.seed());

    let mut game_interface = GameInterface::new(config, rng)?;

    if let Err(e) = game_interface.run().await {
        error!("Game error: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }

    info!("Game session ended");
    Ok(())
}
