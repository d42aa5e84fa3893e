use dialoguer::{Input, Select};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::core::{GameEngine, GameRng};
use crate::ui::{Display, ThemeManager};
use crate::utils::{GameError, GameResult};

pub struct GameInterface {
    display: Display,
    config: Config,
    rng: GameRng,
}

impl GameInterface {
    pub fn new(config: Config, rng: GameRng) -> GameResult<Self> {
        info!("Initializing game interface");

        let theme_manager = ThemeManager::new();
        let mut display = Display::new(theme_manager, config.ui.text_width)
            .map_err(|e| GameError::configuration(format!("Failed to create display: {}", e)))?;

        // Set theme if configured
        if !display.set_theme(&config.ui.theme) {
            warn!("Unknown theme '{}', using default", config.ui.theme);
        }

        Ok(Self {
            display,
            config,
            rng,
        })
    }

    pub async fn run(&mut self) -> GameResult<()> {
        info!("Starting game interface");

        loop {
            match self.show_main_menu().await {
                Ok(should_continue) => {
                    if !should_continue {
                        break;
                    }
                }
                Err(e) => {
                    error!("Main menu error: {}", e);
                    self.display
                        .show_error(&format!("An error occurred: {}", e))
                        .ok();
                    self.display.wait_for_enter().ok();
                }
            }
        }

        self.display.show_message("Thanks for playing!", "success").ok();

        Ok(())
    }

    pub async fn show_main_menu(&mut self) -> GameResult<bool> {
        self.display.clear_screen().ok();
        self.show_game_title()?;

        let choices = vec!["🎲 Start New Game", "🚪 Exit"];

        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&choices)
            .default(0)
            .interact()
            .map_err(|e| GameError::configuration(format!("Menu selection error: {}", e)))?;

        match selection {
            0 => self.play_game().await?,
            1 => return Ok(false), // Exit
            _ => unreachable!(),
        }

        Ok(true)
    }

    fn show_game_title(&mut self) -> GameResult<()> {
        // ASCII art title
        let title = r#"
╔═╗┬┌─┐  ╔╦╗┬┌─┐┌─┐
╠═╝││ ┬   ║║││  ├┤
╩  ┴└─┘  ═╩╝┴└─┘└─┘
"#;

        self.display.show_title(title)?;
        self.display
            .show_message("Welcome to the game of Pig!", "info")?;
        self.display
            .show_rules(self.config.game.goal, self.config.game.die_sides)?;
        self.display
            .show_message(&format!("Version {}", crate::VERSION), "info")?;

        let separator = "═".repeat(self.config.ui.text_width);
        self.display.show_message(&separator, "separator")?;
        println!();

        Ok(())
    }

    async fn play_game(&mut self) -> GameResult<()> {
        let player_names = self.collect_player_names()?;

        let mut engine =
            GameEngine::new(&self.config.game, player_names, self.rng.fork())?;
        engine.start().await?;

        while !engine.is_over() {
            self.play_turn(&mut engine).await?;
            if !engine.is_over() {
                self.display.show_scoreboard(engine.players(), engine.goal()).ok();
            }
        }

        let winner_name = engine
            .winner()
            .map(|p| p.name.clone())
            .ok_or_else(|| GameError::game("the game ended without a winner"))?;

        self.display.show_winner(&winner_name)?;
        self.display.show_scoreboard(engine.players(), engine.goal()).ok();
        self.display.wait_for_enter()?;

        Ok(())
    }

    fn collect_player_names(&self) -> GameResult<Vec<String>> {
        let mut names = Vec::with_capacity(self.config.game.players);

        for index in 0..self.config.game.players {
            let name: String = Input::new()
                .with_prompt(format!("Player {}, what is your name?", index + 1))
                .validate_with(|input: &String| -> Result<(), &str> {
                    if input.trim().is_empty() {
                        Err("Please enter a name")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()
                .map_err(|e| GameError::input(format!("Name input error: {}", e)))?;

            names.push(name.trim().to_string());
        }

        Ok(names)
    }

    /// Drive one player's turn: roll, show, ask, until a 1 or a hold.
    async fn play_turn(&mut self, engine: &mut GameEngine) -> GameResult<()> {
        let player_name = engine.active_player().name.clone();

        println!();
        self.display.show_turn_banner(engine.active_player()).ok();

        loop {
            let roll = engine.roll().await?;
            self.display.show_roll(&player_name, roll.value).ok();

            if self.config.get_animation_delay_ms() > 0 {
                sleep(Duration::from_millis(self.config.get_animation_delay_ms())).await;
            }

            if roll.busted {
                self.display.show_bust(&player_name).ok();
                return Ok(());
            }

            self.display
                .show_turn_status(roll.round_total, engine.active_player().banked_score())
                .ok();

            if self
                .display
                .prompt_roll_again()
                .map_err(|e| GameError::input(format!("Decision input error: {}", e)))?
            {
                engine.decide(true).await?;
            } else {
                let banked_before = engine.active_player().banked_score();
                let outcome = engine
                    .decide(false)
                    .await?
                    .ok_or_else(|| GameError::turn("hold did not end the turn"))?;

                self.display
                    .show_hold(
                        &player_name,
                        outcome.amount_to_bank,
                        banked_before + outcome.amount_to_bank,
                    )
                    .ok();
                return Ok(());
            }
        }
    }
}
