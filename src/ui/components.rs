use console::Term;
use std::io::{self, Write};

use crate::core::Player;
use crate::ui::ThemeManager;

pub struct Display {
    term: Term,
    theme_manager: ThemeManager,
    text_width: usize,
}

impl Display {
    pub fn new(theme_manager: ThemeManager, text_width: usize) -> io::Result<Self> {
        Ok(Self {
            term: Term::stdout(),
            theme_manager,
            text_width,
        })
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        self.term.clear_screen()
    }

    pub fn show_title(&self, title: &str) -> io::Result<()> {
        let styled_title = self.theme_manager.apply_style(title, "title");

        let border = "═".repeat(self.text_width);
        let styled_border = self.theme_manager.apply_style(&border, "separator");

        writeln!(io::stdout(), "{}", styled_title)?;
        writeln!(io::stdout(), "{}", styled_border)?;
        writeln!(io::stdout())?;

        Ok(())
    }

    pub fn show_rules(&self, goal: u32, die_sides: u32) -> io::Result<()> {
        self.show_wrapped_text(
            &format!(
                "Each turn, a player keeps rolling a {}-sided die until either a 1 comes up \
                 or they choose to hold. Rolling a 1 wipes the round score and ends the turn; \
                 holding banks the round score for good. First player to bank {} wins!",
                die_sides, goal
            ),
            "info",
        )?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_turn_banner(&self, player: &Player) -> io::Result<()> {
        let banner = format!("🎲 {}'s turn", player.name);
        let styled = self.theme_manager.apply_style(&banner, "turn_banner");
        writeln!(io::stdout(), "{}", styled)?;

        let separator = "─".repeat(40);
        let styled_separator = self.theme_manager.apply_style(&separator, "separator");
        writeln!(io::stdout(), "{}", styled_separator)?;

        Ok(())
    }

    pub fn show_roll(&self, player_name: &str, value: u32) -> io::Result<()> {
        let text = format!("{} rolled a {}", player_name, value);
        let styled = self.theme_manager.apply_style(&text, "roll");
        writeln!(io::stdout(), "{}", styled)?;
        Ok(())
    }

    pub fn show_bust(&self, player_name: &str) -> io::Result<()> {
        let text = format!("{} rolled a 1 and lost their turn.", player_name);
        let styled = self.theme_manager.apply_style(&text, "roll_bust");
        writeln!(io::stdout(), "{}", styled)?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_turn_status(&self, round_total: u32, banked: u32) -> io::Result<()> {
        let round_text = format!("Current round total: {}", round_total);
        let styled_round = self.theme_manager.apply_style(&round_text, "round_total");
        writeln!(io::stdout(), "{}", styled_round)?;

        let banked_text = format!("Banked total: {}", banked);
        let styled_banked = self.theme_manager.apply_style(&banked_text, "banked");
        writeln!(io::stdout(), "{}", styled_banked)?;

        Ok(())
    }

    pub fn show_hold(&self, player_name: &str, amount: u32, new_total: u32) -> io::Result<()> {
        let text = format!("{} holds and banks {} (total: {}).", player_name, amount, new_total);
        let styled = self.theme_manager.apply_style(&text, "banked");
        writeln!(io::stdout(), "{}", styled)?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_scoreboard(&self, players: &[Player], goal: u32) -> io::Result<()> {
        let header = format!("Scores (first to {}):", goal);
        let styled_header = self.theme_manager.apply_style(&header, "info");
        writeln!(io::stdout(), "{}", styled_header)?;

        for player in players {
            let line = format!("   {}: {}", player.name, player.banked_score());
            let styled = self.theme_manager.apply_style(&line, "banked");
            writeln!(io::stdout(), "{}", styled)?;
        }

        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_winner(&self, player_name: &str) -> io::Result<()> {
        let text = format!("🏆 {} has won!", player_name);
        let styled = self.theme_manager.apply_style(&text, "winner");
        writeln!(io::stdout(), "{}", styled)?;
        Ok(())
    }

    pub fn show_message(&self, message: &str, style: &str) -> io::Result<()> {
        let styled_message = self.theme_manager.apply_style(message, style);
        writeln!(io::stdout(), "{}", styled_message)?;
        Ok(())
    }

    pub fn show_error(&self, error: &str) -> io::Result<()> {
        self.show_message(&format!("❌ {}", error), "error")
    }

    pub fn prompt_input(&self, prompt: &str) -> io::Result<String> {
        let styled_prompt = self.theme_manager.apply_style(prompt, "info");
        print!("{}", styled_prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    /// Ask "roll again?" until one of Y/y/N/n is read.
    ///
    /// Anything else prints an error and repeats the identical prompt; the
    /// retry loop never touches game state.
    pub fn prompt_roll_again(&self) -> io::Result<bool> {
        loop {
            let input = self.prompt_input("Do you want to roll again? Y/y or N/n ")?;

            match parse_decision(&input) {
                Some(choice) => return Ok(choice),
                None => {
                    self.show_error("Not a valid response...")?;
                }
            }
        }
    }

    pub fn wait_for_enter(&self) -> io::Result<()> {
        let styled_prompt = self
            .theme_manager
            .apply_style("Press Enter to continue...", "info");
        print!("{}", styled_prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(())
    }

    fn show_wrapped_text(&self, text: &str, style: &str) -> io::Result<()> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut current_line = String::new();

        for word in words {
            if current_line.len() + word.len() + 1 > self.text_width {
                if !current_line.is_empty() {
                    let styled_line = self.theme_manager.apply_style(&current_line, style);
                    writeln!(io::stdout(), "{}", styled_line)?;
                    current_line.clear();
                }
            }

            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }

        if !current_line.is_empty() {
            let styled_line = self.theme_manager.apply_style(&current_line, style);
            writeln!(io::stdout(), "{}", styled_line)?;
        }

        Ok(())
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        self.theme_manager.set_theme(theme_name)
    }

    pub fn get_available_themes(&self) -> Vec<String> {
        self.theme_manager.list_themes()
    }
}

/// The only accepted answers are exactly one of Y, y, N, n.
fn parse_decision(input: &str) -> Option<bool> {
    match input {
        "Y" | "y" => Some(true),
        "N" | "n" => Some(false),
        _ => None,
    }
}
