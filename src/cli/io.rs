use dialoguer::{theme::ColorfulTheme, Select};

use crate::wizard::{Confirmer, DiscardChoice, DiscardPrompt};

/// Asks the discard question on the terminal, focused on "keep editing".
pub struct TerminalConfirmer {
    theme: ColorfulTheme,
}

impl TerminalConfirmer {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalConfirmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm_discard(&mut self, prompt: &DiscardPrompt) -> DiscardChoice {
        let items = [prompt.keep_label, prompt.discard_label];
        let default = match prompt.default_choice {
            DiscardChoice::KeepEditing => 0,
            DiscardChoice::Discard => 1,
        };
        let selection = Select::with_theme(&self.theme)
            .with_prompt(format!("{} {}", prompt.title, prompt.message))
            .items(&items)
            .default(default)
            .interact();
        match selection {
            Ok(1) => DiscardChoice::Discard,
            // Escape or a terminal error keeps the draft.
            _ => DiscardChoice::KeepEditing,
        }
    }
}

/// Maps a typed answer onto a discard choice. Anything unrecognised keeps
/// the draft.
pub fn parse_discard_answer(answer: &str) -> DiscardChoice {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "discard" => DiscardChoice::Discard,
        _ => DiscardChoice::KeepEditing,
    }
}
