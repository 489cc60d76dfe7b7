//! Main menu: difficulty selection and the best-score table

use crate::difficulty::Difficulty;
use crate::store::HighScores;

/// What selecting a menu item does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame(Difficulty),
    Quit,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

/// Menu state
#[derive(Debug, Clone)]
pub struct Menu {
    pub selected: usize,
    pub items: Vec<MenuItem>,
    /// Best scores shown under the items, reloaded whenever the menu opens
    pub high_scores: HighScores,
}

impl Menu {
    /// Build the main menu with `initial` difficulty highlighted
    pub fn new(initial: Difficulty, high_scores: HighScores) -> Self {
        let mut items: Vec<MenuItem> = Difficulty::all()
            .iter()
            .map(|&difficulty| MenuItem {
                label: difficulty.name().to_string(),
                action: MenuAction::StartGame(difficulty),
            })
            .collect();
        items.push(MenuItem {
            label: "Quit".to_string(),
            action: MenuAction::Quit,
        });

        let selected = items
            .iter()
            .position(|item| item.action == MenuAction::StartGame(initial))
            .unwrap_or(0);

        Self {
            selected,
            items,
            high_scores,
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        } else {
            self.selected = 0;
        }
    }

    pub fn select(&self) -> Option<MenuAction> {
        self.items.get(self.selected).map(|item| item.action)
    }

    /// Hint line for the highlighted item
    pub fn selected_description(&self) -> Option<&'static str> {
        match self.select()? {
            MenuAction::StartGame(difficulty) => Some(difficulty.description()),
            MenuAction::Quit => None,
        }
    }
}
