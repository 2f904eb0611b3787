//! Decoded input commands and the action types they resolve to
//!
//! The host owns event polling and key mapping. By the time anything
//! reaches the core it is already a discrete [`Command`]; scenes translate
//! commands into either a [`GameAction`] (scene transitions, settings) or a
//! [`MatchAction`] (mutations of the running match). Each action kind has a
//! single executor function, so no command captures mutable references.

use crate::sim::state::Player;

/// Vertical movement direction for paddle intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// A discrete input command, already decoded from raw events by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MovePaddle { player: Player, dir: Vertical },
    StopPaddle { player: Player, dir: Vertical },
    ToggleTrail,
    TogglePhoto,
    Pause,
    Screenshot,
    /// Menu: confirm the highlighted action
    Start,
    /// Menu/pause: leave the current scene
    Quit,
    CycleDifficulty,
    Resume,
    BackToMenu,
    /// Raw key press, fed to the cheat matchers
    Key(char),
}

/// Actions interpreted at the game level (settings and scene transitions)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    StartGame,
    QuitGame,
    CycleDifficulty,
    Resume,
    BackToMenu,
    Screenshot,
}

/// Actions interpreted against the running match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    MovePaddle { player: Player, dir: Vertical },
    StopPaddle { player: Player, dir: Vertical },
    ToggleTrail,
    TogglePhoto,
    ToggleGodMode(Player),
    ToggleSlowMo,
    ToggleCpuVsCpu,
}
