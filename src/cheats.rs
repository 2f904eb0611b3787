//! Key-sequence cheat matchers
//!
//! Each registered phrase is a tiny finite-state machine: state is the
//! position in the expected sequence, a mismatch resets it (re-checking the
//! head, so "GGOD" still fires "GOD"), completion yields the action.
//! Nothing here knows about the input backend; callers feed decoded keys.

use crate::input::MatchAction;

/// Matcher for one cheat phrase
#[derive(Debug, Clone)]
pub struct CheatMatcher {
    name: &'static str,
    phrase: Vec<char>,
    pos: usize,
    action: MatchAction,
}

impl CheatMatcher {
    /// `phrase` is matched case-insensitively, one key at a time.
    pub fn new(name: &'static str, phrase: &str, action: MatchAction) -> Self {
        Self {
            name,
            phrase: phrase.chars().map(|c| c.to_ascii_uppercase()).collect(),
            pos: 0,
            action,
        }
    }

    /// Advance on one key; returns the action when the phrase completes.
    pub fn feed(&mut self, key: char) -> Option<MatchAction> {
        let key = key.to_ascii_uppercase();

        if self.phrase.get(self.pos) == Some(&key) {
            self.pos += 1;
        } else if self.phrase.first() == Some(&key) {
            // mismatch, but the key restarts the phrase
            self.pos = 1;
        } else {
            self.pos = 0;
        }

        if self.pos == self.phrase.len() {
            self.pos = 0;
            log::info!("cheat fired: {}", self.name);
            return Some(self.action);
        }
        None
    }
}
