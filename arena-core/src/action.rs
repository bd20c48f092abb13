use core::fmt;

use serde::{Deserialize, Serialize};

/// One command per tick. The lowercase token doubles as the URL segment the
/// arena expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Fire,
    Move,
    Left,
    Right,
    Noop,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Fire,
        Action::Move,
        Action::Left,
        Action::Right,
        Action::Noop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Fire => "fire",
            Action::Move => "move",
            Action::Left => "left",
            Action::Right => "right",
            Action::Noop => "noop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_url_tokens() {
        for action in Action::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }
}
