use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// What a board generation pass was trying to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationTarget {
    Ladders,
    ScoreNodes,
}

impl GenerationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationTarget::Ladders => "ladders",
            GenerationTarget::ScoreNodes => "score nodes",
        }
    }
}

/// Every error the engine can return.
///
/// `InvalidPlayerCount`, `Generation` and `InvalidBoard` fail a session start.
/// The remaining variants reject a request made at the wrong moment; they leave
/// state untouched and the caller may simply try again later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameError {
    /// The roster must hold between two and four players.
    InvalidPlayerCount {
        /// Number of names supplied.
        count: usize,
    },
    /// Random placement did not converge within the attempt cap.
    Generation {
        target: GenerationTarget,
        attempts: u32,
    },
    /// A caller-supplied board breaks the placement rules.
    InvalidBoard {
        reason: String,
    },
    /// No session is running (never started, or it ended with a win).
    NotStarted,
    /// A roll is still being applied.
    TurnInProgress,
    /// The current player must first accept or decline a bonus roll.
    BonusDecisionPending,
    /// `resolve_bonus` was called with no bonus on offer.
    NoBonusPending,
    /// A new round can only follow a win.
    RoundNotOver,
}

impl GameError {
    /// True for rejections that leave the session intact.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GameError::NotStarted
                | GameError::TurnInProgress
                | GameError::BonusDecisionPending
                | GameError::NoBonusPending
                | GameError::RoundNotOver
        )
    }
}

impl Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPlayerCount { count } => {
                write!(f, "Invalid player count {}: a game needs 2 to 4 players", count)
            }
            GameError::Generation { target, attempts } => {
                write!(
                    f,
                    "Could not place {} after {} attempts",
                    target.as_str(),
                    attempts
                )
            }
            GameError::InvalidBoard { reason } => write!(f, "Invalid board: {}", reason),
            GameError::NotStarted => write!(f, "No game is running"),
            GameError::TurnInProgress => write!(f, "A turn is already in progress"),
            GameError::BonusDecisionPending => {
                write!(f, "The bonus roll offer must be answered first")
            }
            GameError::NoBonusPending => write!(f, "No bonus roll is on offer"),
            GameError::RoundNotOver => {
                write!(f, "A new round can only start after someone wins")
            }
        }
    }
}

impl Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_details() {
        let err = GameError::InvalidPlayerCount { count: 5 };
        assert!(err.to_string().contains('5'));

        let err = GameError::Generation {
            target: GenerationTarget::Ladders,
            attempts: 10,
        };
        assert_eq!(err.to_string(), "Could not place ladders after 10 attempts");
    }

    #[test]
    fn rejections_are_non_fatal() {
        assert!(GameError::TurnInProgress.is_rejection());
        assert!(GameError::NotStarted.is_rejection());
        assert!(!GameError::InvalidPlayerCount { count: 1 }.is_rejection());
    }
}
