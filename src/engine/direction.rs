//! Resolution of a completion signal into a left/right decision

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Committed swipe outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Pass
    Left,
    /// Pick
    Right,
}

impl SwipeDirection {
    pub fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }

    pub fn is_pick(self) -> bool {
        self == SwipeDirection::Right
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction reported by the drag library's "swiped" event.
///
/// Only `Left` and `Right` are trusted; vertical tokens fall back to the
/// last horizontal delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeToken {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeToken {
    pub fn horizontal(self) -> Option<SwipeDirection> {
        match self {
            SwipeToken::Left => Some(SwipeDirection::Left),
            SwipeToken::Right => Some(SwipeDirection::Right),
            SwipeToken::Up | SwipeToken::Down => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized swipe token: {0:?}")]
pub struct ParseTokenError(pub String);

impl FromStr for SwipeToken {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(SwipeToken::Left),
            "right" => Ok(SwipeToken::Right),
            "up" => Ok(SwipeToken::Up),
            "down" => Ok(SwipeToken::Down),
            _ => Err(ParseTokenError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub direction: SwipeDirection,
    /// The token was missing or vertical and `last_delta_x` decided
    pub used_fallback: bool,
}

/// Resolves a completion signal into a definitive direction.
///
/// A horizontal token is trusted verbatim. Anything else falls back to the
/// sign of the most recent horizontal delta, with zero counting as right.
pub fn resolve(token: Option<SwipeToken>, last_delta_x: f32) -> Resolution {
    if let Some(direction) = token.and_then(SwipeToken::horizontal) {
        return Resolution {
            direction,
            used_fallback: false,
        };
    }

    // `-0.0 >= 0.0` holds, so a signed zero also resolves right.
    let direction = if last_delta_x >= 0.0 {
        SwipeDirection::Right
    } else {
        SwipeDirection::Left
    };

    Resolution {
        direction,
        used_fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trusted_tokens_win_over_delta() {
        let r = resolve(Some(SwipeToken::Left), 250.0);
        assert_eq!(r.direction, SwipeDirection::Left);
        assert!(!r.used_fallback);

        let r = resolve(Some(SwipeToken::Right), -250.0);
        assert_eq!(r.direction, SwipeDirection::Right);
        assert!(!r.used_fallback);
    }

    #[test]
    fn test_vertical_token_falls_back_to_delta() {
        let r = resolve(Some(SwipeToken::Up), -3.0);
        assert_eq!(r.direction, SwipeDirection::Left);
        assert!(r.used_fallback);

        let r = resolve(Some(SwipeToken::Down), 40.0);
        assert_eq!(r.direction, SwipeDirection::Right);
        assert!(r.used_fallback);
    }

    #[test]
    fn test_fallback_sign_for_many_deltas() {
        for dx in [-1000.0, -40.0, -0.5, -f32::MIN_POSITIVE] {
            assert_eq!(resolve(None, dx).direction, SwipeDirection::Left, "dx={dx}");
        }
        for dx in [0.0, -0.0, f32::MIN_POSITIVE, 0.5, 40.0, 1000.0] {
            assert_eq!(resolve(None, dx).direction, SwipeDirection::Right, "dx={dx}");
        }
    }

    #[test]
    fn test_token_parsing() {
        assert_eq!("left".parse::<SwipeToken>(), Ok(SwipeToken::Left));
        assert_eq!(" RIGHT ".parse::<SwipeToken>(), Ok(SwipeToken::Right));
        assert_eq!("up".parse::<SwipeToken>(), Ok(SwipeToken::Up));
        assert_eq!("down".parse::<SwipeToken>(), Ok(SwipeToken::Down));
        assert!("null".parse::<SwipeToken>().is_err());
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(SwipeDirection::Left.sign(), -1.0);
        assert_eq!(SwipeDirection::Right.sign(), 1.0);
        assert!(SwipeDirection::Right.is_pick());
        assert!(!SwipeDirection::Left.is_pick());
        assert_eq!(
            serde_json::to_string(&SwipeDirection::Left).unwrap(),
            "\"left\""
        );
    }
}
