//! Shareable game state carried in a URL query string.
//!
//! A link holds the serialized position plus the mode and cosmetic options,
//! so loading it reconstructs the game, including whose turn it is.

use thiserror::Error;
use tracing::debug;
use url::{form_urlencoded, Url};

use crate::game_state::chess_types::*;
use crate::utils::fen_parser::FenError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("invalid game link: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid position in game link: {0}")]
    InvalidFen(#[from] FenError),
}

pub type LinkResult<T> = Result<T, LinkError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLink {
    /// Serialized position; `None` means the standard starting position.
    pub fen: Option<String>,
    /// Raw game mode value (see `GameMode::from_param`).
    pub game: i64,
    pub play_as: Color,
    pub piece_set: Option<String>,
}

impl Default for GameLink {
    fn default() -> Self {
        Self {
            fen: None,
            game: 0,
            play_as: Color::Light,
            piece_set: None,
        }
    }
}

impl GameLink {
    /// Reads a link from either a full URL or a bare query string
    /// (with or without the leading `?`). Unknown keys are ignored. `game`
    /// is read from its leading integer (`3abc` is `3`); without one it
    /// counts as `0`.
    pub fn parse(link: &str) -> LinkResult<Self> {
        let link = link.trim();
        let pairs: Vec<(String, String)> = if link.contains("://") {
            Url::parse(link)?.query_pairs().into_owned().collect()
        } else {
            form_urlencoded::parse(link.trim_start_matches('?').as_bytes())
                .into_owned()
                .collect()
        };

        let mut out = GameLink::default();
        for (key, value) in pairs {
            match key.as_str() {
                "fen" if !value.is_empty() => out.fen = Some(value),
                "game" => {
                    out.game = leading_integer(&value).unwrap_or_else(|| {
                        debug!(%value, "unreadable game mode in link, using 0");
                        0
                    })
                }
                "play_as" => {
                    out.play_as = if value == "b" {
                        Color::Dark
                    } else {
                        Color::Light
                    }
                }
                "piece_set" if !value.is_empty() => out.piece_set = Some(value),
                _ => {}
            }
        }

        if let Some(fen) = &out.fen {
            // Reject positions that cannot be loaded up front.
            Board::from_fen(fen)?;
        }
        Ok(out)
    }

    /// `base` with its query replaced by this link.
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(Some(&self.to_query_string()));
        url.set_fragment(None);
        url
    }

    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(fen) = &self.fen {
            query.append_pair("fen", fen);
        }
        query.append_pair("game", &self.game.to_string());
        query.append_pair("play_as", &self.play_as.code().to_string());
        if let Some(piece_set) = &self.piece_set {
            query.append_pair("piece_set", piece_set);
        }
        query.finish()
    }

    /// Rebuilds the linked position as a history root.
    pub fn position(&self) -> LinkResult<PositionRef> {
        Ok(match &self.fen {
            Some(fen) => Position::from_fen(fen)?,
            None => Position::new_game()?,
        })
    }
}

/// Optional sign and digits at the start of `value`, after leading spaces.
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let sign_len = usize::from(value.starts_with(|c: char| c == '+' || c == '-'));
    let digits = value[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    value[..sign_len + digits].parse().ok()
}
