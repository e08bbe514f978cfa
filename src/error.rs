//! Erreurs de construction et de chargement des labyrinthes.

use crate::pose::GridPoint;
use thiserror::Error;

/// Paramètres invalides pour le modèle de connaissance.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("maze dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: u8, height: u8 },

    /// Les coûts pourraient dépasser 16 bits sur cette grille.
    #[error("maze of {width}x{height} cells is too large for the cost field")]
    GridTooLarge { width: u8, height: u8 },

    #[error("start {0} lies outside the maze")]
    StartOutOfBounds(GridPoint),

    #[error("goal set is empty")]
    NoGoal,

    #[error("goal {0} lies outside the maze")]
    GoalOutOfBounds(GridPoint),

    #[error("could not read configuration {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Erreurs de lecture d'un labyrinthe de référence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabyrinthError {
    #[error("maze text is empty")]
    Empty,

    #[error("maze text must have an odd number of lines (got {0})")]
    LineCount(usize),

    /// La première ligne ne décrit pas un nombre entier de cellules.
    #[error("first line has {0} characters, which does not describe whole cells")]
    CellWidth(usize),

    #[error("line {line} has {found} characters, expected {expected}")]
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("maze of {width}x{height} cells exceeds the supported size")]
    TooLarge { width: usize, height: usize },

    #[error("unexpected character {found:?} at line {line}, column {column}")]
    UnexpectedChar {
        line: usize,
        column: usize,
        found: char,
    },
}
