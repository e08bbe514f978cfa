use crate::direction::Direction;
use crate::error::ConfigError;
use crate::map::KnownMaze;
use crate::pose::{GridPoint, GridPose};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Position de départ de la souris et son orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartConfig {
    pub x: u8,
    pub y: u8,
    pub facing: Direction,
}

impl StartConfig {
    pub fn pose(&self) -> GridPose {
        GridPose::at(self.x, self.y, self.facing)
    }
}

/// Description du but : cellules explicites ou centre du labyrinthe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalConfig {
    /// La cellule centrale, ou le bloc 2x2 autour du centre quand les
    /// dimensions sont paires.
    Center,
    Cells(Vec<GridPoint>),
}

/// Configuration du labyrinthe lue en JSON, par ex.
///
/// ```json
/// { "width": 16, "height": 16,
///   "start": { "x": 0, "y": 15, "facing": "north" },
///   "goal": "center" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub width: u8,
    pub height: u8,
    pub start: StartConfig,
    #[serde(default = "default_goal")]
    pub goal: GoalConfig,
}

fn default_goal() -> GoalConfig {
    GoalConfig::Center
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            start: StartConfig {
                x: 0,
                y: 4,
                facing: Direction::North,
            },
            goal: GoalConfig::Center,
        }
    }
}

impl MazeConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Transforme la description du but en cellules.
    pub fn goals(&self) -> Vec<GridPoint> {
        match &self.goal {
            GoalConfig::Cells(cells) => cells.clone(),
            GoalConfig::Center => center_goals(self.width, self.height),
        }
    }

    /// Construit le modèle de connaissance décrit par cette configuration.
    pub fn build(&self) -> Result<KnownMaze, ConfigError> {
        KnownMaze::new(self.width, self.height, self.start.pose(), self.goals())
    }
}

/// Cellules les plus proches du centre d'une grille `width` x `height`.
pub fn center_goals(width: u8, height: u8) -> Vec<GridPoint> {
    let span = |n: u8| -> Vec<u8> {
        if n == 0 {
            Vec::new()
        } else if n % 2 == 0 {
            vec![n / 2 - 1, n / 2]
        } else {
            vec![n / 2]
        }
    };
    let xs = span(width);
    span(height)
        .into_iter()
        .flat_map(|y| xs.iter().map(move |&x| GridPoint::new(x, y)))
        .collect()
}
