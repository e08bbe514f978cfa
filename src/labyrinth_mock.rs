use crate::config::{GoalConfig, MazeConfig, StartConfig};
use crate::direction::Direction;
use crate::error::LabyrinthError;
use crate::labyrinth::Labyrinth;

/// Exemple 5x5 : but dans la cellule centrale, départ dans le coin Sud-Ouest
/// face au Nord.
pub const SAMPLE_5X5: &str = "\
+--+--+--+--+--+
|     |        |
+  +  +  +--+  +
|  |     |     |
+  +--+  +  +  +
|  |     |  |  |
+  +  +--+  +  +
|     |     |  |
+--+  +--+--+  +
|              |
+--+--+--+--+--+";

/// Exemple 6x6 dont le but est le bloc central 2x2.
pub const SAMPLE_6X6: &str = "\
+--+--+--+--+--+--+
|  |     |        |
+  +  +--+  +  +  +
|  |        |  |  |
+  +  +--+  +  +--+
|        |        |
+--+--+  +--+--+  +
|     |           |
+  +--+--+--+  +  +
|  |           |  |
+  +  +--+  +--+  +
|        |        |
+--+--+--+--+--+--+";

pub fn sample_labyrinth() -> Result<Labyrinth, LabyrinthError> {
    SAMPLE_5X5.parse()
}

pub fn sample_labyrinth_6x6() -> Result<Labyrinth, LabyrinthError> {
    SAMPLE_6X6.parse()
}

/// Configuration qui va avec [`SAMPLE_6X6`].
pub fn sample_config_6x6() -> MazeConfig {
    MazeConfig {
        width: 6,
        height: 6,
        start: StartConfig {
            x: 0,
            y: 5,
            facing: Direction::North,
        },
        goal: GoalConfig::Center,
    }
}
