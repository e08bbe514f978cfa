use crate::config::MazeConfig;
use crate::error::ConfigError;
use crate::map::{KnownMaze, Phase};
use crate::navigation::Step;
use crate::pose::{GridPoint, GridPose};
use crate::sensor::{Reading, Sensors};

/// La souris : sa pose, sa carte et le chemin parcouru.
#[derive(Debug, Clone)]
pub struct Mouse {
    pose: GridPose,
    maze: KnownMaze,
    /// Chemin sans boucle du départ à la cellule courante
    path: Vec<GridPoint>,
}

impl Mouse {
    /// Pose une souris sur le départ de `maze`.
    pub fn new(maze: KnownMaze) -> Self {
        let pose = maze.start();
        Self {
            pose,
            maze,
            path: vec![pose.position],
        }
    }

    pub fn from_config(config: &MazeConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.build()?))
    }

    /// Transmet `reading` à la carte et renvoie le prochain pas, sans
    /// bouger.
    pub fn decide(&mut self, reading: &Reading) -> Step {
        self.maze.update(&self.pose, reading);
        self.maze.next_goal(&self.pose, false)
    }

    /// Exécute un pas renvoyé par [`Mouse::decide`].
    pub fn apply(&mut self, step: Step) {
        if let Step::Advance(pose) = step {
            self.record_position(pose.position);
        }
        self.pose = step.pose();
    }

    /// Un cycle complet : lire, décider, bouger.
    pub fn step(&mut self, sensors: &mut impl Sensors) -> Step {
        let reading = sensors.read(&self.pose);
        let step = self.decide(&reading);
        self.apply(step);
        step
    }

    /// Revenir sur une cellule du chemin supprime la boucle qui suit.
    fn record_position(&mut self, position: GridPoint) {
        if let Some(index) = self.path.iter().position(|p| *p == position) {
            self.path.truncate(index + 1);
        } else {
            self.path.push(position);
        }
    }

    pub fn pose(&self) -> GridPose {
        self.pose
    }

    pub fn maze(&self) -> &KnownMaze {
        &self.maze
    }

    pub fn path(&self) -> &[GridPoint] {
        &self.path
    }

    pub fn phase(&self) -> Phase {
        self.maze.phase()
    }
}
