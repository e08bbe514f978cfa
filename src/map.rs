use crate::cell::{Cell, UNREACHED};
use crate::direction::Direction;
use crate::error::ConfigError;
use crate::pose::{GridPoint, GridPose};
use crate::route::BestRoute;
use crate::sensor::{Reading, Wall};
use crate::walls::WallEvidence;
use log::info;
use std::fmt;

/// Phase de navigation de la souris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Découverte du labyrinthe en allant vers le but.
    Exploring,
    /// But atteint, la carte continue de se remplir sur le retour.
    Returning,
    /// Retour au départ : la carte est figée et la meilleure route rejouée.
    SpeedRun,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Exploring => "exploring",
            Phase::Returning => "returning",
            Phase::SpeedRun => "speed run",
        };
        f.write_str(name)
    }
}

/// Carte du labyrinthe telle que la souris la connaît.
///
/// Contient les indices de murs de chaque cellule, le champ de coût vers le
/// but, la phase de navigation et la meilleure route trouvée. Les cellules
/// sont rangées ligne par ligne ; `y` croît vers le Sud.
///
/// Pendant le retour, un second champ donne le coût jusqu'au départ. Il sert
/// à sortir d'une cellule but qui n'est pas l'extrémité de la route.
#[derive(Debug, Clone)]
pub struct KnownMaze {
    pub(crate) width: u8,
    pub(crate) height: u8,
    pub(crate) cells: Vec<Cell>,
    pub(crate) start: GridPose,
    pub(crate) goals: Vec<GridPoint>,
    pub(crate) exploring: bool,
    pub(crate) returning: bool,
    pub(crate) best_route: BestRoute,
    pub(crate) home: Vec<u16>,
}

impl KnownMaze {
    /// Crée le modèle d'un labyrinthe `width` x `height`.
    ///
    /// Les bords sont murés, les murs intérieurs supposés absents, et le champ
    /// de coût est calculé une première fois.
    pub fn new(
        width: u8,
        height: u8,
        start: GridPose,
        goals: impl IntoIterator<Item = GridPoint>,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if 2 * u32::from(width) * u32::from(height) >= u32::from(UNREACHED) {
            return Err(ConfigError::GridTooLarge { width, height });
        }

        let inside = |p: GridPoint| p.x < width && p.y < height;
        if !inside(start.position) {
            return Err(ConfigError::StartOutOfBounds(start.position));
        }

        let mut goals: Vec<GridPoint> = goals.into_iter().collect();
        if let Some(outside) = goals.iter().find(|g| !inside(**g)) {
            return Err(ConfigError::GoalOutOfBounds(*outside));
        }
        goals.sort_by_key(|g| (g.y, g.x));
        goals.dedup();
        if goals.is_empty() {
            return Err(ConfigError::NoGoal);
        }

        let count = usize::from(width) * usize::from(height);
        let mut maze = Self {
            width,
            height,
            cells: vec![Cell::new(); count],
            start,
            goals,
            exploring: true,
            returning: false,
            best_route: BestRoute::new(),
            home: vec![UNREACHED; count],
        };

        for y in 0..height {
            maze.cell_at_mut(GridPoint::new(0, y)).walls.seal(Direction::West);
            maze.cell_at_mut(GridPoint::new(width - 1, y))
                .walls
                .seal(Direction::East);
        }
        for x in 0..width {
            maze.cell_at_mut(GridPoint::new(x, 0)).walls.seal(Direction::North);
            maze.cell_at_mut(GridPoint::new(x, height - 1))
                .walls
                .seal(Direction::South);
        }

        maze.calculate_costmap();
        Ok(maze)
    }

    /// Met à jour la carte avec les mesures d'un cycle, prises à `pose`.
    ///
    /// La phase avance d'abord ; une fois le labyrinthe résolu, la carte est
    /// figée et les mesures ignorées. Sinon les indices sont enregistrés et le
    /// champ de coût recalculé.
    pub fn update(&mut self, pose: &GridPose, reading: &Reading) {
        self.advance_phase(pose);

        if !self.exploring {
            return;
        }

        let here = pose.position;
        let heading = pose.direction;

        self.record_wall(here, heading.turn_left(), reading.left);
        self.record_wall(here, heading, reading.front);
        self.record_wall(here, heading.turn_right(), reading.right);

        if reading.front != Wall::Wall {
            if let Some(ahead) = self.neighbor(here, heading) {
                self.record_wall(ahead, heading.turn_left(), reading.front_left);
                self.record_wall(ahead, heading.turn_right(), reading.front_right);
            }
        }

        self.calculate_costmap();
    }

    fn advance_phase(&mut self, pose: &GridPose) {
        if self.is_goal(pose.position) {
            if !self.returning && self.exploring {
                info!("goal reached at {}, returning to start", pose.position);
            }
            self.returning = true;
        } else if self.returning && *pose == self.start.turned_back() {
            if self.exploring {
                info!(
                    "back at start, best route has {} cells",
                    self.best_route.len()
                );
            }
            self.exploring = false;
            self.returning = false;
        }
    }

    /// Enregistre une observation du mur `side` de `position`, et la même
    /// observation vue de la cellule voisine si elle existe.
    fn record_wall(&mut self, position: GridPoint, side: Direction, reading: Wall) {
        let Some(wall) = reading.as_evidence() else {
            return;
        };
        let Some(cell) = self.cell_mut(position) else {
            return;
        };
        cell.walls.record(side, wall);

        if let Some(next) = self.neighbor(position, side) {
            self.cell_at_mut(next).walls.record(side.turn_back(), wall);
        }
    }

    /// Vérifie si le mur `side` de `position` est supposé présent.
    ///
    /// Les bords qui sortent de la grille sont toujours des murs.
    pub fn has_wall(&self, position: GridPoint, side: Direction) -> bool {
        match (self.cell(position), self.neighbor(position, side)) {
            (Some(cell), Some(_)) => cell.walls.is_wall(side),
            _ => true,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.exploring, self.returning) {
            (false, _) => Phase::SpeedRun,
            (true, true) => Phase::Returning,
            (true, false) => Phase::Exploring,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn start(&self) -> GridPose {
        self.start
    }

    /// Cellules but, ligne par ligne.
    pub fn goals(&self) -> &[GridPoint] {
        &self.goals
    }

    pub fn is_goal(&self, position: GridPoint) -> bool {
        self.goals.contains(&position)
    }

    pub fn contains(&self, position: GridPoint) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Coût jusqu'au but, `None` hors de la grille.
    pub fn cost(&self, position: GridPoint) -> Option<u16> {
        self.cell(position).map(|c| c.cost)
    }

    pub fn evidence(&self, position: GridPoint) -> Option<&WallEvidence> {
        self.cell(position).map(|c| &c.walls)
    }

    pub fn best_route(&self) -> &BestRoute {
        &self.best_route
    }

    /// Coût jusqu'au départ, tel que calculé au dernier cycle de retour.
    pub fn home_cost(&self, position: GridPoint) -> Option<u16> {
        if self.contains(position) {
            Some(self.home[self.index(position)])
        } else {
            None
        }
    }

    /// Voisine de `position` du côté `side`, si elle est dans la grille.
    pub fn neighbor(&self, position: GridPoint, side: Direction) -> Option<GridPoint> {
        position.step(side).filter(|p| self.contains(*p))
    }

    pub fn cell(&self, position: GridPoint) -> Option<&Cell> {
        if self.contains(position) {
            Some(&self.cells[self.index(position)])
        } else {
            None
        }
    }

    fn cell_mut(&mut self, position: GridPoint) -> Option<&mut Cell> {
        if self.contains(position) {
            let index = self.index(position);
            Some(&mut self.cells[index])
        } else {
            None
        }
    }

    pub(crate) fn cell_at_mut(&mut self, position: GridPoint) -> &mut Cell {
        let index = self.index(position);
        &mut self.cells[index]
    }

    pub(crate) fn cost_at(&self, position: GridPoint) -> u16 {
        self.cells[self.index(position)].cost
    }

    pub(crate) fn index(&self, position: GridPoint) -> usize {
        usize::from(position.y) * usize::from(self.width) + usize::from(position.x)
    }

    /// Toutes les positions de la grille, ligne par ligne.
    pub fn positions(&self) -> impl Iterator<Item = GridPoint> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| GridPoint::new(x, y)))
    }
}
