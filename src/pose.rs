use crate::direction::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordonnée d'une cellule de la grille.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: u8,
    pub y: u8,
}

impl GridPoint {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Coordonnée voisine, un pas vers `direction`.
    ///
    /// Renvoie `None` si le pas sort de l'espace des coordonnées ; rester dans
    /// une grille donnée est vérifié par son propriétaire.
    pub fn step(self, direction: Direction) -> Option<GridPoint> {
        let (dx, dy) = direction.offset();
        let x = u8::try_from(i32::from(self.x) + dx).ok()?;
        let y = u8::try_from(i32::from(self.y) + dy).ok()?;
        Some(GridPoint { x, y })
    }

    /// Orientation à prendre depuis `self` pour atteindre le point voisin
    /// `next`.
    ///
    /// L'axe horizontal est testé d'abord ; pour deux points identiques on
    /// renvoie North.
    pub fn direction_to(self, next: GridPoint) -> Direction {
        if next.x < self.x {
            Direction::West
        } else if next.y < self.y {
            Direction::North
        } else if next.x > self.x {
            Direction::East
        } else if next.y > self.y {
            Direction::South
        } else {
            Direction::North
        }
    }

    pub fn manhattan(self, other: GridPoint) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Position + orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPose {
    pub position: GridPoint,
    pub direction: Direction,
}

impl GridPose {
    pub fn new(position: GridPoint, direction: Direction) -> Self {
        Self { position, direction }
    }

    pub fn at(x: u8, y: u8, direction: Direction) -> Self {
        Self::new(GridPoint::new(x, y), direction)
    }

    /// Pose après un pas en avant, même orientation.
    pub fn front(self) -> Option<GridPose> {
        self.position
            .step(self.direction)
            .map(|position| GridPose::new(position, self.direction))
    }

    pub fn turned_left(self) -> GridPose {
        GridPose::new(self.position, self.direction.turn_left())
    }

    pub fn turned_right(self) -> GridPose {
        GridPose::new(self.position, self.direction.turn_right())
    }

    pub fn turned_back(self) -> GridPose {
        GridPose::new(self.position, self.direction.turn_back())
    }
}

impl fmt::Display for GridPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {:?}", self.position, self.direction)
    }
}
