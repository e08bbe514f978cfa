use crate::pose::GridPose;

/// Classement d'un mur tel que vu par les capteurs de distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wall {
    /// Rien n'a pu être mesuré.
    #[default]
    Undefined,
    Open,
    Wall,
}

impl Wall {
    pub fn from_bool(wall: bool) -> Self {
        if wall {
            Wall::Wall
        } else {
            Wall::Open
        }
    }

    /// `Some(true)` pour un mur, `Some(false)` si libre, `None` si inconnu.
    pub fn as_evidence(self) -> Option<bool> {
        match self {
            Wall::Undefined => None,
            Wall::Open => Some(false),
            Wall::Wall => Some(true),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Wall::Undefined => Wall::Undefined,
            Wall::Open => Wall::Wall,
            Wall::Wall => Wall::Open,
        }
    }
}

/// Mesures capteur d'un cycle, relatives à l'orientation de la souris.
///
/// `left`, `front` et `right` sont les murs de la cellule de la souris ;
/// `front_left` et `front_right` les murs latéraux de la cellule devant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reading {
    pub left: Wall,
    pub front_left: Wall,
    pub front: Wall,
    pub front_right: Wall,
    pub right: Wall,
}

impl Reading {
    /// Lecture où tout est inconnu.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Lecture qui ne voit que les 3 murs de la cellule courante.
    pub fn local(left: Wall, front: Wall, right: Wall) -> Self {
        Self {
            left,
            front,
            right,
            ..Self::default()
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.slots().iter().all(|w| *w == Wall::Undefined)
    }

    /// Mesures dans l'ordre capteur : gauche, avant-gauche, avant, avant-droite, droite.
    pub fn slots(&self) -> [Wall; 5] {
        [
            self.left,
            self.front_left,
            self.front,
            self.front_right,
            self.right,
        ]
    }

    pub fn map(self, mut f: impl FnMut(Wall) -> Wall) -> Self {
        Self {
            left: f(self.left),
            front_left: f(self.front_left),
            front: f(self.front),
            front_right: f(self.front_right),
            right: f(self.right),
        }
    }
}

/// Source de mesures capteur pour une pose donnée.
pub trait Sensors {
    fn read(&mut self, pose: &GridPose) -> Reading;
}

impl<F> Sensors for F
where
    F: FnMut(&GridPose) -> Reading,
{
    fn read(&mut self, pose: &GridPose) -> Reading {
        self(pose)
    }
}
