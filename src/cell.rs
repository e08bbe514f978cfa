use crate::walls::WallEvidence;

/// Coût d'une cellule que l'inondation n'a pas atteinte.
pub const UNREACHED: u16 = u16::MAX;

/// Structure d'une cellule : indices de murs + coût jusqu'au but.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Indices accumulés pour les 4 côtés de la cellule.
    pub walls: WallEvidence,
    /// Coût jusqu'au but selon les murs supposés.
    pub cost: u16,
}

impl Cell {
    /// Crée une `Cell` sans indice et non atteinte.
    pub fn new() -> Self {
        Self {
            walls: WallEvidence::default(),
            cost: UNREACHED,
        }
    }

    pub fn is_reached(&self) -> bool {
        self.cost != UNREACHED
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}
