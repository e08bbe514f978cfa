use crate::direction::Direction;

/// Ensemble des indices capteur pour les 4 murs d'une cellule.
///
/// Les compteurs ne font que croître (en saturant) ; le mur est considéré
/// présent quand le compte "mur" dépasse strictement le compte "libre".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallEvidence {
    wall: [u32; 4],
    free: [u32; 4],
}

impl WallEvidence {
    pub fn record(&mut self, side: Direction, wall: bool) {
        let counters = if wall { &mut self.wall } else { &mut self.free };
        let slot = &mut counters[side.index()];
        *slot = slot.saturating_add(1);
    }

    /// Marque un côté comme mur permanent (bord du labyrinthe).
    pub fn seal(&mut self, side: Direction) {
        self.wall[side.index()] = u32::MAX;
    }

    pub fn is_wall(&self, side: Direction) -> bool {
        self.wall[side.index()] > self.free[side.index()]
    }

    pub fn wall_count(&self, side: Direction) -> u32 {
        self.wall[side.index()]
    }

    pub fn free_count(&self, side: Direction) -> u32 {
        self.free[side.index()]
    }
}
