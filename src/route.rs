use crate::pose::GridPoint;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Meilleure route connue, indexée par le coût jusqu'au but.
///
/// Au plus une position par coût : la première insérée est gardée, les
/// suivantes pour le même coût sont ignorées.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BestRoute {
    entries: BTreeMap<u16, GridPoint>,
}

impl BestRoute {
    pub fn new() -> Self {
        Self::default()
    }

    /// Range `position` sous `cost` si ce coût est libre. Renvoie `true` si
    /// l'entrée a été ajoutée.
    pub fn insert(&mut self, cost: u16, position: GridPoint) -> bool {
        match self.entries.entry(cost) {
            Entry::Vacant(slot) => {
                slot.insert(position);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, cost: u16) -> Option<GridPoint> {
        self.entries.get(&cost).copied()
    }

    /// Vérifie si `position` est l'entrée rangée sous `cost`.
    pub fn holds(&self, cost: u16, position: GridPoint) -> bool {
        self.get(cost) == Some(position)
    }

    /// Entrée de coût immédiatement inférieur, un pas plus près du but.
    pub fn toward_goal(&self, cost: u16) -> Option<GridPoint> {
        self.entries.range(..cost).next_back().map(|(_, p)| *p)
    }

    /// Entrée de coût immédiatement supérieur, un pas plus près du départ.
    pub fn toward_start(&self, cost: u16) -> Option<GridPoint> {
        self.entries
            .range(cost.checked_add(1)?..)
            .next()
            .map(|(_, p)| *p)
    }

    /// Entrée de plus faible coût (l'extrémité but de la route).
    pub fn goal_end(&self) -> Option<GridPoint> {
        self.entries.values().next().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entrées du départ (coût le plus haut) jusqu'au but.
    pub fn iter(&self) -> impl Iterator<Item = (u16, GridPoint)> + '_ {
        self.entries.iter().rev().map(|(c, p)| (*c, *p))
    }

    pub fn contains(&self, position: GridPoint) -> bool {
        self.entries.values().any(|p| *p == position)
    }
}
