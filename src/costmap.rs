//! Inondation des champs de coût et reconstruction de la meilleure route.

use crate::cell::UNREACHED;
use crate::direction::Direction;
use crate::map::KnownMaze;
use crate::pose::GridPoint;
use log::{debug, trace, warn};
use std::collections::VecDeque;

impl KnownMaze {
    /// Recalcule le coût de chaque cellule par un parcours en largeur lancé
    /// depuis toutes les cellules but à la fois.
    ///
    /// Pendant le retour, le champ vers le départ et la meilleure route sont
    /// aussi reconstruits à partir des nouveaux coûts.
    pub(crate) fn calculate_costmap(&mut self) {
        let costs = self.flood(&self.goals);
        for (cell, cost) in self.cells.iter_mut().zip(costs) {
            cell.cost = cost;
        }

        trace!(
            "cost field recomputed, start cost {}",
            self.cost_at(self.start.position)
        );

        if self.exploring && self.returning {
            self.home = self.flood(&[self.start.position]);
            self.rebuild_route();
        }
    }

    /// Inondation en largeur depuis `seeds`, qui coûtent toutes 0.
    ///
    /// Un pas coûte 1 s'il prolonge la direction par laquelle la cellule
    /// courante a été atteinte (ou s'il quitte une source), 2 s'il demande un
    /// virage. La première affectation, dans l'ordre de la file puis de
    /// `Direction::ALL`, l'emporte ; les cellules jamais atteintes gardent
    /// `UNREACHED`.
    fn flood(&self, seeds: &[GridPoint]) -> Vec<u16> {
        let count = self.cells.len();
        let mut costs = vec![UNREACHED; count];
        let mut visited = vec![false; count];
        let mut origin: Vec<Option<Direction>> = vec![None; count];
        let mut queue = VecDeque::with_capacity(count);

        for &seed in seeds {
            let i = self.index(seed);
            costs[i] = 0;
            visited[i] = true;
            queue.push_back(seed);
        }

        while let Some(current) = queue.pop_front() {
            let current_index = self.index(current);
            let current_cost = costs[current_index];
            let leaving_seed = seeds.contains(&current);

            for side in Direction::ALL {
                if self.has_wall(current, side) {
                    continue;
                }
                let Some(next) = self.neighbor(current, side) else {
                    continue;
                };
                let next_index = self.index(next);
                if visited[next_index] {
                    continue;
                }

                visited[next_index] = true;
                origin[next_index] = Some(side);

                let step = if leaving_seed || origin[current_index] == Some(side) {
                    1
                } else {
                    2
                };
                costs[next_index] = current_cost.saturating_add(step);
                queue.push_back(next);
            }
        }

        costs
    }

    /// Marche gloutonne du départ jusqu'au but : chaque position visitée est
    /// rangée sous son coût, la première position par coût est conservée.
    fn rebuild_route(&mut self) {
        self.best_route.clear();

        let start = self.start;
        let Some(start_cost) = self
            .cell(start.position)
            .filter(|cell| cell.is_reached())
            .map(|cell| cell.cost)
        else {
            warn!("start {} is cut off from the goal", start.position);
            return;
        };
        self.best_route.insert(start_cost, start.position);

        let budget = 4 * usize::from(self.width) * usize::from(self.height);
        let mut pose = start;
        for _ in 0..budget {
            if self.is_goal(pose.position) {
                break;
            }
            pose = self.next_goal(&pose, true).pose();
            let cost = self.cost_at(pose.position);
            self.best_route.insert(cost, pose.position);
        }

        if !self.is_goal(pose.position) {
            warn!("route walk from {} did not reach the goal", start.position);
        }
        debug!("best route rebuilt with {} cells", self.best_route.len());
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::UNREACHED;
    use crate::direction::Direction;
    use crate::map::{KnownMaze, Phase};
    use crate::pose::{GridPoint, GridPose};
    use crate::sensor::{Reading, Wall};
    use proptest::prelude::*;

    fn open_5x5() -> KnownMaze {
        KnownMaze::new(
            5,
            5,
            GridPose::at(0, 4, Direction::North),
            [GridPoint::new(2, 2)],
        )
        .unwrap()
    }

    fn costs(maze: &KnownMaze) -> Vec<Vec<u16>> {
        (0..maze.height())
            .map(|y| {
                (0..maze.width())
                    .map(|x| maze.cost(GridPoint::new(x, y)).unwrap())
                    .collect()
            })
            .collect()
    }

    /// Mure les 4 côtés de `position`, vu de l'intérieur.
    fn wall_in(maze: &mut KnownMaze, position: GridPoint) {
        for dir in [Direction::North, Direction::South] {
            let pose = GridPose::new(position, dir);
            maze.update(&pose, &Reading::local(Wall::Wall, Wall::Wall, Wall::Wall));
        }
    }

    #[test]
    fn test_open_field_costs() {
        let mut maze = open_5x5();
        maze.update(&maze.start(), &Reading::unknown());

        // En ligne droite depuis le but, le coût vaut la distance de
        // Manhattan ; ailleurs il faut un virage, qui coûte une unité de plus.
        let expected = vec![
            vec![5, 4, 2, 4, 5],
            vec![4, 3, 1, 3, 4],
            vec![2, 1, 0, 1, 2],
            vec![4, 3, 1, 3, 4],
            vec![5, 4, 2, 4, 5],
        ];
        assert_eq!(costs(&maze), expected);

        let goal = GridPoint::new(2, 2);
        for p in maze.positions() {
            let cost = u32::from(maze.cost(p).unwrap());
            let distance = p.manhattan(goal);
            if p.x == goal.x || p.y == goal.y {
                assert_eq!(cost, distance);
            } else {
                assert_eq!(cost, distance + 1);
            }
        }
    }

    #[test]
    fn test_turn_penalty_follows_walls() {
        // mur entre (2,1) et (2,0) : il faut le contourner pour atteindre (2,0)
        let mut maze = open_5x5();
        maze.update(
            &GridPose::at(2, 1, Direction::North),
            &Reading::local(Wall::Undefined, Wall::Wall, Wall::Undefined),
        );
        let top = maze.cost(GridPoint::new(2, 0)).unwrap();
        assert_eq!(maze.cost(GridPoint::new(1, 0)), Some(4));
        assert_eq!(top, 6);
    }

    #[test]
    fn test_walled_cell_is_unreached() {
        let mut maze = open_5x5();
        let cage = GridPoint::new(3, 3);
        wall_in(&mut maze, cage);
        assert_eq!(maze.cost(cage), Some(UNREACHED));
        for dir in Direction::ALL {
            assert!(maze.has_wall(cage, dir));
        }
        // toutes les autres cellules restent atteintes
        for p in maze.positions().filter(|p| *p != cage) {
            assert_ne!(maze.cost(p), Some(UNREACHED), "{p} lost its cost");
        }
    }

    #[test]
    fn test_unreached_cell_is_never_a_target() {
        let mut maze = open_5x5();
        let cage = GridPoint::new(3, 3);
        wall_in(&mut maze, cage);
        for p in maze.positions().filter(|p| *p != cage) {
            for dir in Direction::ALL {
                let step = maze.next_goal(&GridPose::new(p, dir), false);
                assert_ne!(step.pose().position, cage);
            }
        }
    }

    #[test]
    fn test_multiple_goals_seed_together() {
        let mut maze = KnownMaze::new(
            6,
            6,
            GridPose::at(0, 5, Direction::North),
            crate::config::center_goals(6, 6),
        )
        .unwrap();
        maze.update(&maze.start(), &Reading::unknown());
        for goal in crate::config::center_goals(6, 6) {
            assert_eq!(maze.cost(goal), Some(0));
        }
        assert_eq!(maze.cost(GridPoint::new(1, 2)), Some(1));
        assert_eq!(maze.cost(GridPoint::new(2, 0)), Some(2));
        assert_eq!(maze.cost(GridPoint::new(0, 0)), Some(5));
    }

    #[test]
    fn test_route_rebuilt_while_returning() {
        let mut maze = open_5x5();
        assert!(maze.best_route().is_empty());
        maze.update(&GridPose::at(2, 2, Direction::West), &Reading::unknown());
        assert_eq!(maze.phase(), Phase::Returning);

        let route: Vec<_> = maze.best_route().iter().collect();
        assert_eq!(route.first(), Some(&(5, GridPoint::new(0, 4))));
        assert_eq!(route.last(), Some(&(0, GridPoint::new(2, 2))));
        for pair in route.windows(2) {
            assert!(pair[0].0 > pair[1].0);
            assert_eq!(pair[0].1.manhattan(pair[1].1), 1);
        }
    }

    #[test]
    fn test_route_skipped_when_start_cut_off() {
        let mut maze = open_5x5();
        let start = maze.start().position;
        maze.update(
            &GridPose::new(start, Direction::North),
            &Reading::local(Wall::Wall, Wall::Wall, Wall::Wall),
        );
        assert_eq!(maze.cost(start), Some(UNREACHED));
        maze.update(&GridPose::at(2, 2, Direction::West), &Reading::unknown());
        assert!(maze.best_route().is_empty());
    }

    #[test]
    fn test_home_field_while_returning() {
        let mut maze = open_5x5();
        let start = maze.start();
        // mur juste devant le départ
        maze.update(
            &start,
            &Reading::local(Wall::Undefined, Wall::Wall, Wall::Undefined),
        );
        assert!(maze.positions().all(|p| maze.home_cost(p) == Some(UNREACHED)));

        maze.update(&GridPose::at(2, 2, Direction::West), &Reading::unknown());
        let home: Vec<Vec<u16>> = (0..5)
            .map(|y| (0..5).map(|x| maze.home_cost(GridPoint::new(x, y)).unwrap()).collect())
            .collect();
        let expected = vec![
            vec![9, 6, 8, 9, 10],
            vec![8, 5, 7, 8, 9],
            vec![7, 4, 6, 7, 8],
            vec![5, 3, 5, 6, 7],
            vec![0, 1, 2, 3, 4],
        ];
        assert_eq!(home, expected);
        assert_eq!(maze.home_cost(GridPoint::new(5, 0)), None);
    }

    fn arb_reading() -> impl Strategy<Value = Reading> {
        let wall = prop_oneof![Just(Wall::Undefined), Just(Wall::Open), Just(Wall::Wall)];
        prop::array::uniform5(wall).prop_map(|[left, front_left, front, front_right, right]| {
            Reading {
                left,
                front_left,
                front,
                front_right,
                right,
            }
        })
    }

    fn arb_pose() -> impl Strategy<Value = GridPose> {
        (0u8..6, 0u8..6, 0usize..4)
            .prop_map(|(x, y, d)| GridPose::at(x, y, Direction::ALL[d]))
    }

    fn maze_6x6() -> KnownMaze {
        KnownMaze::new(
            6,
            6,
            GridPose::at(0, 5, Direction::North),
            crate::config::center_goals(6, 6),
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn prop_cost_field_is_consistent(updates in prop::collection::vec((arb_pose(), arb_reading()), 0..40)) {
            let mut maze = maze_6x6();
            for (pose, reading) in &updates {
                maze.update(pose, reading);
            }
            for p in maze.positions() {
                let cost = maze.cost(p).unwrap();
                if maze.is_goal(p) {
                    prop_assert_eq!(cost, 0);
                    continue;
                }
                if cost == UNREACHED {
                    continue;
                }
                let has_parent = Direction::ALL.iter().any(|&dir| {
                    !maze.has_wall(p, dir)
                        && maze.neighbor(p, dir).and_then(|n| maze.cost(n)).is_some_and(|n| {
                            let (n, cost) = (u32::from(n), u32::from(cost));
                            n + 1 == cost || n + 2 == cost
                        })
                });
                prop_assert!(has_parent, "{} with cost {} has no parent", p, cost);
            }
        }

        #[test]
        fn prop_unknown_reading_is_idempotent(
            updates in prop::collection::vec((arb_pose(), arb_reading()), 0..20),
            pose in arb_pose(),
        ) {
            let mut maze = maze_6x6();
            for (p, reading) in &updates {
                maze.update(p, reading);
            }
            maze.update(&pose, &Reading::unknown());
            let costs_once = costs(&maze);
            let evidence_once: Vec<_> = maze.positions().map(|p| maze.evidence(p).cloned()).collect();

            maze.update(&pose, &Reading::unknown());
            prop_assert_eq!(costs(&maze), costs_once);
            let evidence_twice: Vec<_> = maze.positions().map(|p| maze.evidence(p).cloned()).collect();
            prop_assert_eq!(evidence_twice, evidence_once);
        }

        #[test]
        fn prop_route_keys_are_unique_and_descending(
            updates in prop::collection::vec((arb_pose(), arb_reading()), 0..30),
        ) {
            let mut maze = maze_6x6();
            for (p, reading) in &updates {
                maze.update(p, reading);
            }
            maze.update(&GridPose::at(2, 2, Direction::North), &Reading::unknown());
            let keys: Vec<u16> = maze.best_route().iter().map(|(c, _)| c).collect();
            for pair in keys.windows(2) {
                prop_assert!(pair[0] > pair[1]);
            }
            for (cost, position) in maze.best_route().iter() {
                prop_assert_eq!(maze.cost(position), Some(cost));
            }
        }

        #[test]
        fn prop_border_readings_never_panic(x in 0u8..6, y in 0u8..6, reading in arb_reading()) {
            let mut maze = maze_6x6();
            for dir in Direction::ALL {
                maze.update(&GridPose::at(x, y, dir), &reading);
            }
            for i in 0..6 {
                prop_assert!(maze.has_wall(GridPoint::new(0, i), Direction::West));
                prop_assert!(maze.has_wall(GridPoint::new(5, i), Direction::East));
                prop_assert!(maze.has_wall(GridPoint::new(i, 0), Direction::North));
                prop_assert!(maze.has_wall(GridPoint::new(i, 5), Direction::South));
            }
            for p in maze.positions() {
                prop_assert!(maze.cost(p).is_some());
            }
        }
    }
}
