use crate::cell::UNREACHED;
use crate::direction::Direction;
use crate::map::KnownMaze;
use crate::pose::{GridPoint, GridPose};

/// Une décision de navigation.
///
/// Une décision tourne la souris sur place ou la fait avancer d'une cellule,
/// jamais les deux.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Reste sur la cellule et prend une orientation (éventuellement la même).
    Turn(GridPose),
    /// Avance d'une cellule dans l'orientation actuelle.
    Advance(GridPose),
}

impl Step {
    /// Pose de la souris une fois le pas exécuté.
    pub fn pose(&self) -> GridPose {
        match self {
            Step::Turn(pose) | Step::Advance(pose) => *pose,
        }
    }

    pub fn is_advance(&self) -> bool {
        matches!(self, Step::Advance(_))
    }
}

impl KnownMaze {
    /// Choisit où doit aller la souris placée à `pose`.
    ///
    /// Une fois le but atteint, la meilleure route est rejouée quand la souris
    /// est dessus : vers le départ pendant le retour, vers le but pendant la
    /// course rapide. Au retour, une souris bloquée sur une cellule but hors de
    /// la route descend le champ vers le départ. Sinon, ou avec
    /// `force_full_search`, on prend la voisine de plus faible coût vers le
    /// but.
    pub fn next_goal(&self, pose: &GridPose, force_full_search: bool) -> Step {
        if !force_full_search && (!self.exploring || self.returning) {
            if let Some(step) = self.follow_route(pose) {
                return step;
            }
            if self.returning && self.stranded_off_route(pose.position) {
                return self.head_home(pose);
            }
        }
        self.greedy_step(pose, |p| self.cost(p))
    }

    /// Cellules d'où la descente du champ vers le but ne ramène pas sur la
    /// route : le départ, et les cellules but autres que l'extrémité de la
    /// route.
    fn stranded_off_route(&self, position: GridPoint) -> bool {
        position == self.start.position
            || (self.is_goal(position) && self.best_route.goal_end() != Some(position))
    }

    fn follow_route(&self, pose: &GridPose) -> Option<Step> {
        let position = pose.position;
        let cost = self.cost(position)?;
        if !self.best_route.holds(cost, position) {
            return None;
        }

        let next = if self.returning {
            self.best_route.toward_start(cost)
        } else {
            self.best_route.toward_goal(cost)
        };
        match next {
            Some(target) => self.step_toward(pose, target),
            None if self.returning => self.face_backward(pose),
            None => None,
        }
    }

    fn head_home(&self, pose: &GridPose) -> Step {
        if pose.position == self.start.position {
            return self.face_backward(pose).unwrap_or(Step::Turn(*pose));
        }
        self.greedy_step(pose, |p| self.home_cost(p))
    }

    /// Au départ pendant le retour : faire demi-tour par rapport à
    /// l'orientation de départ, la mise à jour suivante termine le retour.
    fn face_backward(&self, pose: &GridPose) -> Option<Step> {
        let backward = self.start.direction.turn_back();
        if pose.direction == backward {
            None
        } else {
            Some(Step::Turn(GridPose::new(pose.position, backward)))
        }
    }

    fn step_toward(&self, pose: &GridPose, target: GridPoint) -> Option<Step> {
        let side = pose.position.direction_to(target);
        if self.has_wall(pose.position, side) {
            return None;
        }
        Some(self.step_to(pose, side))
    }

    /// Recherche locale gloutonne sur le champ donné par `cost_of`.
    ///
    /// Parcourt `Direction::ALL` en gardant un minimum courant ; une voisine est
    /// retenue si son coût est `<=` au meilleur, donc à égalité le dernier côté
    /// parcouru l'emporte. Sans candidate, la souris reste sur place.
    fn greedy_step(&self, pose: &GridPose, cost_of: impl Fn(GridPoint) -> Option<u16>) -> Step {
        let position = pose.position;
        let mut best_cost = cost_of(position).unwrap_or(UNREACHED);
        let mut step = Step::Turn(*pose);

        for side in Direction::ALL {
            if self.has_wall(position, side) {
                continue;
            }
            let Some(next_cost) = self.neighbor(position, side).and_then(&cost_of) else {
                continue;
            };
            if next_cost <= best_cost {
                best_cost = next_cost;
                step = self.step_to(pose, side);
            }
        }

        step
    }

    /// Avance si la souris fait déjà face à `side`, sinon tourne vers ce côté.
    fn step_to(&self, pose: &GridPose, side: Direction) -> Step {
        if pose.direction != side {
            return Step::Turn(GridPose::new(pose.position, side));
        }
        match self.neighbor(pose.position, side) {
            Some(next) => Step::Advance(GridPose::new(next, side)),
            None => Step::Turn(*pose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Phase;
    use crate::sensor::{Reading, Wall};

    fn open_5x5() -> KnownMaze {
        KnownMaze::new(
            5,
            5,
            GridPose::at(0, 4, Direction::North),
            [GridPoint::new(2, 2)],
        )
        .unwrap()
    }

    #[test]
    fn test_turns_before_advancing() {
        let maze = open_5x5();
        // (2,4) est juste sous le but, coût 2 ; (2,3) coûte moins
        let step = maze.next_goal(&GridPose::at(2, 4, Direction::East), false);
        assert_eq!(step, Step::Turn(GridPose::at(2, 4, Direction::North)));
        let step = maze.next_goal(&step.pose(), false);
        assert_eq!(step, Step::Advance(GridPose::at(2, 3, Direction::North)));
        assert!(step.is_advance());
    }

    #[test]
    fn test_equal_costs_last_direction_wins() {
        // (2,1) à l'Est et (1,2) au Sud coûtent 1 ; le Sud vient après et
        // remplace le candidat Est.
        let maze = open_5x5();
        let step = maze.next_goal(&GridPose::at(1, 1, Direction::East), false);
        assert_eq!(step, Step::Turn(GridPose::at(1, 1, Direction::South)));
        let step = maze.next_goal(&GridPose::at(1, 1, Direction::South), false);
        assert_eq!(step, Step::Advance(GridPose::at(1, 2, Direction::South)));
    }

    #[test]
    fn test_later_tie_with_own_cost_does_not_override() {
        // Départage `<=` contre le coût de la cellule : depuis (1,0), coût 4,
        // l'Est mène à 2 et le Sud à 3. Le Sud vient après et reste sous le
        // coût de la cellule, mais le minimum courant vaut déjà 2 : l'Est
        // est gardé.
        let maze = open_5x5();
        let step = maze.next_goal(&GridPose::at(1, 0, Direction::North), false);
        assert_eq!(step, Step::Turn(GridPose::at(1, 0, Direction::East)));
    }

    #[test]
    fn test_walls_are_respected() {
        let mut maze = open_5x5();
        let pose = GridPose::at(2, 3, Direction::North);
        maze.update(&pose, &Reading::local(Wall::Undefined, Wall::Wall, Wall::Undefined));
        let step = maze.next_goal(&pose, false);
        assert_ne!(step, Step::Advance(GridPose::at(2, 2, Direction::North)));
        assert_eq!(step.pose().position, GridPoint::new(2, 3));
    }

    #[test]
    fn test_stays_when_boxed_in() {
        let mut maze = open_5x5();
        let cage = GridPoint::new(3, 3);
        for dir in [Direction::North, Direction::South] {
            maze.update(
                &GridPose::new(cage, dir),
                &Reading::local(Wall::Wall, Wall::Wall, Wall::Wall),
            );
        }
        let pose = GridPose::new(cage, Direction::East);
        assert_eq!(maze.next_goal(&pose, false), Step::Turn(pose));
    }

    #[test]
    fn test_route_replay_while_returning() {
        let mut maze = open_5x5();
        let at_goal = GridPose::at(2, 2, Direction::West);
        maze.update(&at_goal, &Reading::unknown());
        assert_eq!(maze.phase(), Phase::Returning);

        // route : (0,4) (1,4) (2,4) (2,3) (2,2), rejouée vers le départ
        let step = maze.next_goal(&at_goal, false);
        assert_eq!(step, Step::Turn(GridPose::at(2, 2, Direction::South)));
        let step = maze.next_goal(&step.pose(), false);
        assert_eq!(step, Step::Advance(GridPose::at(2, 3, Direction::South)));

        // la recherche forcée ignore la route et vise le but
        let forced = maze.next_goal(&GridPose::at(2, 3, Direction::South), true);
        assert_eq!(forced, Step::Turn(GridPose::at(2, 3, Direction::North)));
    }

    #[test]
    fn test_turns_backward_at_route_top() {
        let mut maze = open_5x5();
        maze.update(&GridPose::at(2, 2, Direction::West), &Reading::unknown());
        let at_start = GridPose::at(0, 4, Direction::West);
        let step = maze.next_goal(&at_start, false);
        assert_eq!(step, Step::Turn(GridPose::at(0, 4, Direction::South)));

        maze.update(&step.pose(), &Reading::unknown());
        assert_eq!(maze.phase(), Phase::SpeedRun);
    }

    #[test]
    fn test_speed_run_heads_for_goal() {
        let mut maze = open_5x5();
        maze.update(&GridPose::at(2, 2, Direction::West), &Reading::unknown());
        let home = maze.start().turned_back();
        maze.update(&home, &Reading::unknown());
        assert_eq!(maze.phase(), Phase::SpeedRun);

        let step = maze.next_goal(&home, false);
        assert_eq!(step, Step::Turn(GridPose::at(0, 4, Direction::East)));
        let step = maze.next_goal(&step.pose(), false);
        assert_eq!(step, Step::Advance(GridPose::at(1, 4, Direction::East)));
    }

    #[test]
    fn test_off_route_returns_to_goal_field() {
        let mut maze = open_5x5();
        maze.update(&GridPose::at(2, 2, Direction::West), &Reading::unknown());
        assert_eq!(maze.phase(), Phase::Returning);

        // (1,0) est hors de la route : la recherche gloutonne vers le but
        // choisit l'Est (coût 2) plutôt que l'Ouest, plus proche du départ
        let pose = GridPose::at(1, 0, Direction::North);
        assert!(!maze.best_route().contains(pose.position));
        assert_eq!(
            maze.next_goal(&pose, false),
            Step::Turn(GridPose::at(1, 0, Direction::East))
        );

        // (3,1) : Ouest et Sud coûtent 1, le Sud est parcouru en dernier
        let pose = GridPose::at(3, 1, Direction::North);
        assert_eq!(
            maze.next_goal(&pose, false),
            Step::Turn(GridPose::at(3, 1, Direction::South))
        );
    }

    #[test]
    fn test_leaves_goal_block_towards_start() {
        let mut maze = KnownMaze::new(
            6,
            6,
            GridPose::at(0, 5, Direction::North),
            crate::config::center_goals(6, 6),
        )
        .unwrap();
        let far_corner = GridPose::at(3, 2, Direction::North);
        maze.update(&far_corner, &Reading::unknown());
        assert_eq!(maze.phase(), Phase::Returning);
        assert_ne!(maze.best_route().goal_end(), Some(far_corner.position));

        let step = maze.next_goal(&far_corner, false);
        assert_eq!(step, Step::Turn(GridPose::at(3, 2, Direction::South)));
        let step = maze.next_goal(&step.pose(), false);
        assert_eq!(step, Step::Advance(GridPose::at(3, 3, Direction::South)));
    }

    #[test]
    fn test_turns_backward_at_start_without_route() {
        let mut maze = open_5x5();
        let start = maze.start();
        maze.update(
            &start,
            &Reading::local(Wall::Wall, Wall::Wall, Wall::Wall),
        );
        maze.update(&GridPose::at(2, 2, Direction::West), &Reading::unknown());
        assert!(maze.best_route().is_empty());

        let step = maze.next_goal(&start, false);
        assert_eq!(step, Step::Turn(start.turned_back()));
    }
}
