pub mod ascii_utils;
pub mod cell;
pub mod config;
mod costmap;
pub mod direction;
pub mod error;
pub mod labyrinth;
pub mod labyrinth_mock;
pub mod map;
pub mod mouse;
pub mod navigation;
pub mod pose;
pub mod route;
pub mod sensor;
pub mod walls;

pub use config::{GoalConfig, MazeConfig, StartConfig};
pub use direction::Direction;
pub use error::{ConfigError, LabyrinthError};
pub use labyrinth::Labyrinth;
pub use map::{KnownMaze, Phase};
pub use mouse::Mouse;
pub use navigation::Step;
pub use pose::{GridPoint, GridPose};
pub use sensor::{Reading, Sensors, Wall};

// -----------------------------------------------------------------------------
// TEST
// -----------------------------------------------------------------------------

/// Résultat d'un parcours de la souris dans un labyrinthe, pour les tests.
#[cfg(test)]
struct Run {
    phases: Vec<Phase>,
    solved_at: Option<usize>,
    arrived_at: Option<usize>,
    refused: usize,
}

/// Lire, décider, bouger, jusqu'à ce que la course rapide atteigne le but ou
/// que les `cycles` soient épuisés. Les avancées dans un vrai mur sont refusées.
#[cfg(test)]
fn drive(mouse: &mut Mouse, labyrinth: &mut Labyrinth, cycles: usize) -> Run {
    let mut run = Run {
        phases: vec![mouse.phase()],
        solved_at: None,
        arrived_at: None,
        refused: 0,
    };

    for cycle in 0..cycles {
        let pose = mouse.pose();
        let reading = labyrinth.read(&pose);
        let step = mouse.decide(&reading);

        let phase = mouse.phase();
        if run.phases.last() != Some(&phase) {
            run.phases.push(phase);
            if phase == Phase::SpeedRun {
                run.solved_at = Some(cycle);
            }
        }
        if phase == Phase::SpeedRun && mouse.maze().is_goal(pose.position) {
            run.arrived_at = Some(cycle);
            break;
        }

        if labyrinth.blocks(&pose, &step) {
            run.refused += 1;
            continue;
        }
        mouse.apply(step);
    }
    run
}

#[cfg(test)]
fn points(cells: &[(u8, u8)]) -> Vec<GridPoint> {
    cells.iter().map(|&(x, y)| GridPoint::new(x, y)).collect()
}

#[test]
fn test_sample_5x5_full_run() {
    let mut labyrinth = labyrinth_mock::sample_labyrinth().unwrap();
    let mut mouse = Mouse::from_config(&MazeConfig::default()).unwrap();

    let run = drive(&mut mouse, &mut labyrinth, 100);
    assert_eq!(
        run.phases,
        vec![Phase::Exploring, Phase::Returning, Phase::SpeedRun]
    );
    assert_eq!(run.solved_at, Some(15));
    assert_eq!(run.arrived_at, Some(22));
    assert_eq!(run.refused, 0);

    let route: Vec<_> = mouse.maze().best_route().iter().collect();
    let expected: Vec<_> = [6u16, 4, 3, 1, 0]
        .into_iter()
        .zip(points(&[(0, 4), (1, 4), (1, 3), (1, 2), (2, 2)]))
        .collect();
    assert_eq!(route, expected);
    assert_eq!(mouse.path(), points(&[(0, 4), (1, 4), (1, 3), (1, 2), (2, 2)]));
}

#[test]
fn test_sample_6x6_full_run() {
    let mut labyrinth = labyrinth_mock::sample_labyrinth_6x6().unwrap();
    let mut mouse = Mouse::from_config(&labyrinth_mock::sample_config_6x6()).unwrap();

    let run = drive(&mut mouse, &mut labyrinth, 200);
    assert_eq!(
        run.phases,
        vec![Phase::Exploring, Phase::Returning, Phase::SpeedRun]
    );
    assert_eq!(run.solved_at, Some(35));
    assert_eq!(run.arrived_at, Some(47));
    assert_eq!(run.refused, 0);

    let cells = [(0, 5), (1, 5), (1, 4), (2, 4), (3, 4), (4, 4), (4, 3), (3, 3)];
    let route: Vec<GridPoint> = mouse.maze().best_route().iter().map(|(_, p)| p).collect();
    assert_eq!(route, points(&cells));
    assert_eq!(mouse.path(), points(&cells));
    assert_eq!(mouse.pose(), GridPose::at(3, 3, Direction::West));
}

#[test]
fn test_noisy_runs_never_revert_phase() {
    let order = [Phase::Exploring, Phase::Returning, Phase::SpeedRun];
    for seed in 0..8 {
        let mut labyrinth = labyrinth_mock::sample_labyrinth_6x6()
            .unwrap()
            .with_noise(0.05, seed);
        let mut mouse = Mouse::from_config(&labyrinth_mock::sample_config_6x6()).unwrap();

        let run = drive(&mut mouse, &mut labyrinth, 400);
        assert!(run.phases.len() <= order.len());
        assert_eq!(run.phases[..], order[..run.phases.len()], "seed {seed}");
        assert!(mouse.maze().contains(mouse.pose().position));
    }
}
