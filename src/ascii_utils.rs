/*!
 * # Module de visualisation des labyrinthes
 *
 * Deux vues sont proposées :
 * - la connaissance de la souris, où chaque élément de la grille fait deux
 *   caractères de large et chaque cellule affiche son coût jusqu'au but ;
 * - un labyrinthe de référence, dessiné dans le format qu'on sait relire.
 */

use crate::direction::Direction;
use crate::labyrinth::Labyrinth;
use crate::map::KnownMaze;
use crate::mouse::Mouse;
use crate::pose::{GridPoint, GridPose};

/// Dessine ce que `maze` croit savoir, la souris `mouse` sous forme de flèche
/// et les cellules de `path` marquées `..`.
///
/// Contenu d'une cellule, par priorité : la souris, `()` pour le départ, `[]`
/// pour les cellules but, `..` pour le chemin, sinon le coût sur deux chiffres
/// (`**` au-delà de 99, `??` si non atteinte). Les murs supposés sont dessinés
/// avec `--` et `||`.
pub fn render_known_maze(
    maze: &KnownMaze,
    mouse: Option<&GridPose>,
    path: &[GridPoint],
) -> String {
    let mut out = String::new();

    for y in 0..maze.height() {
        for x in 0..maze.width() {
            out.push_str("++");
            out.push_str(if maze.has_wall(GridPoint::new(x, y), Direction::North) {
                "--"
            } else {
                "  "
            });
        }
        out.push_str("++\n");

        for x in 0..maze.width() {
            let position = GridPoint::new(x, y);
            out.push_str(vertical(maze.has_wall(position, Direction::West)));
            out.push_str(&cell_label(maze, position, mouse, path));
        }
        let last = GridPoint::new(maze.width() - 1, y);
        out.push_str(vertical(maze.has_wall(last, Direction::East)));
        out.push('\n');
    }

    for x in 0..maze.width() {
        let position = GridPoint::new(x, maze.height() - 1);
        out.push_str("++");
        out.push_str(if maze.has_wall(position, Direction::South) {
            "--"
        } else {
            "  "
        });
    }
    out.push_str("++\n");
    out
}

/// Connaissance de `mouse`, avec sa pose et le chemin parcouru.
pub fn render_mouse(mouse: &Mouse) -> String {
    render_known_maze(mouse.maze(), Some(&mouse.pose()), mouse.path())
}

fn vertical(wall: bool) -> &'static str {
    if wall {
        "||"
    } else {
        "  "
    }
}

fn cell_label(
    maze: &KnownMaze,
    position: GridPoint,
    mouse: Option<&GridPose>,
    path: &[GridPoint],
) -> String {
    if let Some(pose) = mouse.filter(|pose| pose.position == position) {
        return arrow(pose.direction).to_string();
    }
    if maze.start().position == position {
        return "()".to_string();
    }
    if maze.is_goal(position) {
        return "[]".to_string();
    }
    if path.contains(&position) {
        return "..".to_string();
    }
    match maze.cell(position).filter(|cell| cell.is_reached()) {
        None => "??".to_string(),
        Some(cell) if cell.cost > 99 => "**".to_string(),
        Some(cell) => format!("{:02}", cell.cost),
    }
}

fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::West => "< ",
        Direction::North => "/\\",
        Direction::East => " >",
        Direction::South => "\\/",
    }
}

/// Dessine `labyrinth` au format `+--+` accepté par [`Labyrinth::parse`].
pub fn render_labyrinth(labyrinth: &Labyrinth) -> String {
    let mut out = String::new();

    for y in 0..labyrinth.height() {
        for x in 0..labyrinth.width() {
            out.push('+');
            out.push_str(if labyrinth.has_wall(GridPoint::new(x, y), Direction::North) {
                "--"
            } else {
                "  "
            });
        }
        out.push_str("+\n");

        for x in 0..labyrinth.width() {
            let wall = labyrinth.has_wall(GridPoint::new(x, y), Direction::West);
            out.push(if wall { '|' } else { ' ' });
            out.push_str("  ");
        }
        let last = GridPoint::new(labyrinth.width() - 1, y);
        let east = labyrinth.has_wall(last, Direction::East);
        out.push(if east { '|' } else { ' ' });
        out.push('\n');
    }

    let bottom = labyrinth.height() - 1;
    for x in 0..labyrinth.width() {
        out.push('+');
        let south = labyrinth.has_wall(GridPoint::new(x, bottom), Direction::South);
        out.push_str(if south { "--" } else { "  " });
    }
    out.push('+');
    out
}
