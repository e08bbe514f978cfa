//! Labyrinthe de référence, utilisé pour simuler la souris hors ligne.
//!
//! Deux formats texte sont acceptés. Le premier dessine chaque cellule sur
//! trois colonnes :
//!
//! ```text
//! +--+--+
//! |     |
//! +  +--+
//! |     |
//! +--+--+
//! ```
//!
//! `+` marque un coin, `--` un mur horizontal, `|` un mur vertical et l'espace
//! une ouverture. L'intérieur des cellules peut contenir n'importe quel
//! caractère.
//!
//! Le second est le format `%` des fichiers de labyrinthe historiques, quatre
//! caractères par cellule, chaque cellule portant ses propres murs :
//!
//! ```text
//! %%%%%%%%%
//! %%  %%  %
//! %%  %%%%%
//! %%      %
//! %%%%%%%%%
//! ```
//!
//! Pour la cellule `x` de la rangée `y`, le mur Nord est le caractère
//! `4x + 2` de la ligne `2y`, le mur Sud le même caractère de la ligne
//! `2y + 2`, et les murs Ouest et Est les caractères `4x + 1` et `4x + 4` de la
//! ligne `2y + 1`. Le premier caractère des lignes de cellules est ignoré.

use crate::direction::Direction;
use crate::error::LabyrinthError;
use crate::navigation::Step;
use crate::pose::{GridPoint, GridPose};
use crate::sensor::{Reading, Sensors, Wall};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Labyrinth {
    width: u8,
    height: u8,
    /// Murs de chaque cellule, indexés par `Direction::index`
    walls: Vec<[bool; 4]>,
    noise: f64,
    rng: StdRng,
}

impl Labyrinth {
    /// Lit un labyrinthe dans l'un des deux formats texte, reconnu au premier
    /// caractère.
    pub fn parse(text: &str) -> Result<Self, LabyrinthError> {
        let lines = read_lines(text)?;
        if lines[0].first() == Some(&'%') {
            Self::parse_percent(&lines)
        } else {
            Self::parse_corners(&lines)
        }
    }

    fn parse_corners(lines: &[Vec<char>]) -> Result<Self, LabyrinthError> {
        let columns = lines[0].len();
        if columns < 4 || (columns - 1) % 3 != 0 {
            return Err(LabyrinthError::CellWidth(columns));
        }
        if let Some((index, line)) = lines.iter().enumerate().find(|(_, l)| l.len() != columns) {
            return Err(LabyrinthError::RaggedLine {
                line: index + 1,
                expected: columns,
                found: line.len(),
            });
        }

        let width = (columns - 1) / 3;
        let height = (lines.len() - 1) / 2;

        for (row, line) in lines.iter().enumerate().step_by(2) {
            for column in (0..columns).step_by(3) {
                expect_char(line, row, column, &['+'])?;
            }
        }

        let mut walls = vec![[false; 4]; width * height];
        for y in 0..height {
            let above = &lines[2 * y];
            let middle = &lines[2 * y + 1];
            let below = &lines[2 * y + 2];
            for x in 0..width {
                let cell = &mut walls[y * width + x];
                cell[Direction::North.index()] = horizontal_wall(above, 2 * y, 3 * x + 1)?;
                cell[Direction::South.index()] = horizontal_wall(below, 2 * y + 2, 3 * x + 1)?;
                cell[Direction::West.index()] = vertical_wall(middle, 2 * y + 1, 3 * x)?;
                cell[Direction::East.index()] = vertical_wall(middle, 2 * y + 1, 3 * x + 3)?;
            }
        }

        Self::from_walls(width, height, walls)
    }

    fn parse_percent(lines: &[Vec<char>]) -> Result<Self, LabyrinthError> {
        let columns = lines[0].len();
        let width = columns / 4;
        if width == 0 {
            return Err(LabyrinthError::CellWidth(columns));
        }
        let height = (lines.len() - 1) / 2;

        // Les lignes peuvent être plus longues, jamais plus courtes.
        for (index, line) in lines.iter().enumerate() {
            let expected = if index % 2 == 0 { 4 * width - 1 } else { 4 * width + 1 };
            if line.len() < expected {
                return Err(LabyrinthError::RaggedLine {
                    line: index + 1,
                    expected,
                    found: line.len(),
                });
            }
        }

        let solid = |line: &[char], column: usize| line[column] == '%';
        let mut walls = vec![[false; 4]; width * height];
        for y in 0..height {
            let above = &lines[2 * y];
            let middle = &lines[2 * y + 1];
            let below = &lines[2 * y + 2];
            for x in 0..width {
                let cell = &mut walls[y * width + x];
                cell[Direction::North.index()] = solid(above, 4 * x + 2);
                cell[Direction::South.index()] = solid(below, 4 * x + 2);
                cell[Direction::West.index()] = solid(middle, 4 * x + 1);
                cell[Direction::East.index()] = solid(middle, 4 * x + 4);
            }
        }

        Self::from_walls(width, height, walls)
    }

    fn from_walls(
        width: usize,
        height: usize,
        walls: Vec<[bool; 4]>,
    ) -> Result<Self, LabyrinthError> {
        let (Ok(w), Ok(h)) = (u8::try_from(width), u8::try_from(height)) else {
            return Err(LabyrinthError::TooLarge { width, height });
        };
        Ok(Self {
            width: w,
            height: h,
            walls,
            noise: 0.0,
            rng: StdRng::seed_from_u64(0),
        })
    }

    /// Rend les capteurs menteurs : chaque mesure est inversée avec la
    /// probabilité donnée, tirée d'un RNG initialisé avec `seed`.
    pub fn with_noise(mut self, probability: f64, seed: u64) -> Self {
        self.noise = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    pub fn contains(&self, position: GridPoint) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Vérifie si le vrai labyrinthe a un mur du côté `side` de `position`.
    /// L'extérieur de la grille est plein.
    pub fn has_wall(&self, position: GridPoint, side: Direction) -> bool {
        if !self.contains(position) {
            return true;
        }
        match position.step(side) {
            Some(next) if self.contains(next) => {
                let index = usize::from(position.y) * usize::from(self.width)
                    + usize::from(position.x);
                self.walls[index][side.index()]
            }
            _ => true,
        }
    }

    /// Lecture sans bruit à `pose`. Les murs latéraux de la cellule devant ne
    /// se voient qu'à travers une ouverture.
    pub fn exact_reading(&self, pose: &GridPose) -> Reading {
        let here = pose.position;
        let heading = pose.direction;
        let wall =
            |position: GridPoint, side: Direction| Wall::from_bool(self.has_wall(position, side));

        let mut reading = Reading::local(
            wall(here, heading.turn_left()),
            wall(here, heading),
            wall(here, heading.turn_right()),
        );
        if reading.front == Wall::Open {
            if let Some(ahead) = here.step(heading) {
                reading.front_left = wall(ahead, heading.turn_left());
                reading.front_right = wall(ahead, heading.turn_right());
            }
        }
        reading
    }

    /// Vérifie si exécuter `step` depuis `pose` traverserait un mur.
    pub fn blocks(&self, pose: &GridPose, step: &Step) -> bool {
        match step {
            Step::Advance(next) => self.has_wall(pose.position, next.direction),
            Step::Turn(_) => false,
        }
    }
}

impl FromStr for Labyrinth {
    type Err = LabyrinthError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl Sensors for Labyrinth {
    fn read(&mut self, pose: &GridPose) -> Reading {
        let exact = self.exact_reading(pose);
        if self.noise <= 0.0 {
            return exact;
        }
        let (noise, rng) = (self.noise, &mut self.rng);
        exact.map(|slot| {
            if slot != Wall::Undefined && rng.random_bool(noise) {
                slot.flipped()
            } else {
                slot
            }
        })
    }
}

/// Découpe le texte en lignes, sans `\r` ni lignes vides finales.
fn read_lines(text: &str) -> Result<Vec<Vec<char>>, LabyrinthError> {
    let mut lines: Vec<Vec<char>> = text
        .lines()
        .map(|line| line.trim_end_matches('\r').chars().collect())
        .collect();
    while lines.last().is_some_and(|line| line.iter().all(|c| c.is_whitespace())) {
        lines.pop();
    }

    if lines.is_empty() {
        return Err(LabyrinthError::Empty);
    }
    if lines.len() < 3 || lines.len() % 2 == 0 {
        return Err(LabyrinthError::LineCount(lines.len()));
    }
    Ok(lines)
}

fn expect_char(
    line: &[char],
    row: usize,
    column: usize,
    allowed: &[char],
) -> Result<char, LabyrinthError> {
    let found = line[column];
    if allowed.contains(&found) {
        Ok(found)
    } else {
        Err(LabyrinthError::UnexpectedChar {
            line: row + 1,
            column: column + 1,
            found,
        })
    }
}

fn horizontal_wall(line: &[char], row: usize, column: usize) -> Result<bool, LabyrinthError> {
    let first = expect_char(line, row, column, &['-', ' '])?;
    expect_char(line, row, column + 1, &[first])?;
    Ok(first == '-')
}

fn vertical_wall(line: &[char], row: usize, column: usize) -> Result<bool, LabyrinthError> {
    Ok(expect_char(line, row, column, &['|', ' '])? == '|')
}
