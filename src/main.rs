//! Simulation hors ligne d'une micromouse.
//!
//! Fait parcourir un labyrinthe de référence à une [`Mouse`] : exploration
//! jusqu'au but, cartographie du chemin de retour, puis course rapide sur la
//! meilleure route.
//!
//! Utilisation :
//!   rusty-mouse                                  # exemple 5x5 intégré
//!   rusty-mouse --maze maze.txt --config maze.json --noise 0.05 --seed 7
//!
//! Logs avec `RUST_LOG=info` (changements de phase) ou `RUST_LOG=debug`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use rusty_mouse::ascii_utils::{render_labyrinth, render_mouse};
use rusty_mouse::labyrinth_mock;
use rusty_mouse::{Labyrinth, MazeConfig, Mouse, Phase, Sensors, StartConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Fichier texte du labyrinthe (format `+--+` ou `%`) ; exemple 5x5 par défaut
    #[arg(short, long)]
    maze: Option<PathBuf>,

    /// Configuration JSON (taille, départ, but) ; déduite du labyrinthe par défaut
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Probabilité qu'une mesure capteur soit inversée
    #[arg(long, default_value_t = 0.0, value_parser = parse_probability)]
    noise: f64,

    /// Graine du bruit capteur
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Nombre de cycles avant abandon
    #[arg(long, default_value_t = 10_000)]
    max_steps: usize,

    /// Arrivées au but en course rapide avant l'arrêt
    #[arg(long, default_value_t = 1)]
    laps: usize,

    /// N'affiche que la ligne de bilan
    #[arg(short, long)]
    quiet: bool,
}

fn parse_probability(text: &str) -> Result<f64, String> {
    let value: f64 = text.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not a probability"))
    }
}

fn load_labyrinth(path: Option<&PathBuf>) -> Result<Labyrinth> {
    let Some(path) = path else {
        return Ok(labyrinth_mock::sample_labyrinth()?);
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read maze {}", path.display()))?;
    text.parse::<Labyrinth>()
        .with_context(|| format!("invalid maze {}", path.display()))
}

/// Configuration pour `labyrinth` : lue depuis `path`, ou départ dans le coin
/// Sud-Ouest face au Nord avec le centre pour but.
fn load_config(path: Option<&PathBuf>, labyrinth: &Labyrinth) -> Result<MazeConfig> {
    let config = match path {
        Some(path) => MazeConfig::load(path)?,
        None => MazeConfig {
            width: labyrinth.width(),
            height: labyrinth.height(),
            start: StartConfig {
                x: 0,
                y: labyrinth.height() - 1,
                ..MazeConfig::default().start
            },
            ..MazeConfig::default()
        },
    };
    if (config.width, config.height) != (labyrinth.width(), labyrinth.height()) {
        bail!(
            "configuration describes a {}x{} maze but the labyrinth is {}x{}",
            config.width,
            config.height,
            labyrinth.width(),
            labyrinth.height()
        );
    }
    Ok(config)
}

/// Fin d'une simulation.
#[derive(Debug)]
enum Outcome {
    Finished,
    OutOfSteps,
    /// La carte figée de la course rapide croit ouvert un passage muré.
    Stuck,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut labyrinth = load_labyrinth(args.maze.as_ref())?.with_noise(args.noise, args.seed);
    let config = load_config(args.config.as_ref(), &labyrinth)?;
    let mut mouse = Mouse::from_config(&config).context("invalid maze configuration")?;

    if !args.quiet {
        println!("{}\n", render_labyrinth(&labyrinth));
    }

    let mut phase = mouse.phase();
    let mut laps = 0;
    let mut refused = 0;
    let mut on_goal = false;
    let mut cycles = 0;
    let mut outcome = Outcome::OutOfSteps;

    while cycles < args.max_steps {
        cycles += 1;
        let pose = mouse.pose();
        let reading = labyrinth.read(&pose);
        let step = mouse.decide(&reading);

        if mouse.phase() != phase {
            phase = mouse.phase();
            info!("cycle {cycles}: {phase} at {pose}");
            if !args.quiet {
                println!("cycle {cycles}: {phase}\n{}", render_mouse(&mouse));
            }
        }

        let at_goal = mouse.maze().is_goal(pose.position);
        if phase == Phase::SpeedRun && at_goal && !on_goal {
            laps += 1;
            info!("speed run {laps} reached the goal at cycle {cycles}");
            if laps >= args.laps {
                outcome = Outcome::Finished;
                break;
            }
        }
        on_goal = at_goal;

        if labyrinth.blocks(&pose, &step) {
            refused += 1;
            warn!("cycle {cycles}: refused move from {pose} into a wall");
            if phase == Phase::SpeedRun {
                outcome = Outcome::Stuck;
                break;
            }
            continue;
        }
        mouse.apply(step);
    }

    if !args.quiet {
        println!("{}", render_mouse(&mouse));
    }
    println!(
        "{:?} after {} cycles: phase {}, {} speed run(s), {} refused move(s), route of {} cells",
        outcome,
        cycles,
        mouse.phase(),
        laps,
        refused,
        mouse.maze().best_route().len()
    );
    Ok(())
}
