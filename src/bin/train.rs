use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use neurons::network::Network;
use neurons::topology::Topology;
use neurons::trainer::{Logging, StopCondition, Trainer};
use neurons::utils::normalize_by_feature_scaling;
use rand::Rng;
use std::{fs, io::stderr, path::PathBuf};
use tracing::{info, Level};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::{filter::Targets, prelude::*, registry, util::SubscriberInitExt};

/// Trains a network to tell apart the quadrants of noisy points on a circle.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Verbosity level.
    #[clap(short, long, default_value_t = Level::INFO)]
    verbosity: Level,

    /// A RON file describing the network topology.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Number of training epochs.
    #[clap(short, long, default_value_t = 200)]
    epochs: usize,
}

type Example = (Vec<f64>, Vec<f64>);

fn generate_data(num_samples: usize) -> Result<Vec<Example>, Anyhow> {
    let mut rng = rand::thread_rng();

    let mut points = Vec::with_capacity(num_samples);
    let mut classes = Vec::with_capacity(num_samples);
    for _ in 0..num_samples {
        let theta = rng.gen_range(0.0..2.0 * std::f64::consts::PI);
        let dx: f64 = rng.gen_range(-0.1..0.1);
        let dy: f64 = rng.gen_range(-0.1..0.1);
        let point = vec![theta.cos() + dx, theta.sin() + dy];
        let class = if point[0] * point[1] > 0.0 {
            vec![1.0, 0.0]
        } else {
            vec![0.0, 1.0]
        };
        points.push(point);
        classes.push(class);
    }

    normalize_by_feature_scaling(&mut points)?;
    Ok(points.into_iter().zip(classes).collect())
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &v)| {
            if v > best.1 {
                (i, v)
            } else {
                best
            }
        })
        .0
}

fn score(set_name: &str, network: &mut Network, data: &[Example]) -> Result<(), Anyhow> {
    let (inputs, expecteds): (Vec<_>, Vec<_>) = data
        .iter()
        .map(|(input, expected)| (input.as_slice(), argmax(expected)))
        .unzip();
    let v = network.validate(&inputs, &expecteds, argmax)?;
    info!(
        set = set_name,
        correct = v.correct,
        total = v.total,
        percentage = v.percentage * 100.0,
        "results"
    );
    Ok(())
}

fn main() -> Result<(), Anyhow> {
    let cli = Cli::parse();

    let filter = Targets::new().with_default(cli.verbosity);
    registry()
        .with(filter)
        .with(layer().with_writer(stderr))
        .init();

    let topology = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            ron::from_str(&text).with_context(|| format!("invalid topology `{}`", path.display()))?
        }
        None => Topology::new(&[2, 5, 5, 2]).learning_rate(0.3),
    };

    let training_data = generate_data(2_000)?;
    let mut network = Trainer::new(Network::new(&topology)?)
        .stop_condition(StopCondition::Iterations(cli.epochs))
        .logging(Logging::Iterations(10))
        .train(&training_data)?;

    score("training", &mut network, &training_data)?;
    score("test", &mut network, &generate_data(500)?)?;
    Ok(())
}
