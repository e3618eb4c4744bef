use std::path::PathBuf;

use anyhow::Context as _;
use neuroevo_engine::{
    EvolutionSeed, Generation, Neuroevolution, NeuroevolutionConfig, NeuroevolutionConfigPatch,
};
use neuroevo_network::{Network, NetworkShape};

use crate::{
    dataset,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Maximum number of generations to evolve
    #[arg(long, default_value_t = 100)]
    generations: usize,
    /// Stop once the best network reaches this accuracy (percent)
    #[arg(long, default_value_t = 100.0)]
    target: f64,
    /// JSON file with configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Hidden layer sizes, comma separated
    #[arg(long, value_delimiter = ',')]
    hidden: Option<Vec<usize>>,
    #[arg(long)]
    population: Option<usize>,
    #[arg(long)]
    elitism: Option<f64>,
    #[arg(long)]
    random_behaviour: Option<f64>,
    #[arg(long)]
    mutation_rate: Option<f64>,
    /// Previous generations to keep (-1 keeps all)
    #[arg(long, allow_hyphen_values = true)]
    historic: Option<i32>,
    /// Keep a single genome of the previous generation
    #[arg(long)]
    low_historic: bool,
    #[arg(long)]
    nb_child: Option<usize>,
    #[arg(long)]
    crossover_factor: Option<f64>,
    /// Random seed as 32 hexadecimal digits
    #[arg(long)]
    seed: Option<EvolutionSeed>,
    /// Exported population to resume from
    #[arg(long)]
    import: Option<PathBuf>,
    /// Output file path for the exported population
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn config_patch(&self) -> NeuroevolutionConfigPatch {
        NeuroevolutionConfigPatch {
            network: self
                .hidden
                .clone()
                .map(|hidden| NetworkShape::new(dataset::INPUTS, hidden, dataset::OUTPUTS)),
            population: self.population,
            elitism: self.elitism,
            random_behaviour: self.random_behaviour,
            mutation_rate: self.mutation_rate,
            historic: self.historic,
            low_historic: self.low_historic.then_some(true),
            score_sort: None,
            nb_child: self.nb_child,
            crossover_factor: self.crossover_factor,
        }
    }
}

/// Builds the engine from defaults, the config file, the import and the
/// command line options, in increasing precedence.
fn prepare_engine(arg: &TrainArg) -> anyhow::Result<Neuroevolution> {
    let mut config = NeuroevolutionConfig {
        network: dataset::default_shape(),
        ..NeuroevolutionConfig::default()
    };
    if let Some(path) = &arg.config {
        config.apply(util::read_config_file(path)?);
    }

    let mut engine = match arg.seed {
        Some(seed) => Neuroevolution::with_seed(config, seed),
        None => Neuroevolution::new(config),
    };
    if let Some(path) = &arg.import {
        let payload = util::read_population_file(path)?;
        eprintln!(
            "Imported {} generations ({} genomes) from {}",
            payload.data.len(),
            payload.genome_count(),
            path.display()
        );
        engine.import(payload);
    }
    // command line options win over both the config file and the import
    engine.set_configuration(arg.config_patch());

    let shape = &engine.configuration().network;
    anyhow::ensure!(
        shape.inputs == dataset::INPUTS && shape.outputs == dataset::OUTPUTS,
        "network must have {} inputs and {} output, got {:?}",
        dataset::INPUTS,
        dataset::OUTPUTS,
        shape.layer_sizes(),
    );
    Ok(engine)
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let mut engine = prepare_engine(arg)?;
    let mut networks = engine
        .advance()
        .context("Failed to create the first population")?;
    for generation in 0..arg.generations {
        for network in &networks {
            engine.record_score(network, dataset::accuracy(network))?;
        }
        let summary = engine
            .history()
            .latest()
            .and_then(Generation::score_summary)
            .context("Population is empty")?;
        eprintln!(
            "Generation #{generation}: min {:.1}% / max {:.1}% / mean {:.1}%",
            summary.min, summary.max, summary.mean
        );

        // advancing snapshots the generation just scored for export
        networks = engine
            .advance()
            .with_context(|| format!("Failed to breed generation #{}", generation + 1))?;
        if summary.max >= arg.target {
            eprintln!("Target accuracy {:.1}% reached", arg.target);
            break;
        }
    }

    let exported = engine.export();
    if let Some(best) = exported.data.last().and_then(|genomes| genomes.first()) {
        let network = Network::from_data(&best.network);
        eprintln!("Best network ({:.1}%):", best.score);
        for (input, expected, output) in dataset::evaluate(&network) {
            match output {
                Some(output) => eprintln!("  {input:?} => {output:.3} (expected {expected})"),
                None => eprintln!("  {input:?} => n/a (expected {expected})"),
            }
        }
    }

    Output::save_json(&exported, arg.output.clone())?;
    if let Some(path) = &arg.output {
        eprintln!("Population saved to {}", path.display());
    }
    Ok(())
}
