use std::path::PathBuf;

use neuroevo_engine::{Genome, NeuroevolutionConfig, ScoreSummary};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    /// Exported population file
    path: PathBuf,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let payload = util::read_population_file(&arg.path)?;
    // missing keys fall back to defaults, as they would on import
    let config = NeuroevolutionConfig::default().with(payload.config.clone());

    println!("Population: {}", arg.path.display());
    println!("  Network:          {:?}", config.network.layer_sizes());
    println!("  Population:       {}", config.population);
    println!("  Elitism:          {}", config.elitism);
    println!("  Random behaviour: {}", config.random_behaviour);
    println!("  Mutation rate:    {}", config.mutation_rate);
    println!("  Historic:         {}", config.historic);
    println!("  Low historic:     {}", config.low_historic);
    println!("  Score sort:       {:?}", config.score_sort);
    println!("  Children / pair:  {}", config.nb_child);
    println!("  Crossover factor: {}", config.crossover_factor);

    println!("Generations: {}", payload.data.len());
    for (i, genomes) in payload.data.iter().enumerate() {
        match ScoreSummary::new(genomes.iter().map(Genome::score)) {
            Some(summary) => println!(
                "  #{i:<3} {:4} genomes, score min {:.3} / max {:.3} / mean {:.3}",
                genomes.len(),
                summary.min,
                summary.max,
                summary.mean
            ),
            None => println!("  #{i:<3} empty"),
        }
    }
    Ok(())
}
