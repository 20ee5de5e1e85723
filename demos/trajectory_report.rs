use std::env;
use std::fs::File;
use std::io::BufWriter;

use ion_deposition::prelude::*;

fn main() -> Result<(), IonDepositionError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: trajectory_report [experiment.toml] [trajectory-prefix]
    let mut args = env::args().skip(1);
    let experiment = match args.next() {
        Some(path) => ExperimentConfig::load_from_file(path)?,
        None => ExperimentConfig::default(),
    };
    let csv_prefix = args.next();

    let engine = experiment.simulator();
    let results = simulate_variants(&engine, &experiment.parameters);

    let d = results.derived;
    println!("U0  = {:.4}", d.reference_voltage);
    println!("U   = {:.4}", d.operating_voltage);
    println!("UNM = {:.2}", d.deflection_voltage);
    for variant in ParticleVariant::ALL {
        let r = results.get(variant);
        println!("particle {variant}: {} ({:?}, {} steps)", r.impact, r.outcome, r.steps);
    }

    if let Some(prefix) = csv_prefix {
        for variant in ParticleVariant::ALL {
            let file = File::create(format!("{prefix}_{variant}.csv"))?;
            write_trajectory_csv(BufWriter::new(file), results.get(variant))?;
        }
        let file = File::create(format!("{prefix}_summary.csv"))?;
        write_impact_summary_csv(BufWriter::new(file), &results)?;
    }
    Ok(())
}
