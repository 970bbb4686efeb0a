use anyhow::{Context, Result};
use clap::Parser;
use crusti_apr::{
    InstanceBatch, InstancesReader, ProblemInstance, Proposition, Resolution, ResolverTask,
    Variable,
};
use itertools::Itertools;
use log::{error, info, warn};
use std::{
    collections::BTreeSet,
    fs::{self, File},
    io::{self, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

/// Searches for a public announcement that brings every agent of a batch of
/// belief-revision problem instances to its target beliefs.
#[derive(Parser)]
#[command(name = "crusti_apr", version, about)]
struct Cli {
    /// The input file containing the JSON instance batch; standard input is
    /// read when absent
    input: Option<PathBuf>,
    /// A deadline in seconds after which the resolution is cancelled
    #[arg(short, long)]
    timeout: Option<u64>,
}

fn main() {
    env_logger::init();
    if let Err(e) = run(&Cli::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let batch = read_batch(cli.input.as_deref())?;
    for (index, parse_error) in batch.skipped() {
        warn!("skipping the record at index {}: {}", index, parse_error);
    }
    let instances = batch.into_instances();
    info!("resolving {} instance(s)", instances.len());
    match resolve_with_deadline(instances.clone(), cli.timeout)? {
        Resolution::Announcement(announcement) => print_announcement(&instances, &announcement)?,
        Resolution::NoSolution => println!("no solution"),
        Resolution::Cancelled => println!("cancelled"),
    }
    Ok(())
}

fn read_batch(input: Option<&Path>) -> Result<InstanceBatch> {
    match input {
        Some(path) => {
            let canonical = fs::canonicalize(path)
                .with_context(|| format!(r#"while opening file "{}""#, path.display()))?;
            info!("reading input file {:?}", canonical);
            InstancesReader.read(BufReader::new(File::open(canonical)?))
        }
        None => {
            info!("reading standard input");
            InstancesReader.read(io::stdin().lock())
        }
    }
}

fn resolve_with_deadline(
    instances: Vec<ProblemInstance>,
    timeout: Option<u64>,
) -> Result<Resolution> {
    let task = ResolverTask::spawn(instances);
    if let Some(seconds) = timeout {
        let token = task.token();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs(seconds));
            token.cancel();
        });
    }
    task.join()
}

fn print_announcement(instances: &[ProblemInstance], announcement: &Proposition) -> Result<()> {
    println!("announcement: {}", announcement.to_dnf().to_parsable_string());
    let universe = instances
        .iter()
        .flat_map(ProblemInstance::variables)
        .collect::<BTreeSet<Variable>>();
    for (index, instance) in instances.iter().enumerate() {
        let revised = Proposition::and_all(instance.revise_by(announcement)?.into_iter())
            .unwrap_or(Proposition::True);
        println!(
            "instance {}: revised models {}",
            index,
            revised.models_over(&universe).iter().join(" ")
        );
    }
    Ok(())
}
