use dice_odds::{Distribution, Mode, Outcome, Simulation};
use log::info;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

const SIMULATION_TIMEOUT: Duration = Duration::from_secs(10);

enum Request<'a> {
    Roll(&'a str),
    Analyze(&'a str),
    Cumulative(&'a str),
    Simulate(usize, &'a str),
}

impl<'a> Request<'a> {
    fn parse(line: &'a str) -> Result<Self, String> {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix('?') {
            Ok(Self::Analyze(rest))
        } else if let Some(rest) = line.strip_prefix('C') {
            Ok(Self::Cumulative(rest))
        } else if let Some(rest) = line.strip_prefix('#') {
            let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            let samples = rest[..end]
                .parse()
                .map_err(|_| format!("expected a sample count after '#', found {:?}", rest))?;
            Ok(Self::Simulate(samples, &rest[end..]))
        } else {
            Ok(Self::Roll(line))
        }
    }
}

fn print_table(dist: &Distribution) {
    for ((k, c), (_, p)) in dist.iter().zip(dist.probabilities()) {
        println!("{:>6} {:>12} {:>8.3}%", k, c, p * 100.0);
    }
}

fn print_simulation(sim: &Simulation) {
    match &sim.histogram {
        Some(hist) => {
            print_table(hist);
            println!("mean: {:.4} over {} samples", hist.mean(), sim.samples);
        }
        None => println!("no samples taken"),
    }
    if sim.cancelled {
        println!("(stopped early)");
    }
}

fn run(line: &str) -> Result<(), Box<dyn std::error::Error>> {
    match Request::parse(line)? {
        Request::Roll(expr) => {
            println!("{}", dice_odds::calculate(expr, Mode::Sampling, rand::thread_rng())?);
        }
        Request::Analyze(expr) => {
            if let Outcome::Distribution(dist) =
                dice_odds::calculate(expr, Mode::Analytic, rand::thread_rng())?
            {
                print_table(&dist);
                println!("expected value: {:.4}", dist.mean());
            }
        }
        Request::Cumulative(expr) => {
            let dist = dice_odds::analyze(expr)?;
            print_table(&dist.cumulative());
        }
        Request::Simulate(samples, expr) => {
            let deadline = Instant::now() + SIMULATION_TIMEOUT;
            let sim = dice_odds::simulate(expr, samples, rand::thread_rng(), || {
                Instant::now() >= deadline
            })?;
            print_simulation(&sim);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    info!("reading expressions from stdin");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        if !line.trim().is_empty() {
            if let Err(why) = run(&line) {
                eprintln!("Error: {}", why);
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
