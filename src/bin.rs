use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use cycpatt::{count_avoiders, set_avoids, InteractingCyclePattern, Permutation};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "cycpatt",
    about = "Find interacting cycle patterns in the cycle decomposition of permutations."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through the example permutation and patterns, then count avoiders.
    Demo {
        /// Largest permutation length to count avoiders for.
        #[arg(long, value_name = "N", default_value_t = 6)]
        max_len: usize,
    },
    /// List every occurrence of a pattern in a permutation.
    Occurrences {
        /// Permutation in cycle form "(0,4)(1,5)" or one-line form "4 5 0 1".
        permutation: String,
        /// Pattern such as "[0,2](1,3), {0}".
        pattern: String,
    },
    /// Count the permutations of each length up to N avoiding a pattern.
    Count {
        pattern: String,
        #[arg(long, value_name = "N", default_value_t = 6)]
        max_len: usize,
    },
    /// Check whether a permutation avoids every given pattern.
    Avoids {
        permutation: String,
        #[arg(required = true)]
        patterns: Vec<String>,
    },
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Demo { max_len: 6 }) {
        Command::Demo { max_len } => demo(max_len),
        Command::Occurrences {
            permutation,
            pattern,
        } => {
            let permutation = parse_permutation(&permutation)?;
            let pattern = parse_pattern(&pattern)?;
            report_occurrences(&permutation, &pattern);
            Ok(())
        }
        Command::Count { pattern, max_len } => {
            let pattern = parse_pattern(&pattern)?;
            report_counts(&pattern, max_len);
            Ok(())
        }
        Command::Avoids {
            permutation,
            patterns,
        } => {
            let permutation = parse_permutation(&permutation)?;
            let patterns = patterns
                .iter()
                .map(|pattern| parse_pattern(pattern))
                .collect::<Result<Vec<_>>>()?;
            println!("{}", set_avoids(&permutation, &patterns));
            Ok(())
        }
    }
}

fn parse_permutation(text: &str) -> Result<Permutation> {
    text.parse()
        .with_context(|| format!("failed to parse permutation {text:?}"))
}

fn parse_pattern(text: &str) -> Result<InteractingCyclePattern> {
    text.parse()
        .with_context(|| format!("failed to parse pattern {text:?}"))
}

fn demo(max_len: usize) -> Result<()> {
    let linear = Permutation::from_map(vec![4, 5, 6, 7, 0, 1, 3, 2])?;
    let cyclic = Permutation::from_disjoint_cycles(&[vec![0, 4], vec![1, 5], vec![2, 6, 3, 7]])?;
    ensure!(
        linear == cyclic,
        "one-line and cycle notation disagree: {linear} vs {cyclic}"
    );

    let patterns = [
        InteractingCyclePattern::builder()
            .open([0, 2])
            .open([1, 3])
            .build()?,
        InteractingCyclePattern::builder()
            .open([0, 2])
            .open([1, 3])
            .adjacent(0)
            .adjacent(2)
            .build()?,
        InteractingCyclePattern::builder()
            .open([0, 2])
            .closed([1, 3])
            .build()?,
    ];
    for pattern in &patterns {
        report_occurrences(&linear, pattern);
        println!();
    }

    report_counts(&patterns[0], max_len);
    Ok(())
}

fn report_occurrences(permutation: &Permutation, pattern: &InteractingCyclePattern) {
    println!("All occurrences of {pattern} in {permutation}");
    for occurrence in permutation.occurrences(pattern) {
        println!("{occurrence}");
    }
}

fn report_counts(pattern: &InteractingCyclePattern, max_len: usize) {
    println!("How many permutations of length n avoid/contain the interacting cycle pattern {pattern}?");
    for n in 1..=max_len {
        let total: usize = (1..=n).product();
        let avoiding = count_avoiders(pattern, n);
        println!(
            "When n={n} then {avoiding} avoid, while {} contain.",
            total - avoiding
        );
    }
}
