//! Veripath CLI - concolic exploration reports

#![warn(missing_docs)]

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use veripath_engine::{EnumerationOracle, Explorer};

mod demos;
mod render;

#[derive(Parser)]
#[command(name = "veripath")]
#[command(about = "Concolic path exploration over integer and boolean targets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore built-in demo targets and report every feasible path
    Demo {
        /// Demo target (all of them when omitted)
        name: Option<String>,

        /// Emit path records as JSON instead of the colored report
        #[arg(long)]
        json: bool,

        /// Constraint backend answering satisfiability queries
        #[arg(long, value_enum, default_value_t = Backend::Enumerate)]
        backend: Backend,
    },

    /// List the built-in demo targets
    List,
}

/// Available constraint backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Bounded exhaustive search, no solver installation required
    Enumerate,

    /// The Z3 SMT solver
    #[cfg(feature = "z3")]
    Z3,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Demo {
            name,
            json,
            backend,
        } => {
            let selected: Vec<&str> = match &name {
                Some(one) => vec![one.as_str()],
                None => demos::DEMOS.iter().map(|(name, _)| *name).collect(),
            };
            for (i, demo) in selected.iter().enumerate() {
                if i > 0 && !json {
                    println!();
                }
                explore_demo(demo, backend, json)?;
            }
        }

        Commands::List => {
            for (name, summary) in demos::DEMOS {
                println!("{name:12} {summary}");
            }
        }
    }

    Ok(())
}

fn explore_demo(name: &str, backend: Backend, json: bool) -> Result<()> {
    let records = match backend {
        Backend::Enumerate => {
            let (lo, hi) = demos::window(name);
            let mut explorer = Explorer::new(EnumerationOracle::with_range(lo, hi));
            demos::run(name, &mut explorer)?
        }

        #[cfg(feature = "z3")]
        Backend::Z3 => {
            let config = z3::Config::new();
            let context = z3::Context::new(&config);
            let mut explorer = Explorer::new(veripath_engine::Z3Oracle::new(&context));
            demos::run(name, &mut explorer)?
        }
    };

    if json {
        render::print_json(&records)?;
    } else {
        render::print_report(name, &records);
    }
    Ok(())
}
