//! boxpack: 3D box packing from the command line.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use u_packing_cli::{
    generate_by_cutting, write_items_csv, DatasetParser, RunReport, DEFAULT_SEED,
};
use u_packing_d3::{
    Config, ContainerCatalog, Dimensions, FfdAllocator, HintProvider, Packer3D, SeededHint,
    SolveResult, Solver, StackHint,
};

#[derive(Parser)]
#[command(name = "boxpack")]
#[command(about = "Deterministic 3D box packing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack items, in file order, into one container
    Single {
        /// Container extents
        #[arg(short, long, num_args = 3, value_names = ["L", "W", "H"], required = true)]
        container: Vec<f64>,

        /// CSV item source (length,width,height,quantity)
        #[arg(short, long)]
        items: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Pack items into as many containers from a catalog as needed
    Multi {
        /// CSV item source (length,width,height,quantity)
        #[arg(short, long)]
        items: PathBuf,

        /// Catalog file (CSV rows or JSON triples); the standard catalog if omitted
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Write a synthetic item source by cutting a container into pieces
    Generate {
        /// Container extents
        #[arg(short, long, num_args = 3, value_names = ["L", "W", "H"], required = true)]
        container: Vec<u32>,

        /// Number of pieces
        #[arg(short = 'n', long)]
        count: usize,

        /// Random seed
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Time limit in seconds (0 = unlimited)
    #[arg(short, long, default_value = "0")]
    time_limit: u64,

    /// Search opened containers in parallel
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel (0 = all cores)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Placement hint consulted before the exhaustive search
    #[arg(long, value_enum, default_value = "none")]
    hint: HintArg,

    /// Seed for --hint seeded
    #[arg(long, default_value_t = DEFAULT_SEED)]
    hint_seed: u64,

    /// Output file for the report (JSON)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file for placements (CSV)
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum HintArg {
    /// Exhaustive search only
    None,
    /// Stack on top of the last placed box
    Stack,
    /// Random legal-looking guesses from a fixed seed
    Seeded,
}

impl RunArgs {
    fn config(&self) -> Config {
        Config::new()
            .with_time_limit(self.time_limit * 1000)
            .with_parallel(self.parallel)
            .with_threads(self.threads)
    }

    fn hint(&self) -> Option<Arc<dyn HintProvider>> {
        match self.hint {
            HintArg::None => None,
            HintArg::Stack => Some(Arc::new(StackHint)),
            HintArg::Seeded => Some(Arc::new(SeededHint::new(self.hint_seed))),
        }
    }

    fn finish(&self, mode: &str, dataset: &str, result: &SolveResult) -> anyhow::Result<()> {
        let mut report = RunReport::new(mode, dataset, result);
        if let Some(hint) = self.hint() {
            report = report.with_hint(hint.name());
        }
        report.print_summary();

        if let Some(path) = &self.output {
            report.save_json(path)?;
            println!("\nResults saved to: {}", path.display());
        }

        if let Some(path) = &self.csv {
            report.save_csv(path)?;
            println!("CSV saved to: {}", path.display());
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let parser = DatasetParser::new();

    match cli.command {
        Commands::Single {
            container,
            items,
            run,
        } => {
            let container = Dimensions::new(container[0], container[1], container[2]);
            let ds = parser.parse_items_file(&items)?;
            report_skipped(ds.skipped_rows);

            let mut packer = Packer3D::new(run.config());
            if let Some(hint) = run.hint() {
                packer = packer.with_shared_hint(hint);
            }
            let result = packer.solve(&ds.expand_items(), &container)?;
            run.finish("single", &ds.name, &result)?;
        }

        Commands::Multi {
            items,
            catalog,
            run,
        } => {
            let catalog = match catalog {
                Some(path) => parser.parse_catalog_file(&path)?,
                None => ContainerCatalog::standard(),
            };
            let ds = parser.parse_items_file(&items)?;
            report_skipped(ds.skipped_rows);

            let mut allocator = FfdAllocator::new(run.config());
            if let Some(hint) = run.hint() {
                allocator = allocator.with_shared_hint(hint);
            }
            let result = allocator.solve(&ds.expand_items(), &catalog)?;
            run.finish("multi", &ds.name, &result)?;
        }

        Commands::Generate {
            container,
            count,
            seed,
            output,
        } => {
            let extents = [container[0], container[1], container[2]];
            let records = generate_by_cutting(extents, count, seed);
            write_items_csv(&output, &records)?;

            println!("Items saved to: {}", output.display());
            println!("  Pieces: {}", records.len());
            println!("  Seed: {}", seed);
        }
    }

    Ok(())
}

fn report_skipped(skipped: usize) {
    if skipped > 0 {
        eprintln!("Skipped {} malformed item row(s)", skipped);
    }
}
