use clap::{Parser, Subcommand};
use coverage_core::{
    constants::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR},
    output::read_analysis_json,
    render_summary, AnalysisService, CoreConfig,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xtehr::CoverageTier;

#[derive(Parser)]
#[command(name = "coverage")]
#[command(about = "Radiology report corpus coverage analysis against the Xt-EHR schema")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a corpus and write the JSON analysis and markdown summary
    Analyse {
        /// Line-delimited JSON source
        #[arg(long, default_value = DEFAULT_INPUT_PATH)]
        input: PathBuf,
        /// Directory for the outputs
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
        /// Do not print the summary to stdout
        #[arg(long)]
        quiet: bool,
    },
    /// Re-render the markdown summary from a saved JSON analysis
    Summary {
        /// Path to a previously written analysis JSON
        analysis: PathBuf,
    },
    /// List Xt-EHR elements and their coverage tiers
    Schema {
        /// Only list one tier (present_required, derivable, content_derived, rarely_present)
        #[arg(long)]
        tier: Option<CoverageTier>,
        /// Look up a single element by dot-delimited path
        #[arg(long, conflicts_with = "tier")]
        element: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("coverage=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyse {
            input,
            output_dir,
            quiet,
        }) => {
            let service = AnalysisService::new(CoreConfig::new(input, output_dir)?);
            let run = service.run()?;
            let written = service.write_outputs(&run.result);

            match &written.analysis_json {
                Ok(path) => println!("Results saved to: {}", path.display()),
                Err(e) => eprintln!("Error writing analysis JSON: {}", e),
            }
            match &written.summary_md {
                Ok(path) => println!("Summary saved to: {}", path.display()),
                Err(e) => eprintln!("Error writing summary: {}", e),
            }
            if !run.diagnostics.is_empty() {
                eprintln!("Skipped {} malformed lines", run.diagnostics.len());
            }
            if !quiet {
                println!("\n{}", render_summary(&run.result));
            }
            if !written.all_ok() {
                return Err("not every output could be written".into());
            }
        }
        Some(Commands::Summary { analysis }) => {
            let result = read_analysis_json(&analysis)?;
            println!("{}", render_summary(&result));
        }
        Some(Commands::Schema { tier, element }) => {
            if let Some(path) = element {
                let element = xtehr::lookup(&path)?;
                println!(
                    "{} [{}]: {}",
                    element.path, element.tier, element.rationale
                );
                return Ok(());
            }

            let tiers: Vec<CoverageTier> = match tier {
                Some(tier) => vec![tier],
                None => CoverageTier::ALL.to_vec(),
            };
            for tier in tiers {
                println!("## {} ({})", tier.label(), tier);
                for element in xtehr::elements_in(tier) {
                    println!("- {}: {}", element.path, element.rationale);
                }
                println!();
            }
        }
        None => {
            println!("Use 'coverage --help' for commands");
        }
    }

    Ok(())
}
