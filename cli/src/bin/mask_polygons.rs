use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use mask_polygons::{Mask, PolygonTracer};
use mask_polygons_cli::{OutputFormat, TraceJob};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace a mask file into polygons
    Trace {
        /// Mask image, JSON array of rows, or whitespace-separated text grid
        #[arg(short, long)]
        input: PathBuf,
        /// Where to write the polygons
        #[arg(short, long)]
        output: PathBuf,
        /// Grayscale values strictly above this are foreground
        #[arg(long, default_value_t = 128)]
        threshold: u8,
        /// Trace background regions instead of foreground
        #[arg(long)]
        invert: bool,
        /// Keep a vertex at every unit edge
        #[arg(long)]
        no_merge: bool,
        /// Output format (geojson or json)
        #[arg(long, default_value = "geojson")]
        format: OutputFormat,
    },
    /// Run a job described by a TOML or JSON configuration file
    Process {
        /// Path to the configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Trace a built-in 5x6 sample mask and print the vertices
    Demo {
        /// Print a vertex at every unit edge
        #[arg(long)]
        no_merge: bool,
    },
    /// Print the JSON schema of the job configuration
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trace {
            input,
            output,
            threshold,
            invert,
            no_merge,
            format,
        } => {
            let job = TraceJob {
                threshold,
                invert,
                merge_collinear: !no_merge,
                format,
                ..TraceJob::new(input, output)
            };
            run_job(&job)?;
        }
        Commands::Process { config } => {
            process_config(&config)?;
        }
        Commands::Demo { no_merge } => {
            demo(!no_merge)?;
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(TraceJob);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn process_config(config_path: &Path) -> Result<()> {
    let job = TraceJob::from_file(config_path)?;
    info!("Trace job: {:?}", job);
    run_job(&job)
}

fn run_job(job: &TraceJob) -> Result<()> {
    let outline = job.run()?;
    info!(
        "Traced {} polygons with {} vertices into {}",
        outline.len(),
        outline.vertex_count(),
        job.output.display()
    );
    Ok(())
}

fn demo(merge_collinear: bool) -> Result<()> {
    let mask = Mask::from_rows(&[
        [0u8, 1, 1, 0, 0, 1],
        [1, 1, 1, 1, 0, 1],
        [0, 1, 0, 1, 0, 0],
        [0, 1, 1, 1, 0, 0],
        [0, 0, 0, 0, 1, 0],
    ])?;
    let (outline, labels) = PolygonTracer::new(merge_collinear).trace_labeled(&mask)?;

    println!("region labels:");
    for row in labels.rows() {
        let cells: Vec<String> = row.iter().map(|id| id.to_string()).collect();
        println!("  {}", cells.join(" "));
    }

    for polygon in &outline.polygons {
        let vertices: Vec<String> = polygon
            .vertices
            .iter()
            .map(|v| format!("({}, {})", v.row, v.col))
            .collect();
        println!(
            "polygon {} ({} vertices, perimeter {}): {}",
            polygon.region_id,
            polygon.len(),
            polygon.perimeter(),
            vertices.join(" ")
        );
    }

    Ok(())
}
