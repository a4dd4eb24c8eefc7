use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use xmldom::{
    error::Result,
    serializer::FormatConfig,
    utils::{format_xml_with, parse_xml, read_file, write_file},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file path
    #[arg(short, long)]
    file: String,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Indent with this many spaces instead of a tab
    #[arg(short, long)]
    indent: Option<usize>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    info!("Reading file: {}", args.file);
    let content = read_file(&args.file)?;
    let root = parse_xml(&content)?;
    info!(
        "Parsed <{}> with {} elements",
        root.name(),
        root.element_count()
    );

    let config = args
        .indent
        .map(FormatConfig::with_spaces)
        .unwrap_or_default();
    let formatted_output = format_xml_with(&root, config);

    if let Some(output_path) = args.output {
        write_file(&output_path, &formatted_output)?;
        info!("Wrote {}", output_path);
    } else {
        println!("{}", formatted_output);
    }

    Ok(())
}
