use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pyq_predictor::document::{AnalysisResult, Document};
use pyq_predictor::paper::export::render_pdf;
use pyq_predictor::paper::QuestionCount;
use pyq_predictor::server;
use pyq_predictor::utils::config::AppConfig;
use pyq_predictor::TesseractRecognizer;

#[derive(Parser, Debug)]
#[command(name = "pyq-predictor")]
#[command(about = "Topic weightage analysis and assumed-paper generation for question papers")]
struct Args {
    /// Configuration file (defaults to config/app_config.json when present)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind, overriding PYQ_PREDICTOR_ADDR and the config file
        #[arg(long)]
        addr: Option<String>,
    },

    /// Analyze a local CSV, PDF or image file
    Analyze {
        /// Question paper to analyze
        file: PathBuf,

        /// Number of questions in the assumed paper (1-10)
        #[arg(long, short = 'n', value_parser = clap::value_parser!(u8).range(1..=10))]
        questions: Option<u8>,

        /// Shuffle seed for a reproducible paper
        #[arg(long)]
        seed: Option<u64>,

        /// Write the assumed paper to this PDF file
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pyq_predictor=info,tower_http=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => AppConfig::init_from(path)?,
        None => AppConfig::init()?,
    };

    match args.command {
        Command::Serve { addr } => run_server(addr, config).await,
        Command::Analyze {
            file,
            questions,
            seed,
            export,
        } => {
            let question_count = match questions {
                Some(count) => QuestionCount::new(usize::from(count))?,
                None => config.default_question_count()?,
            };
            let seed = seed.unwrap_or_else(rand::random);
            run_analyze(&file, question_count, seed, export.as_deref(), config)
        }
    }
}

async fn run_server(
    addr: Option<String>,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = addr
        .or_else(|| std::env::var("PYQ_PREDICTOR_ADDR").ok())
        .unwrap_or_else(|| config.host_url.to_string());

    let socket_addr: std::net::SocketAddr = addr.parse()?;

    server::start_server(socket_addr, config).await?;

    Ok(())
}

fn run_analyze(
    file: &Path,
    question_count: QuestionCount,
    seed: u64,
    export: Option<&Path>,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(file)?;
    let filename = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let mut document = Document::new(&bytes, filename)?;
    let recognizer = TesseractRecognizer::from_config(config);
    let result = document.analyze(&recognizer, question_count, seed)?;

    print_result(&result);

    if let Some(path) = export {
        match &result.paper {
            Some(report) => {
                let pdf = render_pdf(report.paper(), &config.export_title)?;
                std::fs::write(path, pdf)?;
                println!("\nPDF written to {}", path.display());
            }
            None => tracing::warn!("Nothing to export: no text was extracted"),
        }
    }

    Ok(())
}

fn print_result(result: &AnalysisResult) {
    if let Some(preview) = &result.table_preview {
        println!("Uploaded Data ({} rows)", preview.row_count);
        println!("=============");
        println!("{}", preview.headers.join(" | "));
        for row in &preview.rows {
            println!("{}", row.join(" | "));
        }
        println!();
    }

    println!("Extracted Text");
    println!("==============");
    println!("{}", result.extracted_text);

    let Some(report) = &result.paper else {
        return;
    };

    println!("\nTopic Weightage Analysis");
    println!("========================");
    println!("{:<12} {:>9}", "Topic", "Frequency");
    for entry in &report.topic_frequencies {
        println!("{:<12} {:>9}", entry.topic.as_str(), entry.frequency);
    }

    println!("\nAssumed Paper (seed {})", report.seed);
    println!("=============");
    for line in &report.assumed_paper {
        println!("{}", line);
    }
}
