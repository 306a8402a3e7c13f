// src/main.rs
use arxiv_ereader::arxiv::{client, normalize_arxiv_id};
use arxiv_ereader::render::{self, ScreenPreset, SCREEN_PRESETS};
use arxiv_ereader::storage::{sanitize_filename, StorageManager, DEFAULT_MAX_FILENAME_LEN};
use arxiv_ereader::utils::{self, error::ExtractError, AppError, FetchConfig};
use arxiv_ereader::{Paper, PaperParser};
use clap::Parser;
use std::path::PathBuf;

/// Convert arXiv HTML papers into documents sized for e-readers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// arXiv paper IDs or URLs (e.g. 2402.08954 or https://arxiv.org/abs/2402.08954)
    #[arg(required_unless_present = "list_screens")]
    papers: Vec<String>,

    /// Output directory for rendered documents
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// E-reader screen preset (see --list-screens)
    #[arg(short, long, default_value = render::DEFAULT_PRESET)]
    screen: String,

    /// Custom page width in mm (requires --height)
    #[arg(long, requires = "height")]
    width: Option<f32>,

    /// Custom page height in mm (requires --width)
    #[arg(long, requires = "width")]
    height: Option<f32>,

    /// Base font size in points for a custom page size
    #[arg(long, default_value = "11")]
    font_size: f32,

    /// Name output files after the arXiv ID instead of the paper title
    #[arg(long)]
    use_id: bool,

    /// Also write the full extracted paper as JSON
    #[arg(long)]
    json: bool,

    /// Convert a local HTML file instead of downloading (exactly one paper ID)
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// Maximum number of concurrent downloads (overrides ARXIV_MAX_CONCURRENCY)
    #[arg(long)]
    concurrency: Option<usize>,

    /// List available screen presets and exit
    #[arg(long)]
    list_screens: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn print_screens() {
    println!("Available screen presets:");
    for (key, preset) in SCREEN_PRESETS.iter() {
        println!("  {}", preset.summary_line(key));
    }
}

fn resolve_preset(args: &Args) -> Result<ScreenPreset, AppError> {
    match (args.width, args.height) {
        (Some(width), Some(height)) => Ok(render::custom_preset(width, height, args.font_size)?),
        (None, None) => Ok(render::get_preset(&args.screen)?.clone()),
        _ => Err(AppError::Config("--width and --height must be given together".to_string())),
    }
}

/// Renders and stores one parsed paper, returning the document path.
fn write_outputs(
    paper: &Paper,
    preset: &ScreenPreset,
    storage: &StorageManager,
    args: &Args,
) -> Result<PathBuf, AppError> {
    let stem = if args.use_id { &paper.id } else { &paper.title };
    let name = sanitize_filename(stem, DEFAULT_MAX_FILENAME_LEN);

    let document = render::render_document(paper, preset);
    let path = storage.save_document(&name, &document)?;
    storage.save_metadata(&name, paper)?;
    if args.json {
        storage.save_paper_json(&name, paper)?;
    }
    Ok(path)
}

/// Parses one document on the blocking pool; the DOM never leaves the worker thread.
async fn parse_on_worker(html: String, paper_id: String) -> Result<Paper, ExtractError> {
    tokio::task::spawn_blocking(move || PaperParser::new().parse(&html, &paper_id, None))
        .await
        .map_err(|e| ExtractError::Worker(e.to_string()))?
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::debug!("Starting with args: {:?}", args);

    if args.list_screens {
        print_screens();
        return Ok(());
    }

    // 3. Resolve page geometry and fetch settings
    let preset = resolve_preset(&args)?;
    tracing::info!("Rendering for {} ({}x{}mm)", preset.name, preset.width_mm, preset.height_mm);

    let mut config = FetchConfig::from_env();
    if let Some(n) = args.concurrency {
        if n == 0 {
            return Err(AppError::Config("--concurrency must be at least 1".to_string()));
        }
        config.max_concurrency = n;
    }

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    let mut success_count = 0;
    let mut failure_count = 0;

    // 5. Gather HTML, either from a local file or from arXiv
    let documents = if let Some(path) = &args.html_file {
        if args.papers.len() != 1 {
            return Err(AppError::Config("--html-file needs exactly one paper ID".to_string()));
        }
        let input = &args.papers[0];
        let paper_id = normalize_arxiv_id(input).unwrap_or_else(|_| input.trim().to_string());
        tracing::info!("Reading {} from {}", paper_id, path.display());
        let html = std::fs::read_to_string(path)?;
        vec![(paper_id, Ok(html))]
    } else {
        let mut paper_ids = Vec::new();
        for input in &args.papers {
            match normalize_arxiv_id(input) {
                Ok(id) => paper_ids.push(id),
                Err(e) => {
                    tracing::error!("{}", e);
                    failure_count += 1;
                }
            }
        }
        tracing::info!("Fetching {} papers (up to {} at a time)", paper_ids.len(), config.max_concurrency);
        client::fetch_papers_batch(&paper_ids, &config).await
    };

    // 6. Extract in parallel, then render and save in input order
    let mut parse_jobs = Vec::new();
    for (paper_id, fetched) in documents {
        match fetched {
            Ok(html) => {
                let job = tokio::spawn(parse_on_worker(html, paper_id.clone()));
                parse_jobs.push((paper_id, job));
            }
            Err(e) => {
                tracing::error!("Failed to download {}: {}", paper_id, e);
                failure_count += 1;
            }
        }
    }

    for (paper_id, job) in parse_jobs {
        let parsed = match job.await {
            Ok(result) => result,
            Err(e) => Err(ExtractError::Worker(e.to_string())),
        };
        match parsed {
            Ok(paper) => match write_outputs(&paper, &preset, &storage, &args) {
                Ok(path) => {
                    tracing::info!("Created {} for {}", path.display(), paper_id);
                    success_count += 1;
                }
                Err(e) => {
                    tracing::error!("Failed to write output for {}: {}", paper_id, e);
                    failure_count += 1;
                }
            },
            Err(e) => {
                tracing::error!("Failed to extract {}: {}", paper_id, e);
                failure_count += 1;
            }
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to convert any of {} papers",
            failure_count
        )));
    }

    Ok(())
}
