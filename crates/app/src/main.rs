use chrono::Utc;
use clap::{Parser, Subcommand};
use manual_search_core::{
    format_answer_html, AnswerSynthesizer, FsDocumentSource, GeminiClient, GeminiConfig,
    Highlighter, LopdfExtractor, ResultPage, SearchEngine, SearchOptions, SkipReason,
    SynthesisOutcome, DEFAULT_CANDIDATES,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ANSI_HIGHLIGHT: &str = "\x1b[1;33m";
const ANSI_RESET: &str = "\x1b[0m";

#[derive(Parser)]
#[command(name = "manual-search", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory the manual candidates are resolved against.
    #[arg(long, env = "MANUAL_DIR", default_value = ".")]
    base_dir: String,

    /// Manual file to load instead of the built-in candidate list. Repeatable.
    #[arg(long = "manual")]
    manuals: Vec<String>,

    /// Gemini API key; overrides GEMINI_API_KEY.
    #[arg(long)]
    gemini_api_key: Option<String>,

    /// Gemini model name; overrides GEMINI_MODEL.
    #[arg(long)]
    gemini_model: Option<String>,

    /// Gemini API base URL; overrides GEMINI_BASE_URL.
    #[arg(long)]
    gemini_base_url: Option<String>,

    /// Skip answer synthesis.
    #[arg(long, default_value_t = false)]
    no_ai: bool,

    /// Emit HTML markup for highlights and answers instead of terminal colors.
    #[arg(long, default_value_t = false)]
    html: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run one query and print the ranked snippets.
    Search {
        /// Search query
        #[arg(long)]
        query: String,
        /// Print every result instead of the first page.
        #[arg(long, default_value_t = false)]
        show_all: bool,
        /// Print the full text of the given result (1-based).
        #[arg(long)]
        detail: Option<usize>,
    },
    /// Read queries from stdin until EOF or `:quit`.
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %Utc::now().to_rfc3339(),
        "manual-search boot"
    );

    let highlighter = if cli.html {
        Highlighter::default()
    } else {
        Highlighter::new(ANSI_HIGHLIGHT, ANSI_RESET)
    };
    let mut engine = SearchEngine::new(SearchOptions::default()).with_highlighter(highlighter);

    let candidates: Vec<&str> = if cli.manuals.is_empty() {
        DEFAULT_CANDIDATES.to_vec()
    } else {
        cli.manuals.iter().map(String::as_str).collect()
    };
    let source = FsDocumentSource::new(&cli.base_dir);
    if !engine.load(&source, &LopdfExtractor, &candidates).await {
        warn!(base_dir = %cli.base_dir, "no manual could be loaded; results are placeholders");
    }
    if let Some(document) = engine.store().and_then(|store| store.document()) {
        info!(
            name = %document.name,
            pages = document.page_count,
            sections = document.section_count,
            checksum = %document.checksum,
            "manual indexed"
        );
    }

    let mut gemini = GeminiConfig::from_env();
    if let Some(key) = &cli.gemini_api_key {
        gemini.api_key = Some(key.clone());
    }
    if let Some(model) = &cli.gemini_model {
        gemini.model = model.clone();
    }
    if let Some(base_url) = &cli.gemini_base_url {
        gemini.base_url = base_url.clone();
    }
    if !cli.no_ai && !gemini.has_credential() {
        warn!("GEMINI_API_KEY is not set; answers will not be generated");
    }
    let synthesizer = AnswerSynthesizer::new(GeminiClient::new(gemini), engine.options());

    match &cli.command {
        Command::Search {
            query,
            show_all,
            detail,
        } => {
            if engine.search(query).is_none() {
                println!("empty query, nothing to search");
                return Ok(());
            }
            print_results(&engine, *show_all);

            if let Some(position) = detail {
                print_detail(&engine, *position);
            }

            if !cli.no_ai {
                print_answer(&engine, &synthesizer, cli.html).await;
            }
        }
        Command::Interactive => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let line = line.trim();
                match line.split_once(' ').unwrap_or((line, "")) {
                    (":quit", _) => break,
                    (":more", _) => print_results(&engine, true),
                    (":sources", _) => match engine.sources_report() {
                        Some(report) => println!("{report}"),
                        None => println!("no sources for the current search"),
                    },
                    (":detail", argument) => match argument.trim().parse::<usize>() {
                        Ok(position) => print_detail(&engine, position),
                        Err(_) => println!("usage: :detail <result number>"),
                    },
                    _ => {
                        if engine.search(line).is_none() {
                            continue;
                        }
                        print_results(&engine, false);
                        if !cli.no_ai {
                            print_answer(&engine, &synthesizer, cli.html).await;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_results(engine: &SearchEngine, show_all: bool) {
    println!("query: {}", engine.current_query());

    match engine.result_page(show_all) {
        ResultPage::NoResults => {
            println!("no results found; try different or more specific keywords");
        }
        ResultPage::Results { cards, hidden } => {
            for card in cards {
                println!("result {} (relevance {})", card.index + 1, card.relevance);
                println!("  {}", card.snippet);
                println!("  page {}, section {}", card.page, card.section_index);
            }
            if hidden > 0 {
                println!("{hidden} more result(s); use --show-all or :more");
            }
        }
    }
}

/// `position` is 1-based, as printed in the result list.
fn print_detail(engine: &SearchEngine, position: usize) {
    let Some(detail) = position
        .checked_sub(1)
        .and_then(|index| engine.result_detail(index))
    else {
        return;
    };

    println!("result {}", detail.index + 1);
    println!("{}", detail.content);
    println!("location: page {}, section {}", detail.page, detail.section_index);
}

async fn print_answer(
    engine: &SearchEngine,
    synthesizer: &AnswerSynthesizer<GeminiClient>,
    html: bool,
) {
    match engine.ask(synthesizer).await {
        SynthesisOutcome::Answered(text) => {
            println!("answer:");
            if html {
                println!("{}", format_answer_html(&text));
            } else {
                println!("{text}");
            }
        }
        SynthesisOutcome::Failed(message) => {
            println!("assistant error: {message}");
            println!("check that the Gemini API key is correct and valid");
        }
        SynthesisOutcome::Skipped(SkipReason::NotConfigured | SkipReason::NoSources) => {}
    }
}
