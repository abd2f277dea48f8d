use clap::{Parser, Subcommand, ValueEnum};
use hexastore::{Store, Value};
use hexastore_query::pattern::{self, iri, Pattern};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hexastore", version, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a JSON/JSON-LD document and dump the store as a binary bag.
    Ingest(IngestArgs),
    /// Ingest a JSON/JSON-LD document and run one pattern query against it.
    Query(QueryArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Ndjson,
}

#[derive(Parser)]
struct IngestArgs {
    /// Path to a JSON or JSON-LD document.
    #[arg(long)]
    input: PathBuf,

    /// Where to write the encoded binary bag.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser)]
struct QueryArgs {
    /// Path to a JSON or JSON-LD document.
    #[arg(long)]
    input: PathBuf,

    /// Match clause on the subject (an IRI).
    #[arg(long)]
    s: Option<String>,

    /// Match clause on the predicate (an IRI).
    #[arg(long)]
    p: Option<String>,

    /// Match clause on the object (an IRI or a plain string, per --o-string).
    #[arg(long)]
    o: Option<String>,

    /// Treat `--o` as a string literal instead of an IRI.
    #[arg(long)]
    o_string: bool,

    #[arg(long, value_enum, default_value = "ndjson")]
    format: OutputFormat,
}

fn run_ingest(args: IngestArgs) -> Result<(), String> {
    let input = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("failed to read {}: {e}", args.input.display()))?;
    let store = Store::new();
    let n = store.ingest_json(&input).map_err(|e| e.to_string())?;
    std::fs::write(&args.out, store.to_binary())
        .map_err(|e| format!("failed to write {}: {e}", args.out.display()))?;
    println!("ingested {n} triples into {}", args.out.display());
    Ok(())
}

fn build_pattern(args: &QueryArgs) -> Pattern {
    let mut pat = Pattern::new();
    if let Some(s) = &args.s {
        pat = pat.s(iri::eq(s.clone()));
    }
    if let Some(p) = &args.p {
        pat = pat.p(iri::eq(p.clone()));
    }
    if let Some(o) = &args.o {
        let value = if args.o_string { Value::string(o.clone()) } else { Value::iri(o.clone()) };
        pat = pat.o(pattern::eq(value));
    }
    pat
}

fn run_query(args: QueryArgs) -> Result<(), String> {
    let input = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("failed to read {}: {e}", args.input.display()))?;
    let store = Store::new();
    store.ingest_json(&input).map_err(|e| e.to_string())?;

    let pat = build_pattern(&args);
    let hits = store.query(&pat).map_err(|e| e.to_string())?;

    let mut stdout = std::io::stdout();
    match args.format {
        OutputFormat::Ndjson => {
            for t in hits {
                let record = serde_json::json!({
                    "s": t.s.as_str(),
                    "p": t.p.as_str(),
                    "o": t.o.as_str(),
                });
                serde_json::to_writer(&mut stdout, &record).map_err(|e| e.to_string())?;
                use std::io::Write;
                stdout.write_all(b"\n").map_err(|e| e.to_string())?;
            }
        }
    }
    Ok(())
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Ingest(args) => run_ingest(args),
        Commands::Query(args) => run_query(args),
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
