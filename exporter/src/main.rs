use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, clap::ValueEnum)]
enum EmitKind {
    Facts,
    Names,
}

#[derive(Parser, Debug)]
#[command(
    name = "declex",
    version,
    about = "Declaration exporter — emits per-declaration facts keyed by stable qualified names"
)]
struct Cli {
    /// Input AST dump (JSON) produced by the frontend plugin
    dump: PathBuf,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output shape
    #[arg(long, value_enum, default_value_t = EmitKind::Facts)]
    emit: EmitKind,

    /// Print load statistics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // ── Load the dump ──
    let text = match std::fs::read_to_string(&cli.dump) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("declex: error: {}: {}", cli.dump.display(), e);
            std::process::exit(2);
        }
    };

    let dump: declex::ast::AstDump = match serde_json::from_str(&text) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("declex: error: {}: {}", cli.dump.display(), e);
            std::process::exit(2);
        }
    };

    let (ast, sm) = match dump.into_parts() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("declex: error: malformed dump: {}", e);
            std::process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!(
            "declex: loaded {} declarations from {} files",
            ast.len(),
            sm.file_count()
        );
    }

    // ── Export ──
    let value = match cli.emit {
        EmitKind::Facts => declex::export::export_facts(&ast, &sm),
        EmitKind::Names => declex::export::export_names(&ast, &sm),
    };

    let mut rendered = match serde_json::to_string_pretty(&value) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("declex: error: {}", e);
            std::process::exit(2);
        }
    };
    rendered.push('\n');

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, rendered) {
                eprintln!("declex: error: {}: {}", path.display(), e);
                std::process::exit(2);
            }
        }
        None => print!("{}", rendered),
    }
}
