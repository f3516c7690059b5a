//! docblock — dump the tag elements of docblock comments.
//!
//! Two modes:
//!
//! - **stdin mode**: `docblock < comment.txt` parses stdin as one docblock
//! - **file mode**: `docblock -p function src/*.php` parses every `/** */`
//!   block in each file, optionally writing one report per file with `-o`

use anyhow::{bail, Context, Result};
use clap::{Parser as _, ValueEnum};
use docblock::render::{self, BlockReport, FileReport};
use docblock::scan::{self, RawDocblock};
use docblock::{parser, Parser};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(
    name = "docblock",
    about = "Parse docblock comments into tag elements"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads one docblock from stdin.
    files: Vec<String>,

    /// Output directory. Without it, reports go to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: text (default), json
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Tag set to accept beyond @see, @link, @deprecated and @since
    #[arg(short = 'p', long, value_enum, default_value_t = TagSetKind::Base)]
    parser: TagSetKind,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TagSetKind {
    Base,
    Class,
    Function,
}

impl TagSetKind {
    fn parser(self, raw: &str) -> Result<Parser> {
        let parser = match self {
            TagSetKind::Base => Parser::new(raw),
            TagSetKind::Class => Parser::with_extension(raw, parser::class::extension())?,
            TagSetKind::Function => Parser::with_extension(raw, parser::function::extension())?,
        };
        Ok(parser)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docblock=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let failures = if cli.files.is_empty() {
        stdin_mode(&cli)?
    } else {
        file_mode(&cli)?
    };

    if failures > 0 {
        bail!("{} docblock(s) failed to parse", failures);
    }
    Ok(())
}

/// stdin mode: the whole input is one docblock.
fn stdin_mode(cli: &Cli) -> Result<usize> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let block = RawDocblock {
        text: input,
        line: 1,
    };
    let report = FileReport {
        source: "<stdin>".to_string(),
        blocks: vec![parse_block(&block, cli.parser)?],
    };
    let renderer = render::create_renderer(&cli.format)?;
    print!("{}", renderer.render(&report));
    Ok(report.failures())
}

/// file mode: scan each file for docblocks and report them.
fn file_mode(cli: &Cli) -> Result<usize> {
    let renderer = render::create_renderer(&cli.format)?;
    if let Some(dir) = cli.output.as_deref() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    // Output path -> source that produced it
    let mut written: HashMap<PathBuf, String> = HashMap::new();
    let mut failures = 0;
    for path in expand_globs(&cli.files)? {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let source = path.to_string_lossy().to_string();
        let mut report = FileReport {
            source: source.clone(),
            blocks: Vec::new(),
        };
        for block in scan::docblocks(&content) {
            report.blocks.push(parse_block(&block, cli.parser)?);
        }
        for block in &report.blocks {
            if let Some(ref error) = block.error {
                tracing::warn!(
                    "{}:{}: {}",
                    source,
                    error.line.unwrap_or(block.line),
                    error.message
                );
            }
        }
        failures += report.failures();

        let rendered = renderer.render(&report);
        match cli.output.as_deref() {
            Some(dir) => {
                let out_path =
                    dir.join(format!("{}.{}", derive_output_name(&source), renderer.file_extension()));
                if let Some(earlier) = written.get(&out_path) {
                    bail!(
                        "{} and {} both map to {}",
                        earlier,
                        source,
                        out_path.display()
                    );
                }
                fs::write(&out_path, rendered)
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
                written.insert(out_path, source);
            }
            None => print!("{}", rendered),
        }
    }
    Ok(failures)
}

/// Parse one docblock. Configuration errors abort the run; data errors are reported.
fn parse_block(block: &RawDocblock, kind: TagSetKind) -> Result<BlockReport> {
    let mut parser = kind.parser(&block.text)?;
    let outcome = parser.parse();
    if let Err(docblock::ParseError::Config(e)) = &outcome {
        bail!("broken {:?} parser configuration: {}", kind, e);
    }
    Ok(BlockReport::new(block, &parser, outcome))
}

/// File extensions scanned in bare directories.
const SUPPORTED_EXTENSIONS: &[&str] = &["php", "inc", "js", "ts", "java", "c", "h"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() {
                    if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
                        if SUPPORTED_EXTENSIONS.contains(&ext) {
                            files.push(p);
                        }
                    }
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Derive the output file name (without extension) from a source path.
/// "src/Foo.php" → "Foo"
fn derive_output_name(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}
