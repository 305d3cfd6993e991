//! untable CLI - HTML table extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untable::pipeline::{self, PipelineConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
use untable::render::{self, JsonFormat, RenderOptions};
use untable::{read_source, ParseOptions, SheetNaming, SpanPolicy, Strategy, WorkbookWriter, WriteOptions};

#[derive(Parser)]
#[command(name = "untable")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract HTML tables into spreadsheet workbooks", long_about = None)]
struct Cli {
    /// Input HTML file (defaults to data/test.html)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output workbook
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    parse: ParseArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every table to a sheet of an .xlsx workbook
    Convert {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output workbook (defaults to <input stem>.xlsx)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,

        /// Name sheets after table captions
        #[arg(long)]
        caption_names: bool,

        /// Prefix for indexed sheet names
        #[arg(long, default_value = untable::workbook::DEFAULT_SHEET_PREFIX)]
        prefix: String,
    },

    /// Print the rows of one table
    Show {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Zero-based table index
        #[arg(short, long, default_value = "0")]
        index: usize,

        /// Rows to print (0 = all)
        #[arg(short, long, default_value = "3")]
        rows: usize,

        /// Output layout
        #[arg(long, value_enum, default_value = "text")]
        format: ShowFormat,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Export tables as JSON
    Json {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Show table count and shapes
    Info {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Wrap a text file holding HTML into a complete .html document
    Wrap {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to <input stem>.html)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Document title (defaults to the input file stem)
        #[arg(long)]
        title: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct ParseArgs {
    /// Parsing strategy
    #[arg(long, value_enum, default_value = "bulk")]
    strategy: StrategyArg,

    /// Let the HTML parser repair unbalanced table markup
    #[arg(long)]
    lenient: bool,

    /// Keep numeric strings as text
    #[arg(long)]
    text_only: bool,

    /// How merged cells fill spanned positions
    #[arg(long, value_enum, default_value = "duplicate")]
    spans: SpanArg,

    /// Source encoding label, overriding detection (e.g. windows-1251)
    #[arg(long, env = "UNTABLE_ENCODING")]
    encoding: Option<String>,
}

impl ParseArgs {
    fn options(&self) -> ParseOptions {
        let mut options = ParseOptions::new().with_span_policy(self.spans.into());
        if self.lenient {
            options = options.lenient();
        }
        if self.text_only {
            options = options.text_only();
        }
        if let Some(ref label) = self.encoding {
            options = options.with_encoding(label);
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Whole-document parse with numeric typing
    Bulk,
    /// Per-table tree walk, cells kept as text
    Targeted,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Bulk => Strategy::Bulk,
            StrategyArg::Targeted => Strategy::Targeted,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SpanArg {
    /// Copy merged values into every spanned cell
    Duplicate,
    /// Leave spanned cells empty
    Blank,
}

impl From<SpanArg> for SpanPolicy {
    fn from(arg: SpanArg) -> Self {
        match arg {
            SpanArg::Duplicate => SpanPolicy::Duplicate,
            SpanArg::Blank => SpanPolicy::Blank,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ShowFormat {
    /// Tab-separated rows
    Text,
    /// Markdown table
    Markdown,
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            parse,
            caption_names,
            prefix,
        }) => {
            let mut write = WriteOptions::new().with_sheet_prefix(prefix);
            if caption_names {
                write = write.with_sheet_naming(SheetNaming::Caption);
            }
            cmd_convert(&input, output.as_deref(), &parse, write)
        }
        Some(Commands::Show {
            input,
            index,
            rows,
            format,
            parse,
        }) => cmd_show(&input, index, rows, format, &parse),
        Some(Commands::Json {
            input,
            output,
            compact,
            parse,
        }) => cmd_json(&input, output.as_deref(), compact, &parse),
        Some(Commands::Info { input, parse }) => cmd_info(&input, &parse),
        Some(Commands::Wrap {
            input,
            output,
            title,
        }) => cmd_wrap(&input, output.as_deref(), title.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: run the whole pipeline
            match cli.input {
                None if !Path::new(DEFAULT_INPUT).exists() => {
                    println!("{} {}", "File not found:".yellow(), DEFAULT_INPUT);
                    println!("Usage: untable <FILE> [OUTPUT]");
                    println!("       untable --help for more information");
                    Ok(())
                }
                input => {
                    let input = input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
                    let output = cli.output.unwrap_or_else(|| {
                        if input == Path::new(DEFAULT_INPUT) {
                            PathBuf::from(DEFAULT_OUTPUT)
                        } else {
                            default_output(&input)
                        }
                    });
                    let config = PipelineConfig::new(input, output)
                        .with_strategy(cli.parse.strategy.into())
                        .with_parse_options(cli.parse.options());
                    cmd_run(&config)
                }
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `report.html` -> `report.xlsx` next to the input.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("xlsx")
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    parse: &ParseArgs,
    write: WriteOptions,
) -> CmdResult {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input));

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading HTML...");
    let options = parse.options();
    let source = read_source(input, options.encoding.as_deref())?;
    pb.inc(1);

    pb.set_message("Parsing tables...");
    let strategy: Strategy = parse.strategy.into();
    let tables = strategy.parser(options).parse_all(&source.text)?;
    pb.inc(1);

    pb.set_message("Writing workbook...");
    let summary = WorkbookWriter::with_options(write).write(&tables, &output)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    if tables.is_empty() {
        println!("\n{}", "No tables found; wrote an empty sheet.".yellow());
    } else {
        println!("\n{} {} tables", "Found".green().bold(), tables.len());
        for (i, (table, sheet)) in tables.iter().zip(&summary.sheets).enumerate() {
            let branch = if i + 1 == tables.len() { "└─" } else { "├─" };
            println!(
                "  {} {}: {} rows, {} columns",
                branch.dimmed(),
                sheet,
                table.row_count(),
                table.column_count()
            );
        }
    }
    println!("{} {}", "Saved to".green(), summary.path.display());

    Ok(())
}

fn cmd_run(config: &PipelineConfig) -> CmdResult {
    log::debug!("Running pipeline with {:?}", config);
    let summary = pipeline::run(config)?;
    println!(
        "{} {} tables, {} rows",
        "Extracted".green().bold(),
        summary.table_count,
        summary.row_count
    );
    println!("{} {}", "Saved to".green(), summary.output.display());
    Ok(())
}

fn cmd_show(
    input: &Path,
    index: usize,
    rows: usize,
    format: ShowFormat,
    parse: &ParseArgs,
) -> CmdResult {
    let options = parse.options();
    let source = read_source(input, options.encoding.as_deref())?;
    let strategy: Strategy = parse.strategy.into();
    let table = strategy.parser(options).parse_one(&source.text, index)?;

    let mut render_options = RenderOptions::new();
    if rows > 0 {
        render_options = render_options.with_max_rows(rows);
    }

    let heading = match table.caption.as_deref() {
        Some(caption) => format!("Table #{}: {}", index, caption),
        None => format!("Table #{}", index),
    };
    println!(
        "{} ({} rows, {} columns)",
        heading.cyan().bold(),
        table.row_count(),
        table.column_count()
    );

    let single: untable::TableSet = vec![table].into();
    let rendered = match format {
        ShowFormat::Text => render::to_text(&single, &render_options)?,
        ShowFormat::Markdown => render::to_markdown(&single, &render_options)?,
    };
    println!("{}", rendered);

    Ok(())
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool, parse: &ParseArgs) -> CmdResult {
    let options = parse.options();
    let source = read_source(input, options.encoding.as_deref())?;
    let strategy: Strategy = parse.strategy.into();
    let tables = strategy.parser(options).parse_all(&source.text)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&tables, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, parse: &ParseArgs) -> CmdResult {
    let options = parse.options();
    let source = read_source(input, options.encoding.as_deref())?;
    let strategy: Strategy = parse.strategy.into();
    let tables = strategy.parser(options).parse_all(&source.text)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {} ({:?})",
        "Encoding".bold(),
        source.encoding.name(),
        source.detected_by
    );
    println!("{}: {}", "Tables".bold(), tables.len());
    println!("{}: {}", "Rows".bold(), tables.total_rows());

    if !tables.is_empty() {
        println!();
        println!("{}", "Tables".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (i, table) in tables.iter().enumerate() {
            let header = if table.has_header() { ", header" } else { "" };
            let caption = table
                .caption
                .as_deref()
                .map(|c| format!(" \"{}\"", c))
                .unwrap_or_default();
            println!(
                "{}{}: {} x {}{}",
                format!("#{}", i).bold(),
                caption,
                table.row_count(),
                table.column_count(),
                header
            );
        }
    }

    Ok(())
}

fn cmd_wrap(input: &Path, output: Option<&Path>, title: Option<&str>) -> CmdResult {
    let created = untable::wrap::wrap_file(input, output, title)?;
    println!("{} {}", "Saved to".green(), created.display());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "untable".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML table extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/untable".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("data/test.html")),
            PathBuf::from("data/test.xlsx")
        );
    }

    #[test]
    fn test_parse_args_options() {
        let cli = Cli::parse_from(["untable", "in.html", "--lenient", "--text-only", "--spans", "blank"]);
        let options = cli.parse.options();
        assert_eq!(options.error_mode, untable::ErrorMode::Lenient);
        assert!(!options.infer_types);
        assert_eq!(options.span_policy, SpanPolicy::Blank);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
