use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use glyph_overlay::theme::{EDITOR_CLASS, HIGHLIGHT_CLASS, LAYER_CLASS};
use glyph_overlay::{render, LayerMetrics, Theme};
use glyph_protocol::{template, TEMPLATES};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Highlights Mermaid diagram source")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a diagram and print it as markup, spans or a full page
    Highlight {
        /// Diagram file, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// JSON theme file (missing colours keep their defaults)
        #[arg(long, value_name = "FILE")]
        theme: Option<PathBuf>,

        /// JSON layer metrics file
        #[arg(long, value_name = "FILE")]
        metrics: Option<PathBuf>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List the bundled diagram templates
    Templates {
        /// Print the source of one template instead
        #[arg(long, value_name = "ID")]
        show: Option<String>,
    },
    /// Strip markdown fences from model output
    Clean {
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Highlight markup only
    Html,
    /// Spans as JSON
    Json,
    /// Standalone HTML document
    Page,
}

#[derive(Serialize)]
struct SpanRecord<'a> {
    start: usize,
    end: usize,
    class: Option<&'static str>,
    text: &'a str,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = content.len(), "output written");
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn load_json<T: DeserializeOwned + Default>(path: Option<&Path>) -> anyhow::Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn span_json(source: &str) -> anyhow::Result<String> {
    let records: Vec<SpanRecord> = glyph_lexer::classify(source)
        .iter()
        .map(|span| SpanRecord {
            start: span.start,
            end: span.end,
            class: span.class.map(|c| c.css_name()),
            text: span.text(source),
        })
        .collect();
    let mut json = serde_json::to_string_pretty(&records)?;
    json.push('\n');
    Ok(json)
}

fn standalone_page(source: &str, title: &str, theme: &Theme, metrics: &LayerMetrics) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <style>\nbody {{ margin: 0; }}\n{}</style>\n</head>\n<body>\n\
         <div class=\"{EDITOR_CLASS}\" style=\"height: 100vh;\"><pre class=\"{LAYER_CLASS} {HIGHLIGHT_CLASS}\">{}</pre></div>\n\
         </body>\n</html>\n",
        v_htmlescape::escape(title),
        theme.stylesheet(metrics),
        glyph_overlay::highlight(source),
    )
}

fn highlight_output(
    source: &str,
    format: Format,
    title: &str,
    theme: &Theme,
    metrics: &LayerMetrics,
) -> anyhow::Result<String> {
    Ok(match format {
        Format::Html => render(source, &glyph_lexer::classify(source)),
        Format::Json => span_json(source)?,
        Format::Page => standalone_page(source, title, theme, metrics),
    })
}

fn templates_listing() -> String {
    TEMPLATES
        .iter()
        .map(|t| format!("{:<10} {} {}\n", t.id, t.icon, t.name))
        .collect()
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Highlight { input, format, theme, metrics, output } => {
            let theme: Theme = load_json(theme.as_deref())?;
            theme.validate()?;
            let metrics: LayerMetrics = load_json(metrics.as_deref())?;
            metrics.validate()?;

            let source = read_input(&input)?;
            let title = input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "diagram".to_string());
            debug!(bytes = source.len(), ?format, "highlighting");

            let rendered = highlight_output(&source, format, &title, &theme, &metrics)?;
            write_output(output.as_deref(), &rendered)
        }
        Command::Templates { show: Some(id) } => match template(&id) {
            Some(t) => write_output(None, &format!("{}\n", t.code)),
            None => bail!("unknown template {:?}; run `glyph templates` to list them", id),
        },
        Command::Templates { show: None } => write_output(None, &templates_listing()),
        Command::Clean { input, output } => {
            let raw = read_input(&input)?;
            let mut cleaned = glyph_lexer::clean_model_output(&raw);
            cleaned.push('\n');
            write_output(output.as_deref(), &cleaned)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}
