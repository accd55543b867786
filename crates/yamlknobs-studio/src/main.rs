use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use yamlknobs_doc::Value;
use yamlknobs_ui::logging::{LoggingConfig, init_logging};
use yamlknobs_ui::{ImplicitClose, Session, SessionConfig, render_tree};

#[derive(Parser)]
#[command(name = "yamlknobs-studio")]
#[command(about = "Build controls from a YAML document's -widget annotations, edit, and dump it")]
struct Args {
    /// Annotated YAML document
    file: PathBuf,

    /// Text of the leading title label; empty for none
    #[arg(long)]
    title: Option<String>,

    /// Set a bound control, e.g. `--set model/lr=0.1`; the value is YAML
    #[arg(long = "set", value_name = "NAME=YAML", value_parser = parse_assignment)]
    assignments: Vec<(String, String)>,

    /// Print the assembled control tree before dumping
    #[arg(long)]
    tree: bool,

    /// Keep `-widget` annotations in the output
    #[arg(long)]
    keep_annotations: bool,

    /// When a non-nested container closes the open one: any, same-kind, never
    #[arg(long, value_name = "POLICY", default_value = "any")]
    implicit_close: ImplicitClose,

    /// Write the document here instead of stdout
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Log filter, `env_logger` syntax (defaults to RUST_LOG, then info)
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=YAML, got `{s}`")),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig { env_filter: args.log.clone(), ..LoggingConfig::default() });

    let mut config = SessionConfig::default()
        .implicit_close(args.implicit_close)
        .strip_on_dump(!args.keep_annotations);
    if let Some(title) = &args.title {
        config = config.title(title.as_str());
    }

    let mut session = Session::new(config).context("creating session")?;
    session
        .load_path(&args.file)
        .with_context(|| format!("loading {}", args.file.display()))?;
    let root = session.display();
    log::info!("{} controls bound", session.bindings().len());

    if args.tree {
        print!("{}", render_tree(&root));
    }

    for (name, src) in &args.assignments {
        let value = Value::parse(src).with_context(|| format!("parsing value for `{name}`"))?;
        session.set(name, value).with_context(|| format!("setting `{name}`"))?;
    }

    match &args.out {
        Some(path) => session
            .dump_to_path(path, session.config().strip_on_dump)
            .with_context(|| format!("writing {}", path.display()))?,
        None => session
            .dump_to_writer(io::stdout().lock(), session.config().strip_on_dump)
            .context("writing to stdout")?,
    }
    Ok(())
}
