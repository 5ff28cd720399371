use std::path::Path;

use anyhow::{bail, Context};
use args::CliArgs;
use env_logger::{Builder, Target};
use fift_grammar::{language, Language, Node, Point, Tree};

mod args;
mod check;
mod editor;
mod navigate;
mod parse;

pub async fn run() -> anyhow::Result<()> {
    let args = args::parse_cli_args();
    setup_logging(&args);

    log::info!("Parsed CLI args and initialized logger!");

    let result = match args.command {
        args::Command::Parse(args) => parse::run(args).await,
        args::Command::Check(args) => check::run(args).await,
        args::Command::Definition(args) => navigate::definition(args).await,
        args::Command::References(args) => navigate::references(args).await,
        args::Command::Hover(args) => navigate::hover(args).await,
        args::Command::Folds(args) => editor::folds(args).await,
        args::Command::Tokens(args) => editor::tokens(args).await,
    };

    if let Err(e) = &result {
        log::error!("Error occurred: {}", e);
        log::error!("Caused by: {}", e.root_cause());
    } else {
        log::info!("Exiting cleanly with success");
    }

    result
}

fn setup_logging(args: &CliArgs) {
    let mut logger = Builder::new();

    if let Some(filters) = &args.log_filter {
        // Configure with the RUST_LOG directives string from the cli arg.
        logger.parse_filters(filters.as_str())
    } else {
        // Configure just the log level.
        logger.filter_level(args.log_level.into())
    };

    // Results go to stdout, so keep the logs out of the way.
    logger.target(Target::Stderr).init();
}

pub(crate) fn load_language() -> anyhow::Result<Language> {
    Language::new(language()).context("Error loading Fift grammar")
}

pub(crate) async fn read_source(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        bail!("Cannot read {:?}: file not found", path);
    } else if !path.is_file() {
        bail!("Cannot read {:?}: not a regular file", path);
    }

    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {:?}", path))?;

    log::info!("Read {} bytes of content from {:?}", contents.len(), path);
    Ok(contents)
}

pub(crate) async fn read_tree(path: &Path) -> anyhow::Result<Tree> {
    let source = read_source(path).await?;
    let tree = load_language()?
        .parser()
        .parse(&source)
        .with_context(|| format!("parsing {:?}", path))?;

    log::debug!("Parsed {:?} into {} nodes", path, tree.node_count());
    Ok(tree)
}

/// Finds the node under a one-based cursor position.
pub(crate) fn node_at(tree: &Tree, line: usize, column: usize) -> anyhow::Result<Node<'_>> {
    if line == 0 || column == 0 {
        bail!("Lines and columns are one-based, got {}:{}", line, column);
    }

    let point = Point::new(line - 1, column - 1);
    let node = tree.root_node().descendant_for_point(point);
    log::debug!("Cursor {}:{} is on {:?}", line, column, node);
    Ok(node)
}

/// One-based `line:column` for display.
pub(crate) fn display_point(point: Point) -> String {
    format!("{}:{}", point.row + 1, point.column + 1)
}
