use std::path::PathBuf;

use anyhow::{bail, Context};
use fift_grammar::Language;
use tokio::task::JoinSet;

use super::args::CheckArgs;
use super::{display_point, load_language, read_source};

/// Reads and parses one file, returning the number of nodes in its tree. A
/// tree holding `ERROR` nodes counts as a failure.
async fn check_file(language: Language, path: PathBuf) -> anyhow::Result<usize> {
    let source = read_source(&path).await?;

    let tree = tokio::task::spawn_blocking(move || language.parser().parse(&source))
        .await
        .context("joining parser task")??;

    let root = tree.root_node();
    if let Some(error) = root.descendants().find(|n| n.is_error()) {
        bail!(
            "Unrecognized instruction {:?} at {}",
            error.text().split_whitespace().next().unwrap_or_default(),
            display_point(error.start_position())
        );
    }

    Ok(tree.node_count())
}

pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    log::info!("Running in check mode");

    let language = load_language()?;
    let total = args.files.len();

    let mut tasks = JoinSet::new();
    for path in args.files {
        tasks.spawn(async move {
            let result = check_file(language, path.clone()).await;
            (path, result)
        });
    }

    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        let (path, result) = joined.context("joining check task")?;
        match result {
            Ok(nodes) => {
                log::info!("Parsed {:?} into {} nodes", path, nodes);
                println!("{}: ok", path.display());
            }
            Err(e) => {
                failed += 1;
                println!("{}: {:#}", path.display(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{}/{} files failed to parse", failed, total);
    }

    log::info!("✓ All {} files parsed successfully!", total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join(name)
    }

    #[tokio::test]
    async fn counts_nodes() {
        let language = load_language().unwrap();
        let nodes = check_file(language, fixture("fixtures/counter.fif"))
            .await
            .unwrap();
        assert!(nodes > 0);
    }

    #[tokio::test]
    async fn reports_syntax_errors() {
        let language = load_language().unwrap();
        let err = check_file(language, fixture("invalid/unterminated_program.fif"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Syntax error"));
    }

    #[tokio::test]
    async fn reports_unrecognized_instructions() {
        let language = load_language().unwrap();
        let err = check_file(language, fixture("fixtures/unknown_blocks.fif"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized instruction \"IFNOT:<{\" at 6:5");
    }

    #[tokio::test]
    async fn missing_files_fail_the_run() {
        let args = CheckArgs {
            files: vec![fixture("fixtures/counter.fif"), fixture("fixtures/nope.fif")],
        };
        let err = run(args).await.unwrap_err();
        assert_eq!(err.to_string(), "1/2 files failed to parse");
    }
}
