use super::args::FileArgs;
use super::read_tree;

pub async fn run(args: FileArgs) -> anyhow::Result<()> {
    let tree = read_tree(&args.file).await?;

    if let Some(include) = tree.include_path() {
        log::info!("{:?} includes {:?}", args.file, include);
    }

    if tree.root_node().has_error() {
        log::warn!("{:?} contains unrecognized instructions", args.file);
    }

    println!("{}", tree.root_node().to_sexp());
    Ok(())
}
