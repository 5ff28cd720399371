use fift_grammar::analysis::{documentation, reference};

use super::args::{PositionArgs, ReferencesArgs};
use super::{display_point, node_at, read_tree};

pub async fn definition(args: PositionArgs) -> anyhow::Result<()> {
    let tree = read_tree(&args.file).await?;
    let node = node_at(&tree, args.line, args.column)?;

    match reference::definition_range(node) {
        Some(range) => println!(
            "{}:{}",
            args.file.display(),
            display_point(range.start_point)
        ),
        None => log::warn!("No definition found for {:?}", node.text()),
    }

    Ok(())
}

pub async fn references(args: ReferencesArgs) -> anyhow::Result<()> {
    let position = args.position;
    let tree = read_tree(&position.file).await?;
    let node = node_at(&tree, position.line, position.column)?;

    let references = reference::find_references(node, args.include_definition);
    if references.is_empty() {
        log::warn!("No references found for {:?}", node.text());
    }

    for reference in references {
        println!(
            "{}:{}",
            position.file.display(),
            display_point(reference.start_position())
        );
    }

    Ok(())
}

pub async fn hover(args: PositionArgs) -> anyhow::Result<()> {
    let tree = read_tree(&args.file).await?;
    let node = node_at(&tree, args.line, args.column)?;

    match documentation::hover(node) {
        Some(doc) => println!("{}", doc),
        None => log::warn!("No documentation for {:?}", node.text()),
    }

    Ok(())
}
