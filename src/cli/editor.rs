use fift_grammar::analysis::semantic_tokens::TOKEN_TYPES;
use fift_grammar::analysis::{folding, semantic_tokens};

use super::args::FileArgs;
use super::read_tree;

pub async fn folds(args: FileArgs) -> anyhow::Result<()> {
    let tree = read_tree(&args.file).await?;

    for range in folding::collect(&tree) {
        // Print the folded lines one-based and inclusive.
        println!("{}-{}", range.start_line + 1, range.end_line + 1);
    }

    Ok(())
}

pub async fn tokens(args: FileArgs) -> anyhow::Result<()> {
    let tree = read_tree(&args.file).await?;

    for token in semantic_tokens::collect(&tree).iter() {
        println!(
            "{}:{} {} {}",
            token.line + 1,
            token.start + 1,
            token.length,
            TOKEN_TYPES[token.token_type.legend_index() as usize]
        );
    }

    Ok(())
}
