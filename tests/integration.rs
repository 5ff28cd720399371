mod integration {
    use fift_grammar::{Language, NodeKind, language};
    use test_each_file::test_each_file;

    fn parses([content]: [&str; 1]) {
        let tree = Language::new(language())
            .expect("Error loading Fift grammar")
            .parser()
            .parse(content)
            .unwrap();

        let root = tree.root_node();
        assert_eq!(root.kind(), NodeKind::SourceFile);
        assert_eq!(root.end_byte(), content.len());
        assert!(root.named_children().any(|c| c.kind() == NodeKind::Program));
    }

    fn rejects(content: &str) {
        let err = fift_grammar::parse(content).unwrap_err();
        assert!(err.to_string().starts_with("Syntax error"), "{}", err);
    }

    test_each_file! { for ["fif"] in "tests/fixtures" => parses }
    test_each_file! { in "tests/invalid" => rejects }

    async fn check_async([content]: [&str; 1]) {
        let source = content.to_owned();
        let nodes = tokio::task::spawn_blocking(move || {
            fift_grammar::parse(&source).map(|tree| tree.node_count())
        })
        .await
        .unwrap()
        .unwrap();
        assert!(nodes > 1);
    }

    test_each_file! { #[tokio::test] async for ["fif"] in "tests/fixtures" as check_async => check_async }
}
