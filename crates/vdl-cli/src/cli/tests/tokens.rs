use super::parse;

#[test]
fn cli_parse_no_tokens() {
    let cli = parse(&["vdl"]);
    assert!(cli.tokens.is_empty());
    assert!(cli.output_dir.is_none());
    assert!(cli.jobs.is_none());
}

#[test]
fn cli_parse_tokens_keep_order() {
    let cli = parse(&[
        "vdl",
        "https://example.com/a",
        "9.5M",
        "https://example.com/b",
        "5000K",
        "123456",
    ]);
    assert_eq!(
        cli.tokens,
        [
            "https://example.com/a",
            "9.5M",
            "https://example.com/b",
            "5000K",
            "123456"
        ]
    );
}

#[test]
fn cli_parse_tokens_after_options() {
    let cli = parse(&["vdl", "--jobs", "2", "https://example.com/a", "1G"]);
    assert_eq!(cli.jobs, Some(2));
    assert_eq!(cli.tokens, ["https://example.com/a", "1G"]);
}
