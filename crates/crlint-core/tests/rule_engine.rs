//! End-to-end behavior of the rule engine over complete change requests.

use std::sync::Arc;

use async_trait::async_trait;
use crlint_core::{
    ChangeCount, ChangeFacts, ChangeRequest, Commit, ContentFetcher, Diagnostic, EngineConfig,
    FetchError, FetchResult, FileChanges, Identity, MemoryContentFetcher, MemorySink, RuleEngine,
};

fn assigned_request(description: &str, count: u64) -> ChangeRequest {
    ChangeRequest {
        description: Some(description.to_string()),
        assignee: Some(Identity::Username("reviewer".to_string())),
        changes_count: ChangeCount::new(count),
    }
}

fn facts_with_files(modified: &[&str], created: &[&str]) -> ChangeFacts {
    ChangeFacts {
        change_request: assigned_request("Does a thing", 3),
        commits: vec![Commit::new("Add thing")],
        files: FileChanges {
            modified: modified.iter().map(|s| s.to_string()).collect(),
            created: created.iter().map(|s| s.to_string()).collect(),
        },
    }
}

async fn run(facts: &ChangeFacts, fetcher: impl ContentFetcher + 'static) -> Vec<Diagnostic> {
    let engine = RuleEngine::new(EngineConfig::default(), Arc::new(fetcher));
    let sink = MemorySink::new();
    engine.evaluate(facts, &sink).await;
    sink.into_diagnostics()
}

fn flag_lines(diags: &[Diagnostic], needle: &str) -> Vec<(Option<String>, Option<usize>)> {
    diags
        .iter()
        .filter_map(|d| match d {
            Diagnostic::Flag {
                message,
                file,
                line,
            } if message.contains(needle) => Some((file.clone(), *line)),
            _ => None,
        })
        .collect()
}

/// Fetcher that always fails.
struct FailingFetcher;

#[async_trait]
impl ContentFetcher for FailingFetcher {
    async fn fetch(&self, path: &str) -> FetchResult<Option<String>> {
        Err(FetchError::Io {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "connection reset"),
        })
    }
}

/// Fetcher that panics for one path and serves the rest from memory.
struct PanickingFetcher {
    inner: MemoryContentFetcher,
    poison: &'static str,
}

#[async_trait]
impl ContentFetcher for PanickingFetcher {
    async fn fetch(&self, path: &str) -> FetchResult<Option<String>> {
        if path == self.poison {
            panic!("fetcher blew up on {path}");
        }
        self.inner.fetch(path).await
    }
}

#[tokio::test]
async fn test_svg_comment_and_inkscape_reported_once_each() {
    let fetcher = MemoryContentFetcher::new().with_file(
        "icon.svg",
        "<svg><!-- note -->\n<path inkscape:foo/></svg>\n<!-- second -->",
    );
    let diags = run(&facts_with_files(&[], &["icon.svg"]), fetcher).await;

    assert_eq!(
        flag_lines(&diags, "comments"),
        vec![(Some("icon.svg".to_string()), Some(1))]
    );
    assert_eq!(
        flag_lines(&diags, "Inkscape"),
        vec![(Some("icon.svg".to_string()), Some(2))]
    );
}

#[tokio::test]
async fn test_svg_embedded_image_reported_per_occurrence() {
    let line = "<image href=\"data:image/png;base64,AAA\"/>";
    let fetcher = MemoryContentFetcher::new().with_file("pic.svg", format!("{line}\n{line}"));
    let diags = run(&facts_with_files(&["pic.svg"], &[]), fetcher).await;

    let hits = flag_lines(&diags, "data:image");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].1, Some(1));
    assert_eq!(hits[1].1, Some(2));
}

#[tokio::test]
async fn test_svg_fetch_failure_is_silent() {
    let diags = run(&facts_with_files(&[], &["icon.svg"]), FailingFetcher).await;
    assert!(diags.is_empty(), "unexpected: {diags:?}");
}

#[tokio::test]
async fn test_svg_scan_panic_does_not_lose_other_files() {
    crlint_core::init_tracing(false, tracing::Level::DEBUG);
    let fetcher = PanickingFetcher {
        inner: MemoryContentFetcher::new().with_file("good.svg", "<!-- c -->"),
        poison: "bad.svg",
    };
    let engine = RuleEngine::new(EngineConfig::default(), Arc::new(fetcher));
    let sink = MemorySink::new();
    let summary = engine
        .evaluate(&facts_with_files(&[], &["bad.svg", "good.svg"]), &sink)
        .await;

    assert_eq!(summary.svg_files_scanned, 1);
    assert_eq!(summary.svg_files_skipped, 1);
    assert_eq!(flag_lines(&sink.diagnostics(), "comments").len(), 1);
}

#[tokio::test]
async fn test_lockfile_check_follows_modified_set() {
    let diags = run(&facts_with_files(&["package.json"], &[]), MemoryContentFetcher::new()).await;
    assert_eq!(flag_lines(&diags, "package-lock.json").len(), 1);

    let diags = run(
        &facts_with_files(&["package.json", "package-lock.json"], &[]),
        MemoryContentFetcher::new(),
    )
    .await;
    assert!(diags.is_empty());
}

#[tokio::test]
async fn test_font_rules_can_coexist() {
    let diags = run(&facts_with_files(&[], &["f.ttf"]), MemoryContentFetcher::new()).await;
    assert_eq!(flag_lines(&diags, "without WOFF or WOFF2").len(), 1);

    let diags = run(
        &facts_with_files(&[], &["f.ttf", "f.woff2", "old.eot"]),
        MemoryContentFetcher::new(),
    )
    .await;
    assert!(flag_lines(&diags, "without WOFF or WOFF2").is_empty());
    assert_eq!(flag_lines(&diags, "WOFF fallback").len(), 1);
    assert_eq!(flag_lines(&diags, "EOT").len(), 1);
}

#[tokio::test]
async fn test_raster_images_note_once() {
    let diags = run(
        &facts_with_files(&[], &["a.png", "b.gif", "c.png"]),
        MemoryContentFetcher::new(),
    )
    .await;
    assert_eq!(diags.iter().filter(|d| d.is_note()).count(), 1);
    assert_eq!(diags.iter().filter(|d| d.is_explain()).count(), 1);
}

#[tokio::test]
async fn test_commit_guidance_is_explained_once_per_category() {
    let mut facts = facts_with_files(&[], &[]);
    facts.commits = vec![
        Commit::new("Fixed the parser."),
        Commit::new("Fixing more things."),
        Commit::new("Merge branch 'main' into feature"),
    ];
    let diags = run(&facts, MemoryContentFetcher::new()).await;

    // 2 wording + 2 full stop + 1 merge.
    assert_eq!(diags.iter().filter(|d| d.is_flag()).count(), 5);
    // wording, merge, full stop, amend.
    assert_eq!(diags.iter().filter(|d| d.is_explain()).count(), 4);
    let last = diags.last().expect("diagnostics");
    assert!(last.message().contains("force-with-lease"));
}

#[tokio::test]
async fn test_size_threshold_is_exclusive() {
    let mut facts = facts_with_files(&[], &[]);
    facts.change_request.changes_count = ChangeCount::new(10);
    assert!(run(&facts, MemoryContentFetcher::new()).await.is_empty());

    facts.change_request.changes_count = ChangeCount::new(11);
    let diags = run(&facts, MemoryContentFetcher::new()).await;
    assert_eq!(diags.len(), 2);
    assert!(diags[1].message().contains("(11 files)"));
}

#[tokio::test]
async fn test_configured_thresholds_apply() {
    let config = EngineConfig {
        big_change_threshold: 100,
        long_title_threshold: 5,
        ..EngineConfig::default()
    };
    let engine = RuleEngine::new(config, Arc::new(MemoryContentFetcher::new()));
    let mut facts = facts_with_files(&[], &[]);
    facts.change_request.changes_count = ChangeCount::new(50);
    facts.commits = vec![Commit::new("Add widget")];

    let sink = MemorySink::new();
    let summary = engine.evaluate(&facts, &sink).await;
    assert_eq!(summary.flags, 1);
    assert!(sink.diagnostics()[0].message().contains("longer than 5"));
}

#[tokio::test]
async fn test_evaluation_is_idempotent() {
    let fetcher = MemoryContentFetcher::new()
        .with_file("a.svg", "<!-- a -->\n<g inkscape:x=\"1\"/>")
        .with_file("b.svg", "data:image/png")
        .with_file("c.svg", "<!-- c -->");
    let facts = ChangeFacts {
        change_request: ChangeRequest::default(),
        commits: vec![Commit::new("Updated stuff."), Commit::new("Merge branch 'x'")],
        files: FileChanges {
            modified: vec!["package.json".into(), "c.svg".into(), "b.svg".into()],
            created: vec!["a.svg".into(), "f.ttf".into(), "logo.png".into()],
        },
    };
    let engine = RuleEngine::new(EngineConfig::default(), Arc::new(fetcher));

    let first = MemorySink::new();
    let second = MemorySink::new();
    engine.evaluate(&facts, &first).await;
    engine.evaluate(&facts, &second).await;

    assert!(!first.diagnostics().is_empty());
    assert_eq!(first.into_diagnostics(), second.into_diagnostics());
}

#[tokio::test]
async fn test_foreign_assignee_shapes_still_evaluate() {
    for assignee in [r#"{"id": 7, "login": "octo"}"#, "7"] {
        let raw = format!(
            r#"{{
                "change_request": {{"description": "", "assignee": {assignee}}},
                "commits": [{{"title": "Add thing"}}]
            }}"#
        );
        let facts = ChangeFacts::from_json_str(&raw).expect("parse");
        let diags = run(&facts, MemoryContentFetcher::new()).await;

        assert!(flag_lines(&diags, "Nobody is assigned").is_empty(), "{assignee}");
        assert_eq!(flag_lines(&diags, "description").len(), 1, "{assignee}");
    }
}
