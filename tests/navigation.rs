use std::io::Write;

use loglens::render::ui::ColorTheme;
use loglens::{DisplayOptions, Document, LayoutEngine, Navigator, SearchOutcome, Viewport};
use proptest::prelude::*;
use ratatui::crossterm::style::ContentStyle;
use tempfile::NamedTempFile;

fn write_lines(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("write line");
    }
    file.flush().expect("flush");
    file
}

fn open_navigator(
    file: &NamedTempFile,
    options: DisplayOptions,
    viewport: Viewport,
) -> Navigator {
    let document = Document::open(file.path()).expect("open document");
    Navigator::new(
        document,
        options,
        ColorTheme::monochrome().search_match,
        viewport,
    )
    .expect("first page")
}

fn lines_of_lengths(lengths: &[usize]) -> Vec<String> {
    lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| {
            let stem = format!("{}:", i);
            let pad = len.saturating_sub(stem.len());
            format!("{}{}", stem, "x".repeat(pad))
        })
        .collect()
}

#[test]
fn wrapped_lines_page_forward_and_back() {
    // Width 20: line 1 takes three rows, the rest one.
    let lengths = [5, 50, 5, 5, 5, 5, 5, 5];
    let file = write_lines(&lines_of_lengths(&lengths));
    let mut nav = open_navigator(&file, DisplayOptions::default(), Viewport::new(4, 20));

    assert_eq!(nav.page().last_line, 1);
    assert_eq!(nav.page().rows_used, 4);

    assert!(nav.next_page().unwrap());
    assert_eq!(nav.top(), 1);
    assert_eq!(nav.page().last_line, 2);

    assert!(nav.next_page().unwrap());
    assert_eq!((nav.top(), nav.page().last_line), (2, 5));

    // The page starting at line 1 ends exactly on line 2.
    assert!(nav.prev_page().unwrap());
    assert_eq!(nav.top(), 1);
    assert!(nav.prev_page().unwrap());
    assert_eq!(nav.top(), 0);
}

#[test]
fn line_numbers_narrow_the_content_width() {
    // 75 columns fit one row at width 80, but need two behind the gutter.
    let file = write_lines(&lines_of_lengths(&[75, 75, 75]));
    let plain = open_navigator(&file, DisplayOptions::default(), Viewport::new(3, 80));
    assert_eq!(plain.page().last_line, 2);

    let numbered = open_navigator(
        &file,
        DisplayOptions {
            show_line_number: true,
            ..Default::default()
        },
        Viewport::new(3, 80),
    );
    assert_eq!(numbered.page().lines.len(), 1);
    assert_eq!(numbered.page().lines[0].rows, 2);
}

#[test]
fn goto_and_search_compose() {
    let lines: Vec<String> = (0..50)
        .map(|i| match i {
            7 | 31 => format!("{} Connection RESET by peer", i),
            _ => format!("{} request served", i),
        })
        .collect();
    let file = write_lines(&lines);
    let mut nav = open_navigator(&file, DisplayOptions::default(), Viewport::new(5, 80));

    assert!(nav.goto_line(40).unwrap());
    assert_eq!(nav.top(), 39);

    assert_eq!(nav.search("reset").unwrap(), SearchOutcome::Found { matches: 2 });
    assert_eq!(nav.top(), 7);
    let highlighted = &nav.page().lines[0].text;
    assert!(highlighted.contains("\x1b["), "match should carry highlight: {:?}", highlighted);

    nav.next_match().unwrap();
    assert_eq!(nav.top(), 31);
    nav.next_match().unwrap();
    assert_eq!(nav.top(), 7);
}

#[test]
fn search_ignores_matches_created_by_escapes_when_not_unescaping() {
    let lines = vec![r#"{"msg":"a\tb"}"#.to_string(), "a b".to_string()];
    let file = write_lines(&lines);

    let mut raw = open_navigator(&file, DisplayOptions::default(), Viewport::new(3, 80));
    assert_eq!(raw.search("a\tb").unwrap(), SearchOutcome::NotFound);

    let mut unescaped = open_navigator(
        &file,
        DisplayOptions {
            unescape: true,
            ..Default::default()
        }
        .for_interactive(),
        Viewport::new(3, 80),
    );
    assert_eq!(
        unescaped.search("a\tb").unwrap(),
        SearchOutcome::Found { matches: 1 }
    );
}

#[test]
fn single_line_document() {
    let file = write_lines(&["only".to_string()]);
    let mut nav = open_navigator(&file, DisplayOptions::default(), Viewport::new(3, 80));
    assert!(!nav.next_page().unwrap());
    assert!(!nav.prev_page().unwrap());
    assert!(!nav.next_line().unwrap());
    nav.goto_last().unwrap();
    assert_eq!((nav.top(), nav.page().last_line), (0, 0));
}

fn line_lengths() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..200, 5..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn pages_fit_and_are_contiguous(
        lengths in line_lengths(),
        height in 3usize..12,
        width in 20usize..100,
        start_seed in 0usize..1000,
    ) {
        let file = write_lines(&lines_of_lengths(&lengths));
        let document = Document::open(file.path()).unwrap();
        let engine = LayoutEngine::new(&document, DisplayOptions::default(), ContentStyle::default());
        let start = start_seed % lengths.len();

        let page = engine.render_page(start, Viewport::new(height, width), None).unwrap();
        prop_assert!(page.rows_used <= height);
        prop_assert!(!page.lines.is_empty());
        prop_assert_eq!(page.lines[0].line, start);
        for (offset, line) in page.lines.iter().enumerate() {
            prop_assert_eq!(line.line, start + offset);
        }
        prop_assert_eq!(page.last_line, page.lines.last().unwrap().line);
    }

    #[test]
    fn forward_paging_never_skips_a_line(
        lengths in line_lengths(),
        height in 3usize..12,
        width in 20usize..100,
    ) {
        let file = write_lines(&lines_of_lengths(&lengths));
        let mut nav = open_navigator(&file, DisplayOptions::default(), Viewport::new(height, width));

        let mut seen_through = nav.page().last_line;
        while nav.next_page().unwrap() {
            prop_assert!(nav.top() <= seen_through + 1);
            seen_through = seen_through.max(nav.page().last_line);
        }
        prop_assert_eq!(seen_through, lengths.len() - 1);
    }

    // Backward paging is a best-effort inverse: it always makes progress and
    // never lands on a start whose page overshoots the old top, except for
    // the fallback to the first line.
    #[test]
    fn backward_paging_makes_bounded_progress(
        lengths in line_lengths(),
        height in 3usize..12,
        width in 20usize..100,
        top_seed in 1usize..1000,
    ) {
        let file = write_lines(&lines_of_lengths(&lengths));
        let mut nav = open_navigator(&file, DisplayOptions::default(), Viewport::new(height, width));
        let top = 1 + top_seed % (lengths.len() - 1);
        nav.jump_to(top).unwrap();

        let start = nav.reverse_page_start().unwrap();
        prop_assert!(start < top);

        let document = Document::open(file.path()).unwrap();
        let engine = LayoutEngine::new(&document, DisplayOptions::default(), ContentStyle::default());
        let probe = engine.render_page(start, Viewport::new(height, width), None).unwrap();
        prop_assert!(start == 0 || probe.last_line <= top);
    }

    #[test]
    fn one_row_lines_page_back_exactly(
        total in 10usize..80,
        height in 3usize..10,
        pages in 1usize..4,
    ) {
        let lines: Vec<String> = (0..total).map(|i| format!("row {}", i)).collect();
        let file = write_lines(&lines);
        let mut nav = open_navigator(&file, DisplayOptions::default(), Viewport::new(height, 80));

        let mut tops = vec![nav.top()];
        for _ in 0..pages {
            if !nav.next_page().unwrap() {
                break;
            }
            tops.push(nav.top());
        }
        tops.pop();
        while let Some(expected) = tops.pop() {
            nav.prev_page().unwrap();
            prop_assert_eq!(nav.top(), expected);
        }
    }
}
