//! Tests for the Markdown projection and export file naming.

use crate::spec::domain::{
    ExportDocument, ExportFormat, Specification, Task, TaskBoard, TaskColumn, TaskId,
    export_file_name, spec_to_markdown,
};
use rstest::rstest;

fn done(text: &str) -> Task {
    Task::new(TaskId::generate(), text, true)
}

fn open(text: &str) -> Task {
    Task::new(TaskId::generate(), text, false)
}

#[rstest]
fn renders_title_overview_and_checked_task_exactly() {
    let spec = Specification::new("T")
        .with_overview("O")
        .with_tasks(TaskBoard::new().with_column(TaskColumn::Frontend, vec![done("x")]));

    assert_eq!(
        spec_to_markdown(&spec),
        "# T\n\n## Overview\n\nO\n\n## Frontend Tasks\n\n- [x] x"
    );
}

#[rstest]
fn untitled_spec_uses_default_heading() {
    assert_eq!(spec_to_markdown(&Specification::new("")), "# Product Spec");
}

#[rstest]
fn sections_follow_fixed_order_and_skip_empty_content() {
    let board = TaskBoard::new()
        .with_column(TaskColumn::DevOps, vec![open("ship it")])
        .with_column(TaskColumn::Backend, vec![open("api"), done("schema")]);
    let spec = Specification::new("Login")
        .with_user_stories(["sign in".to_owned(), "sign out".to_owned()])
        .with_risks(["lockout".to_owned()])
        .with_tasks(board);

    let expected = concat!(
        "# Login\n\n",
        "## User Stories\n\n1. sign in\n2. sign out\n\n",
        "## Backend Tasks\n\n- [ ] api\n- [x] schema\n\n",
        "## DevOps Tasks\n\n- [ ] ship it\n\n",
        "## Risks\n\n1. lockout",
    );
    assert_eq!(spec_to_markdown(&spec), expected);
}

#[rstest]
fn rendering_is_deterministic() {
    let spec = Specification::new("Same").with_overview("body");
    assert_eq!(spec_to_markdown(&spec), spec_to_markdown(&spec.clone()));
}

#[rstest]
#[case("Login Flow", ExportFormat::Markdown, "login-flow.md")]
#[case("  Two   Spaces ", ExportFormat::Text, "-two-spaces-.txt")]
#[case("", ExportFormat::Markdown, "spec.md")]
fn file_name_is_slugged_title(
    #[case] title: &str,
    #[case] format: ExportFormat,
    #[case] expected: &str,
) {
    assert_eq!(export_file_name(&Specification::new(title), format), expected);
}

#[rstest]
fn text_export_shares_markdown_body() {
    let spec = Specification::new("Notes").with_overview("O");
    let markdown = ExportDocument::render(&spec, ExportFormat::Markdown);
    let text = ExportDocument::render(&spec, ExportFormat::Text);

    assert_eq!(markdown.content, text.content);
    assert_eq!(text.file_name, "notes.txt");
}
