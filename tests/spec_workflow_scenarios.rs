//! Behaviour tests for generating, editing and exporting specifications.

mod spec_workflow_steps;

use rstest_bdd_macros::scenario;
use spec_workflow_steps::world::{SpecWorld, world};

#[scenario(
    path = "tests/features/spec_workflow.feature",
    name = "Generated tasks are normalized on creation"
)]
#[tokio::test(flavor = "multi_thread")]
async fn generated_tasks_are_normalized(world: SpecWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/spec_workflow.feature",
    name = "Adding a task to an empty column"
)]
#[tokio::test(flavor = "multi_thread")]
async fn add_task_to_empty_column(world: SpecWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/spec_workflow.feature",
    name = "Moving a task across columns"
)]
#[tokio::test(flavor = "multi_thread")]
async fn move_task_across_columns(world: SpecWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/spec_workflow.feature",
    name = "Exporting a specification as Markdown"
)]
#[tokio::test(flavor = "multi_thread")]
async fn export_as_markdown(world: SpecWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/spec_workflow.feature",
    name = "Loading an unknown specification"
)]
#[tokio::test(flavor = "multi_thread")]
async fn load_unknown_specification(world: SpecWorld) {
    let _ = world;
}
