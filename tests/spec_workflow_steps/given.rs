//! Given steps for specification workflow scenarios.

use super::world::{SpecWorld, run_async, split_list};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::given;
use serde_json::json;
use specforge::spec::domain::{
    FeatureRequest, Specification, Task, TaskBoard, TaskColumn, TaskId,
};

#[given(r#"the generator returns the frontend task "{text}" under a capitalized key"#)]
fn generator_returns_capitalized_frontend(
    world: &mut SpecWorld,
    text: String,
) -> Result<(), eyre::Report> {
    world
        .gateway
        .set_generated_tasks(json!({ "Frontend": [text] }))
        .map_err(|err| eyre!("script generator: {err}"))
}

#[given(r#"an open specification with frontend tasks "{frontend}" and backend tasks "{backend}""#)]
fn open_specification(
    world: &mut SpecWorld,
    frontend: String,
    backend: String,
) -> Result<(), eyre::Report> {
    world
        .gateway
        .set_generated_tasks(json!({
            "frontend": split_list(&frontend),
            "backend": split_list(&backend),
        }))
        .map_err(|err| eyre!("script generator: {err}"))?;
    let spec = run_async(world.store.create_specification(FeatureRequest::new("Board")))
        .wrap_err("open specification for scenario")?;
    world.snapshot = Some(spec);
    Ok(())
}

#[given(
    r#"a specification titled "{title}" with overview "{overview}" and a completed frontend task "{text}""#
)]
fn standalone_specification(world: &mut SpecWorld, title: String, overview: String, text: String) {
    let board = TaskBoard::new().with_column(
        TaskColumn::Frontend,
        vec![Task::new(TaskId::generate(), text, true)],
    );
    world.standalone = Some(
        Specification::new(title)
            .with_overview(overview)
            .with_tasks(board),
    );
}
