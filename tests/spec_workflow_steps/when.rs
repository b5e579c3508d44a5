//! When steps for specification workflow scenarios.

use super::world::{SpecWorld, run_async};
use eyre::eyre;
use rstest_bdd_macros::when;
use specforge::spec::{
    domain::{ExportDocument, ExportFormat, FeatureRequest, SpecId, TaskColumn},
    services::{DragLocation, DragResult, TaskBoardEngine},
};

fn column(name: &str) -> Result<TaskColumn, eyre::Report> {
    TaskColumn::try_from(name).map_err(|err| eyre!("{err}"))
}

fn index(value: u64) -> Result<usize, eyre::Report> {
    usize::try_from(value).map_err(|err| eyre!("index out of range: {err}"))
}

#[when(r#"the user creates a specification titled "{title}" with goal "{goal}""#)]
fn create_specification(world: &mut SpecWorld, title: String, goal: String) {
    let request = FeatureRequest::new(title).with_goal(goal);
    world.last_create_result = Some(run_async(world.store.create_specification(request)));
}

#[when(r#"the user adds a task to the "{name}" column"#)]
fn add_task(world: &mut SpecWorld, name: String) -> Result<(), eyre::Report> {
    world
        .store
        .add_task(column(&name)?)
        .ok_or_else(|| eyre!("no specification is open"))?;
    Ok(())
}

#[when(r#"the user drags task {from:u64} of "{source}" to position {to:u64} of "{destination}""#)]
fn drag_task(
    world: &mut SpecWorld,
    from: u64,
    source: String,
    to: u64,
    destination: String,
) -> Result<(), eyre::Report> {
    let engine = TaskBoardEngine::new(world.store.clone());
    let drag = DragResult::dropped(
        DragLocation::new(column(&source)?, index(from)?),
        DragLocation::new(column(&destination)?, index(to)?),
    );
    engine
        .handle_drop(&drag)
        .ok_or_else(|| eyre!("drop was not dispatched"))?;
    Ok(())
}

#[when("the specification is exported as Markdown")]
fn export_markdown(world: &mut SpecWorld) -> Result<(), eyre::Report> {
    let spec = world
        .standalone
        .as_ref()
        .ok_or_else(|| eyre!("missing specification in scenario world"))?;
    world.export = Some(ExportDocument::render(spec, ExportFormat::Markdown));
    Ok(())
}

#[when(r#"the user loads the specification "{id}""#)]
fn load_specification(world: &mut SpecWorld, id: String) {
    world.last_load_result = Some(run_async(
        world.store.load_specification(&SpecId::new(id)),
    ));
}
