//! Then steps for specification workflow scenarios.

use super::world::{SpecWorld, split_list};
use eyre::eyre;
use rstest_bdd_macros::then;
use specforge::spec::{domain::Task, services::SpecStoreError};

const REFERENCE_EXPORT: &str = "# T\n\n## Overview\n\nO\n\n## Frontend Tasks\n\n- [x] x";

fn texts(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| task.text().to_owned()).collect()
}

#[then(r#"the "{name}" column holds task "{id}" reading "{text}""#)]
fn column_holds_task(
    world: &SpecWorld,
    name: String,
    id: String,
    text: String,
) -> Result<(), eyre::Report> {
    if let Some(Err(err)) = &world.last_create_result {
        return Err(eyre!("creation failed: {err}"));
    }
    let tasks = world.column(&name)?;
    let [task] = tasks.as_slice() else {
        return Err(eyre!("expected exactly one {name} task, found {}", tasks.len()));
    };
    if task.id().as_str() != id || task.text() != text || task.completed() {
        return Err(eyre!("unexpected task {task:?}"));
    }
    Ok(())
}

#[then(r#"the "{name}" column is empty"#)]
fn column_is_empty(world: &SpecWorld, name: String) -> Result<(), eyre::Report> {
    let tasks = world.column(&name)?;
    if !tasks.is_empty() {
        return Err(eyre!("expected empty {name} column, found {tasks:?}"));
    }
    Ok(())
}

#[then(r#"the "{name}" column has {count:u64} tasks"#)]
fn column_has_count(world: &SpecWorld, name: String, count: u64) -> Result<(), eyre::Report> {
    let tasks = world.column(&name)?;
    if u64::try_from(tasks.len()).ok() != Some(count) {
        return Err(eyre!("expected {count} {name} tasks, found {}", tasks.len()));
    }
    Ok(())
}

#[then(r#"the last "{name}" task reads "{text}" and is not completed"#)]
fn last_task_reads(world: &SpecWorld, name: String, text: String) -> Result<(), eyre::Report> {
    let tasks = world.column(&name)?;
    let last = tasks
        .last()
        .ok_or_else(|| eyre!("{name} column is empty"))?;
    if last.text() != text || last.completed() {
        return Err(eyre!("unexpected task {last:?}"));
    }
    Ok(())
}

#[then(r#"the "{name}" column reads "{list}""#)]
fn column_reads(world: &SpecWorld, name: String, list: String) -> Result<(), eyre::Report> {
    let actual = texts(&world.column(&name)?);
    let expected = split_list(&list);
    if actual != expected {
        return Err(eyre!("expected {name} column {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the export file is named "{file_name}""#)]
fn export_file_named(world: &SpecWorld, file_name: String) -> Result<(), eyre::Report> {
    let export = world
        .export
        .as_ref()
        .ok_or_else(|| eyre!("missing export in scenario world"))?;
    if export.file_name != file_name {
        return Err(eyre!("expected {file_name}, found {}", export.file_name));
    }
    Ok(())
}

#[then("the export holds only the title, overview and frontend sections")]
fn export_matches_reference(world: &SpecWorld) -> Result<(), eyre::Report> {
    let export = world
        .export
        .as_ref()
        .ok_or_else(|| eyre!("missing export in scenario world"))?;
    if export.content != REFERENCE_EXPORT {
        return Err(eyre!("unexpected export:\n{}", export.content));
    }
    Ok(())
}

#[then("loading fails because the specification was not found")]
fn loading_not_found(world: &SpecWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_load_result
        .as_ref()
        .ok_or_else(|| eyre!("missing load result in scenario world"))?;
    if !matches!(result, Err(SpecStoreError::NotFound(_))) {
        return Err(eyre!("expected not-found error, got {result:?}"));
    }
    Ok(())
}

#[then("the open specification is unchanged")]
fn open_specification_unchanged(world: &SpecWorld) -> Result<(), eyre::Report> {
    if world.store.current() != world.snapshot {
        return Err(eyre!("open specification changed"));
    }
    Ok(())
}
