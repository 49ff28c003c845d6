use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::announce::Announce;
use crate::cli::Command;
use crate::filter::{self, FilterController, FilterState, Location};
use crate::persist::{JsonFileBackend, Persistence};
use crate::store::TaskStore;
use crate::task::Task;

/// Announcement sink for the terminal: every status message goes straight
/// to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Announce for StdoutSink {
    fn announce(&self, message: &str) {
        println!("{message}");
    }
}

/// The CLI's navigable location: a one-line view file whose whole content is
/// the fragment, standing in for a browser URL hash. Read and write are
/// fail-soft; a missing or unreadable file reads as an empty fragment.
#[derive(Debug)]
pub struct FileLocation {
    path: PathBuf,
}

impl FileLocation {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Location for FileLocation {
    fn fragment(&self) -> String {
        match fs::read_to_string(&self.path) {
            Ok(raw) => raw.trim().to_string(),
            Err(err) => {
                debug!(file = %self.path.display(), error = %err, "no view file; empty fragment");
                String::new()
            }
        }
    }

    fn set_fragment(&mut self, fragment: &str) {
        if let Err(err) = fs::write(&self.path, fragment) {
            warn!(file = %self.path.display(), error = %err, "failed to write view file");
        }
    }
}

#[instrument(skip(data_dir, command))]
pub fn dispatch(data_dir: &Path, command: Command) -> anyhow::Result<()> {
    let backend = JsonFileBackend::new(data_dir.join("tasks.json"));
    let mut store = TaskStore::open(
        Persistence::new(Box::new(backend)),
        Box::new(StdoutSink),
    );
    let mut filters = FilterController::new(FileLocation::new(data_dir.join("view")));

    match command {
        Command::Add { text } => {
            info!("command add");
            store.add(&text.join(" "));
        }
        Command::List { filter } => {
            info!("command list");
            if let Some(value) = filter {
                filters.set_filter(value);
            }
            print_list(&store, filters.filter());
        }
        Command::Toggle { id } => {
            info!("command toggle");
            let id = resolve_id(store.tasks(), &id)?;
            store.toggle(id);
        }
        Command::Delete { id } => {
            info!("command delete");
            let id = resolve_id(store.tasks(), &id)?;
            store.delete(id);
        }
        Command::Edit { id, text } => {
            info!("command edit");
            let id = resolve_id(store.tasks(), &id)?;
            store.edit(id, &text.join(" "));
        }
        Command::Clear => {
            info!("command clear");
            store.clear_completed();
        }
        Command::View { filter } => {
            info!("command view");
            filters.set_filter(filter);
            println!("Filter set to {}", filter.as_str());
        }
        Command::Counts => {
            info!("command counts");
            println!(
                "{} remaining, {} completed",
                store.remaining_count(),
                store.completed_count()
            );
        }
    }

    Ok(())
}

fn print_list(store: &TaskStore, filter: FilterState) {
    let view = filter::derive(store.tasks(), filter);
    if view.is_empty() {
        println!("No tasks ({})", filter.as_str());
        return;
    }

    for task in &view {
        let mark = if task.completed { "x" } else { " " };
        println!("{} [{}] {}", short_id(task.id), mark, task.text);
    }
    println!(
        "-- {} shown ({}), {} remaining",
        view.len(),
        filter.as_str(),
        store.remaining_count()
    );
}

fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

/// Resolves a full UUID or a unique prefix of one. Ambiguity and misses are
/// CLI errors; the store's own unknown-id tolerance is for stale references,
/// not typos.
fn resolve_id(tasks: &[Task], raw: &str) -> anyhow::Result<Uuid> {
    if let Ok(id) = raw.parse::<Uuid>() {
        return Ok(id);
    }

    let needle = raw.to_ascii_lowercase();
    let mut matches = tasks
        .iter()
        .filter(|t| t.id.to_string().starts_with(&needle));

    let first = matches
        .next()
        .ok_or_else(|| anyhow!("no task matches id: {raw}"))?;
    if matches.next().is_some() {
        return Err(anyhow!("ambiguous id: {raw}"));
    }
    Ok(first.id)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::{FileLocation, resolve_id};
    use crate::filter::{FilterController, FilterState, Location};
    use crate::task::Task;

    #[test]
    fn file_location_round_trips_fragment() {
        let temp = tempdir().expect("tempdir");
        let mut location = FileLocation::new(temp.path().join("view"));

        assert_eq!(location.fragment(), "");
        location.set_fragment("#/completed");
        assert_eq!(location.fragment(), "#/completed");
    }

    #[test]
    fn filter_survives_reopening_the_view_file() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("view");

        let mut ctl = FilterController::new(FileLocation::new(path.clone()));
        ctl.set_filter(FilterState::Active);

        let reopened = FilterController::new(FileLocation::new(path));
        assert_eq!(reopened.filter(), FilterState::Active);
    }

    #[test]
    fn resolve_id_accepts_unique_prefix_only() {
        let tasks = vec![Task::new("a".to_string()), Task::new("b".to_string())];
        let full = tasks[0].id.to_string();
        let prefix = &full[..8];

        assert_eq!(resolve_id(&tasks, prefix).expect("unique prefix"), tasks[0].id);
        assert_eq!(resolve_id(&tasks, &full).expect("full id"), tasks[0].id);
        assert!(resolve_id(&tasks, "zzzz").is_err());
        assert!(resolve_id(&tasks, "").is_err());
    }
}
