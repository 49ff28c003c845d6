use stint_core::announce::NullSink;
use stint_core::filter::{self, FilterController, FilterState, Location, MemoryLocation};
use stint_core::persist::{JsonFileBackend, Persistence};
use stint_core::store::TaskStore;
use tempfile::tempdir;

fn open_store(dir: &std::path::Path) -> TaskStore {
    let backend = JsonFileBackend::new(dir.join("tasks.json"));
    TaskStore::open(Persistence::new(Box::new(backend)), Box::new(NullSink))
}

#[test]
fn mutations_survive_a_reload() {
    let temp = tempdir().expect("tempdir");

    let mut store = open_store(temp.path());
    store.add("Buy milk");
    store.add("Walk dog");
    let walk_id = store.tasks()[0].id;
    store.toggle(walk_id);
    store.edit(store.tasks()[1].id, "Buy oat milk");

    let reloaded = open_store(temp.path());
    let texts: Vec<&str> = reloaded.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Walk dog", "Buy oat milk"]);
    assert!(reloaded.tasks()[0].completed);
    assert_eq!(reloaded.tasks()[0].id, walk_id);
    assert_eq!(reloaded.remaining_count(), 1);
    assert_eq!(reloaded.completed_count(), 1);
}

#[test]
fn corrupt_task_file_falls_back_to_empty() {
    let temp = tempdir().expect("tempdir");
    std::fs::write(temp.path().join("tasks.json"), "[{\"id\": 7}]").expect("write corrupt file");

    let mut store = open_store(temp.path());
    assert!(store.tasks().is_empty());

    // the store stays fully usable and overwrites the bad record
    store.add("fresh start");
    let reloaded = open_store(temp.path());
    assert_eq!(reloaded.tasks().len(), 1);
}

#[test]
fn filtered_view_tracks_store_and_location() {
    let temp = tempdir().expect("tempdir");

    let mut store = open_store(temp.path());
    store.add("one");
    store.add("two");
    store.add("three");
    store.toggle(store.tasks()[1].id);

    let mut filters = FilterController::new(MemoryLocation::default());
    assert_eq!(filters.filter(), FilterState::All);

    filters.set_filter(FilterState::Active);
    let active: Vec<&str> = filter::derive(store.tasks(), filters.filter())
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(active, vec!["three", "one"]);
    assert_eq!(filters.location().fragment(), "#/active");

    // back/forward navigation lands on a completed view
    filters.location_mut().set_fragment("#/completed");
    assert!(filters.on_external_change());
    let completed: Vec<&str> = filter::derive(store.tasks(), filters.filter())
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(completed, vec!["two"]);
}
