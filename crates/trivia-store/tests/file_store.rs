use trivia_core::{ScoreRecord, SortPreference, TopScore};
use trivia_store::{FileBackend, LocalStorage, ScoreRepository, StorageAdapter};

fn file_repository(path: &std::path::Path) -> ScoreRepository<LocalStorage<FileBackend>> {
    ScoreRepository::new(LocalStorage::new(FileBackend::new(path)))
}

#[test]
fn test_scores_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let mut repo = file_repository(&path);
        repo.push(ScoreRecord::with_timestamp("A", 7, 10, 1).unwrap()).unwrap();
        repo.push(ScoreRecord::with_timestamp("B", 9, 10, 2).unwrap()).unwrap();
        repo.push(ScoreRecord::with_timestamp("C", 5, 10, 3).unwrap()).unwrap();
        repo.set_preference(SortPreference::Highest).unwrap();
        repo.storage_mut().save_current_user("C").unwrap();
    }

    let repo = file_repository(&path);
    let view = repo.current_view();

    let names: Vec<&str> = view.entries.iter().map(|e| e.record.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A", "C"]);
    assert_eq!(view.top, Some(TopScore { percent: 90, count: 1 }));
    assert_eq!(repo.storage().load_current_user(), Some("C".to_string()));
}

#[test]
fn test_corrupt_scores_value_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, r#"{"scores":"[{\"name\":","scoreSort":"lowest"}"#).unwrap();

    let mut repo = file_repository(&path);

    assert!(repo.records().is_empty());
    assert_eq!(repo.preference(), SortPreference::Lowest);

    // Appending after corruption starts a fresh list.
    repo.append("Alice", 2, 4).unwrap();
    assert_eq!(repo.records().len(), 1);
}

#[test]
fn test_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = LocalStorage::new(FileBackend::new(dir.path().join("store.json")));
    let records = vec![
        ScoreRecord::with_timestamp("Zoë", 0, 0, 1_700_000_000_000).unwrap(),
        ScoreRecord::with_timestamp("名前", 3, 3, 1_700_000_000_001).unwrap(),
    ];

    storage.save(&records).unwrap();

    assert_eq!(storage.load(), records);
}

#[test]
fn test_clear_all_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let mut repo = file_repository(&path);
    repo.append("Alice", 1, 2).unwrap();
    repo.set_preference(SortPreference::Oldest).unwrap();

    repo.clear_all().unwrap();

    let reopened = file_repository(&path);
    assert!(reopened.records().is_empty());
    assert_eq!(reopened.preference(), SortPreference::Oldest);
}
