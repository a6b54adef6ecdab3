use ecowaste_portal::{
    error::StorageError,
    storage::{FileLocalStorage, LocalStorage, MockLocalStorage},
};

#[cfg(test)]
mod mock_tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_set_get_remove() {
        let mock = MockLocalStorage::new();
        assert_eq!(mock.get_item("k").await.unwrap(), None);

        mock.set_item("k", "v1").await.unwrap();
        mock.set_item("k", "v2").await.unwrap();
        assert_eq!(mock.get_item("k").await.unwrap().as_deref(), Some("v2"));

        mock.remove_item("k").await.unwrap();
        assert_eq!(mock.get_item("k").await.unwrap(), None);
        // Removing again is fine.
        mock.remove_item("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_mock_clones_share_items() {
        let mock = MockLocalStorage::new();
        let other = mock.clone();
        mock.set_item("shared", "yes").await.unwrap();
        assert_eq!(other.get_item("shared").await.unwrap().as_deref(), Some("yes"));
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockLocalStorage::new_failing();
        let err = mock.set_item("k", "v").await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert!(mock.get_item("k").await.is_err());
        assert!(mock.remove_item("k").await.is_err());
        assert!(mock.snapshot().is_empty());
    }
}

#[cfg(test)]
mod file_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileLocalStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get_item("anything").await.unwrap(), None);
        storage.remove_item("anything").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local_storage.json");

        let first = FileLocalStorage::new(&path);
        first.set_item("ecowaste_user", "{\"a\":1}").await.unwrap();
        first.set_item("other", "x").await.unwrap();
        assert!(path.exists());

        let second = FileLocalStorage::new(&path);
        assert_eq!(
            second.get_item("ecowaste_user").await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        second.remove_item("ecowaste_user").await.unwrap();
        assert_eq!(first.get_item("ecowaste_user").await.unwrap(), None);
        assert_eq!(first.get_item("other").await.unwrap().as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported_then_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let storage = FileLocalStorage::new(&path);
        assert!(matches!(
            storage.get_item("k").await,
            Err(StorageError::Serialization(_))
        ));

        storage.set_item("k", "v").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_remove_from_corrupt_file_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let storage = FileLocalStorage::new(&path);
        storage.remove_item("ecowaste_user").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "garbage");
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        let storage = FileLocalStorage::new(&path);
        storage.set_item("k", "v").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("local_storage.json")]);
        assert_eq!(storage.path(), path.as_path());
    }
}
