use std::sync::Arc;

use aurora_client::{FsPrefsStore, Locale, Prefs, PrefsStore, DEFAULT_LOCALE};
use serial_test::serial;

#[tokio::test]
async fn fs_store_round_trips_the_locale() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsPrefsStore::at(dir.path().join("prefs.json"));

    assert_eq!(store.load_locale().await.unwrap(), None);
    store.save_locale(Locale::EnUs).await.unwrap();
    assert_eq!(store.load_locale().await.unwrap(), Some(Locale::EnUs));

    // a second store over the same path sees the persisted value
    let reopened = FsPrefsStore::at(dir.path().join("prefs.json"));
    assert_eq!(reopened.load_locale().await.unwrap(), Some(Locale::EnUs));
}

#[tokio::test]
async fn corrupt_snapshot_falls_back_to_the_default_locale() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, b"{definitely not json").unwrap();

    let store = FsPrefsStore::at(&path);
    assert!(store.load_locale().await.is_err());

    // Prefs::load degrades instead of propagating
    let prefs = Prefs::load(Arc::new(FsPrefsStore::at(&path))).await;
    assert_eq!(prefs.locale(), DEFAULT_LOCALE);
}

#[tokio::test]
#[serial]
async fn default_path_honours_the_data_dir_override() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("AURORA_DATA_DIR", dir.path());

    let store = FsPrefsStore::new();
    store.save_locale(Locale::EnUs).await.unwrap();
    assert!(dir.path().join("prefs.json").exists());

    std::env::remove_var("AURORA_DATA_DIR");
}
