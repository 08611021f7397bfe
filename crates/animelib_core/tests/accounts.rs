use animelib_core::{AccountRepository, RepoError, SqliteAccountRepository, Store};

#[test]
fn authenticate_succeeds_right_after_create_user() {
    let store = Store::open_in_memory().unwrap();
    let repo = SqliteAccountRepository::new(&store);

    repo.create_user("alice", "pw1").unwrap();

    assert!(repo.authenticate("alice", "pw1").unwrap());
    assert!(!repo.authenticate("alice", "wrong").unwrap());
}

#[test]
fn authenticate_unknown_user_is_false() {
    let store = Store::open_in_memory().unwrap();
    let repo = SqliteAccountRepository::new(&store);

    assert!(!repo.authenticate("nobody", "pw").unwrap());
}

#[test]
fn usernames_are_case_sensitive() {
    let store = Store::open_in_memory().unwrap();
    let repo = SqliteAccountRepository::new(&store);
    repo.create_user("alice", "pw1").unwrap();

    assert!(!repo.authenticate("Alice", "pw1").unwrap());
}

#[test]
fn password_is_stored_as_salted_hash_only() {
    let store = Store::open_in_memory().unwrap();
    let repo = SqliteAccountRepository::new(&store);
    repo.create_user("alice", "pw1").unwrap();
    repo.create_user("bob", "pw1").unwrap();

    let hashes = store
        .query(
            "SELECT password_hash FROM users ORDER BY id;",
            [],
            |row| row.get::<_, String>(0),
        )
        .unwrap();
    assert_eq!(hashes.len(), 2);
    assert!(hashes.iter().all(|hash| hash.starts_with("$argon2id$")));
    assert!(hashes.iter().all(|hash| !hash.contains("pw1")));
    assert_ne!(hashes[0], hashes[1]);
}

#[test]
fn duplicate_username_is_rejected() {
    let store = Store::open_in_memory().unwrap();
    let repo = SqliteAccountRepository::new(&store);
    repo.create_user("alice", "pw1").unwrap();

    let err = repo.create_user("alice", "pw2").unwrap_err();
    assert!(matches!(err, RepoError::DuplicateUsername(name) if name == "alice"));
    assert!(repo.authenticate("alice", "pw1").unwrap());
    assert!(!repo.authenticate("alice", "pw2").unwrap());
}

#[test]
fn empty_username_or_password_is_rejected() {
    let store = Store::open_in_memory().unwrap();
    let repo = SqliteAccountRepository::new(&store);

    assert!(matches!(
        repo.create_user("  ", "pw"),
        Err(RepoError::InvalidInput(_))
    ));
    assert!(matches!(
        repo.create_user("alice", ""),
        Err(RepoError::InvalidInput(_))
    ));
}

#[test]
fn create_user_returns_distinct_ids() {
    let store = Store::open_in_memory().unwrap();
    let repo = SqliteAccountRepository::new(&store);

    let first = repo.create_user("alice", "pw1").unwrap();
    let second = repo.create_user("bob", "pw2").unwrap();
    assert_ne!(first, second);
}
