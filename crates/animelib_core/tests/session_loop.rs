use animelib_core::{
    AccountRepository, AnimeRecord, CatalogRepository, Session, SessionState,
    SqliteAccountRepository, SqliteCatalogRepository, Store,
};
use std::io::Cursor;

/// Runs a full session over `script` and returns everything it printed.
fn run_script(store: &Store, script: &str) -> String {
    let mut output = Vec::new();
    let mut session = Session::new(
        SqliteAccountRepository::new(store),
        SqliteCatalogRepository::new(store),
        Cursor::new(script.as_bytes()),
        &mut output,
    );
    session.run().unwrap();
    drop(session);
    String::from_utf8(output).unwrap()
}

fn store_with_user() -> Store {
    let store = Store::open_in_memory().unwrap();
    SqliteAccountRepository::new(&store)
        .create_user("alice", "pw1")
        .unwrap();
    store
}

#[test]
fn exit_prints_banners() {
    let store = Store::open_in_memory().unwrap();
    let out = run_script(&store, "3\n");

    assert!(out.starts_with("Welcome to the Anime Library!"));
    assert!(out.contains("===== Anime Library Menu ====="));
    assert!(out.trim_end().ends_with("Exiting the Anime Library."));
}

#[test]
fn sign_up_does_not_log_in() {
    let store = Store::open_in_memory().unwrap();
    let out = run_script(&store, "1\nalice\npw1\n3\n");

    assert!(out.contains("User created successfully!"));
    assert!(!out.contains("1. Add Anime"));
    assert!(SqliteAccountRepository::new(&store)
        .authenticate("alice", "pw1")
        .unwrap());
}

#[test]
fn duplicate_sign_up_reports_taken_username() {
    let store = store_with_user();
    let out = run_script(&store, "1\nalice\nother\n3\n");

    assert!(out.contains("Username 'alice' is already taken."));
}

#[test]
fn login_with_wrong_password_stays_unauthenticated() {
    let store = store_with_user();
    let out = run_script(&store, "2\nalice\nwrong\n3\n");

    assert!(out.contains("Invalid username or password. Please try again."));
    assert!(!out.contains("1. Add Anime"));
}

#[test]
fn login_add_view_and_logout() {
    let store = store_with_user();
    let out = run_script(
        &store,
        "2\nalice\npw1\n1\nCowboy Bebop\nSci-Fi\n26\n2\n6\n3\n",
    );

    assert!(out.contains("Welcome, alice!"));
    assert!(out.contains("Cowboy Bebop has been added to the library!"));
    assert!(out.contains("Anime Library:\n[1] Cowboy Bebop - Sci-Fi - 26 episodes\n"));
    let logout_at = out.find("Logging out.").unwrap();
    assert!(out[logout_at..].contains("1. Sign Up"));
    assert!(!out[logout_at..].contains("Enter the keyword to search: "));
}

#[test]
fn logout_returns_to_unauthenticated() {
    let store = store_with_user();
    let mut output = Vec::new();
    let mut session = Session::new(
        SqliteAccountRepository::new(&store),
        SqliteCatalogRepository::new(&store),
        Cursor::new("2\nalice\npw1\n6\n".as_bytes()),
        &mut output,
    );

    session.run().unwrap();
    assert_eq!(session.state(), &SessionState::Unauthenticated);
}

#[test]
fn view_on_empty_library_prints_empty_message() {
    let store = store_with_user();
    let out = run_script(&store, "2\nalice\npw1\n2\n6\n3\n");

    assert!(out.contains("Anime library is empty."));
    assert!(!out.contains("Anime Library:"));
}

#[test]
fn search_reports_hits_and_misses() {
    let store = store_with_user();
    SqliteCatalogRepository::new(&store)
        .add(&AnimeRecord::new("Cowboy Bebop", "Sci-Fi", 26))
        .unwrap();

    let out = run_script(&store, "2\nalice\npw1\n3\nBebop\n3\nbebop\n6\n3\n");

    assert!(out.contains("Search Results:\n[1] Cowboy Bebop - Sci-Fi - 26 episodes\n"));
    assert!(out.contains("No anime found with the given keyword."));
}

#[test]
fn update_and_delete_report_missing_ids() {
    let store = store_with_user();
    let out = run_script(&store, "2\nalice\npw1\n4\n9\nX\nY\n5\n5\n9\n6\n3\n");

    assert_eq!(out.matches("No anime found with ID 9.").count(), 2);
}

#[test]
fn update_and_delete_existing_entries() {
    let store = store_with_user();
    let catalog = SqliteCatalogRepository::new(&store);
    let first = catalog.add(&AnimeRecord::new("Trigun", "Western", 26)).unwrap();
    let second = catalog.add(&AnimeRecord::new("Hellsing", "Horror", 13)).unwrap();

    let script = format!("2\nalice\npw1\n4\n{first}\nX\nY\n5\n5\n{second}\n6\n3\n");
    let out = run_script(&store, &script);

    assert!(out.contains("Anime information updated successfully!"));
    assert!(out.contains("Anime deleted successfully!"));
    let entries = catalog.list_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record, AnimeRecord::new("X", "Y", 5));
}

#[test]
fn non_numeric_episode_count_is_reprompted() {
    let store = store_with_user();
    let out = run_script(&store, "2\nalice\npw1\n1\nMonster\nThriller\nmany\n-3\n74\n6\n3\n");

    assert_eq!(
        out.matches("Please enter a valid non-negative number.").count(),
        2
    );
    let entries = SqliteCatalogRepository::new(&store).list_all().unwrap();
    assert_eq!(entries[0].record.episode_count, 74);
}

#[test]
fn blank_title_is_reported_and_not_stored() {
    let store = store_with_user();
    let out = run_script(&store, "2\nalice\npw1\n1\n\nDrama\n3\n6\n3\n");

    assert!(out.contains("Error: anime title must not be empty"));
    assert_eq!(SqliteCatalogRepository::new(&store).count().unwrap(), 0);
}

#[test]
fn invalid_choices_are_reported_in_both_menus() {
    let store = store_with_user();
    let out = run_script(&store, "9\n2\nalice\npw1\nx\n6\n3\n");

    assert_eq!(out.matches("Invalid choice. Please try again.").count(), 2);
}

#[test]
fn end_of_input_ends_session_in_any_state() {
    let store = store_with_user();

    let unauthenticated = run_script(&store, "");
    assert!(unauthenticated.contains("Exiting the Anime Library."));

    let mid_prompt = run_script(&store, "2\nalice\npw1\n1\nHalf entered");
    assert!(mid_prompt.contains("Exiting the Anime Library."));
    assert_eq!(SqliteCatalogRepository::new(&store).count().unwrap(), 0);
}

#[test]
fn session_state_tracks_login() {
    let store = store_with_user();
    let mut output = Vec::new();
    let mut session = Session::new(
        SqliteAccountRepository::new(&store),
        SqliteCatalogRepository::new(&store),
        Cursor::new("2\nalice\npw1\n".as_bytes()),
        &mut output,
    );
    assert_eq!(session.state(), &SessionState::Unauthenticated);

    session.run().unwrap();
    assert_eq!(
        session.state(),
        &SessionState::Authenticated {
            username: "alice".to_string()
        }
    );
}

#[test]
fn windows_line_endings_are_accepted() {
    let store = store_with_user();
    let out = run_script(&store, "2\r\nalice\r\npw1\r\n6\r\n3\r\n");

    assert!(out.contains("Welcome, alice!"));
}
