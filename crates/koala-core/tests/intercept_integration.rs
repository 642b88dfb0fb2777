//! End-to-end interception flow against a real on-disk store.

use koala_core::block::intercept::bypass_url;
use koala_core::{BlockList, Decision, InterceptConfig, Interceptor, Store};

fn store_with_sites(patterns: &[&str]) -> (Store, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open_at(&dir.path().join("koala.db")).unwrap();
    store.ensure_defaults().unwrap();

    let mut list = BlockList::default();
    for p in patterns {
        list.add(p).unwrap();
    }
    store.set_blocked_sites(list.sites()).unwrap();
    (store, dir)
}

#[test]
fn adding_site_then_navigating_blocks_and_redirects() {
    // Mixed-case pattern with a path still catches a bare navigation
    // to the same host.
    let (store, _dir) = store_with_sites(&["https://www.Facebook.com/home"]);
    let interceptor = Interceptor::new(&store, "koala://study");

    let decision = interceptor
        .check_navigation("http://facebook.com/feed")
        .unwrap();
    match decision {
        Decision::Redirect(target) => {
            assert_eq!(
                target,
                "koala://study?original=http%3A%2F%2Ffacebook.com%2Ffeed"
            );
        }
        Decision::Allow => panic!("expected a redirect"),
    }

    let stats = store.block_stats().unwrap();
    assert_eq!(stats.total_blocked, 1);
    assert_eq!(stats.today_blocked, 1);
    assert!(stats.last_blocked.is_some());
}

#[test]
fn repeated_blocks_same_day_accumulate() {
    let (store, _dir) = store_with_sites(&["reddit.com"]);
    let interceptor = Interceptor::new(&store, "koala://study");

    for _ in 0..3 {
        let decision = interceptor
            .check_navigation("https://www.reddit.com/r/all")
            .unwrap();
        assert!(decision.is_blocked());
    }

    let stats = store.block_stats().unwrap();
    assert_eq!(stats.total_blocked, 3);
    assert_eq!(stats.today_blocked, 3);
}

#[test]
fn unrelated_navigation_is_allowed_and_untouched() {
    let (store, _dir) = store_with_sites(&["facebook.com"]);
    let interceptor = Interceptor::new(&store, "koala://study");

    let decision = interceptor.check_navigation("https://docs.rs").unwrap();
    assert_eq!(decision, Decision::Allow);
    assert_eq!(store.block_stats().unwrap().total_blocked, 0);
}

#[test]
fn disabled_config_allows_everything() {
    let (store, _dir) = store_with_sites(&["facebook.com"]);
    store
        .set_intercept_config(&InterceptConfig { enabled: false })
        .unwrap();
    let interceptor = Interceptor::new(&store, "koala://study");

    let decision = interceptor
        .check_navigation("https://facebook.com")
        .unwrap();
    assert_eq!(decision, Decision::Allow);
}

#[test]
fn empty_block_list_never_blocks() {
    let (store, _dir) = store_with_sites(&[]);
    let interceptor = Interceptor::new(&store, "koala://study");

    let decision = interceptor
        .check_navigation("https://facebook.com")
        .unwrap();
    assert_eq!(decision, Decision::Allow);
}

#[test]
fn bypass_marker_breaks_the_redirect_loop() {
    let (store, _dir) = store_with_sites(&["facebook.com"]);
    let interceptor = Interceptor::new(&store, "koala://study");

    let blocked = interceptor
        .check_navigation("https://facebook.com/feed")
        .unwrap();
    assert!(blocked.is_blocked());

    let proceed = bypass_url("https://facebook.com/feed").unwrap();
    let decision = interceptor.check_navigation(&proceed).unwrap();
    assert_eq!(decision, Decision::Allow);

    // Only the first navigation counted.
    assert_eq!(store.block_stats().unwrap().total_blocked, 1);
}
