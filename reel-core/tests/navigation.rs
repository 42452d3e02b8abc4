use std::fs;
use std::time::{Duration, Instant};

use reel_core::{
    CacheConfig, Direction, EnterOutcome, IndexConfig, LoadMessage, MediaTree, NodeKind,
};
use tempfile::TempDir;

fn library() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.mp4"), "").unwrap();
    fs::write(temp.path().join("a-poster.jpg"), "").unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    fs::write(temp.path().join("sub/b.mkv"), "").unwrap();
    temp
}

fn names(tree: &MediaTree) -> Vec<String> {
    tree.visible_nodes().into_iter().map(|n| n.name).collect()
}

#[test]
fn browse_enter_and_return() {
    let temp = library();
    let (tree, task) = MediaTree::load(temp.path(), IndexConfig::default()).unwrap();
    let stats = task.wait().unwrap();

    assert!(!tree.is_loading());
    assert_eq!(stats.files, 2);
    assert_eq!(stats.dirs, 1);

    let visible = tree.visible_nodes();
    assert_eq!(names(&tree), vec!["sub", "a.mp4"]);
    assert_eq!(visible[0].kind, NodeKind::Directory);
    assert_eq!(
        visible[1].poster.as_deref(),
        Some(tree.root_path().join("a-poster.jpg").as_path())
    );
    assert_eq!(tree.selected_index(), Some(0));

    let outcome = tree.enter();
    assert_eq!(outcome, EnterOutcome::Entered(tree.root_path().join("sub")));
    assert_eq!(names(&tree), vec!["b.mkv"]);
    assert_eq!(tree.current_directory_path(), tree.root_path().join("sub"));

    assert!(tree.go_up());
    assert_eq!(tree.current_directory_path(), tree.root_path());
    assert_eq!(tree.selected_index(), Some(0));
    assert_eq!(names(&tree), vec!["sub", "a.mp4"]);

    tree.shutdown();
}

#[test]
fn activating_a_file_keeps_the_cursor() {
    let temp = library();
    let (tree, task) = MediaTree::load(temp.path(), IndexConfig::default()).unwrap();
    task.wait().unwrap();

    tree.navigate(Direction::Right, 4);
    let before = tree.stats();
    let outcome = tree.enter();

    assert_eq!(outcome, EnterOutcome::Activated(tree.root_path().join("a.mp4")));
    assert_eq!(tree.current_directory_path(), tree.root_path());
    assert_eq!(tree.selected_index(), Some(1));
    assert_eq!(tree.stats(), before);
}

#[test]
fn expired_listing_is_read_again() {
    let temp = library();
    let config = IndexConfig::default().with_cache(CacheConfig {
        ttl: Duration::from_millis(30),
        sweep_interval: Duration::from_millis(10),
    });
    let (tree, task) = MediaTree::load(temp.path(), config).unwrap();
    task.wait().unwrap();

    fs::write(temp.path().join("sub/c.mp4"), "").unwrap();
    std::thread::sleep(Duration::from_millis(80));

    tree.enter();
    assert_eq!(names(&tree), vec!["b.mkv", "c.mp4"]);
}

#[test]
fn progress_stream_ends_with_completion() {
    let temp = library();
    let (_tree, task) = MediaTree::load(temp.path(), IndexConfig::default()).unwrap();

    let last = task.receiver().iter().last();
    match last {
        Some(LoadMessage::Completed(stats)) => {
            assert_eq!(stats.files, 2);
            assert_eq!(stats.errors, 0);
        }
        other => panic!("expected completion, got {other:?}"),
    }
}

#[test]
fn browsing_during_warm_up_sees_whole_listings() {
    let temp = TempDir::new().unwrap();
    for show in 0..300 {
        let dir = temp.path().join(format!("show{show:03}"));
        fs::create_dir(&dir).unwrap();
        for ep in 1..=3 {
            fs::write(dir.join(format!("e{ep}.mkv")), "").unwrap();
        }
    }

    let (tree, task) = MediaTree::load(temp.path(), IndexConfig::default()).unwrap();
    let deadline = Instant::now() + Duration::from_secs(30);
    let mut visits = 0usize;

    while tree.is_loading() {
        assert!(Instant::now() < deadline, "warm-up did not finish");

        tree.refresh_visible();
        let shows = tree.visible_nodes().len();
        if shows == 0 || !tree.select(visits % shows) {
            std::thread::yield_now();
            continue;
        }

        match tree.enter() {
            EnterOutcome::Entered(_) => {
                assert_eq!(names(&tree), vec!["e1.mkv", "e2.mkv", "e3.mkv"]);
                assert!(tree.go_up());
                assert_eq!(tree.current_directory_path(), tree.root_path());
            }
            other => panic!("expected a directory, got {other:?}"),
        }
        visits += 1;
    }

    let stats = task.wait().unwrap();
    assert_eq!(stats.dirs, 300);
    // A show entered before the warm-up reached it was read by the browser
    assert!(stats.files >= 900);
    assert_eq!(tree.visible_nodes().len(), 300);
}
