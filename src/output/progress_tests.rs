use std::thread;

use super::*;

#[test]
fn hidden_when_quiet() {
    let progress = PhaseProgress::new("Reading", 100, true);
    progress.inc();
    progress.inc();
    assert_eq!(progress.position(), 2);
    progress.finish();
}

#[test]
fn visible_bar_counts() {
    let progress = PhaseProgress::new_with_visibility("Analyzing", 3, false, true);
    for _ in 0..3 {
        progress.inc();
    }
    assert_eq!(progress.position(), 3);
    progress.finish();
}

#[test]
fn clones_share_counter_across_threads() {
    let progress = PhaseProgress::new("Reading", 40, true);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let p = progress.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    p.inc();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(progress.position(), 40);
}
