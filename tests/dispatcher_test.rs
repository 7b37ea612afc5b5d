#![cfg(unix)]

mod common;

use common::{fake_terminal, missing_program};
use scriptlauncher::LauncherError;
use scriptlauncher::scripts::{TerminalCandidate, TerminalDispatcher};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[test]
fn falls_through_missing_terminals_to_the_installed_one() {
    let bin = TempDir::new().unwrap();
    let real = fake_terminal(bin.path(), "realshell");
    let candidates = vec![
        TerminalCandidate::new(missing_program(bin.path(), "missing1"), "-e"),
        TerminalCandidate::new(missing_program(bin.path(), "missing2"), "-e"),
        TerminalCandidate::new(real.display().to_string(), "-e"),
    ];

    let dispatcher = TerminalDispatcher::with_candidates(candidates).shell("/bin/sh");
    let outcome = dispatcher.launch(bin.path().join("hello.sh")).unwrap();

    assert_eq!(outcome.terminal.program, real.display().to_string());
    assert_eq!(outcome.skipped.len(), 2);
    assert!(outcome.skipped[0].program.ends_with("missing1"));
    assert!(outcome.skipped[1].program.ends_with("missing2"));
}

#[test]
fn stops_at_first_success() {
    let bin = TempDir::new().unwrap();
    let first = fake_terminal(bin.path(), "first");
    let second = fake_terminal(bin.path(), "second");
    let dispatcher = TerminalDispatcher::with_candidates(vec![
        TerminalCandidate::new(first.display().to_string(), "-e"),
        TerminalCandidate::new(second.display().to_string(), "-e"),
    ]);

    let outcome = dispatcher.launch("/tmp/whatever.sh").unwrap();
    assert_eq!(outcome.terminal.program, first.display().to_string());
    assert!(outcome.skipped.is_empty());
}

#[test]
fn no_installed_terminal_fails_after_trying_each_once() {
    let bin = TempDir::new().unwrap();
    let names = ["missing1", "missing2", "missing3"];
    let candidates = names
        .iter()
        .map(|n| TerminalCandidate::new(missing_program(bin.path(), n), "-e"))
        .collect();

    let dispatcher = TerminalDispatcher::with_candidates(candidates);
    match dispatcher.launch("/tmp/x.sh") {
        Err(LauncherError::NoTerminalAvailable { attempts }) => {
            assert_eq!(attempts.len(), names.len());
            for (attempt, name) in attempts.iter().zip(names) {
                assert!(attempt.program.ends_with(name));
            }
        }
        other => panic!("expected NoTerminalAvailable, got {:?}", other),
    }
}

/// Process state letter from /proc, or None once the pid is gone
#[cfg(target_os = "linux")]
fn proc_state(pid: u32) -> Option<char> {
    let status = std::fs::read_to_string(format!("/proc/{}/status", pid)).ok()?;
    status
        .lines()
        .find_map(|line| line.strip_prefix("State:"))
        .and_then(|state| state.trim().chars().next())
}

#[cfg(target_os = "linux")]
fn wait_until_exited(pid: u32) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while matches!(proc_state(pid), Some(state) if state != 'Z') {
        assert!(Instant::now() < deadline, "child {} did not exit", pid);
        thread::sleep(Duration::from_millis(20));
    }
}

#[cfg(target_os = "linux")]
#[test]
fn exited_terminals_are_reaped_on_next_launch() {
    let bin = TempDir::new().unwrap();
    let real = fake_terminal(bin.path(), "quick-exit");
    let dispatcher = TerminalDispatcher::with_candidates(vec![TerminalCandidate::new(
        real.display().to_string(),
        "-e",
    )]);

    let first = dispatcher.launch("/tmp/a.sh").unwrap().pid;
    wait_until_exited(first);

    dispatcher.launch("/tmp/b.sh").unwrap();
    assert_ne!(proc_state(first), Some('Z'), "first child left as a zombie");
}

#[cfg(target_os = "linux")]
#[test]
fn no_zombies_left_after_many_launches() {
    let bin = TempDir::new().unwrap();
    let real = fake_terminal(bin.path(), "quick-exit");
    let dispatcher = TerminalDispatcher::with_candidates(vec![TerminalCandidate::new(
        real.display().to_string(),
        "-e",
    )]);

    let pids: Vec<u32> = (0..5)
        .map(|i| dispatcher.launch(format!("/tmp/{}.sh", i)).unwrap().pid)
        .collect();
    for pid in &pids {
        wait_until_exited(*pid);
    }

    assert_eq!(dispatcher.spawner().reap_finished(), 0);
    for pid in pids {
        assert_ne!(proc_state(pid), Some('Z'), "pid {} left as a zombie", pid);
    }
}
