use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::bounded;
use spin_group::ui::ansi::strip_codes;
use spin_group::{GroupOptions, RecordingTerminal, SpinGroup};

fn fast_options() -> GroupOptions {
    GroupOptions::default().with_period(Duration::from_millis(5))
}

fn group(options: GroupOptions) -> (SpinGroup, RecordingTerminal) {
    let terminal = RecordingTerminal::new(60);
    let group = SpinGroup::with_terminal(options, Arc::new(terminal.clone()));
    (group, terminal)
}

#[test]
fn empty_group_finishes_immediately() {
    let (group, terminal) = group(fast_options());
    assert!(group.wait());
    assert!(terminal.output().is_empty());
}

#[test]
fn single_successful_task_prints_no_report() {
    let (group, terminal) = group(fast_options());
    group.add("sleepy", |_| thread::sleep(Duration::from_millis(30)));
    assert!(group.wait());
    let output = strip_codes(&terminal.output());
    assert!(output.contains("sleepy"));
    assert!(output.contains('✓'));
    assert!(!output.contains("Task Failed"));
}

#[test]
fn failing_task_is_debriefed_with_placeholders() {
    let (group, terminal) = group(fast_options());
    group.add("good", |_| ());
    group.add("bad", |_| Err::<(), _>(io::Error::new(io::ErrorKind::Other, "boom")));
    assert!(!group.wait());

    let output = strip_codes(&terminal.output());
    assert!(output.contains("Task Failed: bad"));
    assert!(!output.contains("Task Failed: good"));
    assert!(output.contains("Error: boom"));
    assert!(output.contains("STDOUT"));
    assert!(output.contains("STDERR"));
    assert_eq!(output.matches("(empty)").count(), 2);
}

#[test]
fn debrief_prints_captured_output_verbatim() {
    let (group, terminal) = group(fast_options());
    group.add("noisy", |task| {
        writeln!(task.stdout(), "compiling crate")?;
        writeln!(task.stderr(), "warning: unused")?;
        Ok::<_, io::Error>(false)
    });
    assert!(!group.wait());

    let output = strip_codes(&terminal.output());
    assert!(output.contains("┃ compiling crate"));
    assert!(output.contains("┃ warning: unused"));
    assert!(!output.contains("(empty)"));
}

#[test]
fn panicking_task_is_reported() {
    let (group, terminal) = group(fast_options());
    group.add("explodes", |_| -> bool { panic!("kaboom") });
    assert!(!group.wait());
    assert!(strip_codes(&terminal.output()).contains("panic: kaboom"));
}

#[test]
fn without_auto_debrief_only_the_result_is_returned() {
    let (group, terminal) = group(fast_options().with_auto_debrief(false));
    group.add("bad", |_| false);
    assert!(!group.wait());
    assert!(!strip_codes(&terminal.output()).contains("Task Failed"));
    assert!(!group.debrief());
    assert!(strip_codes(&terminal.output()).contains("Task Failed: bad"));
}

#[test]
fn tasks_are_drawn_in_insertion_order() {
    let (group, terminal) = group(fast_options());
    for i in 0..5 {
        group.add(format!("task-{i}"), move |_| {
            thread::sleep(Duration::from_millis(10 * (5 - i)));
        });
    }
    assert!(group.wait());
    assert_eq!(group.consumed_lines(), 5);
    assert_eq!(
        group.titles(),
        (0..5).map(|i| format!("task-{i}")).collect::<Vec<_>>()
    );

    let first_frame = strip_codes(&terminal.writes()[0]);
    let positions: Vec<usize> = (0..5)
        .map(|i| first_frame.find(&format!("task-{i}")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn drawn_lines_are_updated_in_place() {
    let (group, terminal) = group(fast_options());
    let (release, gate) = bounded::<()>(0);
    group.add("first", move |_| {
        let _ = gate.recv();
    });
    group.add("second", |_| ());

    thread::scope(|scope| {
        scope.spawn(|| {
            thread::sleep(Duration::from_millis(40));
            release.send(()).unwrap();
        });
        assert!(group.wait());
    });

    let writes = terminal.writes();
    assert!(writes.len() > 1);
    let later = writes[1..].concat();
    assert!(later.contains("\x1b[2A\r"));
    assert!(later.contains("\r\x1b[2B"));
    assert!(later.contains("\x1b[1A\r"));
    assert_eq!(group.consumed_lines(), 2);
}

#[test]
fn retitled_task_shows_new_title() {
    let (group, terminal) = group(fast_options());
    let (release, gate) = bounded::<()>(0);
    group.add("A", move |task| {
        let _ = gate.recv();
        task.update_title("B");
        thread::sleep(Duration::from_millis(20));
    });

    thread::scope(|scope| {
        scope.spawn(|| {
            thread::sleep(Duration::from_millis(20));
            release.send(()).unwrap();
        });
        assert!(group.wait());
    });

    let writes: Vec<String> = terminal.writes().iter().map(|w| strip_codes(w)).collect();
    assert!(writes[0].contains(" A"));
    assert!(writes.iter().any(|w| w.contains(" B")));
    assert_eq!(group.titles(), vec!["B".to_string()]);
}

#[test]
fn block_form_runs_and_waits() {
    let terminal = RecordingTerminal::new(40);
    let ok = SpinGroup::run(fast_options(), Arc::new(terminal.clone()), |group| {
        group.add("one", |_| true);
        group.add("two", |_| ());
    });
    assert!(ok);
    assert!(strip_codes(&terminal.output()).contains("two"));
}

fn wait_for_writes(terminal: &RecordingTerminal, count: usize) {
    while terminal.writes().len() < count {
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn in_place_lines_repaint_title_only_when_the_spinner_wraps() {
    let terminal = RecordingTerminal::new(60);
    let group = SpinGroup::with_terminal(
        GroupOptions::default().with_period(Duration::from_millis(10)),
        Arc::new(terminal.clone()),
    );
    let (release, gate) = bounded::<()>(0);
    group.add("a fairly long title", move |_| {
        let _ = gate.recv();
    });

    thread::scope(|scope| {
        scope.spawn(|| {
            wait_for_writes(&terminal, 5);
            terminal.set_width(15);
            wait_for_writes(&terminal, 12);
            release.send(()).unwrap();
        });
        assert!(group.wait());
    });

    let writes: Vec<String> = terminal.writes().iter().map(|w| strip_codes(w)).collect();
    assert!(writes.len() > 11);
    assert!(writes[0].contains("a fairly long title"));
    for (frame, write) in writes.iter().enumerate().take(10).skip(1) {
        assert!(!write.contains("a fairly"), "frame {frame} repainted the title: {write:?}");
    }
    assert!(writes[10].contains("a fairly lon…"));
    assert!(!writes[10].contains("a fairly long"));
}
