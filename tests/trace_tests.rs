use pinchboard::config::Config;
use pinchboard::error::PinchError;
use pinchboard::geometry::{compute_layout, Viewport};
use pinchboard::keys::Key;
use pinchboard::landmarks::{Hand, Landmark, INDEX_TIP, THUMB_TIP};
use pinchboard::session::Session;
use pinchboard::trace::{load_trace, read_trace, replay, save_trace, write_trace, Trace, TraceFrame};
use std::io::Cursor;
use std::time::Duration;

fn sample_trace() -> Trace {
    Trace {
        frames: vec![
            TraceFrame {
                at: Duration::from_millis(0),
                hands: vec![Hand::new(vec![
                    Landmark::new(THUMB_TIP, 100, 200),
                    Landmark::new(INDEX_TIP, 120, 180),
                ])],
            },
            TraceFrame {
                at: Duration::from_millis(33),
                hands: Vec::new(),
            },
            TraceFrame {
                at: Duration::from_millis(66),
                hands: vec![
                    Hand::new(vec![Landmark::new(INDEX_TIP, 1, 2)]),
                    Hand::new(vec![Landmark::new(INDEX_TIP, 3, 4)]),
                ],
            },
        ],
    }
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.csv");

    let trace = sample_trace();
    save_trace(&trace, &path).unwrap();
    let loaded = load_trace(&path).unwrap();

    assert_eq!(loaded, trace);
    assert_eq!(loaded.duration(), Duration::from_millis(66));
}

#[test]
fn test_written_csv_shape() {
    let mut out = Vec::new();
    write_trace(&sample_trace(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "t_ms,hand,landmark,x,y");
    assert_eq!(lines[1], "0,0,4,100,200");
    assert_eq!(lines[3], "33,,,,");
    assert_eq!(lines.len(), 1 + 2 + 1 + 2);
}

#[test]
fn test_bad_rows_are_skipped() {
    let csv = "\
t_ms,hand,landmark,x,y
0,0,8,10,20
0,0,four,10,20
oops,0,8,1,1
40, 0 , 8 , 30 , 40
40,0,4
";
    let trace = read_trace(Cursor::new(csv)).unwrap();
    assert_eq!(trace.len(), 2);
    assert_eq!(trace.frames[0].hands[0].landmarks, vec![Landmark::new(8, 10, 20)]);
    assert_eq!(trace.frames[1].at, Duration::from_millis(40));
    assert_eq!(trace.frames[1].hands[0].get(INDEX_TIP), Some((30, 40)));
}

#[test]
fn test_timestamp_with_only_bad_rows_is_dropped() {
    let csv = "\
t_ms,hand,landmark,x,y
0,0,8,10,20
20,0,eight,10,20
20,x,8,10,20
40,,,,
60,0,8,11,21
";
    let trace = read_trace(Cursor::new(csv)).unwrap();
    let times: Vec<u64> = trace.frames.iter().map(|f| f.at.as_millis() as u64).collect();
    assert_eq!(times, vec![0, 40, 60]);
    assert!(trace.frames[1].hands.is_empty());
}

#[test]
fn test_rows_are_grouped_out_of_order() {
    let csv = "\
t_ms,hand,landmark,x,y
66,1,8,5,5
0,0,8,1,1
66,0,8,2,2
";
    let trace = read_trace(Cursor::new(csv)).unwrap();
    assert_eq!(trace.len(), 2);
    assert_eq!(trace.frames[0].at, Duration::ZERO);
    let second = &trace.frames[1];
    assert_eq!(second.hands.len(), 2);
    assert_eq!(second.hands[0].get(INDEX_TIP), Some((2, 2)));
    assert_eq!(second.hands[1].get(INDEX_TIP), Some((5, 5)));
}

#[test]
fn test_missing_file_is_trace_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_trace(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, PinchError::Trace(_)));
}

#[test]
fn test_replay_types_from_recorded_rows() {
    let config = Config::default();
    let layout = compute_layout(Viewport::new(1280, 720), &config.layout).unwrap();
    let (x, y) = layout.rect_for(Key::Letter('G')).unwrap().center();

    let mut csv = String::from("t_ms,hand,landmark,x,y\n");
    for t in (0..=800).step_by(100) {
        csv += &format!("{},0,4,{},{}\n{},0,8,{},{}\n", t, x - 40, y + 110, t, x, y);
    }
    csv += &format!("900,0,4,{},{}\n900,0,8,{},{}\n", x + 5, y + 5, x, y);
    csv += "1000,,,,\n";

    let trace = read_trace(Cursor::new(csv)).unwrap();
    let mut session = Session::new(config);
    let commits = replay(&trace, &mut session, Viewport::new(1280, 720));

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].at, Duration::from_millis(900));
    assert_eq!(session.text(), "G");
    assert_eq!(session.stats().processed, trace.len() as u64);
}

#[test]
fn test_replay_into_invalid_viewport_fails_every_frame() {
    let trace = sample_trace();
    let mut session = Session::new(Config::default());
    let commits = replay(&trace, &mut session, Viewport::new(-1, 720));

    assert!(commits.is_empty());
    assert_eq!(session.stats().failed, trace.len() as u64);
    assert_eq!(session.stats().processed, 0);
}
