use chrono::{DateTime, Local, NaiveDate, TimeZone};
use terminal_core::mockfs::MockFileSystem;
use terminal_core::session::{Completion, LineKind, Session};
use terminal_core::tables::HOME_DIR;
use terminal_platform::clock::Clock;
use terminal_platform::filesystem::{DirectoryEntry, FileSystem};

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(23, 5, 9)
            .unwrap();
        Local.from_local_datetime(&naive).unwrap()
    }
}

/// A filesystem with no directories at all
struct EmptyFs;

impl FileSystem for EmptyFs {
    fn list_dir(&self, _path: &str) -> Option<&[DirectoryEntry]> {
        None
    }
}

fn session() -> Session {
    Session::new(Box::new(MockFileSystem::new()), Box::new(FixedClock))
}

fn output_texts(session: &mut Session, line: &str) -> Vec<(LineKind, String)> {
    session
        .execute(line)
        .iter()
        .skip(1)
        .map(|l| (l.kind, l.text.clone()))
        .collect()
}

#[test]
fn test_cd_parent_from_home_reaches_root() {
    let mut s = session();
    let out = output_texts(&mut s, "cd ..");
    assert_eq!(s.current_directory(), "/");
    assert_eq!(out, vec![(LineKind::Success, "Changed to root directory".to_string())]);
}

#[test]
fn test_ls_on_empty_filesystem() {
    let mut s = Session::new(Box::new(EmptyFs), Box::new(FixedClock));
    let out = output_texts(&mut s, "ls");
    assert_eq!(out, vec![(LineKind::Output, "Directory is empty".to_string())]);
}

#[test]
fn test_ls_la_shows_more_than_ls() {
    let mut s = session();
    let plain = output_texts(&mut s, "ls")[0].1.split("  ").count();
    let all = output_texts(&mut s, "ls -la").len() - 1;
    assert!(all > plain);
    assert_eq!(all - plain, 1);
}

#[test]
fn test_cat_missing_file_is_one_error() {
    let mut s = session();
    let out = output_texts(&mut s, "cat missingfile");
    assert_eq!(
        out,
        vec![(LineKind::Error, "cat: missingfile: No such file or directory".to_string())]
    );
}

#[test]
fn test_pwd_tracks_last_successful_cd() {
    let mut s = session();
    let steps = [
        ("cd projects", Some("/home/yflong/projects")),
        ("cd nowhere", None),
        ("cd ffuf-force", Some("/home/yflong/projects/ffuf-force")),
        ("cd /nope", None),
        ("cd /home/yflong/documents", Some("/home/yflong/documents")),
        ("cd ..", Some(HOME_DIR)),
        ("cd README.md", None),
        ("cd downloads", Some("/home/yflong/downloads")),
        ("cd", Some(HOME_DIR)),
    ];
    let mut expected = HOME_DIR.to_string();
    for (line, target) in steps {
        if let Some(t) = target {
            expected = t.to_string();
        }
        s.execute(line);
        let pwd = output_texts(&mut s, "pwd");
        assert_eq!(pwd, vec![(LineKind::Output, expected.clone())], "after {}", line);
    }
}

#[test]
fn test_history_output_matches_history() {
    let mut s = session();
    for line in ["pwd", "ls -l", "echo hi"] {
        s.execute(line);
    }
    let out = output_texts(&mut s, "history");
    assert_eq!(out.len(), s.history().len());
    for (i, (kind, text)) in out.iter().enumerate() {
        assert_eq!(*kind, LineKind::Output);
        assert_eq!(*text, format!("{:>4} {}", i + 1, s.history()[i]));
    }
}

#[test]
fn test_history_evicts_oldest_after_limit() {
    let mut s = session();
    for i in 1..=101 {
        s.execute(&format!("echo {}", i));
    }
    assert_eq!(s.history().len(), 100);
    assert_eq!(s.history().first().map(String::as_str), Some("echo 2"));
}

#[test]
fn test_exit_stops_everything() {
    let mut s = session();
    s.execute("exit");
    assert!(!s.is_active());
    let len = s.scrollback().len();
    for line in ["help", "ls", "exit", "clear"] {
        assert!(s.execute(line).is_empty());
    }
    assert_eq!(s.scrollback().len(), len);
}

#[test]
fn test_tab_completion_flow() {
    let mut s = session();
    let mut pending = String::from("c");
    match s.complete(&mut pending) {
        Completion::Ambiguous(matches) => assert_eq!(matches, ["cd", "cat", "clear"]),
        other => panic!("expected ambiguous completion, got {:?}", other),
    }
    assert_eq!(pending, "c");
    assert_eq!(s.scrollback().last().unwrap().text, "cd  cat  clear");

    pending.push('l');
    assert_eq!(s.complete(&mut pending), Completion::Unique("clear".into()));
    s.execute(&pending);
    assert!(s.scrollback().is_empty());
}

#[test]
fn test_tree_header_follows_cwd_body_does_not() {
    let mut s = session();
    s.execute("cd downloads");
    let out = output_texts(&mut s, "tree");
    let text = &out[0].1;
    assert!(text.starts_with("/home/yflong/downloads\n"));
    assert!(text.contains("├── projects/"));
}

#[test]
fn test_time_based_commands() {
    let mut s = session();
    let top = output_texts(&mut s, "top");
    assert!(top[0].1.starts_with("top - 11:05:09 PM up 7 days"));
    let date = output_texts(&mut s, "date");
    assert!(date[0].1.starts_with("Wed Jan 15 2025 23:05:09 GMT"));
}
