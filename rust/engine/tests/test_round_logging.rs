use std::fs;
use std::path::PathBuf;

use ramino_engine::logger::{format_round_id, RoundLogger, RoundRecord, ScoreLine};
use ramino_engine::state::{Seat, TurnAction};

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn sample_record(round_id: &str) -> RoundRecord {
    RoundRecord {
        round_id: round_id.to_string(),
        seed: Some(42),
        round_number: 1,
        actions: vec![
            TurnAction::DrawDeck { seat: Seat::Player },
            TurnAction::GoOut { seat: Seat::Player },
        ],
        scores: ScoreLine {
            player: 2,
            opponent: -1,
        },
        winner: Some(Seat::Player),
        ts: None,
        meta: None,
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let path = tmp_path("roundlog");
    let mut logger = RoundLogger::create(&path).expect("create logger");
    logger.write(&sample_record("20260101-000001")).expect("write");
    logger.write(&sample_record("20260101-000002")).expect("write");

    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 2);
    let _ = fs::remove_file(&path);
}

#[test]
fn sequential_ids_increment() {
    let mut logger = RoundLogger::with_seq_for_test("20261231");
    assert_eq!(logger.next_id(), "20261231-000001");
    assert_eq!(logger.next_id(), "20261231-000002");
}

#[test]
fn round_id_format_pads_to_six_digits() {
    assert_eq!(format_round_id("20260830", 7), "20260830-000007");
    assert_eq!(format_round_id("20260830", 123456), "20260830-123456");
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let path = tmp_path("roundlog_ts");
    let mut logger = RoundLogger::create(&path).expect("create logger");

    logger.write(&sample_record("20260101-000001")).expect("write");
    let mut stamped = sample_record("20260101-000002");
    stamped.ts = Some("2026-01-02T03:04:05Z".to_string());
    logger.write(&stamped).expect("write");

    let text = fs::read_to_string(&path).expect("read file");
    let mut lines = text.lines();

    let first: RoundRecord = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert!(first.ts.is_some(), "missing ts must be filled in");

    let second: RoundRecord = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(second.ts.as_deref(), Some("2026-01-02T03:04:05Z"));
    let _ = fs::remove_file(&path);
}

#[test]
fn records_round_trip_through_serde() {
    let record = sample_record("20260101-000001");
    let json = serde_json::to_string(&record).unwrap();
    let back: RoundRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
