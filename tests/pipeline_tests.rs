mod common;

use std::collections::HashSet;

use appagenda::utils::normalize_name;
use appagenda::{AgendaError, WarningKind};
use common::{read_sheet, Fixture};

// ============================================================================
// Agenda sheet
// ============================================================================

#[test]
fn test_standard_run_writes_both_workbooks() {
    let fixture = Fixture::standard();
    let (result, diag) = fixture.generate();
    let output = result.expect("Pipeline should succeed");

    assert_eq!(output.assembly.rows.len(), 12);
    assert_eq!(output.assembly.speakers.len(), 8);
    assert_eq!(output.attendees.len(), 2);

    let agenda = read_sheet(&fixture.agenda_path(), "Agenda");
    assert_eq!(agenda.len(), 13, "header plus one line per row");
    assert_eq!(agenda[0][0], "Date");
    assert_eq!(agenda[0][11], "Session or Sub");

    let breakfast = &agenda[1];
    assert_eq!(
        &breakfast[..5],
        &["06/03/2019", "08:00", "09:00", "", "Breakfast"]
    );
    assert_eq!(breakfast[8], "Exhibit Hall");
    assert_eq!(breakfast[11], "Session");

    let keynote = &agenda[2];
    assert_eq!(keynote[6], "Language is social.");
    assert_eq!(keynote[7], "Rada Mihalcea");
    assert_eq!(keynote[10], "https://vimeo.com/k1");

    let session = &agenda[3];
    assert_eq!(session[3], "Research; TACL");
    assert_eq!(session[4], "1A: Session 1A: Parsing");
    assert_eq!(session[6], "Chair: Jane Doe");
    assert_eq!(session[1], "10:30");
    assert_eq!(session[2], "12:10");

    let paper = &agenda[4];
    assert_eq!(paper[3], "Main");
    assert_eq!(paper[5], "Fast CCG Parsing");
    assert_eq!(paper[7], "Ana Lima; Bo Chen");
    assert_eq!(paper[9], "https://www.aclweb.org/anthology/N19-1001.pdf");
    assert_eq!(paper[11], "Sub");

    let poster_session = &agenda[7];
    assert_eq!(poster_session[3], "Research; SRW; Demos");
    let poster = &agenda[8];
    assert_eq!(poster[5], "Student Poster");
    assert_eq!((poster[1].as_str(), poster[2].as_str()), ("10:30", "12:10"));

    let workshop = &agenda[10];
    assert_eq!(workshop[0], "06/02/2019");
    assert_eq!(workshop[3], "BEA");
    assert_eq!(workshop[4], "Oral Session 1");
    assert_eq!((workshop[1].as_str(), workshop[2].as_str()), ("09:00", "09:40"));

    assert_eq!(diag.count(WarningKind::MissingMetadata), 0);
    assert_eq!(diag.count(WarningKind::MissingRequiredField), 0);
}

#[test]
fn test_one_item_row_per_order_entry() {
    let fixture = Fixture::standard();
    let (result, _) = fixture.generate();
    result.expect("Pipeline should succeed");

    let agenda = read_sheet(&fixture.agenda_path(), "Agenda");
    let items = agenda.iter().skip(1).filter(|row| row[11] == "Sub").count();
    // 5 main-conference items, 2 workshop items
    assert_eq!(items, 7);
}

#[test]
fn test_missing_metadata_yields_blank_row_and_warning() {
    let fixture = Fixture::standard();
    fixture.write(
        "map/main.tsv",
        &common::MAIN_MAPPING.replace("3 N19-1003", "3 N19-9999"),
    );
    let (result, diag) = fixture.generate();
    result.expect("Missing metadata should not abort the run");

    let agenda = read_sheet(&fixture.agenda_path(), "Agenda");
    let blank = &agenda[6];
    assert_eq!(blank[11], "Sub");
    assert_eq!(blank[1], "11:06");
    assert_eq!(blank[5], "");
    assert_eq!(blank[7], "");
    assert_eq!(diag.count(WarningKind::MissingMetadata), 1);
}

// ============================================================================
// Speaker and attendee sheets
// ============================================================================

#[test]
fn test_speakers_and_attendees_are_disjoint() {
    let fixture = Fixture::standard();
    let (result, _) = fixture.generate();
    result.expect("Pipeline should succeed");

    let speakers: HashSet<String> = read_sheet(&fixture.agenda_path(), "Speaker")
        .iter()
        .skip(1)
        .map(|row| normalize_name(&row[0]))
        .collect();
    let attendees: Vec<String> = read_sheet(&fixture.attendees_path(), "Attendees")
        .iter()
        .skip(1)
        .map(|row| normalize_name(&row[0]))
        .collect();

    assert_eq!(attendees, vec!["zoe park", "adam ng"]);
    for attendee in &attendees {
        assert!(!speakers.contains(attendee), "{} is listed as both", attendee);
    }
}

#[test]
fn test_email_match_excludes_registrant_with_different_name() {
    let fixture = Fixture::standard();
    let (result, diag) = fixture.generate();
    let output = result.expect("Pipeline should succeed");

    // "Gilbert Ho" registered with the email of speaker "Gil Ho"
    assert!(output.attendees.iter().all(|a| a.name != "Gilbert Ho"));
    // only Ana Lima matched by name alone
    assert_eq!(diag.count(WarningKind::NameOnlyMatch), 1);
    assert_eq!(diag.count(WarningKind::DuplicateRegistrant), 1);
}

#[test]
fn test_name_only_match_fills_speaker_email() {
    let fixture = Fixture::standard();
    let (result, _) = fixture.generate();
    result.expect("Pipeline should succeed");

    let speakers = read_sheet(&fixture.agenda_path(), "Speaker");
    let ana = speakers
        .iter()
        .find(|row| row[0] == "Ana Lima")
        .expect("Ana Lima should be a speaker");
    assert_eq!(ana[1], "ana.lima@ets.org");
    assert_eq!(ana[2], "ETS");
}

#[test]
fn test_affiliation_conflict_keeps_first_seen() {
    let fixture = Fixture::standard();
    let (result, diag) = fixture.generate();
    result.expect("Pipeline should succeed");

    let speakers = read_sheet(&fixture.agenda_path(), "Speaker");
    let garcias: Vec<_> = speakers
        .iter()
        .filter(|row| normalize_name(&row[0]) == "jose garcia")
        .collect();
    assert_eq!(garcias.len(), 1);
    assert_eq!(garcias[0][0], "José García");
    assert_eq!(garcias[0][2], "UPM");
    assert_eq!(diag.count(WarningKind::AffiliationConflict), 1);
}

#[test]
fn test_without_registrants_attendee_sheet_is_empty() {
    let fixture = Fixture::standard();
    fixture.write(
        "config.json",
        &common::CONFIG.replace(r#""attendees_file": "registrants.csv","#, ""),
    );
    let (result, _) = fixture.generate();
    let output = result.expect("Pipeline should succeed");

    assert!(output.attendees.is_empty());
    let attendees = read_sheet(&fixture.attendees_path(), "Attendees");
    assert_eq!(attendees.len(), 1);
    assert_eq!(attendees[0], vec!["Name", "Email", "Affiliation", "Registration Type"]);
}

// ============================================================================
// Determinism and failures
// ============================================================================

#[test]
fn test_rerun_is_byte_identical() {
    let fixture = Fixture::standard();

    let (result, _) = fixture.generate();
    result.expect("First run should succeed");
    let agenda = std::fs::read(fixture.agenda_path()).unwrap();
    let attendees = std::fs::read(fixture.attendees_path()).unwrap();

    let (result, _) = fixture.generate();
    result.expect("Second run should succeed");
    assert_eq!(std::fs::read(fixture.agenda_path()).unwrap(), agenda);
    assert_eq!(std::fs::read(fixture.attendees_path()).unwrap(), attendees);
}

#[test]
fn test_unrecognized_order_line_aborts_without_output() {
    let fixture = Fixture::standard();
    fixture.write(
        "order/bea.txt",
        &format!("{}this is not an order line\n", common::BEA_ORDER),
    );
    let (result, _) = fixture.generate();

    match result {
        Err(AgendaError::Parse { path, line, .. }) => {
            assert!(path.ends_with("order/bea.txt"));
            assert_eq!(line, 5);
        }
        other => panic!("Expected a parse error, got {:?}", other.map(|_| ())),
    }
    assert!(!fixture.agenda_path().exists());
    assert!(!fixture.attendees_path().exists());
}

#[test]
fn test_failed_attendees_write_leaves_no_agenda() {
    let fixture = Fixture::standard();
    // a directory where the attendees workbook should go
    std::fs::create_dir_all(fixture.attendees_path()).unwrap();
    let (result, _) = fixture.generate();

    match result {
        Err(AgendaError::Io { path, .. }) => assert_eq!(path, fixture.attendees_path()),
        other => panic!("Expected an io error, got {:?}", other.map(|_| ())),
    }
    assert!(!fixture.agenda_path().exists());
}

#[test]
fn test_rejected_record_on_agenda_is_parse_error() {
    let fixture = Fixture::standard();
    fixture.write(
        "xml/W19.xml",
        r#"<volume id="W19">
  <paper id="4401">
    <title></title>
    <url>W19-4401</url>
  </paper>
</volume>
"#,
    );
    let (result, _) = fixture.generate();

    match result {
        Err(AgendaError::Parse { path, line, .. }) => {
            assert!(path.ends_with("xml/W19.xml"));
            assert_eq!(line, 2);
        }
        other => panic!("Expected a parse error, got {:?}", other.map(|_| ())),
    }
    assert!(!fixture.agenda_path().exists());
}

#[test]
fn test_event_without_mapping_is_config_error() {
    let fixture = Fixture::standard();
    fixture.write(
        "config.json",
        r#"{
            "order_files": {"main": "order/main.txt", "BEA": "order/bea.txt"},
            "mapping_files": {"main": "map/main.tsv"}
        }"#,
    );
    let (result, _) = fixture.generate();

    assert!(matches!(result, Err(AgendaError::Config(_))));
    assert!(!fixture.agenda_path().exists());
}

#[test]
fn test_missing_mapping_file_is_config_error() {
    let fixture = Fixture::standard();
    std::fs::remove_file(fixture.path("map/bea.tsv")).unwrap();
    let (result, _) = fixture.generate();

    assert!(matches!(result, Err(AgendaError::Config(_))));
}
