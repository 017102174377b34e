use grade_report::dataset::ColumnSelection;
use grade_report::error::ReportError;
use grade_report::loader::{SourceKind, load_bytes, load_source};
use grade_report::output::render_document;
use grade_report::session::ReportSession;
use grade_report::{aggregate, normalize};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/grades.csv");

#[tokio::test]
async fn test_full_pipeline() {
    let dataset = load_source(FIXTURE).await.expect("Failed to load fixture");

    let mut session = ReportSession::new();
    session.import(dataset);
    assert_eq!(
        session.selection(),
        &ColumnSelection::new("Final Score", "Class")
    );

    let report = session.generate().expect("Failed to generate report");

    // "N/A" is skipped, "85%" and "1,0" coerce
    assert_eq!(report.overall.n, 6);
    assert_eq!(report.skipped_rows, 1);

    let labels: Vec<_> = report.groups.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(labels, vec!["(missing)", "Blue", "Red"]);

    let total: usize = report.groups.iter().map(|g| g.summary.n).sum();
    assert_eq!(total, report.overall.n);

    let blue = &report.groups[1].summary;
    assert_eq!(blue.n, 3);
    assert_eq!(blue.pass_count, 2);
    assert_eq!(blue.max, 85.0);
    assert_eq!(blue.distinction_rate, 33.3);
}

#[test]
fn test_reference_example_from_bytes() {
    let csv = "grade,group\n35,A\n45,A\n65,A\n75,A\n";
    let kind = SourceKind::from_name("inline.csv").unwrap();
    let dataset = load_bytes(csv.as_bytes(), kind).unwrap();

    let report = aggregate(dataset.rows(), "grade", "group", &normalize(40.0, 60.0, 70.0)).unwrap();
    let overall = &report.overall;

    assert_eq!(overall.cells(), [
        "4", "3", "1", "75.0", "25.0", "25.0", "75.0", "1", "1", "1", "55.00", "15.81", "75", "35",
    ]);
    assert_eq!(report.groups[0].summary, report.overall);

    let doc = render_document(&report, "Example", chrono::Utc::now());
    assert!(doc.contains("| A | 4 | 3 | 1 | 75.0 |"));
}

#[test]
fn test_errors_leave_session_usable() {
    let mut session = ReportSession::new();
    assert_eq!(session.generate().unwrap_err(), ReportError::MissingInput);

    let kind = SourceKind::from_name("x.csv").unwrap();
    let dataset = load_bytes(b"Score,Group\nabsent,A\n", kind).unwrap();
    session.import(dataset);
    assert_eq!(session.generate().unwrap_err(), ReportError::EmptyResult);
    assert!(session.report().is_none());

    let dataset = load_bytes(b"Score,Group\n50,A\n", kind).unwrap();
    session.import(dataset);
    assert_eq!(session.generate().unwrap().overall.n, 1);
}
