//! Unit tests for rider file parsing.

use crate::riders::{RiderFileError, load_riders, parse_riders};
use rstest::rstest;
use velogames_core::Category;

use super::helpers::{GRAND_TOUR_RIDERS, STAGE_RACE_RIDERS, Workspace};
use super::*;

#[rstest]
fn classified_lines_carry_categories() {
    let riders = parse_riders(GRAND_TOUR_RIDERS, true).expect("riders should parse");
    assert_eq!(riders.len(), 12);
    let first = riders.first().expect("first rider");
    assert_eq!(first.name, "L1");
    assert_eq!(first.team, "Team A");
    assert_eq!(first.category, Some(Category::Leader));
    assert_eq!((first.score, first.cost), (900, 19));
}

#[rstest]
fn blank_lines_are_skipped() {
    let riders = parse_riders(STAGE_RACE_RIDERS, false).expect("riders should parse");
    assert_eq!(riders.len(), 10);
    assert!(riders.iter().all(|rider| rider.category.is_none()));
}

#[rstest]
#[case::missing_field("A,Team,10", false, 4, 3)]
#[case::unclassified_row_in_classified_game("A,Team,10,5", true, 5, 4)]
#[case::extra_field("A,Team,Climber,10,5", false, 4, 5)]
fn wrong_field_counts_report_the_line(
    #[case] line: &str,
    #[case] classified: bool,
    #[case] expected_fields: usize,
    #[case] found_fields: usize,
) {
    let contents = format!("\n{line}\n");
    let err = parse_riders(&contents, classified).expect_err("expected field count error");
    match err {
        RiderFileError::FieldCount {
            line,
            expected,
            found,
        } => {
            assert_eq!(line, 2);
            assert_eq!(expected, expected_fields);
            assert_eq!(found, found_fields);
        }
        other => panic!("expected FieldCount, found {other:?}"),
    }
}

#[rstest]
#[case::negative_score("A,Team,-3,5", "score")]
#[case::fractional_cost("A,Team,3,5.5", "cost")]
#[case::empty_score("A,Team,,5", "score")]
fn invalid_numbers_are_rejected(#[case] line: &str, #[case] expected_field: &str) {
    let err = parse_riders(line, false).expect_err("expected number error");
    match err {
        RiderFileError::InvalidNumber { line, field, .. } => {
            assert_eq!(line, 1);
            assert_eq!(field, expected_field);
        }
        other => panic!("expected InvalidNumber, found {other:?}"),
    }
}

#[rstest]
fn unknown_classes_are_rejected() {
    let err = parse_riders("A,Team,Rouleur,10,5", true).expect_err("expected class error");
    assert!(matches!(err, RiderFileError::InvalidCategory { line: 1, .. }));
    assert_eq!(
        err.to_string(),
        "line 1: unknown rider category 'Rouleur'"
    );
}

#[rstest]
fn load_riders_reports_the_path() {
    let workspace = Workspace::new();
    let path = workspace.write("riders.csv", "A,Team,x,5\n");
    let err = load_riders(&path, false).expect_err("expected parse error");
    match err {
        CliError::ParseRiders { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseRiders, found {other:?}"),
    }
}
