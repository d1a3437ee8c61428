use std::fs;

use super::*;
use crate::model::geo::Coordinates;
use crate::model::score::{FactorCounts, FactorScore};
use crate::report::RiskScoreStats;

fn source_table() -> Table {
    let data = "Name,Post Code,Age,NCD Years,MotorVehicleValue\n\
                Ann,SW1A 1AA,20,1,3000\n\
                Bob,,unknown,2,4000\n";
    Table::from_reader(data.as_bytes(), b',').unwrap()
}

fn scored_lead() -> Lead {
    let mut lead = Lead::new(0);
    lead.coordinates = Coordinates::new(51.501009, -0.141588);
    lead.nearest = NearestBranch::Found {
        name: "London".to_string(),
        miles: 1.23,
    };
    lead.scores.ncd = FactorScore::Scored(2.5);
    lead.scores.age = FactorScore::Scored(3.5);
    lead.scores.vehicle_value = FactorScore::Scored(0.15);
    lead.scores.address = FactorScore::Scored(0.25);
    lead.scores.total = FactorScore::Scored(6.4);
    lead
}

fn unscored_lead() -> Lead {
    let mut lead = Lead::new(1);
    lead.scores.ncd = FactorScore::Scored(2.5);
    lead
}

#[test]
fn test_output_table_appends_derived_columns() {
    let table = source_table();
    let leads = vec![scored_lead(), unscored_lead()];
    let out = render_output_table(&table, &leads, "N/A");

    assert_eq!(out.headers.len(), 5 + DERIVED_COLUMNS.len());
    assert_eq!(&out.headers[..5], &table.headers[..]);
    assert_eq!(&out.headers[5..], &DERIVED_COLUMNS.map(String::from)[..]);

    assert_eq!(
        out.rows[0],
        vec![
            "Ann", "SW1A 1AA", "20", "1", "3000", "51.501009", "-0.141588", "London", "1.23",
            "2.5", "3.5", "0.15", "0.25", "6.4",
        ]
    );
    assert_eq!(
        out.rows[1],
        vec![
            "Bob", "", "unknown", "2", "4000", "", "", "N/A", "N/A", "2.5", "N/A", "N/A", "N/A",
            "N/A",
        ]
    );
}

#[test]
fn test_existing_derived_column_is_overwritten_in_place() {
    let data = "Post Code,RiskScore,Age\nX,old,20\n";
    let table = Table::from_reader(data.as_bytes(), b',').unwrap();
    let out = render_output_table(&table, &[unscored_lead_at(0)], "-");

    assert_eq!(out.headers.iter().filter(|h| *h == COL_RISK_SCORE).count(), 1);
    assert_eq!(out.headers[1], COL_RISK_SCORE);
    assert_eq!(out.rows[0][1], "-");
    assert_eq!(out.rows[0][2], "20");
    assert_eq!(out.headers.len(), 3 + DERIVED_COLUMNS.len() - 1);
}

fn unscored_lead_at(row: usize) -> Lead {
    Lead::new(row)
}

fn stage4_input<'a>(
    table: &'a Table,
    leads: &'a [Lead],
    branches: &'a [Branch],
    dir: &'a Path,
) -> Stage4Input<'a> {
    Stage4Input {
        table,
        leads,
        branches,
        stage1: Stage1Output {
            looked_up: 1,
            resolved: 1,
            no_postcode: 1,
        },
        stage2: Stage2Output {
            matched: 1,
            unmatched: 1,
        },
        stage3: Stage3Output {
            scored: 1,
            not_computable: FactorCounts {
                ncd: 0,
                age: 1,
                vehicle_value: 1,
                address: 1,
                total: 1,
            },
        },
        leads_path: dir,
        branches_path: dir,
        geocoder_url: "http://localhost",
        na_marker: "N/A",
        tool_name: "ppc-riskscore".to_string(),
        tool_version: "0.0.0".to_string(),
    }
}

#[test]
fn test_build_summary_counts() {
    let table = source_table();
    let leads = vec![scored_lead(), unscored_lead()];
    let branches = vec![
        Branch {
            name: "London".to_string(),
            coordinates: Coordinates::new(51.5074, -0.1278),
        },
        Branch {
            name: "Nowhere".to_string(),
            coordinates: None,
        },
    ];
    let dir = Path::new("in");
    let summary = build_summary(&stage4_input(&table, &leads, &branches, dir));

    assert_eq!(summary.counts.leads, 2);
    assert_eq!(summary.counts.branches, 2);
    assert_eq!(summary.counts.branches_with_coordinates, 1);
    assert_eq!(summary.counts.geocoded, 1);
    assert_eq!(summary.counts.nearest_branch_found, 1);
    assert_eq!(summary.counts.scored, 1);
    assert_eq!(summary.not_computable.total, 1);
    assert_eq!(
        summary.risk_score,
        RiskScoreStats {
            average: Some(6.4),
            min: Some(6.4),
            max: Some(6.4),
        }
    );
}

#[test]
fn test_write_reports_creates_all_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("nested").join("out");
    let table = source_table();
    let leads = vec![scored_lead(), unscored_lead()];
    let branches: Vec<Branch> = Vec::new();

    let out = write_reports(&stage4_input(&table, &leads, &branches, tmp.path()), &out_dir).unwrap();
    assert_eq!(out.results_path, out_dir.join(RESULTS_FILE));

    let mut reader = csv::Reader::from_path(&out.results_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(13), Some(COL_RISK_SCORE));
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get(13), Some("6.4"));
    assert_eq!(rows[1].get(13), Some("N/A"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out.summary_path).unwrap()).unwrap();
    assert_eq!(json["counts"]["leads"], 2);
    assert_eq!(json["risk_score"]["average"], 6.4);
    assert_eq!(json["tool"]["name"], "ppc-riskscore");

    let report = fs::read_to_string(&out.report_path).unwrap();
    assert!(report.contains("Risk Score Average: 6.4"));
}

#[test]
fn test_write_reports_fails_when_out_dir_is_a_file() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("file");
    fs::write(&blocker, "x").unwrap();
    let table = source_table();
    let leads = vec![scored_lead()];

    let err = write_reports(&stage4_input(&table, &leads, &[], tmp.path()), &blocker).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
}

#[test]
fn test_unnamed_nearest_branch_is_written_as_marker() {
    let table = source_table();
    let mut lead = scored_lead();
    lead.nearest = NearestBranch::Found {
        name: String::new(),
        miles: 2.5,
    };
    let out = render_output_table(&table, &[lead], "N/A");
    let branch = out.headers.iter().position(|h| h == COL_NEAREST_BRANCH).unwrap();
    let distance = out.headers.iter().position(|h| h == COL_DISTANCE).unwrap();
    assert_eq!(out.rows[0][branch], "N/A");
    assert_eq!(out.rows[0][distance], "2.5");
}
