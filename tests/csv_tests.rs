#![cfg(all(feature = "csv", feature = "report"))]

use std::path::PathBuf;

use chrono::NaiveDate;
use gstify::core::*;
use gstify::files::{read_csv, read_upload, write_report_csv, write_reports};
use gstify::report::{ReportKind, Reports};
use gstify::store::{FileOutcome, Session};
use rust_decimal_macros::dec;

const GLOWROAD_CSV: &str = "\
Order ID,Base amount for GST ,Buyer state,GST %,Product HSN code,SGST,UTGST,CGST,IGST,Customer invoice value (GMV)
GR-1,100,uttar pradesh,5,\"61,09\",0,0,0,0,105
GR-2,300,Uttar Pradesh,5,6109.0,,,,,315
GR-3,0,Bihar,5,6109,,,,,0
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gstify-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn glowroad_csv_end_to_end() {
    let table = read_csv("orders", GLOWROAD_CSV.as_bytes()).unwrap();
    assert_eq!(table.len(), 3);

    let mut session = Session::new(BusinessConfigBuilder::new(StateCode::UttarPradesh).build().unwrap());
    let outcome = session.ingest(Platform::Glowroad, &Upload::new("glowroad.csv", table));
    assert!(outcome.is_ingested(), "{outcome}");

    let hsn = &session.hsn_summary()[0];
    assert_eq!(hsn.hsn, "6109");
    assert_eq!(hsn.quantity, dec!(2));
    assert_eq!(hsn.taxable_value, dec!(400));
    assert_eq!((hsn.cgst, hsn.sgst), (dec!(10), dec!(10)));
}

#[test]
fn report_csv_has_header_row() {
    let table = read_csv("orders", GLOWROAD_CSV.as_bytes()).unwrap();
    let mut session = Session::new(BusinessConfigBuilder::new(StateCode::UttarPradesh).build().unwrap());
    session.ingest(Platform::Glowroad, &Upload::new("glowroad.csv", table));
    let reports = Reports::build(&session);

    let mut out = Vec::new();
    write_report_csv(reports.get(ReportKind::B2cs), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "Type,Place Of Supply,Rate,Applicable % of Tax Rate,Taxable Value,Cess Amount,E-Commerce GSTIN\n\
         OE,09-Uttar Pradesh,5,,400,0,\n"
    );
}

#[test]
fn uploads_are_named_after_the_file() {
    let dir = scratch_dir("upload");
    let path = dir.join("glowroad_april.csv");
    std::fs::write(&path, GLOWROAD_CSV).unwrap();

    let upload = read_upload(&path).unwrap();
    assert_eq!(upload.name, "glowroad_april.csv");
    assert_eq!(upload.workbook.sheets[0].name, "glowroad_april");

    let mut session = Session::new(BusinessConfig::default());
    assert!(session.ingest(Platform::Glowroad, &upload).is_ingested());
    let again = read_upload(&path).unwrap();
    assert_eq!(session.ingest(Platform::Glowroad, &again), FileOutcome::AlreadyProcessed);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn only_non_empty_reports_are_written() {
    let table = read_csv("orders", GLOWROAD_CSV.as_bytes()).unwrap();
    let mut session = Session::new(BusinessConfigBuilder::new(StateCode::UttarPradesh).build().unwrap());
    session.ingest(Platform::Glowroad, &Upload::new("glowroad.csv", table));
    let reports = Reports::build(&session);

    let dir = scratch_dir("reports");
    let ts = NaiveDate::from_ymd_opt(2024, 4, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let written = write_reports(&reports, &dir, ts).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "B2CS_20240401_120000.csv",
            "hsn(b2c)_20240401_120000.csv",
            "ECO_TCS_20240401_120000.csv",
        ]
    );

    let tcs = std::fs::read_to_string(&written[2]).unwrap();
    assert!(tcs.contains("Liable to collect tax u/s 52(TCS),,Glowroad,400,0,10,10,0"));

    std::fs::remove_dir_all(&dir).unwrap();
}
