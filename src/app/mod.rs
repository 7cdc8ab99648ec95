//! Application use cases: shape, load, report.

mod age_report;
mod csv_shaper;
mod person_load;

pub use age_report::{age_report, calc_age_dist, render_report, REPORT_HEADER};
pub use csv_shaper::{parse_csv, read_csv_file};
pub use person_load::{insert_persons, list_persons, load_records, PersonInsert, StoredPerson};
