//! Roster Import/Export Module
//! Bulk CSV import plus CSV/JSON export of the student roster using Polars.

use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;

use crate::data::{NewStudent, Student};

/// Read students from a CSV file with `name`, `roll` and `marks` columns
/// (matched case-insensitively). Rows with a blank name or roll, or marks
/// that fail to parse as a non-negative number, are skipped rather than
/// failing the whole import.
pub fn read_csv(path: &Path) -> Result<Vec<NewStudent>> {
    let path_str = path.to_string_lossy().to_string();

    // Lazy reader with schema inference, same as the interactive loaders.
    let df = LazyCsvReader::new(&path_str)
        .with_infer_schema_length(Some(1000))
        .with_ignore_errors(true)
        .finish()
        .and_then(|lazy| lazy.collect())
        .with_context(|| format!("failed to read {}", path.display()))?;

    let name_col = find_column(&df, "name")?;
    let roll_col = find_column(&df, "roll")?;
    let marks_col = find_column(&df, "marks")?;

    let names = df.column(&name_col)?;
    let rolls = df.column(&roll_col)?;
    let marks_f64 = df.column(&marks_col)?.cast(&DataType::Float64)?;
    let marks = marks_f64.f64()?;

    let mut students = Vec::new();
    for i in 0..df.height() {
        if let (Ok(name), Ok(roll), Some(m)) = (names.get(i), rolls.get(i), marks.get(i)) {
            if name.is_null() || roll.is_null() || m.is_nan() || m < 0.0 {
                continue;
            }
            let name = name.to_string().trim_matches('"').trim().to_string();
            let roll = roll.to_string().trim_matches('"').trim().to_string();
            if name.is_empty() || roll.is_empty() {
                continue;
            }
            students.push(NewStudent {
                name,
                roll,
                marks: m.round() as i64,
            });
        }
    }

    Ok(students)
}

/// Write the roster to a CSV file.
pub fn write_csv(students: &[Student], path: &Path) -> Result<()> {
    let mut df = roster_frame(students)?;
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    CsvWriter::new(file)
        .finish(&mut df)
        .context("failed to write roster CSV")?;
    Ok(())
}

/// Write the roster as pretty-printed JSON.
pub fn write_json(students: &[Student], path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, students).context("failed to write roster JSON")?;
    Ok(())
}

/// Locate a column by case-insensitive name.
fn find_column(df: &DataFrame, wanted: &str) -> Result<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .find(|c| c.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| anyhow!("CSV is missing a `{wanted}` column"))
}

fn roster_frame(students: &[Student]) -> Result<DataFrame> {
    let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
    let names: Vec<String> = students.iter().map(|s| s.name.clone()).collect();
    let rolls: Vec<String> = students.iter().map(|s| s.roll.clone()).collect();
    let marks: Vec<i64> = students.iter().map(|s| s.marks).collect();

    DataFrame::new(vec![
        Column::new("id".into(), ids),
        Column::new("name".into(), names),
        Column::new("roll".into(), rolls),
        Column::new("marks".into(), marks),
    ])
    .context("failed to build roster frame")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_csv_skips_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        fs::write(
            &path,
            "Name,Roll,Marks\n\
             Alice,R-01,91\n\
             ,R-02,50\n\
             Bob,R-03,not-a-number\n\
             Carol,R-04,64\n",
        )
        .unwrap();

        let students = read_csv(&path).unwrap();
        let rolls: Vec<&str> = students.iter().map(|s| s.roll.as_str()).collect();
        assert_eq!(rolls, vec!["R-01", "R-04"]);
        assert_eq!(students[0].marks, 91);
    }

    #[test]
    fn test_read_csv_requires_roll_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "name,marks\nAlice,91\n").unwrap();

        let err = read_csv(&path).unwrap_err();
        assert!(err.to_string().contains("roll"));
    }

    #[test]
    fn test_exported_csv_imports_again() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let roster = vec![
            Student {
                id: 1,
                name: "Alice".into(),
                roll: "R-01".into(),
                marks: 91,
            },
            Student {
                id: 2,
                name: "Bob".into(),
                roll: "R-02".into(),
                marks: 55,
            },
        ];

        write_csv(&roster, &path).unwrap();
        let back = read_csv(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].name, "Bob");
        assert_eq!(back[1].marks, 55);
    }

    #[test]
    fn test_write_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let roster = vec![Student {
            id: 7,
            name: "Alice".into(),
            roll: "R-01".into(),
            marks: 91,
        }];

        write_json(&roster, &path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["roll"], "R-01");
        assert_eq!(value[0]["marks"], 91);
    }
}
