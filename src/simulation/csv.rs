// src/simulation/csv.rs

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use crate::simulation::RunResult;

/// 実行結果をCSVファイルへ書き出す
pub fn write_run_csv<P: AsRef<Path>>(path: P, result: &RunResult) -> Result<(), Box<dyn Error>> {
    let output_file = File::create(path)?;
    let mut writer = BufWriter::new(output_file);
    write_csv(&mut writer, result)?;
    writer.flush()?;
    Ok(())
}

/// ヘッダーと全行の書き込み
pub fn write_csv<W: Write>(writer: &mut W, result: &RunResult) -> Result<(), std::io::Error> {
    write_csv_header(writer, result)?;
    for i in 0..result.trajectory.len() {
        writer.write_all(create_csv_row(result, i).as_bytes())?;
    }
    Ok(())
}

/// CSVヘッダーの書き込み
pub fn write_csv_header<W: Write>(
    writer: &mut W,
    result: &RunResult,
) -> Result<(), std::io::Error> {
    let mut header = String::from("time(s),x(m)");
    if result.trajectory.v.is_some() {
        header.push_str(",v(m/s)");
    }
    if result.reference.is_some() {
        header.push_str(",x_theory(m)");
    }
    header.push('\n');
    writer.write_all(header.as_bytes())?;
    Ok(())
}

/// CSV行の作成
pub fn create_csv_row(result: &RunResult, i: usize) -> String {
    let trajectory = &result.trajectory;
    let mut row = format!("{},{}", trajectory.t[i], trajectory.x[i]);
    if let Some(v) = &trajectory.v {
        row.push_str(&format!(",{}", v[i]));
    }
    if let Some(reference) = &result.reference {
        row.push_str(&format!(",{}", reference[i]));
    }
    row.push('\n');
    row
}
