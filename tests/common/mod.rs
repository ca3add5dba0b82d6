use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use data_encoding::HEXLOWER;
use rand::Rng;

pub fn setup() {
    let results_dir_path = PathBuf::from_str("./target/results/").unwrap();

    if !results_dir_path.exists() {
        fs::create_dir_all(&results_dir_path).unwrap_or_else(|_|
            panic!("Failed to create results directory: {:?}", results_dir_path)
        );
    }
}

/// A fresh, empty directory for the intermediate files of one test
#[allow(dead_code)]
pub fn tmp_dir() -> PathBuf {
    let path = temp_file_name("./target/results/");
    fs::create_dir_all(&path).unwrap_or_else(|_|
        panic!("Failed to create tmp directory: {:?}", path)
    );
    path
}

#[allow(dead_code)]
pub fn dir_is_empty(path: &PathBuf) -> bool {
    fs::read_dir(path).unwrap().next().is_none()
}

#[allow(dead_code)]
pub fn read_lines(path: PathBuf) -> Result<Vec<String>, anyhow::Error> {
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().map(|x| x.unwrap()).collect();
    Ok(lines)
}

#[allow(dead_code)]
pub fn write_lines(path: &PathBuf, lines: &[String]) -> Result<(), anyhow::Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

/// `count` lines of the form `<key>,<sequence number>,<random text>` with keys in `-max_key..max_key`
#[allow(dead_code)]
pub fn random_lines(count: usize, max_key: i64) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let key: i64 = rng.gen_range(-max_key..max_key);
            let text = HEXLOWER.encode(&rand::random::<[u8; 4]>());
            format!("{},{},{}", key, i, text)
        })
        .collect()
}

#[allow(dead_code)]
pub fn key(line: &str) -> Option<i64> {
    if line.is_empty() {
        None
    } else {
        Some(i64::from_str(line.split(',').next().unwrap()).unwrap())
    }
}

#[allow(dead_code)]
pub fn temp_file_name(dir: &str) -> PathBuf {
    let mut result = PathBuf::from(dir);
    let name = HEXLOWER.encode(&rand::random::<[u8; 16]>());
    result.push(name);
    result
}
