use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Error;
use csv_file_sort::sort::Sort;
use simple_logger::SimpleLogger;

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn create_input(path: &Path, lines: usize) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    for i in 0..lines {
        let key = rand::random::<u32>() % 100_000;
        writeln!(writer, "{},row-{},{}", key, i, rand::random::<u16>())?;
    }
    writer.flush()?;
    Ok(())
}

fn sort_records(input_path: &Path, output_path: &Path) -> Result<(), Error> {
    // ',' delimiter and 10,000 line chunks are the defaults
    let mut csv_file_sort = Sort::new(input_path.to_path_buf(), output_path.to_path_buf());
    csv_file_sort.with_tmp_dir(PathBuf::from("./target"));
    csv_file_sort.sort()?;
    Ok(())
}

// cargo run -r --example sort_csv_file
pub fn main() -> Result<(), Error> {
    SimpleLogger::new().init()?;
    let input_path = PathBuf::from("./target/random-155000.csv");
    let sorted_path = PathBuf::from("./target/sorted-155000.csv");

    create_input(&input_path, 155_000)?;
    sort_records(&input_path, &sorted_path)?;

    let sorted = Sort::new(sorted_path.clone(), PathBuf::new()).check()?;
    log::info!("{} sorted: {}", sorted_path.display(), sorted);
    Ok(())
}
