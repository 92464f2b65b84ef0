use crate::{game8::QuestRecord, CrawlerError};
use rust_xlsxwriter::{Format, Workbook};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};
use tracing::{debug, info};

pub const SHEET_NAME: &str = "Genshin Impact World Quests";
pub const HEADERS: [&str; 3] = ["Region", "Quest Name", "Rewards"];

const REGION_COL: u16 = 0;
const NAME_COL: u16 = 1;
const REWARDS_COL: u16 = 2;
const CSV_SEP: char = ',';

/// Rows in crawl order. Spreadsheet row 1 is the header, records start at row 2.
#[derive(Debug, Default)]
pub struct Report {
    records: Vec<QuestRecord>,
}

impl Report {
    pub fn new() -> Report {
        Report::default()
    }

    pub fn push(&mut self, record: QuestRecord) {
        info!("[{}] Insert Result {}", self.records.len() + 1, record.name);
        debug!("\n{}", record);
        self.records.push(record);
    }

    pub fn records(&self) -> &[QuestRecord] {
        self.records.as_slice()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_workbook(&self) -> Result<Workbook, CrawlerError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let wrap = Format::new().set_text_wrap();

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        for (col, header) in (0u16..).zip(HEADERS) {
            sheet.write_string_with_format(0, col, header, &bold)?;
        }

        for (row, record) in (1u32..).zip(&self.records) {
            if !record.is_sub_quest {
                sheet.write_string(row, REGION_COL, record.region.as_str())?;
            }
            sheet.write_string(row, NAME_COL, record.name.as_str())?;
            sheet.write_string_with_format(
                row,
                REWARDS_COL,
                record.rewards.to_string().as_str(),
                &wrap,
            )?;
        }

        Ok(workbook)
    }

    /// Overwrites `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CrawlerError> {
        let path = path.as_ref();
        let mut workbook = self.to_workbook()?;
        workbook.save(path)?;
        info!("Results saved to {}", path.display());
        Ok(())
    }

    /// Same columns as the sheet; sub-quest rows get an empty region field.
    pub fn write_csv<W: Write>(&self, mut w: W) -> io::Result<()> {
        write_csv_row(&mut w, &HEADERS)?;
        for record in &self.records {
            let region = if record.is_sub_quest {
                ""
            } else {
                record.region.as_str()
            };
            let rewards = record.rewards.to_string();
            write_csv_row(&mut w, &[region, record.name.as_str(), rewards.as_str()])?;
        }
        w.flush()
    }

    /// Overwrites `path`.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), CrawlerError> {
        let path = path.as_ref();
        self.write_csv(BufWriter::new(File::create(path)?))?;
        info!("Data exported to {}", path.display());
        Ok(())
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(CSV_SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_csv_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", CSV_SEP)?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}
