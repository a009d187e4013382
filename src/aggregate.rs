// src/aggregate.rs - run-level dedup and CSV export
use crate::models::{Finding, Result};
use std::collections::HashMap;
use std::io::Write;

/// Findings keyed by lowercased email. Later insertions overwrite earlier
/// ones in place (last write wins), while rows keep first-seen key order so
/// the exported table is stable for a given crawl order.
#[derive(Debug, Default)]
pub struct ResultTable {
    index: HashMap<String, usize>,
    rows: Vec<Finding>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, finding: Finding) {
        let key = finding.email.to_lowercase();
        match self.index.get(&key) {
            Some(&i) => self.rows[i] = finding,
            None => {
                self.index.insert(key, self.rows.len());
                self.rows.push(finding);
            }
        }
    }

    pub fn rows(&self) -> &[Finding] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn aggregate(findings: impl IntoIterator<Item = Finding>) -> ResultTable {
    let mut table = ResultTable::new();
    for finding in findings {
        table.insert(finding);
    }
    table
}

pub async fn export_to_csv(table: &ResultTable, path: &str) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create output directory for {}: {}", path, e))?;
    }

    let mut file = std::fs::File::create(path)
        .map_err(|e| format!("cannot create output file {}: {}", path, e))?;

    writeln!(file, "brand,source,email")?;
    for row in table.rows() {
        writeln!(
            file,
            "{},{},{}",
            csv_field(&row.brand),
            csv_field(&row.source),
            csv_field(&row.email)
        )?;
    }

    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(brand: &str, source: &str, email: &str) -> Finding {
        Finding {
            brand: brand.to_string(),
            source: source.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn last_write_wins_on_normalized_key() {
        let table = aggregate(vec![
            finding("A", "https://a.test", "X@x.com"),
            finding("B", "https://b.test", "x@X.COM"),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].brand, "B");
        assert_eq!(table.rows()[0].email, "x@X.COM");
    }

    #[test]
    fn keeps_first_seen_key_order() {
        let table = aggregate(vec![
            finding("A", "https://a.test", "first@a.test"),
            finding("B", "https://b.test", "second@b.test"),
            finding("C", "https://c.test", "FIRST@a.test"),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].email, "FIRST@a.test");
        assert_eq!(table.rows()[0].brand, "C");
        assert_eq!(table.rows()[1].email, "second@b.test");
    }

    #[test]
    fn distinct_emails_all_survive() {
        let table = aggregate(vec![
            finding("A", "https://a.test", "press@a.test"),
            finding("A", "https://a.test", "partners@a.test"),
        ]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn csv_field_quotes_only_when_needed() {
        assert_eq!(csv_field("press@a.test"), "press@a.test");
        assert_eq!(csv_field("Acme, Inc."), "\"Acme, Inc.\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
