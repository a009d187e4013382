// src/targets.rs - target list ingestion
use crate::models::{Result, Target};

/// Reads the target CSV. The `brand` and `url` columns are located by header
/// name; missing columns or values are coerced to empty strings so a sparse
/// list still produces a full run. An unreadable file aborts the run.
pub async fn load_targets(path: &str) -> Result<Vec<Target>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("cannot read target list {}: {}", path, e))?;
    parse_targets(&content).map_err(|e| format!("malformed target list {}: {}", path, e).into())
}

fn parse_targets(content: &str) -> std::result::Result<Vec<Target>, String> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or_else(|| "no header row".to_string())?;
    let columns = split_row(header);
    let brand_col = find_column(&columns, "brand");
    let url_col = find_column(&columns, "url");

    let mut targets = Vec::new();
    for line in lines {
        let fields = split_row(line);
        targets.push(Target {
            brand: field_at(&fields, brand_col),
            url: field_at(&fields, url_col),
        });
    }

    Ok(targets)
}

fn find_column(columns: &[String], name: &str) -> Option<usize> {
    columns
        .iter()
        .position(|c| c.trim().eq_ignore_ascii_case(name))
}

fn field_at(fields: &[String], col: Option<usize>) -> String {
    col.and_then(|i| fields.get(i))
        .map(|f| f.trim().to_string())
        .unwrap_or_default()
}

// Quote-aware CSV field splitting, mirroring the escaping used on export.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brand_and_url_columns() {
        let targets = parse_targets("brand,url\nAcme,https://acme.test\n").unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].brand, "Acme");
        assert_eq!(targets[0].url, "https://acme.test");
    }

    #[test]
    fn locates_columns_by_header_name() {
        let targets =
            parse_targets("notes,url,brand\nhello,https://acme.test,Acme\n").unwrap();
        assert_eq!(targets[0].brand, "Acme");
        assert_eq!(targets[0].url, "https://acme.test");
    }

    #[test]
    fn handles_quoted_fields_and_escaped_quotes() {
        let targets =
            parse_targets("brand,url\n\"Acme, Inc. \"\"global\"\"\",https://acme.test\n").unwrap();
        assert_eq!(targets[0].brand, "Acme, Inc. \"global\"");
    }

    #[test]
    fn coerces_missing_values_to_empty() {
        let targets = parse_targets("brand,url\nAcme\n").unwrap();
        assert_eq!(targets[0].brand, "Acme");
        assert_eq!(targets[0].url, "");
    }

    #[test]
    fn coerces_missing_columns_to_empty() {
        let targets = parse_targets("name,site\nAcme,https://acme.test\n").unwrap();
        assert_eq!(targets[0].brand, "");
        assert_eq!(targets[0].url, "");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(parse_targets("").is_err());
        assert!(parse_targets("\n\n").is_err());
    }

    #[test]
    fn skips_blank_lines() {
        let targets = parse_targets("brand,url\n\nAcme,https://acme.test\n\n").unwrap();
        assert_eq!(targets.len(), 1);
    }
}
