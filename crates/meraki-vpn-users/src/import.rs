//! CSV import of user records.
//!
//! Provisioning rows are `name,email[,password[,networks]]`, deauthorization
//! rows are `email[,networks]`. `networks` is a `;`-separated list of network
//! IDs or names. Blank passwords are replaced with generated ones. Rows that
//! do not fit the layout are skipped and reported as warnings.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use meraki_vpn_types::{Action, VpnUserRecord};
use tracing::debug;

use crate::error::Result;
use crate::password::generate_password;

const HEADER_MARKERS: &[&str] = &["name", "user name", "username", "email", "email address"];

/// Records and warnings produced from one CSV source
#[derive(Debug, Default)]
pub struct CsvImport {
    pub records: Vec<VpnUserRecord>,
    pub warnings: Vec<String>,
}

pub struct CsvImporter {
    action: Action,
}

impl CsvImporter {
    pub fn new(action: Action) -> Self {
        Self { action }
    }

    /// Expected column layout, for operator instructions
    pub fn layout(&self) -> &'static str {
        match self.action {
            Action::Provision => "name, email, password (optional), networks (optional, ';'-separated)",
            Action::Deauthorize => "email, networks (optional, ';'-separated)",
        }
    }

    /// Read a CSV file. Only failing to open the file is an error; bad rows
    /// end up in [`CsvImport::warnings`].
    pub fn import_file(&self, path: &Path) -> Result<CsvImport> {
        let file = File::open(path)?;
        debug!(path = %path.display(), action = %self.action, "importing CSV");
        Ok(self.import_reader(file))
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> CsvImport {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut import = CsvImport::default();
        let mut seen_content = false;

        for (index, row) in reader.records().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(index as u64 + 1);
                    import.push_warning(format!("Row {}: unreadable ({})", line, e));
                    continue;
                }
            };

            let line = row.position().map(|p| p.line()).unwrap_or(index as u64 + 1);

            if row.iter().all(|field| field.is_empty()) {
                continue;
            }

            if !seen_content {
                seen_content = true;
                if is_header(&row) {
                    debug!(line, "skipping header row");
                    continue;
                }
            }

            match self.parse_row(&row) {
                Ok(record) => import.records.push(record),
                Err(reason) => import.push_warning(format!("Row {}: {}", line, reason)),
            }
        }

        import
    }

    fn parse_row(&self, row: &StringRecord) -> std::result::Result<VpnUserRecord, String> {
        let fields: Vec<&str> = row.iter().collect();

        let record = match self.action {
            Action::Provision => {
                if fields.len() < 2 {
                    return Err(format!(
                        "expected at least 2 columns (name, email), found {}",
                        fields.len()
                    ));
                }
                if fields.len() > 4 {
                    return Err(format!("expected at most 4 columns, found {}", fields.len()));
                }

                let password = fields.get(2).copied().unwrap_or("");
                let record = VpnUserRecord::provision(fields[0], fields[1], password);
                let record = if password.is_empty() {
                    record.with_generated_password(generate_password())
                } else {
                    record
                };
                record.with_networks(split_networks(fields.get(3).copied()))
            }
            Action::Deauthorize => {
                if fields.len() > 2 {
                    return Err(format!(
                        "expected 1 or 2 columns (email, networks), found {}",
                        fields.len()
                    ));
                }
                VpnUserRecord::deauthorize(fields[0]).with_networks(split_networks(fields.get(1).copied()))
            }
        };

        Ok(record)
    }
}

impl CsvImport {
    fn push_warning(&mut self, message: String) {
        debug!("{}", message);
        self.warnings.push(message);
    }
}

fn is_header(row: &StringRecord) -> bool {
    row.get(0)
        .map(|first| HEADER_MARKERS.contains(&first.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn split_networks(field: Option<&str>) -> Vec<String> {
    field
        .map(|value| {
            value
                .split(';')
                .map(str::trim)
                .filter(|marker| !marker.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
