//! Client CSV import/export
//!
//! Import: line-oriented, comma-delimited, header row required. The header
//! must carry the four required columns in any order and case; extra columns
//! are ignored. Rows are validated and inserted independently; one bad row
//! never aborts the batch.
//!
//! Export: quoted CSV with an invite URL column derived from BASE_URL.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::repository::client;
use shared::models::{ClientCreate, ClientWithGift};

/// Required header columns: (lowercase for matching, wire casing for errors)
const REQUIRED_COLUMNS: [(&str, &str); 4] = [
    ("firstname", "firstName"),
    ("lastname", "lastName"),
    ("companyname", "companyName"),
    ("email", "email"),
];

/// Why an import was rejected before any row was processed
#[derive(Debug, PartialEq, Eq)]
pub enum ImportRejection {
    /// Body empty or whitespace-only
    Empty,
    /// Header row lacks required columns (named in their wire casing)
    MissingColumns(Vec<String>),
}

/// Per-row import failure, numbered from the top of the file
/// (1-indexed, header row included)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportError {
    pub line: usize,
    pub error: &'static str,
}

/// Import result summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub created_count: usize,
    pub errors: Vec<ImportError>,
}

/// Positions of the required columns within the header row
struct HeaderIndex {
    first_name: usize,
    last_name: usize,
    company_name: usize,
    email: usize,
}

fn parse_header(line: &str) -> Result<HeaderIndex, Vec<String>> {
    let columns: Vec<String> = line
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let position = |name: &str| columns.iter().position(|c| c.as_str() == name);

    let mut missing = Vec::new();
    for (lower, original) in REQUIRED_COLUMNS {
        if position(lower).is_none() {
            missing.push(original.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(missing);
    }

    // positions exist after the check above
    Ok(HeaderIndex {
        first_name: position("firstname").unwrap_or(0),
        last_name: position("lastname").unwrap_or(0),
        company_name: position("companyname").unwrap_or(0),
        email: position("email").unwrap_or(0),
    })
}

fn field<'a>(cols: &'a [&str], idx: usize) -> Option<&'a str> {
    cols.get(idx).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Import clients from CSV text. Each valid row gets its own invite token;
/// rows are independent (no batch transaction, per the import contract).
/// A failed insert becomes a line error, never an aborted batch.
pub async fn import_clients(
    pool: &SqlitePool,
    text: &str,
) -> Result<ImportReport, ImportRejection> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .collect();

    let Some(header_line) = lines.first() else {
        return Err(ImportRejection::Empty);
    };

    let index = match parse_header(header_line) {
        Ok(index) => index,
        Err(missing) => return Err(ImportRejection::MissingColumns(missing)),
    };

    let mut created_count = 0;
    let mut errors = Vec::new();

    for (i, line) in lines.iter().enumerate().skip(1) {
        let cols: Vec<&str> = line.split(',').collect();

        let (Some(first_name), Some(last_name), Some(company_name), Some(email)) = (
            field(&cols, index.first_name),
            field(&cols, index.last_name),
            field(&cols, index.company_name),
            field(&cols, index.email),
        ) else {
            errors.push(ImportError {
                line: i + 1,
                error: "MISSING_FIELD",
            });
            continue;
        };

        let data = ClientCreate {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            company_name: company_name.to_string(),
            email: email.to_string(),
        };
        match client::create(pool, data).await {
            Ok(_) => created_count += 1,
            Err(e) => {
                tracing::warn!(line = i + 1, error = %e, "Import row failed");
                errors.push(ImportError {
                    line: i + 1,
                    error: "CREATE_FAILED",
                });
            }
        }
    }

    Ok(ImportReport {
        created_count,
        errors,
    })
}

/// Escape one CSV field: wrap in quotes, double embedded quotes.
fn escape_csv(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render all clients as CSV with an invite URL column.
/// Without a configured base URL the column falls back to the bare token.
pub fn export_csv(clients: &[ClientWithGift], base_url: &str) -> String {
    let mut out = String::from("firstName,lastName,companyName,email,inviteUrl");
    for c in clients {
        let invite_url = if base_url.is_empty() {
            c.token.clone()
        } else {
            format!("{}?t={}", base_url, c.token)
        };
        out.push('\n');
        out.push_str(
            &[
                escape_csv(&c.first_name),
                escape_csv(&c.last_name),
                escape_csv(&c.company_name),
                escape_csv(&c.email),
                escape_csv(&invite_url),
            ]
            .join(","),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::memory_pool;

    #[tokio::test]
    async fn test_import_happy_path() {
        let pool = memory_pool().await;
        let csv = "firstName,lastName,companyName,email\n\
                   Ada,Lovelace,Analytical Engines,ada@example.com\n\
                   Grace,Hopper,Navy Research,grace@example.com\n";
        let report = import_clients(&pool, csv).await.unwrap();
        assert_eq!(report.created_count, 2);
        assert!(report.errors.is_empty());

        let clients = client::find_all(&pool).await.unwrap();
        assert_eq!(clients.len(), 2);
        // every imported client got its own token
        assert_ne!(clients[0].token, clients[1].token);
    }

    #[tokio::test]
    async fn test_import_header_any_order_and_case() {
        let pool = memory_pool().await;
        let csv = "EMAIL,companyname,FirstName,lastname,notes\n\
                   ada@example.com,Analytical Engines,Ada,Lovelace,ignored\n";
        let report = import_clients(&pool, csv).await.unwrap();
        assert_eq!(report.created_count, 1);

        let clients = client::find_all(&pool).await.unwrap();
        assert_eq!(clients[0].first_name, "Ada");
        assert_eq!(clients[0].email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_import_missing_column_rejected() {
        let pool = memory_pool().await;
        let csv = "firstName,lastName,companyName\nAda,Lovelace,Engines\n";
        let rejection = import_clients(&pool, csv).await.unwrap_err();
        assert_eq!(
            rejection,
            ImportRejection::MissingColumns(vec!["email".to_string()])
        );
        assert!(client::find_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_empty_body_rejected() {
        let pool = memory_pool().await;
        let rejection = import_clients(&pool, "  \n \n").await.unwrap_err();
        assert_eq!(rejection, ImportRejection::Empty);
    }

    #[tokio::test]
    async fn test_import_partial_success_line_numbers() {
        let pool = memory_pool().await;
        // five data rows, row 3 missing email → line 4 counting the header
        let csv = "firstName,lastName,companyName,email\n\
                   A,One,Co,a@example.com\n\
                   B,Two,Co,b@example.com\n\
                   C,Three,Co,\n\
                   D,Four,Co,d@example.com\n\
                   E,Five,Co,e@example.com\n";
        let report = import_clients(&pool, csv).await.unwrap();
        assert_eq!(report.created_count, 4);
        assert_eq!(
            report.errors,
            vec![ImportError {
                line: 4,
                error: "MISSING_FIELD"
            }]
        );

        // the four valid rows are persisted and retrievable by token
        let clients = client::find_all(&pool).await.unwrap();
        assert_eq!(clients.len(), 4);
        for c in &clients {
            let found = client::find_by_token(&pool, &c.token).await.unwrap();
            assert!(found.is_some());
        }
    }

    #[tokio::test]
    async fn test_import_skips_blank_lines() {
        let pool = memory_pool().await;
        let csv = "firstName,lastName,companyName,email\n\n\
                   Ada,Lovelace,Engines,ada@example.com\n\n";
        let report = import_clients(&pool, csv).await.unwrap();
        assert_eq!(report.created_count, 1);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_export_escapes_and_links() {
        let client = ClientWithGift {
            id: "c1".into(),
            token: "deadbeef".into(),
            first_name: "Ada \"The Countess\"".into(),
            last_name: "Lovelace".into(),
            company_name: "Engines, Ltd".into(),
            email: "ada@example.com".into(),
            selected_gift_id: None,
            selected_gift_title: None,
            selected_at: None,
            created_at: 0,
            updated_at: 0,
        };

        let csv = export_csv(&[client.clone()], "https://gifts.example.com");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("firstName,lastName,companyName,email,inviteUrl")
        );
        let row = lines.next().unwrap();
        assert!(row.contains(r#""Ada ""The Countess""""#));
        assert!(row.contains(r#""Engines, Ltd""#));
        assert!(row.contains(r#""https://gifts.example.com?t=deadbeef""#));

        // no base URL configured → bare token
        let csv = export_csv(&[client], "");
        assert!(csv.lines().nth(1).unwrap().contains(r#""deadbeef""#));
    }
}
