//! Reading letters from a spreadsheet grid.
//!
//! The first row is a header naming each column. Three columns are required:
//! `to`, `sendtime` and `template`. Every named column, required ones
//! included, becomes a template variable for the rows below it.

use tracing::{debug, warn};

use super::types::{Letter, SheetError};

const TO: &str = "to";
const SEND_TIME: &str = "sendtime";
const TEMPLATE: &str = "template";

/// Reads letters from rows of cells.
///
/// Header names are trimmed and lowercased; blank header cells are ignored.
/// Rows missing a recipient, send time or template are skipped. Variable
/// values are trimmed and kept in column order.
///
/// ## Errors
///
/// Returns `SheetError::MissingColumn` if the header lacks a required
/// column, rather than silently yielding no letters for such a sheet. An
/// empty grid yields no letters.
///
/// ## Examples
///
/// ```
/// use varsender_lib::read_letters;
///
/// let rows = vec![
///     vec!["To", "SendTime", "Template", "Name"],
///     vec!["@ivan", "2026-10-17 14:00", "#invite", " Ivan "],
///     vec!["", "2026-10-17 15:00", "#invite", "Nobody"],
/// ];
/// let letters = read_letters(&rows).unwrap();
///
/// assert_eq!(letters.len(), 1);
/// assert_eq!(letters[0].variables().get("name"), Some("Ivan"));
/// ```
pub fn read_letters<R, C>(rows: &[R]) -> Result<Vec<Letter>, SheetError>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let Some((head, body)) = rows.split_first() else {
        return Ok(Vec::new());
    };

    let columns: Vec<(usize, String)> = head
        .as_ref()
        .iter()
        .enumerate()
        .map(|(index, cell)| (index, cell.as_ref().trim().to_lowercase()))
        .filter(|(_, name)| !name.is_empty())
        .collect();

    let column = |name: &'static str| {
        columns
            .iter()
            .rev()
            .find(|(_, column)| column == name)
            .map(|(index, _)| *index)
            .ok_or(SheetError::MissingColumn(name))
    };
    let to_index = column(TO)?;
    let send_time_index = column(SEND_TIME)?;
    let template_index = column(TEMPLATE)?;

    let mut letters = Vec::new();
    for (row_number, row) in body.iter().enumerate() {
        let row = row.as_ref();
        let cell = |index: usize| row.get(index).map(|c| c.as_ref().trim()).unwrap_or("");

        let (to, send_time, template) = (cell(to_index), cell(send_time_index), cell(template_index));
        if to.is_empty() || send_time.is_empty() || template.is_empty() {
            debug!(row = row_number + 2, "skipping incomplete row");
            continue;
        }

        let mut letter = Letter::new(to, send_time, template);
        for (index, name) in &columns {
            if *index < row.len() {
                letter = letter.with_variable(name.as_str(), cell(*index));
            }
        }
        letters.push(letter);
    }

    if letters.is_empty() && !body.is_empty() {
        warn!(rows = body.len(), "no complete rows in sheet");
    }

    Ok(letters)
}
