//! Header handling for uploaded name files.

use crate::error::DatasetError;

pub const NAME_COLUMN: &str = "family_name";

/// How the name column of a file was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnResolution {
    /// A `family_name` header was present at this index
    Named(usize),
    /// Single-column file with some other header, taken as the name column
    SingleColumnFallback,
}

impl ColumnResolution {
    pub fn index(&self) -> usize {
        match self {
            Self::Named(i) => *i,
            Self::SingleColumnFallback => 0,
        }
    }
}

/// Locate the family-name column.
///
/// Policy: an exact `family_name` header wins (surrounding whitespace and
/// a UTF-8 BOM are ignored); otherwise a single-column file is accepted as-is;
/// anything else is rejected.
pub fn resolve_name_column(headers: &[String]) -> Result<ColumnResolution, DatasetError> {
    if let Some(idx) = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == NAME_COLUMN)
    {
        return Ok(ColumnResolution::Named(idx));
    }
    if headers.len() == 1 {
        log::info!(
            "treating single column {:?} as `{}`",
            headers[0],
            NAME_COLUMN
        );
        return Ok(ColumnResolution::SingleColumnFallback);
    }
    Err(DatasetError::MissingColumn {
        expected: NAME_COLUMN,
        found: headers.to_vec(),
    })
}
