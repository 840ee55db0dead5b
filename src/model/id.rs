use serde::{Deserialize, Serialize};

/// Identifier for a column (a status code) or an item (a record).
///
/// ERP status codes are sometimes numeric (`po_status_id = 3`) and sometimes
/// textual (`requisition_status = "approved"`), so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Num(i64),
    Text(String),
}

impl Id {
    /// The numeric value, if this is a numeric id
    pub fn as_num(&self) -> Option<i64> {
        match self {
            Id::Num(n) => Some(*n),
            Id::Text(_) => None,
        }
    }

    /// Id typed by a user, e.g. on the command line
    pub fn from_input(s: &str) -> Id {
        match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Id::Num(n) => write!(f, "{}", n),
            Id::Text(s) => write!(f, "{}", s),
        }
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    /// Text that parses as an integer becomes `Id::Num`; anything else is kept as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(n) => Id::Num(n),
            Err(_) => Id::Text(s.to_string()),
        })
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Num(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Text(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::Text(s)
    }
}
