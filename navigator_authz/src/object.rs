use std::fmt;

/// Action is the type of operation being attempted on an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// The select action is used when the data contained by an object will
    /// be read.
    Select,
    /// The insert action is used when data is being written to the object.
    Insert,
    /// The all action stands for every privilege on the object at once.
    All,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::All => write!(f, "ALL"),
        }
    }
}

/// Coordinates of the object an authorization decision is about.
///
/// The fields follow the SQL object hierarchy. A key with every field unset
/// describes an object outside that hierarchy; implementations are expected
/// to allow those unless they have their own reason not to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectKey {
    /// Column name, when the decision is about a single column.
    pub column: Option<String>,
    /// Table name.
    pub table: Option<String>,
    /// Database the table belongs to.
    pub db: Option<String>,
    /// Identity of the privilege service instance governing the object.
    pub server: Option<String>,
}

impl ObjectKey {
    /// Key for a table-level decision.
    pub fn table(
        table: impl Into<String>,
        db: impl Into<String>,
        server: Option<String>,
    ) -> Self {
        Self {
            column: None,
            table: Some(table.into()),
            db: Some(db.into()),
            server,
        }
    }

    /// Key for an object that sits outside the SQL hierarchy.
    pub fn unrestricted() -> Self {
        Self::default()
    }
}
