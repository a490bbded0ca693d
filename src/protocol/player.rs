//! Player record
//!
//! The value object decoded from record-list responses.

/// Age sentinel produced by the decoder for a `"null"` wire value
pub const AGE_UNSET: i32 = 0;

/// A player record
///
/// Decoded from one payload fragment. Unset text fields decode to empty
/// strings and an unset age decodes to [`AGE_UNSET`]; records are replaced
/// wholesale on update, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Record identifier (required)
    pub id: i32,

    /// Age in years; [`AGE_UNSET`] when the server sent `"null"`
    pub age: i32,

    /// Player name; empty when unset
    pub name: String,

    /// Nationality; empty when unset
    pub nationality: String,

    /// Club name; empty when unset
    pub club: String,
}

impl Player {
    pub fn new(
        id: i32,
        age: i32,
        name: impl Into<String>,
        nationality: impl Into<String>,
        club: impl Into<String>,
    ) -> Self {
        Self {
            id,
            age,
            name: name.into(),
            nationality: nationality.into(),
            club: club.into(),
        }
    }

    /// Render the record as one CSV row (unset age renders empty)
    pub fn to_csv_row(&self) -> String {
        let age = if self.age == AGE_UNSET {
            String::new()
        } else {
            self.age.to_string()
        };
        format!(
            "{},{},{},{},{}",
            self.id, age, self.name, self.nationality, self.club
        )
    }
}
