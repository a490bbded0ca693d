//! Command definitions
//!
//! Typed commands and their textual wire encoding.
//!
//! Each command encodes to one text line (or a newline-joined pair of
//! lines for compound operations). Field names and sentinels are fixed by
//! the server's grammar: text values are double-quoted, blank fields are
//! encoded as the bare token `NULO` in updates and simply omitted from
//! queries, and an unset age is `-1` on the wire.
//!
//! Known limitation: embedded double quotes in text values are not
//! escaped, so a value containing `"` corrupts the command.

/// Wire token for an unset text field in update commands
pub const NULL_TOKEN: &str = "NULO";

/// Query filter: only present fields are emitted
///
/// Field order on the wire is fixed: id, idade, nomeJogador,
/// nacionalidade, nomeClube.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub id: Option<i32>,
    pub age: Option<i32>,
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub club: Option<String>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }

    pub fn club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.age.is_none()
            && self.name.is_none()
            && self.nationality.is_none()
            && self.club.is_none()
    }
}

/// Replacement values for an update command
///
/// `None` fields encode as the wire sentinels: `-1` for age, `NULO` for
/// text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub id: i32,
    pub age: Option<i32>,
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub club: Option<String>,
}

impl PlayerUpdate {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            age: None,
            name: None,
            nationality: None,
            club: None,
        }
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }

    pub fn club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }
}

/// A server command
///
/// Immutable once built; exists for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Opcode 1: create a binary store from a source CSV file
    CreateStore { store: String },

    /// Opcode 2: list all records in a store
    ListAll { store: String },

    /// Opcode 3: filtered query
    Query { store: String, filter: QueryFilter },

    /// Opcode 5: delete one record by id
    DeleteById { store: String, id: i32 },

    /// Opcode 6: update one record (full replace)
    Update { store: String, fields: PlayerUpdate },
}

impl Command {
    /// The leading integer selecting the server operation
    pub fn opcode(&self) -> u8 {
        match self {
            Command::CreateStore { .. } => 1,
            Command::ListAll { .. } => 2,
            Command::Query { .. } => 3,
            Command::DeleteById { .. } => 5,
            Command::Update { .. } => 6,
        }
    }

    /// Encode the command to its exact wire text
    ///
    /// Deterministic: the same inputs always produce byte-identical text.
    pub fn encode(&self) -> String {
        match self {
            Command::CreateStore { store } => {
                format!("1 {store}.csv {store}.bin")
            }
            Command::ListAll { store } => {
                format!("2 {store}.bin")
            }
            Command::Query { store, filter } => encode_query(store, filter),
            Command::DeleteById { store, id } => {
                format!("5 {store}.bin {store}Indice.bin 1\n1 id {id}")
            }
            Command::Update { store, fields } => encode_update(store, fields),
        }
    }
}

/// Encode a filtered query
///
/// Second line is `<count>` followed by a space and the space-separated
/// field/value pairs; the count always equals the number of emitted
/// fields. Text values are trimmed and double-quoted, numeric values are
/// bare.
fn encode_query(store: &str, filter: &QueryFilter) -> String {
    let mut field_count = 0;
    let mut fields = String::new();

    let mut push = |fields: &mut String, count: &mut usize, token: String| {
        if *count > 0 {
            fields.push(' ');
        }
        fields.push_str(&token);
        *count += 1;
    };

    if let Some(id) = filter.id {
        push(&mut fields, &mut field_count, format!("id {id}"));
    }
    if let Some(age) = filter.age {
        push(&mut fields, &mut field_count, format!("idade {age}"));
    }
    if let Some(name) = &filter.name {
        push(
            &mut fields,
            &mut field_count,
            format!("nomeJogador \"{}\"", name.trim()),
        );
    }
    if let Some(nationality) = &filter.nationality {
        push(
            &mut fields,
            &mut field_count,
            format!("nacionalidade \"{}\"", nationality.trim()),
        );
    }
    if let Some(club) = &filter.club {
        push(
            &mut fields,
            &mut field_count,
            format!("nomeClube \"{}\"", club.trim()),
        );
    }

    format!("3 {store}.bin 1\n{field_count} {fields}")
}

/// Encode an update (full replace)
fn encode_update(store: &str, fields: &PlayerUpdate) -> String {
    let age = match fields.age {
        Some(age) => age.to_string(),
        None => "-1".to_string(),
    };
    format!(
        "6 {store}.bin {store}Indice.bin 1\n{} {} {} {} {}",
        fields.id,
        age,
        quote_or_null(fields.name.as_deref()),
        quote_or_null(fields.nationality.as_deref()),
        quote_or_null(fields.club.as_deref()),
    )
}

/// `Some` values are double-quoted, `None` is the bare `NULO` token
fn quote_or_null(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("\"{value}\""),
        None => NULL_TOKEN.to_string(),
    }
}
