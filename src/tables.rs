//! Output record types and their column contracts.
//!
//! Each table's `COLUMNS` is the header written to its file. The serde field
//! order of the record must list the same names in the same order; the
//! writer checks this before it writes anything.

use serde::{Deserialize, Serialize};

/// A table of the target schema, one CSV file per table.
pub trait Table: Serialize + Default {
    /// File stem, `Actor` is written to `Actor.csv`.
    const NAME: &'static str;
    const COLUMNS: &'static [&'static str];
}

pub const ACTOR_TYPE_CITY: &str = "city";
pub const UNDETERMINED_LANGUAGE: &str = "und";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Publisher {
    pub id: String,
    pub name: String,
    #[serde(rename = "URL")]
    pub url: String,
}

impl Table for Publisher {
    const NAME: &'static str = "Publisher";
    const COLUMNS: &'static [&'static str] = &["id", "name", "URL"];
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSource {
    pub datasource_id: String,
    pub name: String,
    pub publisher: String,
    pub published: String,
    #[serde(rename = "URL")]
    pub url: String,
}

impl Table for DataSource {
    const NAME: &'static str = "DataSource";
    const COLUMNS: &'static [&'static str] =
        &["datasource_id", "name", "publisher", "published", "URL"];
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Actor {
    pub actor_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub is_part_of: String,
    pub datasource_id: String,
}

impl Table for Actor {
    const NAME: &'static str = "Actor";
    const COLUMNS: &'static [&'static str] =
        &["actor_id", "type", "name", "is_part_of", "datasource_id"];
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ActorName {
    pub actor_id: String,
    pub name: String,
    pub language: String,
    pub preferred: u8,
    pub datasource_id: String,
}

impl Table for ActorName {
    const NAME: &'static str = "ActorName";
    const COLUMNS: &'static [&'static str] =
        &["actor_id", "name", "language", "preferred", "datasource_id"];
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Territory {
    pub actor_id: String,
    pub lat: i32,
    pub lng: i32,
    pub datasource_id: String,
}

impl Table for Territory {
    const NAME: &'static str = "Territory";
    const COLUMNS: &'static [&'static str] = &["actor_id", "lat", "lng", "datasource_id"];
}
