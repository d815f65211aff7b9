//! Item records and the projections between them
//!
//! ```text
//! JSON body --TryFrom--> ItemCreate --From--> NewItem --INSERT--> row
//! row --Item::from_row--> Item --From--> ItemRead --> JSON response
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::ValidationError;

/// Stored item, as read back from the `items` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Item {
    pub fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        })
    }
}

/// Item about to be stored; the id is assigned on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
}

impl From<ItemCreate> for NewItem {
    fn from(input: ItemCreate) -> Self {
        Self {
            name: input.name,
            description: input.description,
        }
    }
}

/// Create-item request body
///
/// Callers cannot choose the id; an `id` key is ignored along with any other
/// unknown key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCreate {
    pub name: String,
    pub description: Option<String>,
}

impl TryFrom<Value> for ItemCreate {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err(ValidationError::NotAnObject);
        };

        let name = match fields.remove("name") {
            Some(Value::String(name)) => name,
            None => return Err(ValidationError::Missing { field: "name" }),
            Some(_) => {
                return Err(ValidationError::InvalidType {
                    field: "name",
                    expected: "string",
                })
            }
        };

        let description = match fields.remove("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(description)) => Some(description),
            Some(_) => {
                return Err(ValidationError::InvalidType {
                    field: "description",
                    expected: "string",
                })
            }
        };

        Ok(Self { name, description })
    }
}

/// Item response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRead {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Item> for ItemRead {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
        }
    }
}
