use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Transaction};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::entities::Person;
use crate::storage::{AdaptedPerson, AdaptedWeight};

// ============================================================================
// EVENTS (append-only audit trail)
// ============================================================================

/// Something that happened to an entity, kept forever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: String,
    pub data: serde_json::Value,
    pub actor: String,
}

impl Event {
    pub fn new(
        event_type: &str,
        entity_type: &str,
        entity_id: &str,
        data: serde_json::Value,
        actor: &str,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type: event_type.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            data,
            actor: actor.to_string(),
        }
    }

    /// Event about one person, keyed by name, carrying the weight history
    /// as it stands after the change.
    pub fn for_person(event_type: &str, person: &Person, data: serde_json::Value, actor: &str) -> Self {
        let history: Vec<&str> = person.weight_history().iter().map(|w| w.as_str()).collect();
        let mut data = data;
        if let serde_json::Value::Object(fields) = &mut data {
            fields.insert("weights".to_string(), serde_json::json!(history));
        }
        Self::new(event_type, PERSON_ENTITY_TYPE, person.name(), data, actor)
    }
}

pub const PERSON_ENTITY_TYPE: &str = "person";

// ============================================================================
// SCHEMA
// ============================================================================

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Persons Table
    // weights/tags are JSON arrays of strings, validated again on load
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS persons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            height TEXT NOT NULL,
            weight TEXT NOT NULL,
            gender TEXT NOT NULL,
            age TEXT NOT NULL,
            weights TEXT NOT NULL,
            tags TEXT NOT NULL,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Events Table (audit trail)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id TEXT UNIQUE NOT NULL,
            timestamp TEXT NOT NULL,
            event_type TEXT NOT NULL,
            entity_type TEXT NOT NULL,
            entity_id TEXT NOT NULL,
            data TEXT NOT NULL,
            actor TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_persons_position ON persons(position)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_entity ON events(entity_type, entity_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events(timestamp)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// ADDRESS BOOK
// ============================================================================

/// Replace the stored address book with `persons`, keeping their order.
/// Runs in one SQL transaction, so a failure leaves the old rows in place.
pub fn save_address_book(conn: &mut Connection, persons: &[Person]) -> Result<usize> {
    let tx = conn.transaction()?;
    let saved = write_persons(&tx, persons)?;
    tx.commit()?;
    debug!(count = saved, "Saved address book");

    Ok(saved)
}

/// Rows-only part of `save_address_book`, for callers that already hold a
/// transaction.
pub(crate) fn write_persons(tx: &Transaction, persons: &[Person]) -> Result<usize> {
    tx.execute("DELETE FROM persons", [])?;

    for (position, person) in persons.iter().enumerate() {
        let adapted = AdaptedPerson::from(person);
        let weights_json = serde_json::to_string(&adapted.weights)?;
        let tags_json = serde_json::to_string(&adapted.tags)?;

        tx.execute(
            "INSERT INTO persons (
                position, name, phone, email, address, height, weight, gender, age,
                weights, tags
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                position as i64,
                adapted.name,
                adapted.phone,
                adapted.email,
                adapted.address,
                adapted.height,
                adapted.weight,
                adapted.gender,
                adapted.age,
                weights_json,
                tags_json,
            ],
        )?;
    }

    Ok(persons.len())
}

/// Load every stored person. One invalid value fails the whole load.
pub fn load_address_book(conn: &Connection) -> Result<Vec<Person>> {
    let mut stmt = conn.prepare(
        "SELECT name, phone, email, address, height, weight, gender, age, weights, tags
         FROM persons
         ORDER BY position ASC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            let adapted = AdaptedPerson {
                name: row.get(0)?,
                phone: row.get(1)?,
                email: row.get(2)?,
                address: row.get(3)?,
                height: row.get(4)?,
                weight: row.get(5)?,
                gender: row.get(6)?,
                age: row.get(7)?,
                weights: Vec::new(),
                tags: Vec::new(),
            };
            let weights_json: String = row.get(8)?;
            let tags_json: String = row.get(9)?;
            Ok((adapted, weights_json, tags_json))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut persons = Vec::with_capacity(rows.len());
    for (position, (mut adapted, weights_json, tags_json)) in rows.into_iter().enumerate() {
        adapted.weights = serde_json::from_str::<Vec<AdaptedWeight>>(&weights_json)
            .with_context(|| format!("Malformed weights for person #{}", position + 1))?;
        adapted.tags = serde_json::from_str::<Vec<String>>(&tags_json)
            .with_context(|| format!("Malformed tags for person #{}", position + 1))?;

        let person = adapted
            .to_model_type()
            .with_context(|| format!("Illegal value for person #{} ({})", position + 1, adapted.name))?;
        if persons.contains(&person) {
            bail!(
                "Address book should not have duplicate persons: person #{} ({}) repeats an earlier entry",
                position + 1,
                person.name()
            );
        }
        persons.push(person);
    }

    Ok(persons)
}

pub fn count_persons(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM persons", [], |row| row.get(0))?;

    Ok(count)
}

// ============================================================================
// CSV IMPORT
// ============================================================================

/// One row of an import file. Weights and Tags are `;`-separated.
#[derive(Debug, Deserialize)]
struct CsvPerson {
    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Phone")]
    phone: String,

    #[serde(rename = "Email")]
    email: String,

    #[serde(rename = "Address")]
    address: String,

    #[serde(rename = "Height")]
    height: String,

    #[serde(rename = "Weight")]
    weight: String,

    #[serde(rename = "Gender")]
    gender: String,

    #[serde(rename = "Age")]
    age: String,

    #[serde(rename = "Weights", default)]
    weights: String,

    #[serde(rename = "Tags", default)]
    tags: String,
}

impl From<CsvPerson> for AdaptedPerson {
    fn from(row: CsvPerson) -> Self {
        let split = |field: &str| -> Vec<String> {
            field
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };

        AdaptedPerson {
            weights: split(&row.weights).into_iter().map(AdaptedWeight::new).collect(),
            tags: split(&row.tags),
            name: row.name,
            phone: row.phone,
            email: row.email,
            address: row.address,
            height: row.height,
            weight: row.weight,
            gender: row.gender,
            age: row.age,
        }
    }
}

pub fn load_csv(csv_path: &Path) -> Result<Vec<Person>> {
    let rdr = csv::Reader::from_path(csv_path).context("Failed to open CSV file")?;
    load_csv_from_reader(rdr)
}

fn load_csv_from_reader<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Person>> {
    let mut persons = Vec::new();

    for (line, result) in rdr.deserialize().enumerate() {
        let row: CsvPerson = result.context("Failed to deserialize person")?;
        let person = AdaptedPerson::from(row)
            .to_model_type()
            // +2: header line, 1-based
            .with_context(|| format!("Illegal value on CSV line {}", line + 2))?;
        persons.push(person);
    }

    info!(count = persons.len(), "Loaded persons from CSV");
    Ok(persons)
}

// ============================================================================
// EVENT LOG
// ============================================================================

/// Insert event into audit trail
pub fn insert_event(conn: &Connection, event: &Event) -> Result<()> {
    let data_json = serde_json::to_string(&event.data)?;

    conn.execute(
        "INSERT INTO events (
            event_id, timestamp, event_type, entity_type, entity_id, data, actor
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event.event_id,
            event.timestamp.to_rfc3339(),
            event.event_type,
            event.entity_type,
            event.entity_id,
            data_json,
            event.actor,
        ],
    )?;

    Ok(())
}

/// Get events for a specific entity, newest first
pub fn get_events_for_entity(
    conn: &Connection,
    entity_type: &str,
    entity_id: &str,
) -> Result<Vec<Event>> {
    let mut stmt = conn.prepare(
        "SELECT event_id, timestamp, event_type, entity_type, entity_id, data, actor
         FROM events
         WHERE entity_type = ?1 AND entity_id = ?2
         ORDER BY timestamp DESC",
    )?;

    let events = stmt
        .query_map(params![entity_type, entity_id], row_to_event)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(events)
}

/// Most recent events across all entities, newest first
pub fn get_recent_events(conn: &Connection, limit: usize) -> Result<Vec<Event>> {
    let mut stmt = conn.prepare(
        "SELECT event_id, timestamp, event_type, entity_type, entity_id, data, actor
         FROM events
         ORDER BY id DESC
         LIMIT ?1",
    )?;

    let events = stmt
        .query_map(params![limit as i64], row_to_event)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(events)
}

fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<Event> {
    let timestamp_str: String = row.get(1)?;
    let data_json: String = row.get(5)?;

    Ok(Event {
        event_id: row.get(0)?,
        timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
            })?
            .with_timezone(&Utc),
        event_type: row.get(2)?,
        entity_type: row.get(3)?,
        entity_id: row.get(4)?,
        data: serde_json::from_str(&data_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?,
        actor: row.get(6)?,
    })
}
