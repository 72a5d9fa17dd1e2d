use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::{
    db::{helpers::parse_datetime, models::Coffee, Database},
    error::ReviewError,
};

pub struct CoffeeRepository<'a> {
    conn: &'a Connection,
}

fn row_to_coffee(row: &Row) -> Result<Coffee> {
    let created_at: String = row.get("created_at")?;
    Ok(Coffee {
        id: row.get("id")?,
        name: row.get("name")?,
        roast: row.get("roast")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl<'a> CoffeeRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a coffee record. Empty name or roast is rejected.
    pub fn create(&self, name: &str, roast: &str) -> Result<Coffee> {
        let name = name.trim();
        let roast = roast.trim();
        if name.is_empty() {
            return Err(ReviewError::Validation("coffee name must not be empty".into()).into());
        }
        if roast.is_empty() {
            return Err(ReviewError::Validation("coffee roast must not be empty".into()).into());
        }

        let coffee = Coffee {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            roast: roast.to_string(),
            created_at: Utc::now(),
        };

        self.conn.execute(
            "INSERT INTO coffees (id, name, roast, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                coffee.id,
                coffee.name,
                coffee.roast,
                coffee.created_at.to_rfc3339(),
            ],
        )?;

        Ok(coffee)
    }

    /// All coffees, newest first. An empty list is a valid state; the UI
    /// offers the new-coffee form as the path out of it.
    pub fn list(&self) -> Result<Vec<Coffee>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, roast, created_at
             FROM coffees
             ORDER BY created_at DESC",
        )?;

        let mut rows = stmt.query([])?;
        let mut coffees = Vec::new();
        while let Some(row) = rows.next()? {
            coffees.push(row_to_coffee(row)?);
        }

        Ok(coffees)
    }

    /// The coffee's name if the id exists.
    pub fn name_for(&self, id: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT name FROM coffees WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }
}

// Database async wrappers for coffee operations
impl Database {
    pub async fn create_coffee(&self, name: String, roast: String) -> Result<Coffee> {
        self.execute(move |conn| CoffeeRepository::new(conn).create(&name, &roast))
            .await
    }

    pub async fn list_coffees(&self) -> Result<Vec<Coffee>> {
        self.execute(|conn| CoffeeRepository::new(conn).list())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn test_conn() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn create_and_list_round_trips() {
        let conn = test_conn();
        let repo = CoffeeRepository::new(&conn);

        let created = repo.create("Kiamugumo AB", "light").unwrap();
        let listed = repo.list().unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].name, "Kiamugumo AB");
        assert_eq!(listed[0].roast, "light");
    }

    #[test]
    fn empty_name_or_roast_is_rejected() {
        let conn = test_conn();
        let repo = CoffeeRepository::new(&conn);

        assert!(repo.create("", "light").is_err());
        assert!(repo.create("   ", "light").is_err());
        assert!(repo.create("Gesha", "").is_err());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn name_for_returns_none_for_unknown_id() {
        let conn = test_conn();
        let repo = CoffeeRepository::new(&conn);

        let created = repo.create("Yirgacheffe", "medium").unwrap();
        assert_eq!(
            repo.name_for(&created.id).unwrap().as_deref(),
            Some("Yirgacheffe")
        );
        assert_eq!(repo.name_for("missing").unwrap(), None);
    }
}
