use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::{
    db::{helpers::parse_datetime, models::Cafe, Database},
    error::ReviewError,
};

pub struct CafeRepository<'a> {
    conn: &'a Connection,
}

fn row_to_cafe(row: &Row) -> Result<Cafe> {
    let created_at: String = row.get("created_at")?;
    Ok(Cafe {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl<'a> CafeRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, name: &str) -> Result<Cafe> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ReviewError::Validation("cafe name must not be empty".into()).into());
        }

        let cafe = Cafe {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        self.conn.execute(
            "INSERT INTO cafes (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![cafe.id, cafe.name, cafe.created_at.to_rfc3339()],
        )?;

        Ok(cafe)
    }

    pub fn list(&self) -> Result<Vec<Cafe>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, created_at
             FROM cafes
             ORDER BY created_at DESC",
        )?;

        let mut rows = stmt.query([])?;
        let mut cafes = Vec::new();
        while let Some(row) = rows.next()? {
            cafes.push(row_to_cafe(row)?);
        }

        Ok(cafes)
    }

    pub fn name_for(&self, id: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT name FROM cafes WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }
}

// Database async wrappers for cafe operations
impl Database {
    pub async fn create_cafe(&self, name: String) -> Result<Cafe> {
        self.execute(move |conn| CafeRepository::new(conn).create(&name))
            .await
    }

    pub async fn list_cafes(&self) -> Result<Vec<Cafe>> {
        self.execute(|conn| CafeRepository::new(conn).list()).await
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
        let repo = CafeRepository::new(&conn);

        repo.create("Sey").unwrap();
        repo.create("La Cabra").unwrap();

        let names: Vec<String> = repo.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Sey".to_string()));
        assert!(names.contains(&"La Cabra".to_string()));
    }

    #[test]
    fn empty_name_is_rejected() {
        let conn = test_conn();
        let repo = CafeRepository::new(&conn);

        assert!(repo.create("  ").is_err());
        assert!(repo.list().unwrap().is_empty());
    }
}
