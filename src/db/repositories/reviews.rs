use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::{
    db::{
        helpers::{parse_datetime, to_rating},
        models::{Brew, Review, ReviewScores, ReviewSubmission},
        repositories::{cafes::CafeRepository, coffees::CoffeeRepository},
        Database,
    },
    error::ReviewError,
};

pub struct ReviewRepository<'a> {
    conn: &'a Connection,
}

fn row_to_review(row: &Row) -> Result<Review> {
    let scores = ReviewScores {
        aroma_quality: to_rating(row.get("aroma_quality")?, "aroma_quality")?,
        aroma_intensity: to_rating(row.get("aroma_intensity")?, "aroma_intensity")?,
        acidity_quality: to_rating(row.get("acidity_quality")?, "acidity_quality")?,
        acidity_intensity: to_rating(row.get("acidity_intensity")?, "acidity_intensity")?,
        sweetness_quality: to_rating(row.get("sweetness_quality")?, "sweetness_quality")?,
        sweetness_intensity: to_rating(row.get("sweetness_intensity")?, "sweetness_intensity")?,
        body_quality: to_rating(row.get("body_quality")?, "body_quality")?,
        body_intensity: to_rating(row.get("body_intensity")?, "body_intensity")?,
        finish_quality: to_rating(row.get("finish_quality")?, "finish_quality")?,
        finish_intensity: to_rating(row.get("finish_intensity")?, "finish_intensity")?,
        overall_score: to_rating(row.get("overall_score")?, "overall_score")?,
        brew: Brew::parse(&row.get::<_, String>("brew")?)?,
        flavor_notes: row.get("flavor_notes")?,
    };

    let review_type: String = row.get("review_type")?;
    let submission = match review_type.as_str() {
        "home" => ReviewSubmission::Home {
            coffee_id: row.get("coffee_id")?,
            scores,
        },
        "cafe" => ReviewSubmission::Cafe {
            cafe_id: row.get("cafe_id")?,
            scores,
        },
        other => {
            return Err(ReviewError::Validation(format!(
                "unknown review type '{other}' in database"
            ))
            .into())
        }
    };

    let created_at: String = row.get("created_at")?;
    Ok(Review {
        id: row.get("id")?,
        submission,
        location_name: row.get("location_name")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl<'a> ReviewRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persist a completed submission. Rejects out-of-range ratings and
    /// references to coffees/cafes that do not exist; the schema CHECK is the
    /// final backstop for the exactly-one-id invariant.
    pub fn create(&self, submission: &ReviewSubmission) -> Result<Review> {
        let scores = submission.scores();
        for (field, value) in scores.rating_fields() {
            if !(1..=10).contains(&value) {
                return Err(ReviewError::Validation(format!(
                    "{field} must be between 1 and 10, got {value}"
                ))
                .into());
            }
        }

        let location_name = match submission {
            ReviewSubmission::Home { coffee_id, .. } => CoffeeRepository::new(self.conn)
                .name_for(coffee_id)?
                .ok_or_else(|| {
                    ReviewError::Validation(format!("unknown coffee id '{coffee_id}'"))
                })?,
            ReviewSubmission::Cafe { cafe_id, .. } => CafeRepository::new(self.conn)
                .name_for(cafe_id)?
                .ok_or_else(|| {
                    ReviewError::Validation(format!("unknown cafe id '{cafe_id}'"))
                })?,
        };

        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        self.conn.execute(
            "INSERT INTO reviews (
                 id, review_type, coffee_id, cafe_id, brew,
                 aroma_quality, aroma_intensity,
                 acidity_quality, acidity_intensity,
                 sweetness_quality, sweetness_intensity,
                 body_quality, body_intensity,
                 finish_quality, finish_intensity,
                 overall_score, flavor_notes, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                id,
                submission.type_str(),
                submission.coffee_id(),
                submission.cafe_id(),
                scores.brew.as_str(),
                scores.aroma_quality,
                scores.aroma_intensity,
                scores.acidity_quality,
                scores.acidity_intensity,
                scores.sweetness_quality,
                scores.sweetness_intensity,
                scores.body_quality,
                scores.body_intensity,
                scores.finish_quality,
                scores.finish_intensity,
                scores.overall_score,
                scores.flavor_notes,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(Review {
            id,
            submission: submission.clone(),
            location_name: Some(location_name),
            created_at,
        })
    }

    /// All reviews, newest first, with the referenced coffee/café name
    /// joined in for display.
    pub fn list(&self) -> Result<Vec<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.id, r.review_type, r.coffee_id, r.cafe_id, r.brew,
                    r.aroma_quality, r.aroma_intensity,
                    r.acidity_quality, r.acidity_intensity,
                    r.sweetness_quality, r.sweetness_intensity,
                    r.body_quality, r.body_intensity,
                    r.finish_quality, r.finish_intensity,
                    r.overall_score, r.flavor_notes, r.created_at,
                    COALESCE(co.name, ca.name) AS location_name
             FROM reviews r
             LEFT JOIN coffees co ON co.id = r.coffee_id
             LEFT JOIN cafes ca ON ca.id = r.cafe_id
             ORDER BY r.created_at DESC",
        )?;

        let mut rows = stmt.query([])?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next()? {
            reviews.push(row_to_review(row)?);
        }

        Ok(reviews)
    }
}

// Database async wrappers for review operations
impl Database {
    pub async fn create_review(&self, submission: ReviewSubmission) -> Result<Review> {
        self.execute(move |conn| ReviewRepository::new(conn).create(&submission))
            .await
    }

    pub async fn list_reviews(&self) -> Result<Vec<Review>> {
        self.execute(|conn| ReviewRepository::new(conn).list())
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

    fn scores(brew: Brew) -> ReviewScores {
        ReviewScores {
            aroma_quality: 7,
            aroma_intensity: 4,
            acidity_quality: 6,
            acidity_intensity: 8,
            sweetness_quality: 5,
            sweetness_intensity: 5,
            body_quality: 6,
            body_intensity: 3,
            finish_quality: 8,
            finish_intensity: 7,
            overall_score: 7,
            brew,
            flavor_notes: Some("dried apricot".to_string()),
        }
    }

    #[test]
    fn home_review_round_trips_with_coffee_name() {
        let conn = test_conn();
        let coffee = CoffeeRepository::new(&conn)
            .create("Nano Challa", "light")
            .unwrap();

        let created = ReviewRepository::new(&conn)
            .create(&ReviewSubmission::Home {
                coffee_id: coffee.id.clone(),
                scores: scores(Brew::Espresso),
            })
            .unwrap();
        assert_eq!(created.location_name.as_deref(), Some("Nano Challa"));

        let listed = ReviewRepository::new(&conn).list().unwrap();
        assert_eq!(listed.len(), 1);
        let review = &listed[0];
        assert_eq!(review.submission.type_str(), "home");
        assert_eq!(review.submission.coffee_id(), Some(coffee.id.as_str()));
        assert_eq!(review.submission.cafe_id(), None);
        assert_eq!(review.submission.scores(), &scores(Brew::Espresso));
        assert_eq!(review.location_name.as_deref(), Some("Nano Challa"));
    }

    #[test]
    fn cafe_review_round_trips_with_cafe_name() {
        let conn = test_conn();
        let cafe = CafeRepository::new(&conn).create("Tim Wendelboe").unwrap();

        ReviewRepository::new(&conn)
            .create(&ReviewSubmission::Cafe {
                cafe_id: cafe.id.clone(),
                scores: scores(Brew::Coldbrew),
            })
            .unwrap();

        let listed = ReviewRepository::new(&conn).list().unwrap();
        assert_eq!(listed[0].submission.cafe_id(), Some(cafe.id.as_str()));
        assert_eq!(listed[0].submission.coffee_id(), None);
        assert_eq!(listed[0].location_name.as_deref(), Some("Tim Wendelboe"));
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let conn = test_conn();
        let coffee = CoffeeRepository::new(&conn)
            .create("Finca Deborah", "light")
            .unwrap();

        let mut bad = scores(Brew::MokaPot);
        bad.body_intensity = 11;

        let err = ReviewRepository::new(&conn)
            .create(&ReviewSubmission::Home {
                coffee_id: coffee.id,
                scores: bad,
            })
            .unwrap_err();
        let err = err.downcast::<ReviewError>().unwrap();
        assert!(matches!(err, ReviewError::Validation(_)));

        let mut bad = scores(Brew::MokaPot);
        bad.overall_score = 0;
        assert!(ReviewRepository::new(&conn)
            .create(&ReviewSubmission::Cafe {
                cafe_id: "irrelevant".to_string(),
                scores: bad,
            })
            .is_err());

        assert!(ReviewRepository::new(&conn).list().unwrap().is_empty());
    }

    #[test]
    fn schema_rejects_out_of_range_ratings_written_directly() {
        let conn = test_conn();
        let coffee = CoffeeRepository::new(&conn)
            .create("Los Rodriguez", "medium")
            .unwrap();

        // Bypass the repository to confirm the CHECK backstop holds.
        let result = conn.execute(
            "INSERT INTO reviews (
                 id, review_type, coffee_id, cafe_id, brew,
                 aroma_quality, aroma_intensity,
                 acidity_quality, acidity_intensity,
                 sweetness_quality, sweetness_intensity,
                 body_quality, body_intensity,
                 finish_quality, finish_intensity,
                 overall_score, flavor_notes, created_at
             ) VALUES (?1, 'home', ?2, NULL, 'Espresso',
                 99, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, NULL, ?3)",
            params![
                Uuid::new_v4().to_string(),
                coffee.id,
                Utc::now().to_rfc3339(),
            ],
        );

        assert!(result.is_err());
        assert!(ReviewRepository::new(&conn).list().unwrap().is_empty());
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let conn = test_conn();

        let err = ReviewRepository::new(&conn)
            .create(&ReviewSubmission::Home {
                coffee_id: "no-such-coffee".to_string(),
                scores: scores(Brew::Frenchpress),
            })
            .unwrap_err();
        let err = err.downcast::<ReviewError>().unwrap();
        assert_eq!(
            err,
            ReviewError::Validation("unknown coffee id 'no-such-coffee'".to_string())
        );

        assert!(ReviewRepository::new(&conn).list().unwrap().is_empty());
    }
}
