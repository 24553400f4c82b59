use chrono::Utc;
use sqlx::{types::Json, QueryBuilder, Sqlite};
use std::collections::HashMap;

use super::model::{Counsellor, NewCounsellor};
use crate::config::DbPool;

/// Tag match against one entry of the JSON `specialties` array,
/// ignoring case. The caller closes the `IN (...)` or `= ?` clause.
const SPECIALTY_MATCH: &str =
    " AND EXISTS (SELECT 1 FROM json_each(counsellors.specialties) WHERE json_each.value COLLATE NOCASE";

pub struct CounsellorCrud {
    pool: DbPool,
}

impl CounsellorCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, counsellor: &NewCounsellor) -> Result<Counsellor, sqlx::Error> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO counsellors
                (name, role, experience, qualification, price, rating, total_ratings,
                 image_url, specialties, available, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&counsellor.name)
        .bind(&counsellor.role)
        .bind(&counsellor.experience)
        .bind(&counsellor.qualification)
        .bind(&counsellor.price)
        .bind(counsellor.rating)
        .bind(counsellor.total_ratings)
        .bind(&counsellor.image_url)
        .bind(Json(&counsellor.specialties))
        .bind(counsellor.available)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Counsellor>, sqlx::Error> {
        sqlx::query_as::<_, Counsellor>("SELECT * FROM counsellors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Counsellor>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM counsellors WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let counsellors = query
            .build_query_as::<Counsellor>()
            .fetch_all(&self.pool)
            .await?;

        Ok(counsellors.into_iter().map(|c| (c.id, c)).collect())
    }

    /// Available counsellors carrying every tag in `specialties`.
    pub async fn list_available(&self, specialties: &[String]) -> Result<Vec<Counsellor>, sqlx::Error> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM counsellors WHERE available = 1");

        for specialty in specialties {
            query
                .push(SPECIALTY_MATCH)
                .push(" = ")
                .push_bind(specialty.clone())
                .push(")");
        }

        query.push(" ORDER BY id");

        query
            .build_query_as::<Counsellor>()
            .fetch_all(&self.pool)
            .await
    }

    /// Available counsellors sharing at least one tag with `preferences`,
    /// best rated first. No preferences means no tag filter.
    pub async fn recommended(
        &self,
        preferences: &[String],
        limit: i64,
    ) -> Result<Vec<Counsellor>, sqlx::Error> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM counsellors WHERE available = 1");

        if !preferences.is_empty() {
            query.push(SPECIALTY_MATCH).push(" IN (");
            let mut separated = query.separated(", ");
            for preference in preferences {
                separated.push_bind(preference.clone());
            }
            separated.push_unseparated("))");
        }

        query
            .push(" ORDER BY rating DESC, id LIMIT ")
            .push_bind(limit);

        query
            .build_query_as::<Counsellor>()
            .fetch_all(&self.pool)
            .await
    }
}
