use async_trait::async_trait;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use geopulse_core::countries::{
    Country, CountryFilters, CountryRepositoryTrait, StoreStatus, UpsertOutcome,
};
use geopulse_core::errors::{DatabaseError, Error, Result};

use super::model::{parse_timestamp, CountryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::countries;

diesel::define_sql_function! {
    /// SQLite's built-in lower(), for case-insensitive name lookups.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

pub struct CountryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CountryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CountryRepository { pool, writer }
    }
}

#[async_trait]
impl CountryRepositoryTrait for CountryRepository {
    /// Insert-or-replace by name, atomically with the exists-check that
    /// decides whether the caller counts this as a create or an update.
    async fn upsert(&self, record: Country) -> Result<UpsertOutcome> {
        let db: CountryDB = record.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UpsertOutcome> {
                let existing: i64 = countries::table
                    .filter(countries::name.eq(&db.name))
                    .count()
                    .get_result(conn)
                    .into_core()?;

                diesel::insert_into(countries::table)
                    .values(&db)
                    .on_conflict(countries::name)
                    .do_update()
                    .set(&db)
                    .execute(conn)
                    .into_core()?;

                Ok(if existing > 0 {
                    UpsertOutcome::Updated
                } else {
                    UpsertOutcome::Created
                })
            })
            .await
    }

    fn get_by_name(&self, lookup: &str) -> Result<Country> {
        let mut conn = get_connection(&self.pool)?;
        let row = countries::table
            .filter(lower(countries::name).eq(lookup.to_lowercase()))
            .first::<CountryDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(Country::from)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(lookup.to_string())))
    }

    async fn delete_by_name(&self, lookup: &str) -> Result<usize> {
        let lookup = lookup.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected = diesel::delete(
                    countries::table.filter(lower(countries::name).eq(lookup.to_lowercase())),
                )
                .execute(conn)
                .into_core()?;

                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(lookup)));
                }
                Ok(affected)
            })
            .await
    }

    /// Filters run in SQL; ordering runs in memory because the decimal
    /// columns are stored as TEXT and would otherwise sort lexically.
    fn list(&self, filters: &CountryFilters) -> Result<Vec<Country>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = countries::table.into_boxed();
        if let Some(region) = &filters.region {
            query = query.filter(countries::region.eq(region.clone()));
        }
        if let Some(currency) = &filters.currency {
            query = query.filter(countries::currency_code.eq(currency.clone()));
        }

        let rows = query
            .load::<CountryDB>(&mut conn)
            .into_core()?;
        let mut result: Vec<Country> = rows.into_iter().map(Country::from).collect();
        if let Some(sort) = filters.sort {
            sort.apply(&mut result);
        }
        Ok(result)
    }

    fn status(&self) -> Result<StoreStatus> {
        let mut conn = get_connection(&self.pool)?;

        let total_count: i64 = countries::table
            .count()
            .get_result(&mut conn)
            .into_core()?;

        let latest: Option<String> = countries::table
            .select(max(countries::last_refreshed_at))
            .first(&mut conn)
            .into_core()?;

        Ok(StoreStatus {
            total_count,
            last_refreshed_at: latest.as_deref().map(parse_timestamp),
        })
    }

    fn top_by_gdp(&self, limit: usize) -> Result<Vec<Country>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = countries::table
            .filter(countries::estimated_gdp.is_not_null())
            .load::<CountryDB>(&mut conn)
            .into_core()?;

        let mut result: Vec<Country> = rows.into_iter().map(Country::from).collect();
        result.sort_by(|a, b| b.estimated_gdp.cmp(&a.estimated_gdp));
        result.truncate(limit);
        Ok(result)
    }
}
