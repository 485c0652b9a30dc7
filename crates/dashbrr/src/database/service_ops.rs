//! `ServiceStore` over the `services` table.

use async_trait::async_trait;
use dashbrr_core::{Error, Result, ServiceRecord, ServiceStore};
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;

const SELECT_COLUMNS: &str = "SELECT instance_id, display_name, url, api_key, access_url FROM services";

#[async_trait]
impl ServiceStore for Database {
    async fn create_service(&self, record: &ServiceRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO services (instance_id, display_name, url, api_key, access_url)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.instance_id)
        .bind(&record.display_name)
        .bind(&record.url)
        .bind(record.api_key.as_deref())
        .bind(record.access_url.as_deref())
        .execute(self.pool().await?)
        .await
        .map(|_| ())
        .map_err(|e| {
            if e.to_string().to_lowercase().contains("unique") {
                Error::database_error(format!(
                    "Service '{}' ({}) already exists",
                    record.instance_id, record.url
                ))
            } else {
                Error::database_error(format!("Failed to create service: {e}"))
            }
        })
    }

    async fn delete_service(&self, instance_id: &str) -> Result<bool> {
        sqlx::query("DELETE FROM services WHERE instance_id = ?")
            .bind(instance_id)
            .execute(self.pool().await?)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(|e| Error::database_error(format!("Failed to delete service: {e}")))
    }

    async fn all_services(&self) -> Result<Vec<ServiceRecord>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(self.pool().await?)
            .await
            .map_err(|e| Error::database_error(format!("Failed to query services: {e}")))?;

        rows.iter().map(parse_service_row).collect()
    }

    async fn find_service_by_url(&self, url: &str) -> Result<Option<ServiceRecord>> {
        sqlx::query(&format!("{SELECT_COLUMNS} WHERE url = ?"))
            .bind(url)
            .fetch_optional(self.pool().await?)
            .await
            .map_err(|e| Error::database_error(format!("Failed to query service: {e}")))
            .and_then(|row| row.as_ref().map(parse_service_row).transpose())
    }
}

fn parse_service_row(row: &SqliteRow) -> Result<ServiceRecord> {
    let column = |name: &str, e: sqlx::Error| {
        Error::database_error(format!("Failed to read {name}: {e}"))
    };

    Ok(ServiceRecord {
        instance_id: row
            .try_get("instance_id")
            .map_err(|e| column("instance_id", e))?,
        display_name: row
            .try_get("display_name")
            .map_err(|e| column("display_name", e))?,
        url: row.try_get("url").map_err(|e| column("url", e))?,
        api_key: row.try_get("api_key").map_err(|e| column("api_key", e))?,
        access_url: row
            .try_get("access_url")
            .map_err(|e| column("access_url", e))?,
    })
}
