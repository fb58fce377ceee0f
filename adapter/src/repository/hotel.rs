use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{hotel::Hotel, id::HotelId},
    repository::hotel::HotelRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::hotel::HotelRow, ConnectionPool};

#[derive(new)]
pub struct HotelRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl HotelRepository for HotelRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Hotel>> {
        let rows = sqlx::query_as::<_, HotelRow>(
            "SELECT hotel_id, name, location, rating FROM hotels ORDER BY name",
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    async fn find_by_id(&self, hotel_id: HotelId) -> AppResult<Option<Hotel>> {
        let row = sqlx::query_as::<_, HotelRow>(
            "SELECT hotel_id, name, location, rating FROM hotels WHERE hotel_id = $1",
        )
        .bind(hotel_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(row.map(Hotel::from))
    }
}
