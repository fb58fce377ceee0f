use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{HotelId, RoomId},
        room::Room,
    },
    repository::room::RoomRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::room::RoomRow, ConnectionPool};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(
            "SELECT room_id, room_type, base_price, hotel_id FROM rooms WHERE room_id = $1",
        )
        .bind(room_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        row.map(Room::try_from).transpose()
    }

    async fn find_by_hotel_id(&self, hotel_id: HotelId) -> AppResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT room_id, room_type, base_price, hotel_id
            FROM rooms
            WHERE hotel_id = $1
            ORDER BY base_price
            "#,
        )
        .bind(hotel_id.raw())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Room::try_from).collect()
    }
}
