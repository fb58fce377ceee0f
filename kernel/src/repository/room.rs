use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{HotelId, RoomId},
    room::Room,
};

#[mockall::automock]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
    async fn find_by_hotel_id(&self, hotel_id: HotelId) -> AppResult<Vec<Room>>;
}
