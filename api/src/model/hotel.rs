use kernel::model::{
    hotel::Hotel,
    id::{HotelId, RoomId},
    room::Room,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelResponse {
    pub id: HotelId,
    pub name: String,
    pub location: String,
    pub rating: f64,
}

impl From<Hotel> for HotelResponse {
    fn from(hotel: Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name,
            location: hotel.location,
            rating: hotel.rating,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: RoomId,
    #[serde(rename = "type")]
    pub room_type: String,
    pub base_price: f64,
    pub hotel_id: HotelId,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            room_type: room.room_type.as_ref().to_string(),
            base_price: room.base_price,
            hotel_id: room.hotel_id,
        }
    }
}
