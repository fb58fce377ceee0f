use std::str::FromStr;

use kernel::model::{
    id::{HotelId, RoomId},
    room::{Room, RoomType},
};
use shared::error::AppError;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: Uuid,
    pub room_type: String,
    pub base_price: f64,
    pub hotel_id: Uuid,
}

impl TryFrom<RoomRow> for Room {
    type Error = AppError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let room_type = RoomType::from_str(&row.room_type).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown room type: {}", row.room_type))
        })?;
        Ok(Room {
            id: RoomId::from(row.room_id),
            room_type,
            base_price: row.base_price,
            hotel_id: HotelId::from(row.hotel_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(room_type: &str) -> RoomRow {
        RoomRow {
            room_id: Uuid::new_v4(),
            room_type: room_type.to_string(),
            base_price: 100.0,
            hotel_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn known_room_type_converts() {
        let room = Room::try_from(row("sea_side")).unwrap();
        assert_eq!(room.room_type, RoomType::SeaSide);
    }

    #[test]
    fn unknown_room_type_is_a_conversion_error() {
        let err = Room::try_from(row("igloo")).unwrap_err();
        assert!(matches!(err, AppError::ConversionEntityError(_)));
    }
}
