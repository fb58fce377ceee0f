use kernel::model::{hotel::Hotel, id::HotelId};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct HotelRow {
    pub hotel_id: Uuid,
    pub name: String,
    pub location: String,
    pub rating: f64,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            id: HotelId::from(row.hotel_id),
            name: row.name,
            location: row.location,
            rating: row.rating,
        }
    }
}
