use chrono::{DateTime, Utc};
use kernel::model::{
    booking::{Booking, BookingPeriod},
    id::{BookingId, RoomId, UserId},
};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub from_date: DateTime<Utc>,
    pub until_date: DateTime<Utc>,
    pub price: f64,
    pub num_people: i32,
    pub cancelled: bool,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: BookingId::from(row.booking_id),
            user_id: UserId::from(row.user_id),
            room_id: RoomId::from(row.room_id),
            period: BookingPeriod::new(row.from_date, row.until_date),
            price: row.price,
            num_people: row.num_people,
            cancelled: row.cancelled,
        }
    }
}
