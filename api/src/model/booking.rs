use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    booking::{Booking, BookingPeriod},
    id::{BookingId, RoomId, UserId},
};
use serde::{Deserialize, Serialize};

// 予約リクエスト。想定外のキーは受け付けない
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub from_date: DateTime<Utc>,
    #[garde(skip)]
    pub until_date: DateTime<Utc>,
    #[garde(range(min = 1))]
    pub num_people: i32,
}

impl CreateBookingRequest {
    pub fn period(&self) -> BookingPeriod {
        BookingPeriod::new(self.from_date, self.until_date)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MonthQuery {
    #[garde(range(min = 1, max = 12))]
    pub month: u32,
    #[garde(skip)]
    pub year: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    #[serde(rename = "userID")]
    pub user_id: UserId,
    #[serde(rename = "roomID")]
    pub room_id: RoomId,
    pub from_date: DateTime<Utc>,
    pub until_date: DateTime<Utc>,
    pub price: f64,
    pub num_people: i32,
    pub cancelled: bool,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            room_id: booking.room_id,
            from_date: booking.period.from_date,
            until_date: booking.period.until_date,
            price: booking.price,
            num_people: booking.num_people,
            cancelled: booking.cancelled,
        }
    }
}
