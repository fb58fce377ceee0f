use chrono::{DateTime, Utc};
use derive_new::new;
use shared::error::{AppError, AppResult, FieldErrors};

use super::BookingPeriod;
use crate::model::{
    id::{RoomId, UserId},
    room::Room,
};

#[derive(new, Debug)]
pub struct CreateBooking {
    pub user_id: UserId,
    pub room_id: RoomId,
    pub period: BookingPeriod,
    pub num_people: i32,
}

impl CreateBooking {
    /// 収容人数と日付の検証。最初の失敗で止めず、見つかった問題を
    /// field 名 → メッセージの形ですべて返す。
    pub fn validate(&self, room: &Room, now: DateTime<Utc>) -> AppResult<()> {
        let mut errors = FieldErrors::new();
        if let Err(message) = room.room_type.validate_capacity(self.num_people) {
            errors.insert("capacity".to_string(), message);
        }
        let date_errors = self.period.validate_dates(now);
        if !date_errors.is_empty() {
            errors.insert("date".to_string(), date_errors.join(", "));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::BookingValidation(errors))
        }
    }

    /// 宿泊料金は 1 泊あたりの基本料金 × 請求対象日数
    pub fn price_with(&self, base_price: f64) -> f64 {
        base_price * self.period.nights() as f64
    }
}
