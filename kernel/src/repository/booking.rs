use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    booking::{event::CreateBooking, Booking, BookingPeriod},
    id::{BookingId, RoomId},
};

#[mockall::automock]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 予約操作。空室確認と料金計算を含む
    async fn create(&self, event: CreateBooking) -> AppResult<Booking>;
    // キャンセル操作。キャンセル済みの予約は対象外
    async fn cancel(&self, booking_id: BookingId) -> AppResult<Booking>;
    // 指定した部屋・期間に重なる未キャンセルの予約を取得する
    async fn find_conflicts(
        &self,
        room_id: RoomId,
        period: BookingPeriod,
    ) -> AppResult<Vec<Booking>>;
    // 開始日または終了日が指定した月に入る未キャンセルの予約
    async fn find_in_month(&self, month: u32, year: i32) -> AppResult<Vec<Booking>>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    async fn find_all(&self) -> AppResult<Vec<Booking>>;
}
