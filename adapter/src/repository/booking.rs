use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        booking::{event::CreateBooking, Booking, BookingPeriod},
        id::{BookingId, RoomId},
    },
    repository::booking::BookingRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::booking::BookingRow, ConnectionPool};

// 要求期間 [$2, $3) と重なる予約の条件。境界の開閉は 3 句で異なるため
// 1 つの比較にまとめず、このままの形で保つ。
const CONFLICT_CONDITION: &str = r#"
    cancelled = false
    AND (
        (from_date >= $2 AND from_date < $3)
        OR (until_date > $2 AND until_date <= $3)
        OR (from_date <= $2 AND until_date >= $3)
    )
"#;

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        // 同じ部屋への同時リクエストを直列化するため、部屋の行をロックする。
        // ロックを取った後の空室確認が正となる。
        let base_price: f64 =
            sqlx::query_scalar("SELECT base_price FROM rooms WHERE room_id = $1 FOR UPDATE")
                .bind(event.room_id.raw())
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?
                .ok_or_else(|| {
                    AppError::EntityNotFound(format!("no room with id {}", event.room_id))
                })?;

        let conflicts: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM bookings WHERE room_id = $1 AND {CONFLICT_CONDITION}"
        ))
        .bind(event.room_id.raw())
        .bind(event.period.from_date)
        .bind(event.period.until_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if conflicts > 0 {
            return Err(AppError::RoomUnavailable(format!(
                "room {} is already booked for the requested dates",
                event.room_id
            )));
        }

        let booking_id = BookingId::new();
        let price = event.price_with(base_price);
        sqlx::query(
            r#"
            INSERT INTO bookings (
                booking_id, user_id, room_id,
                from_date, until_date, price, num_people, cancelled
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, false)
            "#,
        )
        .bind(booking_id.raw())
        .bind(event.user_id.raw())
        .bind(event.room_id.raw())
        .bind(event.period.from_date)
        .bind(event.period.until_date)
        .bind(price)
        .bind(event.num_people)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Booking {
            id: booking_id,
            user_id: event.user_id,
            room_id: event.room_id,
            period: event.period,
            price,
            num_people: event.num_people,
            cancelled: false,
        })
    }

    async fn cancel(&self, booking_id: BookingId) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT booking_id, user_id, room_id,
                   from_date, until_date, price, num_people, cancelled
            FROM bookings
            WHERE booking_id = $1
            FOR UPDATE
            "#,
        )
        .bind(booking_id.raw())
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound(format!("no booking with id {booking_id}")))?;

        // キャンセルは一度だけ。キャンセル済みの予約への再実行は拒否する
        let res =
            sqlx::query("UPDATE bookings SET cancelled = true WHERE booking_id = $1 AND cancelled = false")
                .bind(booking_id.raw())
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::UnprocessableEntity(format!(
                "booking {booking_id} is already cancelled"
            )));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Booking {
            cancelled: true,
            ..Booking::from(row)
        })
    }

    async fn find_conflicts(
        &self,
        room_id: RoomId,
        period: BookingPeriod,
    ) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT booking_id, user_id, room_id,
                   from_date, until_date, price, num_people, cancelled
            FROM bookings
            WHERE room_id = $1 AND {CONFLICT_CONDITION}
            ORDER BY from_date
            "#
        ))
        .bind(room_id.raw())
        .bind(period.from_date)
        .bind(period.until_date)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn find_in_month(&self, month: u32, year: i32) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT booking_id, user_id, room_id,
                   from_date, until_date, price, num_people, cancelled
            FROM bookings
            WHERE cancelled = false
              AND (
                  (EXTRACT(MONTH FROM from_date) = $1 AND EXTRACT(YEAR FROM from_date) = $2)
                  OR (EXTRACT(MONTH FROM until_date) = $1 AND EXTRACT(YEAR FROM until_date) = $2)
              )
            ORDER BY from_date
            "#,
        )
        .bind(month as i32)
        .bind(year)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT booking_id, user_id, room_id,
                   from_date, until_date, price, num_people, cancelled
            FROM bookings
            WHERE booking_id = $1
            "#,
        )
        .bind(booking_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(row.map(Booking::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT booking_id, user_id, room_id,
                   from_date, until_date, price, num_people, cancelled
            FROM bookings
            ORDER BY from_date
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }
}
