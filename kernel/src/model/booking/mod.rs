use chrono::{DateTime, Utc};

use super::{
    id::{BookingId, RoomId, UserId},
    role::Role,
};

pub mod event;

/// 宿泊期間。from_date の夜から泊まり、until_date の朝にチェックアウトする
/// 半開区間 [from_date, until_date) として扱う。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingPeriod {
    pub from_date: DateTime<Utc>,
    pub until_date: DateTime<Utc>,
}

impl BookingPeriod {
    pub fn new(from_date: DateTime<Utc>, until_date: DateTime<Utc>) -> Self {
        Self {
            from_date,
            until_date,
        }
    }

    /// 既存予約 `existing` と期間が重なるかどうか。
    /// 3 つの条件は境界の開閉が非対称なので 1 つの比較にまとめない。
    /// 同日チェックアウト・チェックイン（existing.until == self.from）は重複にしない。
    pub fn conflicts_with(&self, existing: &BookingPeriod) -> bool {
        let starts_inside =
            existing.from_date >= self.from_date && existing.from_date < self.until_date;
        let ends_inside =
            existing.until_date > self.from_date && existing.until_date <= self.until_date;
        let contains =
            existing.from_date <= self.from_date && existing.until_date >= self.until_date;
        starts_inside || ends_inside || contains
    }

    /// 請求対象となる宿泊日数。時間単位の端数は最も近い日数に丸める。
    pub fn nights(&self) -> i64 {
        let hours = (self.until_date - self.from_date).num_minutes() as f64 / 60.0;
        (hours / 24.0).round() as i64
    }

    /// 日付まわりの検証をまとめて行い、見つかった問題をすべて返す。
    /// `now` を引数にしているのはテストで時刻を固定するため。
    pub fn validate_dates(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut errors = Vec::new();
        if now > self.from_date {
            errors.push("can't use a date before today date as starting date".to_string());
        }
        if now > self.until_date {
            errors.push("can't use a date before today as ending date".to_string());
        }
        if self.from_date >= self.until_date {
            errors.push("end date must be after start date".to_string());
        }
        errors
    }
}

#[derive(Debug, Clone)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub period: BookingPeriod,
    pub price: f64,
    pub num_people: i32,
    pub cancelled: bool,
}

impl Booking {
    /// 予約の閲覧・キャンセルは所有者本人か管理者のみ許可する
    pub fn is_accessible_by(&self, user_id: UserId, role: Role) -> bool {
        self.user_id == user_id || role == Role::Admin
    }
}
