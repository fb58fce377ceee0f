use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{
    booking::event::CreateBooking,
    id::{BookingId, RoomId},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::booking::{BookingResponse, CreateBookingRequest, MonthQuery},
};

pub async fn register_booking(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    req.validate(&())?;

    let room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("no room with id {room_id}")))?;

    let event = CreateBooking::new(user.id(), room.id, req.period(), req.num_people);
    event.validate(&room, Utc::now())?;

    // 空室確認。最終的な判定は create のトランザクション内で改めて行う
    let conflicts = registry
        .booking_repository()
        .find_conflicts(room.id, event.period)
        .await?;
    if !conflicts.is_empty() {
        return Err(AppError::RoomUnavailable(format!(
            "room {room_id} is already booked for the requested dates"
        )));
    }

    let booking = registry.booking_repository().create(event).await?;
    tracing::info!(
        booking_id = %booking.id,
        room_id = %room_id,
        "booking registered"
    );
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

pub async fn show_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("no booking with id {booking_id}")))?;
    if !booking.is_accessible_by(user.id(), user.user.role) {
        return Err(AppError::ForbiddenOperation);
    }
    Ok(Json(booking.into()))
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("no booking with id {booking_id}")))?;
    if !booking.is_accessible_by(user.id(), user.user.role) {
        return Err(AppError::ForbiddenOperation);
    }
    let cancelled = registry.booking_repository().cancel(booking_id).await?;
    tracing::info!(booking_id = %booking_id, "booking cancelled");
    Ok(Json(cancelled.into()))
}

pub async fn show_month_bookings(
    _user: AuthorizedUser,
    Query(query): Query<MonthQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    query.validate(&())?;
    let bookings = registry
        .booking_repository()
        .find_in_month(query.month, query.year)
        .await?;
    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

// 全予約の一覧は管理者のみ
pub async fn show_all_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    let bookings = registry.booking_repository().find_all().await?;
    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use kernel::{
        model::{
            auth::AccessToken,
            booking::{Booking, BookingPeriod},
            id::{HotelId, UserId},
            role::Role,
            room::{Room, RoomType},
            user::User,
        },
        repository::{
            auth::MockAuthRepository, booking::MockBookingRepository,
            health::MockHealthCheckRepository, hotel::MockHotelRepository,
            room::MockRoomRepository, user::MockUserRepository,
        },
    };
    use mockall::predicate::eq;

    use super::*;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap() + Duration::days(n)
    }

    fn authorized_user(role: Role) -> AuthorizedUser {
        AuthorizedUser {
            access_token: AccessToken("test-token".to_string()),
            user: User {
                id: UserId::new(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                email: "test@user.com".to_string(),
                role,
            },
        }
    }

    fn double_room() -> Room {
        Room {
            id: RoomId::new(),
            room_type: RoomType::Double,
            base_price: 100.0,
            hotel_id: HotelId::new(),
        }
    }

    fn booking_for(user_id: UserId, room_id: RoomId, from: i64, until: i64) -> Booking {
        Booking {
            id: BookingId::new(),
            user_id,
            room_id,
            period: BookingPeriod::new(day(from), day(until)),
            price: 500.0,
            num_people: 2,
            cancelled: false,
        }
    }

    fn registry_with(
        booking_repository: MockBookingRepository,
        room_repository: MockRoomRepository,
    ) -> AppRegistry {
        AppRegistry::from_parts(
            Arc::new(MockAuthRepository::new()),
            Arc::new(booking_repository),
            Arc::new(MockHealthCheckRepository::new()),
            Arc::new(MockHotelRepository::new()),
            Arc::new(room_repository),
            Arc::new(MockUserRepository::new()),
        )
    }

    fn create_request(from: i64, until: i64, num_people: i32) -> CreateBookingRequest {
        CreateBookingRequest {
            from_date: day(from),
            until_date: day(until),
            num_people,
        }
    }

    #[tokio::test]
    async fn a_valid_request_creates_a_booking() {
        let user = authorized_user(Role::User);
        let user_id = user.id();
        let room = double_room();
        let room_id = room.id;

        let mut room_repository = MockRoomRepository::new();
        room_repository
            .expect_find_by_id()
            .with(eq(room_id))
            .returning(move |_| Ok(Some(room.clone())));

        let mut booking_repository = MockBookingRepository::new();
        booking_repository
            .expect_find_conflicts()
            .returning(|_, _| Ok(vec![]));
        booking_repository
            .expect_create()
            .withf(move |event| event.user_id == user_id && event.num_people == 2)
            .returning(move |event| {
                let price = event.price_with(100.0);
                Ok(Booking {
                    id: BookingId::new(),
                    user_id: event.user_id,
                    room_id: event.room_id,
                    period: event.period,
                    price,
                    num_people: event.num_people,
                    cancelled: false,
                })
            });

        let registry = registry_with(booking_repository, room_repository);
        let res = register_booking(
            user,
            Path(room_id),
            State(registry),
            Json(create_request(1, 6, 2)),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn an_oversized_party_is_rejected_and_nothing_is_persisted() {
        let room = double_room();
        let room_id = room.id;

        let mut room_repository = MockRoomRepository::new();
        room_repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(room.clone())));

        let mut booking_repository = MockBookingRepository::new();
        booking_repository.expect_find_conflicts().never();
        booking_repository.expect_create().never();

        let registry = registry_with(booking_repository, room_repository);
        let err = register_booking(
            authorized_user(Role::User),
            Path(room_id),
            State(registry),
            Json(create_request(1, 6, 4)),
        )
        .await
        .unwrap_err();

        let AppError::BookingValidation(fields) = err else {
            panic!("expected a validation error");
        };
        assert!(fields["capacity"].contains("got 4"));
    }

    #[tokio::test]
    async fn an_overlapping_booking_makes_the_room_unavailable() {
        let user = authorized_user(Role::User);
        let room = double_room();
        let room_id = room.id;

        let mut room_repository = MockRoomRepository::new();
        room_repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(room.clone())));

        // 既存予約 [day1, day6)、要求 [day3, day8)
        let mut booking_repository = MockBookingRepository::new();
        booking_repository
            .expect_find_conflicts()
            .returning(move |room_id, _| Ok(vec![booking_for(UserId::new(), room_id, 1, 6)]));
        booking_repository.expect_create().never();

        let registry = registry_with(booking_repository, room_repository);
        let err = register_booking(
            user,
            Path(room_id),
            State(registry),
            Json(create_request(3, 8, 2)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::RoomUnavailable(_)));
    }

    #[tokio::test]
    async fn booking_an_unknown_room_is_not_found() {
        let mut room_repository = MockRoomRepository::new();
        room_repository.expect_find_by_id().returning(|_| Ok(None));

        let mut booking_repository = MockBookingRepository::new();
        booking_repository.expect_create().never();

        let registry = registry_with(booking_repository, room_repository);
        let err = register_booking(
            authorized_user(Role::User),
            Path(RoomId::new()),
            State(registry),
            Json(create_request(1, 6, 2)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
    }

    #[tokio::test]
    async fn the_owner_can_see_their_booking() {
        let user = authorized_user(Role::User);
        let booking = booking_for(user.id(), RoomId::new(), 1, 6);
        let booking_id = booking.id;

        let mut booking_repository = MockBookingRepository::new();
        booking_repository
            .expect_find_by_id()
            .with(eq(booking_id))
            .returning(move |_| Ok(Some(booking.clone())));

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let res = show_booking(user, Path(booking_id), State(registry)).await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn a_stranger_cannot_see_someone_elses_booking() {
        let booking = booking_for(UserId::new(), RoomId::new(), 1, 6);
        let booking_id = booking.id;

        let mut booking_repository = MockBookingRepository::new();
        booking_repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booking.clone())));

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let err = show_booking(authorized_user(Role::User), Path(booking_id), State(registry))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenOperation));
    }

    #[tokio::test]
    async fn an_admin_can_see_any_booking() {
        let booking = booking_for(UserId::new(), RoomId::new(), 1, 6);
        let booking_id = booking.id;

        let mut booking_repository = MockBookingRepository::new();
        booking_repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booking.clone())));

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let res = show_booking(authorized_user(Role::Admin), Path(booking_id), State(registry)).await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn the_owner_can_cancel_their_booking() {
        let user = authorized_user(Role::User);
        let booking = booking_for(user.id(), RoomId::new(), 1, 6);
        let booking_id = booking.id;

        let mut booking_repository = MockBookingRepository::new();
        {
            let booking = booking.clone();
            booking_repository
                .expect_find_by_id()
                .returning(move |_| Ok(Some(booking.clone())));
        }
        booking_repository
            .expect_cancel()
            .with(eq(booking_id))
            .returning(move |_| {
                Ok(Booking {
                    cancelled: true,
                    ..booking.clone()
                })
            });

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let res = cancel_booking(user, Path(booking_id), State(registry))
            .await
            .unwrap();
        assert!(res.0.cancelled);
    }

    #[tokio::test]
    async fn a_stranger_cannot_cancel_someone_elses_booking() {
        let booking = booking_for(UserId::new(), RoomId::new(), 1, 6);
        let booking_id = booking.id;

        let mut booking_repository = MockBookingRepository::new();
        booking_repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booking.clone())));
        booking_repository.expect_cancel().never();

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let err = cancel_booking(authorized_user(Role::User), Path(booking_id), State(registry))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenOperation));
    }

    #[tokio::test]
    async fn cancelling_twice_is_rejected() {
        let user = authorized_user(Role::User);
        let mut booking = booking_for(user.id(), RoomId::new(), 1, 6);
        booking.cancelled = true;
        let booking_id = booking.id;

        let mut booking_repository = MockBookingRepository::new();
        booking_repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booking.clone())));
        booking_repository.expect_cancel().returning(|booking_id| {
            Err(AppError::UnprocessableEntity(format!(
                "booking {booking_id} is already cancelled"
            )))
        });

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let err = cancel_booking(user, Path(booking_id), State(registry))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn cancelling_an_unknown_booking_is_not_found() {
        let mut booking_repository = MockBookingRepository::new();
        booking_repository.expect_find_by_id().returning(|_| Ok(None));
        booking_repository.expect_cancel().never();

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let err = cancel_booking(
            authorized_user(Role::User),
            Path(BookingId::new()),
            State(registry),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
    }

    #[tokio::test]
    async fn month_listing_queries_the_requested_month() {
        let mut booking_repository = MockBookingRepository::new();
        booking_repository
            .expect_find_in_month()
            .with(eq(6), eq(2030))
            .returning(|_, _| Ok(vec![booking_for(UserId::new(), RoomId::new(), 1, 6)]));

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let res = show_month_bookings(
            authorized_user(Role::User),
            Query(MonthQuery {
                month: 6,
                year: 2030,
            }),
            State(registry),
        )
        .await
        .unwrap();
        assert_eq!(res.0.len(), 1);
    }

    #[tokio::test]
    async fn an_out_of_range_month_is_a_bad_request() {
        let mut booking_repository = MockBookingRepository::new();
        booking_repository.expect_find_in_month().never();

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let err = show_month_bookings(
            authorized_user(Role::User),
            Query(MonthQuery {
                month: 13,
                year: 2030,
            }),
            State(registry),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn only_admins_can_list_all_bookings() {
        let mut booking_repository = MockBookingRepository::new();
        booking_repository.expect_find_all().never();

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let err = show_all_bookings(authorized_user(Role::User), State(registry))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenOperation));

        let mut booking_repository = MockBookingRepository::new();
        booking_repository
            .expect_find_all()
            .returning(|| Ok(vec![booking_for(UserId::new(), RoomId::new(), 1, 6)]));

        let registry = registry_with(booking_repository, MockRoomRepository::new());
        let res = show_all_bookings(authorized_user(Role::Admin), State(registry))
            .await
            .unwrap();
        assert_eq!(res.0.len(), 1);
    }
}
