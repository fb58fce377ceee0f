use axum::{
    extract::{Path, State},
    Json,
};
use kernel::model::id::HotelId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::hotel::{HotelResponse, RoomResponse},
};

pub async fn show_hotel_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<HotelResponse>>> {
    let hotels = registry.hotel_repository().find_all().await?;
    Ok(Json(hotels.into_iter().map(HotelResponse::from).collect()))
}

pub async fn show_hotel(
    _user: AuthorizedUser,
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HotelResponse>> {
    let hotel = registry
        .hotel_repository()
        .find_by_id(hotel_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("no hotel with id {hotel_id}")))?;
    Ok(Json(hotel.into()))
}

pub async fn show_hotel_rooms(
    _user: AuthorizedUser,
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<RoomResponse>>> {
    // 部屋が 1 つもないホテルと存在しないホテルを区別する
    registry
        .hotel_repository()
        .find_by_id(hotel_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("no hotel with id {hotel_id}")))?;
    let rooms = registry.room_repository().find_by_hotel_id(hotel_id).await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}
