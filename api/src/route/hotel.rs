use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::hotel::{show_hotel, show_hotel_list, show_hotel_rooms};

pub fn build_hotel_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(show_hotel_list))
        .route("/:hotel_id", get(show_hotel))
        .route("/:hotel_id/rooms", get(show_hotel_rooms));
    Router::new().nest("/hotels", routers)
}
