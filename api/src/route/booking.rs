use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    cancel_booking, register_booking, show_all_bookings, show_booking, show_month_bookings,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/", get(show_all_bookings))
        .route("/month", get(show_month_bookings))
        .route("/:booking_id", get(show_booking).delete(cancel_booking));
    let room_routers = Router::new().route("/:room_id/bookings", post(register_booking));
    Router::new()
        .nest("/bookings", booking_routers)
        .nest("/rooms", room_routers)
}
