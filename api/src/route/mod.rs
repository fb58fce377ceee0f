use axum::Router;
use registry::AppRegistry;

pub mod auth;
pub mod booking;
pub mod health;
pub mod hotel;

pub fn build_app_routers() -> Router<AppRegistry> {
    let v1 = Router::new()
        .merge(booking::build_booking_routers())
        .merge(hotel::build_hotel_routers());
    Router::new()
        .merge(health::build_health_check_routers())
        .merge(auth::build_auth_routers())
        .nest("/api/v1", v1)
}
