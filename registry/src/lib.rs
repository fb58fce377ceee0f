use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    redis::RedisClient,
    repository::{
        auth::AuthRepositoryImpl, booking::BookingRepositoryImpl, health::HealthCheckRepositoryImpl,
        hotel::HotelRepositoryImpl, room::RoomRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::repository::{
    auth::AuthRepository, booking::BookingRepository, health::HealthCheckRepository,
    hotel::HotelRepository, room::RoomRepository, user::UserRepository,
};
use shared::config::AppConfig;

/// 依存の注入口。ストアのハンドルをグローバルに持たず、
/// ここで組み立てたものをハンドラまで引き回す。
#[derive(Clone)]
pub struct AppRegistry {
    auth_repository: Arc<dyn AuthRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    health_check_repository: Arc<dyn HealthCheckRepository>,
    hotel_repository: Arc<dyn HotelRepository>,
    room_repository: Arc<dyn RoomRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, kv: Arc<RedisClient>, config: &AppConfig) -> Self {
        Self {
            auth_repository: Arc::new(AuthRepositoryImpl::new(
                pool.clone(),
                kv.clone(),
                config.auth.ttl,
            )),
            booking_repository: Arc::new(BookingRepositoryImpl::new(pool.clone())),
            health_check_repository: Arc::new(HealthCheckRepositoryImpl::new(pool.clone())),
            hotel_repository: Arc::new(HotelRepositoryImpl::new(pool.clone())),
            room_repository: Arc::new(RoomRepositoryImpl::new(pool.clone())),
            user_repository: Arc::new(UserRepositoryImpl::new(pool)),
        }
    }

    /// テストがモックリポジトリを差し込むための組み立て口
    pub fn from_parts(
        auth_repository: Arc<dyn AuthRepository>,
        booking_repository: Arc<dyn BookingRepository>,
        health_check_repository: Arc<dyn HealthCheckRepository>,
        hotel_repository: Arc<dyn HotelRepository>,
        room_repository: Arc<dyn RoomRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            auth_repository,
            booking_repository,
            health_check_repository,
            hotel_repository,
            room_repository,
            user_repository,
        }
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn hotel_repository(&self) -> Arc<dyn HotelRepository> {
        self.hotel_repository.clone()
    }

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }
}
