use super::id::HotelId;

#[derive(Debug, Clone)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub location: String,
    pub rating: f64,
}
