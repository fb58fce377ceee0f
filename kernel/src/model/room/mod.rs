use strum::{AsRefStr, EnumString};

use super::id::{HotelId, RoomId};

/// 部屋タイプ。収容人数の上限はタイプごとに固定で、設定では変えられない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    SeaSide,
    Deluxe,
}

impl RoomType {
    pub fn capacity(&self) -> i32 {
        match self {
            RoomType::Single => 1,
            RoomType::Double => 3,
            RoomType::SeaSide => 3,
            RoomType::Deluxe => 4,
        }
    }

    pub fn validate_capacity(&self, num_people: i32) -> Result<(), String> {
        match self {
            RoomType::Single if num_people > 1 => Err(format!(
                "single room can only accommodate 1 person, but got {num_people}"
            )),
            RoomType::Double if num_people > 3 => Err(format!(
                "double room can only accommodate 3 people, but got {num_people}"
            )),
            RoomType::SeaSide if num_people > 3 => Err(format!(
                "sea-side room can only accommodate 3 people, but got {num_people}"
            )),
            RoomType::Deluxe if num_people > 4 => Err(format!(
                "deluxe room can only accommodate 4 people, but got {num_people}"
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub room_type: RoomType,
    pub base_price: f64,
    pub hotel_id: HotelId,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use std::str::FromStr;

    use super::*;

    #[rstest]
    #[case(RoomType::Single, 1)]
    #[case(RoomType::Double, 3)]
    #[case(RoomType::SeaSide, 3)]
    #[case(RoomType::Deluxe, 4)]
    fn party_size_at_capacity_is_accepted(#[case] room_type: RoomType, #[case] max: i32) {
        assert_eq!(room_type.capacity(), max);
        assert!(room_type.validate_capacity(max).is_ok());
        assert!(room_type.validate_capacity(1).is_ok());
    }

    #[rstest]
    #[case(RoomType::Single, 2)]
    #[case(RoomType::Double, 4)]
    #[case(RoomType::SeaSide, 4)]
    #[case(RoomType::Deluxe, 5)]
    fn party_size_above_capacity_is_rejected(#[case] room_type: RoomType, #[case] over: i32) {
        let msg = room_type.validate_capacity(over).unwrap_err();
        assert!(msg.contains(&format!("got {over}")));
    }

    #[test]
    fn unknown_room_type_fails_to_parse() {
        assert!(RoomType::from_str("penthouse").is_err());
        assert_eq!(RoomType::from_str("sea_side").unwrap(), RoomType::SeaSide);
    }
}
