use derive_new::new;

use crate::model::id::UserId;

#[derive(new, Debug)]
pub struct CreateToken {
    pub user_id: UserId,
}
