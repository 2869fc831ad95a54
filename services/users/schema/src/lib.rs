//! SeaORM entity definitions for the users service.

pub mod users;
