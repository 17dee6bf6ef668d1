//! `SeaORM` entity definitions.

pub mod accounts;
pub mod clients;
pub mod sea_orm_active_enums;
