//! Тесты для слоя хранилища (без живой базы)

pub mod db_tests;
pub mod queries_tests;
