//! Тесты для общих типов и конфигурации

pub mod types_tests;
