//! Тесты для компилятора запросов

pub mod aliases_tests;
