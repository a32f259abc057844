//! Тесты для рабочего процесса

pub mod transitions_tests;
