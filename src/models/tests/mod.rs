//! Тесты для моделей данных
