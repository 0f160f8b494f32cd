pub mod field_service;
