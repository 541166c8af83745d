pub mod json_lines;
pub mod postgres_repository;
pub use json_lines::JsonLinesSink;
pub use postgres_repository::PostgresRepository;
