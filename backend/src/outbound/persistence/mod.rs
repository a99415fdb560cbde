//! In-process persistence adapters.
//!
//! Records live only in process memory and vanish on restart.

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
