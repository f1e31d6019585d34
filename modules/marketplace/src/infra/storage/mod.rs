pub mod entity;
pub mod file;
pub mod kv;
pub mod kv_repo;
pub mod mapper;
pub mod memory;

pub use file::FileStore;
pub use kv::KeyValueStore;
pub use kv_repo::KvRepository;
pub use memory::MemoryStore;
