mod registry_storage;

pub use registry_storage::{
    InMemoryRegistryStorage, JsonFileRegistryStorage, RegistryStorage, StorageError,
};
