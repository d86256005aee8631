// Adapters layer: concrete AccountStore implementations.

pub mod local;
pub mod memory;

#[cfg(feature = "aws")]
pub mod dynamodb;

pub use local::LocalStore;
pub use memory::InMemoryStore;

#[cfg(feature = "aws")]
pub use dynamodb::DynamoDbStore;
