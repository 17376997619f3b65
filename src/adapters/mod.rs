// Adapters layer: concrete intake collaborators behind the `ComplaintIntake` port.

pub mod http;
pub mod in_memory;

pub use http::HttpIntake;
pub use in_memory::InMemoryIntake;
