pub mod postgrest;
pub mod util;

pub use postgrest::PostgrestClient;
