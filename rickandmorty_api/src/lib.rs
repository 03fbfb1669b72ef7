mod client;
mod errors;
mod executor;
mod request;
mod response;
pub mod transport;
pub mod types;
pub use self::client::{CharacterClient, CharacterSearch, FixedCharacterClient, DEFAULT_BASE_URL};
pub use self::errors::{Error, ErrorKind};
pub use self::executor::{NetworkExecutor, DEFAULT_TIMEOUT};
pub use self::request::{HttpMethod, RequestDescriptor};
pub use self::response::{ExecutionResult, ResponseMeta};
