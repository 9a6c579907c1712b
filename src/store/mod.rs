pub mod requests;
pub mod results;

pub use requests::{RequestState, RequestStore};
pub use results::{ResultState, ResultStore};
