mod codec;
mod error;
mod traits;
mod types;

pub use codec::{decode_event, encode_event};
pub use error::{PublishError, Result};
pub use traits::{EventPublisher, EventSubscriber};
pub use types::{BookEvent, BOOK_EVENTS_TOPIC};
