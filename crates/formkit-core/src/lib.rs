pub mod builder;
pub mod catalog;
pub mod definition;
pub mod error;
pub mod field;
pub mod form;
pub mod io;
pub mod message;
pub mod page;
pub mod render;
pub mod session;
pub mod validate;

pub use builder::{create_form, FormBuilder};
pub use error::{FormError, Result};
pub use form::{FormDefinition, Step};
pub use message::{FieldValue, FormData, FormMessage};
pub use session::{Delivery, FormSession, Notifier, Outcome, SessionId, Surface};
