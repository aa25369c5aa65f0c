//! Booking form controller: add-on selection, live price summary and the
//! WhatsApp hand-off of a finished booking.

pub mod form;
pub mod handoff;
pub mod message;
pub mod selection;
pub mod summary;

pub use form::{BookingForm, FormError, ValidatedForm};
pub use handoff::{qr_data_uri, HandoffError};
pub use message::{compose_order_message, whatsapp_link};
pub use selection::{BookingSelection, SelectionError};
pub use summary::PriceSummary;
