pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::Invoice;
pub use errors::{EmissionError, InvoiceError};
pub use ports::{EmissionProvider, EmissionRequest, EmissionResponse, InvoiceRepository};
pub use services::{InvoiceData, InvoiceService};
pub use value_objects::{InvoiceStatus, ValueObjectError};
