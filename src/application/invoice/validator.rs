use validator::Validate;

use super::create_invoice::CreateInvoiceCommand;

/// The one message returned for any incomplete creation request.
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// Presence check run before an invoice is registered.
///
/// A field is missing when it is absent, `null` or an empty string. No format
/// checks are made and no per-field detail is reported.
pub fn validate_creation_request(command: &CreateInvoiceCommand) -> Option<&'static str> {
  match command.validate() {
    Ok(()) => None,
    Err(errors) => {
      let fields: Vec<String> = errors.field_errors().keys().map(|f| f.to_string()).collect();
      tracing::debug!(?fields, "Incomplete invoice request");
      Some(ALL_FIELDS_REQUIRED)
    }
  }
}
