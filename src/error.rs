/// Failures that abort a single document-generation attempt.
///
/// Validation problems never show up here: they are returned as field maps by
/// the validator so the wizard can surface them without aborting. Payment-code
/// problems never show up here either: a bank account that cannot be turned
/// into an IBAN merely drops the payment code from the document. An absent or
/// unparseable configuration fails earlier, at the provider boundary, as a
/// [`crate::config::ConfigError`].
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("není vybrána žádná varianta pokoje")]
    NoRoomVariantSelected,
    #[error("nenalezena varianta pokoje '{0}'")]
    UnknownRoomVariant(String),
}
