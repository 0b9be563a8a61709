mod document;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Document)] derive macro
// ============================================================================

/// Derive macro for the `Document` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Document)]
/// #[document(collection = "mahasiswas")]
/// struct Student {
///     #[document(id)]
///     pub id: String,
///     #[document(unique)]
///     pub nim: String,
///     pub nama: String,
/// }
/// ```
///
/// - `#[document(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[document(id)]` marks the field holding the store-assigned identifier.
///   If omitted, defaults to a field named `id`.
/// - `#[document(unique)]` marks a field whose value the store keeps unique
///   within the collection. May be repeated.
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    document::derive_document(input)
}
