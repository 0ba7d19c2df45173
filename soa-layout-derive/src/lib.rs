//! This crate provides the derive macro for Record.

use proc_macro::TokenStream;

mod record;
use record::record;

#[proc_macro_derive(Record, attributes(record_derive))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record(input)
}
