// nativestore-mobile — Native mobile bindings for iOS and Android
// This crate exports the storage bridge via UniFFI

pub use nativestore_core::*;
