//! Document parsing utilities
//!
//! This module contains the resolvers and extractors the loader combines:
//! style and numbering catalogs, paragraph text, lists and tables.

pub(crate) mod list;
pub(crate) mod numbering;
pub(crate) mod styles;
pub(crate) mod table;
pub(crate) mod text;
