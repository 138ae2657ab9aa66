//! # glint
//!
//! A grammar-driven syntax highlighting engine.
//!
//! Grammar definitions are JSON documents that declare, per rule category, a
//! priority and a list of regular-expression sub-patterns. Given a block of
//! text and a file extension, glint resolves the owning grammar and produces
//! an ordered, non-overlapping sequence of classified tokens.
//!
//! The interesting part is conflict resolution: sub-patterns match the text
//! independently, so candidates may claim overlapping ranges. See
//! [`syntax::tokenizer`] for the resolution rule.

pub mod syntax;
