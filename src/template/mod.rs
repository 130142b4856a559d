//! Fragment inlining for HTML templates
//!
//! Templates reference fragments with placeholders such as `{app:{header}}`,
//! `{deferred:{chat}:{widget}}` or `{svg:{icon}}`. Each placeholder names a
//! file below the components directory:
//!
//! ```text
//! {app:{header}}          -> components/app/header/header.html
//! {deferred:{chat}:{w}}   -> components/app/_deferred/chat/w.html
//! {svg:{icon}}            -> components/app/_svg/icon/icon.svg
//! ```
//!
//! Fragments may contain placeholders of their own; they are resolved
//! recursively.

mod resolver;
mod store;

pub use resolver::{Inliner, Resolution, ResolutionContext};
pub use store::{Fragment, FragmentStore};
