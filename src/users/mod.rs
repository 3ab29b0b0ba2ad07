//! Profile management: the authenticated user's own profile and
//! emergency-contact list.

pub mod handlers;
